use super::status_page::TemplateError;
use crate::store::{InvalidKey, StoreError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error("Invalid room or player id: {0}")]
    InvalidKey(#[from] InvalidKey),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) | ApiError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            ApiError::Store(_) => StatusCode::BAD_GATEWAY,
            ApiError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        match self {
            // The page route only ever shows the generic status text.
            ApiError::Template(_) => {
                let text = status.canonical_reason().unwrap_or_default();
                (status, text).into_response()
            }
            other => (
                status,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
