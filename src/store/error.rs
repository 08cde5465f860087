use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Credentials error: {0}")]
    Credentials(#[from] gcp_auth::Error),
}
