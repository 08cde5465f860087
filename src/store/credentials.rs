use super::StoreError;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// OAuth2 scopes the realtime database REST API accepts.
pub const DATABASE_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/firebase.database",
    "https://www.googleapis.com/auth/userinfo.email",
];

/// Supplies the access token attached to every database request.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, StoreError>;
}

/// A fixed token, used as-is for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, StoreError> {
        Ok(self.0.clone())
    }
}

/// Application Default Credentials of the runtime environment (metadata
/// server, `GOOGLE_APPLICATION_CREDENTIALS`, or the gcloud user login).
/// The provider caches the token and fetches a new one once it expires.
pub struct AmbientCredentials {
    provider: Arc<dyn gcp_auth::TokenProvider>,
}

impl AmbientCredentials {
    pub async fn discover() -> Result<Self, StoreError> {
        let provider = gcp_auth::provider().await?;
        info!("Using ambient credentials for the realtime database");
        Ok(Self { provider })
    }
}

#[async_trait]
impl TokenSource for AmbientCredentials {
    #[instrument(skip(self))]
    async fn access_token(&self) -> Result<String, StoreError> {
        let token = self.provider.token(&DATABASE_SCOPES).await?;
        debug!("Access token ready");
        Ok(token.as_str().to_string())
    }
}
