use super::{RemoteStore, StoreError, StorePath, TokenSource};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Realtime database client speaking the REST protocol.
#[derive(Clone)]
pub struct FirebaseStore {
    client: Client,
    project_id: String,
    base_url: Url,
    credentials: Option<Arc<dyn TokenSource>>,
}

impl FirebaseStore {
    /// Requests are sent unauthenticated when `credentials` is `None`.
    pub fn new(
        project_id: impl Into<String>,
        database_url: &str,
        credentials: Option<Arc<dyn TokenSource>>,
    ) -> Result<Self, StoreError> {
        let base_url =
            Url::parse(database_url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::InvalidUrl(database_url.to_string()));
        }
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let project_id = project_id.into();
        info!(
            %project_id,
            %base_url,
            authenticated = credentials.is_some(),
            "Realtime database client ready"
        );
        Ok(Self {
            client,
            project_id,
            base_url,
            credentials,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// `<base>/<path>.json`
    fn node_url(&self, path: &StorePath) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| StoreError::InvalidUrl(self.base_url.to_string()))?;
            segments.pop_if_empty();
            match path.segments().split_last() {
                Some((last, parents)) => {
                    segments.extend(parents);
                    segments.push(&format!("{last}.json"));
                }
                None => {
                    segments.push(".json");
                }
            }
        }
        Ok(url)
    }

    /// Attaches a fresh access token, when credentials are configured.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, StoreError> {
        match &self.credentials {
            Some(source) => {
                let token = source.access_token().await?;
                Ok(request.query(&[("access_token", token)]))
            }
            None => Ok(request),
        }
    }
}

async fn check_response(response: Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    error!(status = status.as_u16(), %body, "Realtime database rejected request");
    Err(StoreError::Rejected {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteStore for FirebaseStore {
    #[instrument(skip(self, path, value), fields(path = %path))]
    async fn set_value(&self, path: &StorePath, value: &Value) -> Result<(), StoreError> {
        let url = self.node_url(path)?;
        let response = self
            .authorize(self.client.put(url))
            .await?
            .query(&[("print", "silent")])
            .json(value)
            .send()
            .await?;
        check_response(response).await?;
        debug!("Value stored");
        Ok(())
    }

    #[instrument(skip(self, path), fields(path = %path))]
    async fn delete_value(&self, path: &StorePath) -> Result<(), StoreError> {
        let url = self.node_url(path)?;
        let response = self.authorize(self.client.delete(url)).await?.send().await?;
        check_response(response).await?;
        debug!("Value deleted");
        Ok(())
    }
}
