use super::{StoreError, StorePath};
use async_trait::async_trait;
use serde_json::Value;

/// Write access to the hierarchical realtime database.
///
/// Both operations complete only once the store has acknowledged the change.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Replaces the node at `path` with `value`, creating parents as needed.
    async fn set_value(&self, path: &StorePath, value: &Value) -> Result<(), StoreError>;

    /// Removes the node at `path`. Deleting a missing node succeeds.
    async fn delete_value(&self, path: &StorePath) -> Result<(), StoreError>;
}
