use super::{RemoteStore, StoreError, StorePath};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// In-process tree with the same write semantics as the realtime database.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tree: Arc<RwLock<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tree: Arc::new(RwLock::new(Value::Object(Map::new()))),
        }
    }

    pub async fn get_value(&self, path: &StorePath) -> Option<Value> {
        let tree = self.tree.read().await;
        path.segments()
            .iter()
            .try_fold(&*tree, |node, key| node.get(key))
            .filter(|node| !is_empty_node(node))
            .cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    #[instrument(skip(self, path, value), fields(path = %path))]
    async fn set_value(&self, path: &StorePath, value: &Value) -> Result<(), StoreError> {
        // Writing null or {} removes the node, as in the realtime database.
        if is_empty_node(value) {
            return self.delete_value(path).await;
        }
        let mut tree = self.tree.write().await;
        insert(&mut tree, path.segments(), value.clone());
        debug!("Value stored");
        Ok(())
    }

    #[instrument(skip(self, path), fields(path = %path))]
    async fn delete_value(&self, path: &StorePath) -> Result<(), StoreError> {
        let mut tree = self.tree.write().await;
        if remove(&mut tree, path.segments()) {
            *tree = Value::Object(Map::new());
        }
        debug!("Value deleted");
        Ok(())
    }
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn insert(node: &mut Value, segments: &[String], value: Value) {
    let Some((key, rest)) = segments.split_first() else {
        *node = value;
        return;
    };
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    if let Value::Object(map) = node {
        let child = map.entry(key.clone()).or_insert(Value::Null);
        insert(child, rest, value);
    }
}

/// Removes the node at `segments` below `node`. Returns true when `node`
/// itself is left empty and should be pruned by its parent.
fn remove(node: &mut Value, segments: &[String]) -> bool {
    let Some((key, rest)) = segments.split_first() else {
        return true;
    };
    let Value::Object(map) = node else {
        return false;
    };
    if rest.is_empty() {
        map.remove(key);
    } else if let Some(child) = map.get_mut(key) {
        if remove(child, rest) {
            map.remove(key);
        }
    }
    map.is_empty()
}
