use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{TripError, TripResult};
use crate::storage::store::KeyValueStore;

/// In-memory implementation of KeyValueStore
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    /// Thread-safe storage of values
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStore {
    /// Create a new empty InMemoryStore
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> TripResult<Option<String>> {
        let values = self.values.read().map_err(|e| {
            TripError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> TripResult<()> {
        let mut values = self.values.write().map_err(|e| {
            TripError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        values.insert(key.to_string(), value.to_string());
        debug!("Stored value under key: {}", key);
        Ok(())
    }

    async fn remove(&self, key: &str) -> TripResult<()> {
        let mut values = self.values.write().map_err(|e| {
            TripError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if values.remove(key).is_some() {
            debug!("Removed key: {}", key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("userToken").await.unwrap(), None);

        store.set("userToken", "abc").await.unwrap();
        assert_eq!(store.get("userToken").await.unwrap(), Some("abc".to_string()));

        store.set("userToken", "def").await.unwrap();
        assert_eq!(store.get("userToken").await.unwrap(), Some("def".to_string()));

        store.remove("userToken").await.unwrap();
        assert_eq!(store.get("userToken").await.unwrap(), None);

        // Removing again is a no-op
        store.remove("userToken").await.unwrap();
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();

        store.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap(), Some("v".to_string()));
    }
}
