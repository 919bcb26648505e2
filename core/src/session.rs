use std::sync::Arc;

use tracing::debug;

use crate::errors::TripResult;
use crate::storage::{KeyValueStore, KeyValueStoreRef, TOKEN_KEY};

/// Session context threaded through the client.
///
/// Owns the handle to persistent storage holding the bearer token. The token
/// is read fresh on every request, so a logout through any clone of the
/// context is seen by all of them.
#[derive(Debug, Clone)]
pub struct SessionContext {
    store: KeyValueStoreRef,
}

impl SessionContext {
    pub fn new(store: KeyValueStoreRef) -> Self {
        Self { store }
    }

    pub fn from_store<S: KeyValueStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    /// Underlying store, shared with the trip cache
    pub fn store(&self) -> KeyValueStoreRef {
        Arc::clone(&self.store)
    }

    /// Currently persisted token. Blank values count as absent.
    pub async fn token(&self) -> TripResult<Option<String>> {
        let token = self.store.get(TOKEN_KEY).await?;
        Ok(token.filter(|t| !t.trim().is_empty()))
    }

    pub async fn store_token(&self, token: &str) -> TripResult<()> {
        debug!("Persisting access token");
        self.store.set(TOKEN_KEY, token).await
    }

    pub async fn clear_token(&self) -> TripResult<()> {
        debug!("Clearing access token");
        self.store.remove(TOKEN_KEY).await
    }

    pub async fn is_logged_in(&self) -> TripResult<bool> {
        Ok(self.token().await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[tokio::test]
    async fn test_token_lifecycle() {
        let session = SessionContext::from_store(InMemoryStore::new());
        assert!(!session.is_logged_in().await.unwrap());

        session.store_token("tok-1").await.unwrap();
        assert_eq!(session.token().await.unwrap().as_deref(), Some("tok-1"));
        assert!(session.is_logged_in().await.unwrap());

        session.clear_token().await.unwrap();
        assert_eq!(session.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_blank_token_is_absent() {
        let store = InMemoryStore::new();
        store.set(TOKEN_KEY, "   ").await.unwrap();
        let session = SessionContext::from_store(store);
        assert_eq!(session.token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_observe_logout() {
        let session = SessionContext::from_store(InMemoryStore::new());
        let other = session.clone();

        session.store_token("tok").await.unwrap();
        assert!(other.is_logged_in().await.unwrap());

        other.clear_token().await.unwrap();
        assert!(!session.is_logged_in().await.unwrap());
    }
}
