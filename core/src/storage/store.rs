use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::TripResult;

/// Key holding the persisted bearer token
pub const TOKEN_KEY: &str = "userToken";

/// Key holding the JSON list of recently planned trips
pub const TRIPS_KEY: &str = "aiTravelTrips";

/// Trait defining the interface for persistent key/value stores
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> TripResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> TripResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> TripResult<()>;
}

/// Type alias for Arc-wrapped KeyValueStore trait objects
pub type KeyValueStoreRef = Arc<dyn KeyValueStore>;
