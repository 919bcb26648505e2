//! Persistent client-side storage
//!
//! A string key/value store standing in for browser local storage or device
//! storage. The auth token and the recent-trip cache both live here under
//! fixed keys. Backends implement the `KeyValueStore` trait.

pub mod adapters;
pub mod store;

pub use adapters::{FileStore, InMemoryStore};
pub use store::{KeyValueStore, KeyValueStoreRef, TOKEN_KEY, TRIPS_KEY};
