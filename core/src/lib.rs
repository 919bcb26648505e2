// Client-side access layer for the travel backend:
// - HTTP client with bearer-token injection and error logging
// - Typed request/response records per resource
// - Persistent storage, session context and the recent-trip cache
// - Planning, dashboard, chat and auth flows built on top

pub mod client;
pub use client::ApiClient;

pub mod types;
pub use types::*;

pub mod config;
pub use config::*;

pub mod errors;
pub use errors::*;

pub mod storage;
pub use storage::{FileStore, InMemoryStore, KeyValueStore, KeyValueStoreRef};

pub mod session;
pub use session::SessionContext;

pub mod trip_cache;
pub use trip_cache::{TripCache, TRIP_CACHE_CAPACITY};

// Resource wrappers are inherent methods on ApiClient
mod travel;

pub mod planner;
pub use planner::{PlanRequest, PlannedTrip, Planner};

pub mod dashboard;
pub use dashboard::{load_dashboard, Dashboard};

pub mod chat;
pub use chat::{ChatEntry, ChatSession, FollowUp, Sender};

pub mod auth;
pub use auth::{AuthFlow, AuthState};
