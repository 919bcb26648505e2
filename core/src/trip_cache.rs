use chrono::Utc;
use tracing::{debug, warn};

use crate::errors::TripResult;
use crate::storage::{KeyValueStoreRef, TRIPS_KEY};
use crate::types::{SavedTrip, TripPlan};

/// Maximum number of plans kept locally
pub const TRIP_CACHE_CAPACITY: usize = 10;

/// Bounded, most-recent-first cache of planned trips kept in local storage
#[derive(Debug, Clone)]
pub struct TripCache {
    store: KeyValueStoreRef,
    capacity: usize,
}

impl TripCache {
    pub fn new(store: KeyValueStoreRef) -> Self {
        Self {
            store,
            capacity: TRIP_CACHE_CAPACITY,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Saved trips, newest first. A missing or unreadable payload yields an empty list.
    pub async fn load(&self) -> TripResult<Vec<SavedTrip>> {
        let Some(raw) = self.store.get(TRIPS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<SavedTrip>>(&raw) {
            Ok(trips) => Ok(trips),
            Err(e) => {
                warn!("Discarding unreadable trip cache: {}", e);
                Ok(Vec::new())
            }
        }
    }

    /// Stamp and prepend a freshly planned trip, evicting the oldest beyond capacity.
    pub async fn record(&self, plan: &TripPlan, trip_id: Option<i64>) -> TripResult<SavedTrip> {
        let now = Utc::now();
        let saved = SavedTrip {
            id: trip_id.unwrap_or_else(|| now.timestamp_millis()),
            plan: plan.clone(),
            saved_at: now,
        };

        let mut trips = self.load().await?;
        trips.insert(0, saved.clone());
        trips.truncate(self.capacity);

        let payload = serde_json::to_string(&trips)?;
        self.store.set(TRIPS_KEY, &payload).await?;
        debug!("Cached trip {} ({} saved)", saved.id, trips.len());

        Ok(saved)
    }

    pub async fn clear(&self) -> TripResult<()> {
        self.store.remove(TRIPS_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{InMemoryStore, KeyValueStore};
    use serde_json::Map;
    use indexmap::IndexMap;
    use std::sync::Arc;

    fn plan(destination: &str) -> TripPlan {
        TripPlan {
            destination: destination.to_string(),
            days: 3,
            trip_type: "city".to_string(),
            cost_level: "moderate".to_string(),
            cost_breakdown: IndexMap::from([("food".to_string(), 100.0)]),
            estimated_cost: 100.0,
            itinerary: vec![],
            recommendations: vec![],
            packing_tips: vec![],
            trip_id: None,
            created_at: None,
            within_budget: None,
            budget_difference: None,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_empty_cache() {
        let cache = TripCache::new(Arc::new(InMemoryStore::new()));
        assert!(cache.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_prepends_and_bounds() {
        let cache = TripCache::new(Arc::new(InMemoryStore::new()));

        for i in 0..11 {
            cache
                .record(&plan(&format!("City {}", i)), Some(i))
                .await
                .unwrap();
            let trips = cache.load().await.unwrap();
            assert!(trips.len() <= TRIP_CACHE_CAPACITY);
            assert_eq!(trips[0].id, i);
        }

        let trips = cache.load().await.unwrap();
        assert_eq!(trips.len(), 10);
        assert_eq!(trips[0].plan.destination, "City 10");
        assert_eq!(trips[9].plan.destination, "City 1");
        assert!(trips.iter().all(|t| t.plan.destination != "City 0"));
    }

    #[tokio::test]
    async fn test_missing_trip_id_uses_timestamp() {
        let cache = TripCache::new(Arc::new(InMemoryStore::new()));
        let before = Utc::now().timestamp_millis();
        let saved = cache.record(&plan("Lisbon"), None).await.unwrap();
        assert!(saved.id >= before);
        assert_eq!(saved.id, saved.saved_at.timestamp_millis());
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_discarded() {
        let store = Arc::new(InMemoryStore::new());
        store.set(TRIPS_KEY, "{not json").await.unwrap();

        let cache = TripCache::new(store);
        assert!(cache.load().await.unwrap().is_empty());

        cache.record(&plan("Oslo"), Some(1)).await.unwrap();
        assert_eq!(cache.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_entries_unchanged_by_later_records() {
        let cache = TripCache::new(Arc::new(InMemoryStore::new()));
        let first = cache.record(&plan("Rome"), Some(7)).await.unwrap();
        cache.record(&plan("Kyoto"), Some(8)).await.unwrap();

        let trips = cache.load().await.unwrap();
        assert_eq!(trips[1], first);

        cache.clear().await.unwrap();
        assert!(cache.load().await.unwrap().is_empty());
    }
}
