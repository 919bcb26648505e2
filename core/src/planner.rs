use tracing::info;

use crate::client::ApiClient;
use crate::errors::{TripError, TripResult};
use crate::trip_cache::TripCache;
use crate::types::{PlanResponse, SavedTrip};

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 30;

/// Validated input for a planning request
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    destination: String,
    days: u32,
    budget: Option<f64>,
}

impl PlanRequest {
    /// Validate user input. Nothing is sent for input rejected here.
    pub fn new(destination: &str, days: i64, budget: Option<f64>) -> TripResult<Self> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(TripError::Validation(
                "Please enter a destination".to_string(),
            ));
        }

        if days < i64::from(MIN_DAYS) || days > i64::from(MAX_DAYS) {
            return Err(TripError::Validation(format!(
                "Please enter days between {} and {}",
                MIN_DAYS, MAX_DAYS
            )));
        }

        if let Some(budget) = budget {
            if !budget.is_finite() || budget <= 0.0 {
                return Err(TripError::Validation(
                    "Budget must be a positive amount".to_string(),
                ));
            }
        }

        Ok(Self {
            destination: destination.to_string(),
            days: days as u32,
            budget,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }
}

/// Outcome of a successful plan: the server envelope and the cached record
#[derive(Debug, Clone)]
pub struct PlannedTrip {
    pub response: PlanResponse,
    pub saved: SavedTrip,
}

/// Issues planning requests and commits successes to the local cache
#[derive(Debug, Clone)]
pub struct Planner {
    client: ApiClient,
    cache: TripCache,
}

impl Planner {
    pub fn new(client: ApiClient, cache: TripCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &TripCache {
        &self.cache
    }

    /// One planning call. Only a successful response is cached.
    pub async fn plan(&self, request: &PlanRequest) -> TripResult<PlannedTrip> {
        let response = self
            .client
            .plan_trip(request.destination(), request.days(), request.budget())
            .await?;

        let plan = response
            .plan
            .as_ref()
            .ok_or_else(|| TripError::Parse("Plan response did not include a plan".to_string()))?;
        let saved = self.cache.record(plan, response.resolved_trip_id()).await?;
        info!("Trip to {} planned and cached as {}", plan.destination, saved.id);

        Ok(PlannedTrip { response, saved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_request_trims_destination() {
        let request = PlanRequest::new("  Tokyo ", 5, None).unwrap();
        assert_eq!(request.destination(), "Tokyo");
        assert_eq!(request.days(), 5);
        assert_eq!(request.budget(), None);
    }

    #[test]
    fn test_days_bounds() {
        for days in [i64::MIN, -1, 0, 31, 365] {
            let err = PlanRequest::new("Paris", days, None).unwrap_err();
            assert!(err.is_validation(), "days {} should be rejected", days);
        }
        assert!(PlanRequest::new("Paris", 1, None).is_ok());
        assert!(PlanRequest::new("Paris", 30, None).is_ok());
    }

    #[test]
    fn test_empty_destination_rejected() {
        let err = PlanRequest::new("   ", 3, None).unwrap_err();
        assert_eq!(err.user_message(), "Please enter a destination");
    }

    #[test]
    fn test_budget_validation() {
        assert!(PlanRequest::new("Bali", 4, Some(1200.0)).is_ok());
        for budget in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(PlanRequest::new("Bali", 4, Some(budget)).is_err());
        }
    }
}
