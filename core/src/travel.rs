//! Typed wrappers for the travel, search and chat resources.

use tracing::debug;

use crate::client::ApiClient;
use crate::errors::{TripError, TripResult};
use crate::types::{
    ChatReply, FlightQuery, FlightSearch, HotelQuery, HotelSearch, PlanResponse,
    PopularDestinations, RecentTrips, TripSummary,
};

impl ApiClient {
    /// Ask the planning service for a trip plan.
    ///
    /// `budget` is only sent when present. A response whose `status` is not
    /// `"success"` is reported as a server failure with the server's detail.
    pub async fn plan_trip(
        &self,
        destination: &str,
        days: u32,
        budget: Option<f64>,
    ) -> TripResult<PlanResponse> {
        let mut query = vec![
            ("destination", destination.to_string()),
            ("days", days.to_string()),
        ];
        if let Some(budget) = budget {
            query.push(("budget", budget.to_string()));
        }

        let response: PlanResponse = self.get_json("/travel/plan", &query).await?;
        if !response.is_success() {
            return Err(TripError::Server {
                status_code: 200,
                detail: response
                    .detail
                    .clone()
                    .or_else(|| response.message.clone())
                    .unwrap_or_else(|| "Failed to plan trip".to_string()),
            });
        }
        if response.plan.is_none() {
            return Err(TripError::Parse(
                "Plan response did not include a plan".to_string(),
            ));
        }

        debug!("Planned trip to {} ({:?})", destination, response.resolved_trip_id());
        Ok(response)
    }

    pub async fn recent_trips(&self, limit: u32) -> TripResult<RecentTrips> {
        self.get_json("/travel/recent", &[("limit", limit.to_string())])
            .await
    }

    pub async fn popular_destinations(&self) -> TripResult<PopularDestinations> {
        self.get_json("/travel/destinations", &[]).await
    }

    pub async fn trip(&self, id: i64) -> TripResult<TripSummary> {
        self.get_json(&format!("/travel/trip/{}", id), &[]).await
    }

    pub async fn search_flights(&self, query: &FlightQuery) -> TripResult<FlightSearch> {
        self.get_json("/flights/search", &query.to_params()).await
    }

    pub async fn search_hotels(&self, query: &HotelQuery) -> TripResult<HotelSearch> {
        self.get_json("/hotels/search", &query.to_params()).await
    }

    /// One chat turn
    pub async fn chat(&self, message: &str) -> TripResult<ChatReply> {
        self.get_json("/chat", &[("message", message.to_string())])
            .await
    }
}
