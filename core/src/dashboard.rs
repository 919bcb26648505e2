use tracing::warn;

use crate::client::ApiClient;
use crate::errors::TripResult;
use crate::types::{PopularDestinations, RecentTrips};

/// Results of the two start-up fetches, each with its own outcome
#[derive(Debug)]
pub struct Dashboard {
    pub recent: TripResult<RecentTrips>,
    pub destinations: TripResult<PopularDestinations>,
}

/// Fetch recent trips and popular destinations concurrently.
///
/// The fetches race independently; neither failure affects the other.
pub async fn load_dashboard(client: &ApiClient, recent_limit: u32) -> Dashboard {
    let (recent, destinations) = tokio::join!(
        client.recent_trips(recent_limit),
        client.popular_destinations()
    );

    if let Err(e) = &recent {
        warn!("Failed to load recent trips: {}", e);
    }
    if let Err(e) = &destinations {
        warn!("Failed to load destinations: {}", e);
    }

    Dashboard {
        recent,
        destinations,
    }
}
