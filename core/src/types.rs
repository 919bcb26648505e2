use indexmap::IndexMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aggregate key some servers include alongside the real cost categories
pub const BREAKDOWN_TOTAL_KEY: &str = "total";

/// Trip plan produced by the remote planning service.
///
/// Every business field is an opaque server payload. Fields this client does
/// not model are kept in `extra` so a cached plan round-trips unchanged.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripPlan {
    pub destination: String,
    pub days: u32,
    #[serde(default)]
    pub trip_type: String,
    #[serde(default)]
    pub cost_level: String,
    #[serde(default)]
    pub cost_breakdown: IndexMap<String, f64>,
    pub estimated_cost: f64,
    #[serde(default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub packing_tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_budget: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_difference: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TripPlan {
    /// Cost categories in display order, without the aggregate total entry
    pub fn cost_categories(&self) -> impl Iterator<Item = (&str, f64)> {
        self.cost_breakdown
            .iter()
            .filter(|(name, _)| name.as_str() != BREAKDOWN_TOTAL_KEY)
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    /// Sum of the category amounts
    pub fn category_total(&self) -> f64 {
        self.cost_categories().map(|(_, amount)| amount).sum()
    }
}

/// Envelope returned by `GET /travel/plan`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlanResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub trip_id: Option<i64>,
    #[serde(default)]
    pub plan: Option<TripPlan>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl PlanResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Server-assigned trip id, from the envelope or the plan itself
    pub fn resolved_trip_id(&self) -> Option<i64> {
        self.trip_id
            .or_else(|| self.plan.as_ref().and_then(|plan| plan.trip_id))
    }
}

/// A plan kept in the local recent-trips cache
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedTrip {
    /// Server trip id, or a client millisecond timestamp when the server gave none
    pub id: i64,
    #[serde(flatten)]
    pub plan: TripPlan,
    pub saved_at: DateTime<Utc>,
}

/// Stored trip as returned by `/travel/recent` and `/travel/trip/{id}`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TripSummary {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub destination: String,
    pub days: u32,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub itinerary: Vec<String>,
    #[serde(default)]
    pub preferences: Value,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TripSummary {
    /// Trip type label stored in the preferences blob
    pub fn trip_type(&self) -> Option<&str> {
        self.preferences.get("type").and_then(Value::as_str)
    }
}

/// Envelope returned by `GET /travel/recent`
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RecentTrips {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub trips: Vec<TripSummary>,
}

/// Popular destinations grouped by category label
pub type PopularDestinations = IndexMap<String, Vec<String>>;

/// Reply from `GET /chat`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatReply {
    #[serde(default)]
    pub message: Option<String>,
    pub response: String,
    #[serde(default)]
    pub sentiment: Option<Value>,
}

/// User profile from `/auth/me` and `/auth/register`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_verified: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Token payload returned by `POST /auth/login`
#[derive(Serialize, Deserialize, Clone)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("user", &self.user)
            .finish()
    }
}

/// Body of `POST /auth/register`
#[derive(Serialize, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Flight search parameters for `GET /flights/search`
#[derive(Debug, Clone, PartialEq)]
pub struct FlightQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
    pub adults: u32,
    pub cabin_class: String,
}

impl FlightQuery {
    pub fn new(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.to_string(),
            return_date: None,
            adults: 1,
            cabin_class: "economy".to_string(),
        }
    }

    pub fn with_return_date(mut self, return_date: Option<String>) -> Self {
        self.return_date = return_date;
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("origin", self.origin.clone()),
            ("destination", self.destination.clone()),
            ("departure_date", self.departure_date.clone()),
        ];
        if let Some(return_date) = &self.return_date {
            params.push(("return_date", return_date.clone()));
        }
        params.push(("adults", self.adults.to_string()));
        params.push(("cabin_class", self.cabin_class.clone()));
        params
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Flight {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: f64,
    #[serde(default)]
    pub stops: u32,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub cabin_class: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct FlightResults {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_flights: Option<usize>,
    #[serde(default)]
    pub cheapest_price: Option<f64>,
    #[serde(default)]
    pub flights: Vec<Flight>,
}

/// Envelope returned by `GET /flights/search`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FlightSearch {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: FlightResults,
    #[serde(default)]
    pub search_params: Option<Value>,
}

/// Hotel search parameters for `GET /hotels/search`
#[derive(Debug, Clone, PartialEq)]
pub struct HotelQuery {
    pub location: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub rooms: u32,
}

impl HotelQuery {
    pub fn new(location: &str, check_in: &str, check_out: &str) -> Self {
        Self {
            location: location.to_string(),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            guests: 2,
            rooms: 1,
        }
    }

    pub fn with_guests(mut self, guests: u32) -> Self {
        self.guests = guests;
        self
    }

    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("location", self.location.clone()),
            ("check_in", self.check_in.clone()),
            ("check_out", self.check_out.clone()),
            ("guests", self.guests.to_string()),
            ("rooms", self.rooms.to_string()),
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    pub rating: f64,
    /// Entries may be null on the wire
    #[serde(default)]
    pub amenities: Vec<Option<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
}

impl Hotel {
    pub fn amenity_names(&self) -> impl Iterator<Item = &str> {
        self.amenities.iter().filter_map(|a| a.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HotelResults {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_hotels: Option<usize>,
    #[serde(default)]
    pub lowest_price: Option<f64>,
    #[serde(default)]
    pub hotels: Vec<Hotel>,
}

/// Envelope returned by `GET /hotels/search`
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HotelSearch {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: HotelResults,
    #[serde(default)]
    pub search_params: Option<Value>,
}
