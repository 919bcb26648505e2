//! View state and the render functions that draw it.
//!
//! Each screen is a plain state struct updated from async results, plus a
//! pure function turning that state into terminal text. Results carry the
//! mount ticket they were requested under; a result for a view that has been
//! remounted or unmounted since is dropped instead of applied.

use std::fmt::Write as _;

use colored::*;
use trip_core::chat::{ChatEntry, Sender};
use trip_core::{
    Dashboard, FlightSearch, HotelSearch, PlannedTrip, PopularDestinations, RecentTrips,
    SavedTrip, TripError, TripPlan, TripResult, TripSummary, User,
};

use crate::output::{format_currency, format_date};

pub const NO_TRIPS_MESSAGE: &str = "No trips planned yet. Start planning your first adventure!";
pub const RECENT_FAILED_MESSAGE: &str = "Could not load trips. Make sure the backend is running.";
pub const DESTINATIONS_FAILED_MESSAGE: &str = "Could not load popular destinations.";

/// Tracks whether a view is mounted and which request generation it expects
#[derive(Debug, Default)]
pub struct MountGuard {
    generation: u64,
    mounted: bool,
}

impl MountGuard {
    /// Mount (or remount) and return the ticket for the next result
    pub fn mount(&mut self) -> u64 {
        self.generation += 1;
        self.mounted = true;
        self.generation
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    pub fn accepts(&self, ticket: u64) -> bool {
        self.mounted && ticket == self.generation
    }
}

/// Load state of one independently fetched section
#[derive(Debug)]
pub enum Section<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Idle
    }
}

impl<T> Section<T> {
    fn from_result(result: TripResult<T>) -> Self {
        match result {
            Ok(value) => Section::Ready(value),
            Err(e) => Section::Failed(e.user_message()),
        }
    }
}

// ---------------------------------------------------------------------------
// Planner

#[derive(Debug, Default)]
pub struct PlannerView {
    guard: MountGuard,
    pub result: Section<PlannedTrip>,
}

impl PlannerView {
    /// Start a submission; the returned ticket must accompany the result
    pub fn submit(&mut self) -> u64 {
        self.result = Section::Loading;
        self.guard.mount()
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }

    /// Apply a planning result. Returns false when the result was stale.
    pub fn apply(&mut self, ticket: u64, result: TripResult<PlannedTrip>) -> bool {
        if !self.guard.accepts(ticket) {
            return false;
        }
        self.result = Section::from_result(result);
        true
    }

    /// Record input rejected before any request was made
    pub fn reject(&mut self, err: &TripError) {
        self.result = Section::Failed(err.user_message());
    }
}

pub fn render_planner(view: &PlannerView) -> String {
    match &view.result {
        Section::Idle => String::new(),
        Section::Loading => "Planning...".to_string(),
        Section::Failed(message) => format!("{} Failed to plan trip: {}", "✗".red(), message),
        Section::Ready(planned) => match &planned.response.plan {
            Some(plan) => render_plan(plan, planned.saved.id),
            None => String::new(),
        },
    }
}

/// Full trip plan: summary, cost breakdown, itinerary, tips
pub fn render_plan(plan: &TripPlan, trip_id: i64) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "✓".green().bold(),
        format!("Trip to {} Planned!", plan.destination).bold()
    );
    let _ = writeln!(out, "  Duration:   {} days", plan.days);
    let _ = writeln!(out, "  Type:       {} trip", plan.trip_type);
    let _ = writeln!(out, "  Cost Level: {}", plan.cost_level);
    let _ = writeln!(out, "  Trip ID:    {}", trip_id);

    let _ = writeln!(out, "\n{}", "Cost Breakdown".cyan().bold());
    for (category, amount) in plan.cost_categories() {
        let _ = writeln!(out, "  {:<16} {:>12}", category_label(category), format_currency(amount));
    }
    let _ = writeln!(
        out,
        "  {:<16} {:>12}",
        "Total Estimated",
        format_currency(plan.estimated_cost)
    );
    if let Some(within) = plan.within_budget {
        let difference = plan.budget_difference.unwrap_or_default();
        if within {
            let _ = writeln!(out, "  Within budget ({} to spare)", format_currency(difference));
        } else {
            let _ = writeln!(out, "  Over budget by {}", format_currency(difference.abs()));
        }
    }

    let _ = writeln!(out, "\n{}", "Itinerary".cyan().bold());
    for day in &plan.itinerary {
        let _ = writeln!(out, "  • {}", day);
    }

    let _ = writeln!(out, "\n{}", "Recommendations".cyan().bold());
    for rec in &plan.recommendations {
        let _ = writeln!(out, "  ★ {}", rec);
    }

    let _ = writeln!(out, "\n{}", "Packing Tips".cyan().bold());
    let _ = writeln!(out, "  {}", plan.packing_tips.join(", "));
    out
}

fn category_label(category: &str) -> String {
    match category {
        "accommodation" => "Accommodation".to_string(),
        "food" => "Food & Dining".to_string(),
        "activities" => "Activities".to_string(),
        "transportation" => "Transportation".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard

#[derive(Debug, Default)]
pub struct DashboardView {
    guard: MountGuard,
    pub recent: Section<RecentTrips>,
    pub destinations: Section<PopularDestinations>,
}

impl DashboardView {
    pub fn mount(&mut self) -> u64 {
        self.recent = Section::Loading;
        self.destinations = Section::Loading;
        self.guard.mount()
    }

    pub fn unmount(&mut self) {
        self.guard.unmount();
    }

    pub fn apply_recent(&mut self, ticket: u64, result: TripResult<RecentTrips>) -> bool {
        if !self.guard.accepts(ticket) {
            return false;
        }
        self.recent = Section::from_result(result);
        true
    }

    pub fn apply_destinations(
        &mut self,
        ticket: u64,
        result: TripResult<PopularDestinations>,
    ) -> bool {
        if !self.guard.accepts(ticket) {
            return false;
        }
        self.destinations = Section::from_result(result);
        true
    }

    pub fn apply(&mut self, ticket: u64, dashboard: Dashboard) -> bool {
        let recent = self.apply_recent(ticket, dashboard.recent);
        let destinations = self.apply_destinations(ticket, dashboard.destinations);
        recent && destinations
    }
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Recent Trips".cyan().bold());
    out.push_str(&render_recent_section(&view.recent));
    let _ = writeln!(out, "\n{}", "Popular Destinations".cyan().bold());
    out.push_str(&render_destinations_section(&view.destinations));
    out
}

pub fn render_recent_section(section: &Section<RecentTrips>) -> String {
    match section {
        Section::Idle => String::new(),
        Section::Loading => "  Loading...\n".to_string(),
        Section::Failed(_) => format!("  {} {}\n", "!".yellow(), RECENT_FAILED_MESSAGE),
        Section::Ready(recent) if recent.trips.is_empty() => format!("  {}\n", NO_TRIPS_MESSAGE),
        Section::Ready(recent) => render_trip_grid(&recent.trips),
    }
}

pub fn render_destinations_section(section: &Section<PopularDestinations>) -> String {
    match section {
        Section::Idle => String::new(),
        Section::Loading => "  Loading...\n".to_string(),
        Section::Failed(_) => format!("  {} {}\n", "!".yellow(), DESTINATIONS_FAILED_MESSAGE),
        Section::Ready(destinations) => render_destinations(destinations),
    }
}

pub fn render_trip_grid(trips: &[TripSummary]) -> String {
    let mut out = String::new();
    for trip in trips {
        let budget = trip
            .budget
            .map(format_currency)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  [{}] {} - {} days | {} | {} | {} | {}",
            trip.id,
            trip.destination.bold(),
            trip.days,
            budget,
            trip.trip_type().unwrap_or("Standard"),
            format_date(trip.created_at.as_deref()),
            trip.status.as_deref().unwrap_or("planned"),
        );
    }
    out
}

pub fn render_destinations(destinations: &PopularDestinations) -> String {
    let mut out = String::new();
    for (category, cities) in destinations {
        let _ = writeln!(out, "  {} {}: {}", destination_icon(category), category, cities.join(", "));
    }
    out
}

fn destination_icon(category: &str) -> &'static str {
    match category {
        "beach" => "🏖",
        "city" => "🏙",
        "mountain" => "⛰",
        "adventure" => "🥾",
        _ => "📍",
    }
}

/// Single stored trip
pub fn render_trip_detail(trip: &TripSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("Trip to {}", trip.destination).bold());
    let _ = writeln!(out, "  Days:    {}", trip.days);
    if let Some(budget) = trip.budget {
        let _ = writeln!(out, "  Budget:  {}", format_currency(budget));
    }
    let _ = writeln!(out, "  Status:  {}", trip.status.as_deref().unwrap_or("planned"));
    let _ = writeln!(out, "  Planned: {}", format_date(trip.created_at.as_deref()));
    for day in &trip.itinerary {
        let _ = writeln!(out, "  • {}", day);
    }
    out
}

// ---------------------------------------------------------------------------
// Saved trips, chat, search results, profile

pub fn render_saved_trips(trips: &[SavedTrip]) -> String {
    if trips.is_empty() {
        return format!("{}\n", NO_TRIPS_MESSAGE);
    }
    let mut out = String::new();
    for (i, trip) in trips.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {} days, {} (saved {})",
            i + 1,
            trip.plan.destination.bold(),
            trip.plan.days,
            format_currency(trip.plan.estimated_cost),
            trip.saved_at.format("%Y-%m-%d %H:%M UTC"),
        );
    }
    out
}

pub fn render_chat_entry(entry: &ChatEntry) -> String {
    match entry.sender {
        Sender::User => format!("{}: {}", "You".green().bold(), entry.text),
        Sender::Assistant => format!("{}: {}", "Assistant".blue().bold(), entry.text),
    }
}

pub fn render_transcript(entries: &[ChatEntry]) -> String {
    entries
        .iter()
        .map(render_chat_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_flights(search: &FlightSearch) -> String {
    let flights = &search.data.flights;
    if flights.is_empty() {
        return "No flights found.\n".to_string();
    }

    let mut out = String::new();
    if let Some(cheapest) = search.data.cheapest_price {
        let _ = writeln!(
            out,
            "{} flights, from {}",
            search.data.total_flights.unwrap_or(flights.len()),
            format_currency(cheapest)
        );
    }
    for flight in flights {
        let stops = match flight.stops {
            0 => "nonstop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        };
        let _ = writeln!(
            out,
            "  {} {} {} → {}  {} - {}  {}  {}",
            flight.airline.bold(),
            flight.flight_number,
            flight.origin,
            flight.destination,
            flight.departure_time,
            flight.arrival_time,
            stops,
            format_currency(flight.price),
        );
    }
    out
}

pub fn render_hotels(search: &HotelSearch) -> String {
    let hotels = &search.data.hotels;
    if hotels.is_empty() {
        return "No hotels found.\n".to_string();
    }

    let mut out = String::new();
    for hotel in hotels {
        let _ = writeln!(
            out,
            "  {} ({}) ★ {:.1}  {}/night",
            hotel.name.bold(),
            hotel.location,
            hotel.rating,
            format_currency(hotel.price_per_night),
        );
        let amenities: Vec<&str> = hotel.amenity_names().collect();
        if !amenities.is_empty() {
            let _ = writeln!(out, "      {}", amenities.join(", "));
        }
    }
    out
}

pub fn render_profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hello, {}!", user.display_name());
    let _ = writeln!(out, "  Username: {}", user.username);
    let _ = writeln!(out, "  Email:    {}", user.email);
    let _ = writeln!(out, "  User ID:  {}", user.id);
    out
}
