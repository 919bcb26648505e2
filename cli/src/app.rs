use anyhow::{Context, Result};
use colored::*;
use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::io::{self, Write};
use std::time::Duration;
use tracing::{debug, info};

use trip_core::{
    load_dashboard, ApiClient, AuthFlow, AuthState, ChatSession, FlightQuery, HotelQuery,
    PlanRequest, Planner, RegisterRequest, TripCache, TripConfig,
};

use crate::output::{print_error, print_notice};
use crate::views::{
    render_chat_entry, render_dashboard, render_destinations, render_flights, render_hotels,
    render_planner, render_profile, render_saved_trips, render_transcript, render_trip_detail,
    render_trip_grid, DashboardView, PlannerView, NO_TRIPS_MESSAGE,
};

/// Everything a command needs, built once per run
pub struct App {
    pub config: TripConfig,
    pub client: ApiClient,
    pub cache: TripCache,
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

impl App {
    pub fn new(config: TripConfig, client: ApiClient) -> Self {
        let cache = TripCache::new(client.session().store());
        Self {
            config,
            client,
            cache,
        }
    }

    /// Validate, plan once, and show the result or the error
    pub async fn plan(&self, destination: &str, days: i64, budget: Option<f64>) -> Result<()> {
        let mut view = PlannerView::default();

        let request = match PlanRequest::new(destination, days, budget) {
            Ok(request) => request,
            Err(e) => {
                view.reject(&e);
                eprintln!("{}", render_planner(&view));
                return Err(AlreadyReported.into());
            }
        };

        let ticket = view.submit();
        let planner = Planner::new(self.client.clone(), self.cache.clone());
        let progress = spinner("Planning...");
        let result = planner.plan(&request).await;
        progress.finish_and_clear();

        let failed = result.is_err();
        view.apply(ticket, result);
        view.unmount();

        if failed {
            eprintln!("{}", render_planner(&view));
            return Err(AlreadyReported.into());
        }
        println!("{}", render_planner(&view));
        Ok(())
    }

    pub async fn recent(&self, limit: Option<u32>) -> Result<()> {
        let limit = limit.unwrap_or_else(|| self.config.recent_limit());
        let recent = self.client.recent_trips(limit).await?;
        if recent.trips.is_empty() {
            println!("{}", NO_TRIPS_MESSAGE);
        } else {
            print!("{}", render_trip_grid(&recent.trips));
        }
        Ok(())
    }

    pub async fn destinations(&self) -> Result<()> {
        let destinations = self.client.popular_destinations().await?;
        print!("{}", render_destinations(&destinations));
        Ok(())
    }

    /// Both start-up fetches; each section renders whatever it got
    pub async fn dashboard(&self) -> Result<()> {
        let mut view = DashboardView::default();
        let ticket = view.mount();

        let progress = spinner("Loading...");
        let dashboard = load_dashboard(&self.client, self.config.recent_limit()).await;
        progress.finish_and_clear();

        view.apply(ticket, dashboard);
        view.unmount();
        print!("{}", render_dashboard(&view));
        Ok(())
    }

    pub async fn trip(&self, id: i64) -> Result<()> {
        let trip = self.client.trip(id).await?;
        print!("{}", render_trip_detail(&trip));
        Ok(())
    }

    pub async fn saved(&self, clear: bool) -> Result<()> {
        if clear {
            self.cache.clear().await?;
            print_notice("Cleared locally saved trips.");
            return Ok(());
        }
        let trips = self.cache.load().await?;
        print!("{}", render_saved_trips(&trips));
        Ok(())
    }

    /// Send one message, print the reply, then any follow-up after its delay
    pub async fn chat_once(&self, message: &str) -> Result<()> {
        let mut session = ChatSession::new(self.client.clone(), self.config.follow_up_delay());
        exchange(&mut session, message).await;
        Ok(())
    }

    /// Runs an interactive chat session until `exit`/`quit` or EOF
    pub async fn chat_interactive(&self) -> Result<()> {
        let mut session = ChatSession::new(self.client.clone(), self.config.follow_up_delay());
        println!("Starting interactive chat session with the travel assistant.");
        println!("Type 'exit' or 'quit' to end the session.");
        println!();

        session.push_greeting();
        println!("{}", render_transcript(session.transcript()));

        loop {
            print!("{}: ", "You".green().bold());
            io::stdout().flush().context("Failed to flush stdout")?;

            let mut input = String::new();
            let read = io::stdin()
                .read_line(&mut input)
                .context("Failed to read input")?;
            if read == 0 {
                break;
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }
            if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                println!("Exiting chat session.");
                break;
            }

            exchange(&mut session, input).await;
            println!();
        }

        debug!("Chat ended with {} transcript entries", session.transcript().len());
        Ok(())
    }

    pub async fn flights(
        &self,
        from: &str,
        to: &str,
        depart: &str,
        return_date: Option<String>,
    ) -> Result<()> {
        let query = FlightQuery::new(from, to, depart).with_return_date(return_date);
        let progress = spinner("Searching flights...");
        let result = self.client.search_flights(&query).await;
        progress.finish_and_clear();

        print!("{}", render_flights(&result?));
        Ok(())
    }

    pub async fn hotels(
        &self,
        location: &str,
        check_in: &str,
        check_out: &str,
        guests: u32,
    ) -> Result<()> {
        let query = HotelQuery::new(location, check_in, check_out).with_guests(guests);
        let progress = spinner("Searching hotels...");
        let result = self.client.search_hotels(&query).await;
        progress.finish_and_clear();

        print!("{}", render_hotels(&result?));
        Ok(())
    }

    pub async fn register(
        &self,
        email: &str,
        username: &str,
        full_name: Option<&str>,
    ) -> Result<()> {
        let password = Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .context("Failed to read password")?;

        let request = RegisterRequest::new(email, username, &password, full_name)?;
        let user = AuthFlow::new(self.client.clone()).register(&request).await?;
        print_notice(&format!(
            "Account created for {}. Log in with `trip login {}`.",
            user.email, user.username
        ));
        Ok(())
    }

    pub async fn login(&self, username: &str) -> Result<()> {
        let mut auth = AuthFlow::new(self.client.clone());
        if auth.restore().await? == AuthState::Authenticated {
            info!("Replacing existing session token");
        }

        let password = Password::new()
            .with_prompt("Password")
            .interact()
            .context("Failed to read password")?;

        auth.login(username, &password).await?;
        print_notice(&format!("Logged in as {}.", username));
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        let mut auth = AuthFlow::new(self.client.clone());
        auth.logout().await?;
        print_notice("Logged out.");
        Ok(())
    }

    pub async fn me(&self) -> Result<()> {
        let mut auth = AuthFlow::new(self.client.clone());
        if auth.restore().await? == AuthState::Anonymous {
            println!("Hello, Traveler! Log in with `trip login <username>` to see your profile.");
            return Ok(());
        }
        let user = auth.current_user().await?;
        print!("{}", render_profile(&user));
        Ok(())
    }
}

/// One chat turn, printing the reply and then the delayed suggestion
async fn exchange(session: &mut ChatSession, message: &str) {
    let before = session.transcript().len();

    let progress = spinner("Thinking...");
    let follow_up = session.send(message).await;
    progress.finish_and_clear();

    // Skip the echo of the user's own line
    for entry in session.transcript().iter().skip(before + 1) {
        println!("{}", render_chat_entry(entry));
    }

    if let Some(follow_up) = follow_up {
        let entry = session.deliver(follow_up).await;
        println!("{}", render_chat_entry(entry));
    }
}

/// Marks a failure whose message has already been rendered
#[derive(Debug)]
pub struct AlreadyReported;

impl fmt::Display for AlreadyReported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("command failed")
    }
}

impl std::error::Error for AlreadyReported {}

/// Print a command failure unless it was shown already. Returns true on success.
pub fn report(result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            if e.downcast_ref::<AlreadyReported>().is_none() {
                print_error(&e);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_outcomes() {
        assert!(report(Ok(())));
        assert!(!report(Err(AlreadyReported.into())));
        assert!(!report(Err(anyhow::anyhow!("boom"))));
    }
}
