use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for the AI travel assistant
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the travel API, e.g. http://localhost:8000/api
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a trip and keep it in the local recent-trips list
    Plan {
        destination: String,
        /// Number of days (1-30)
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        days: i64,
        /// Optional budget in USD
        #[arg(short, long)]
        budget: Option<f64>,
    },

    /// Trips recently planned on the server
    Recent {
        /// Number of trips to show (1-50)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=50))]
        limit: Option<u32>,
    },

    /// Popular destinations grouped by category
    Destinations,

    /// Recent trips and popular destinations side by side
    Dashboard,

    /// Show one stored trip
    Trip { id: i64 },

    /// Trips saved locally by earlier `plan` runs
    Saved {
        /// Forget all locally saved trips
        #[arg(long, default_value_t = false)]
        clear: bool,
    },

    /// Talk to the travel assistant
    Chat {
        /// Message to send; omit with --interactive
        message: Option<String>,
        /// Enter interactive chat mode
        #[arg(short, long, default_value_t = false)]
        interactive: bool,
    },

    /// Search flights
    Flights {
        /// Departure airport code
        #[arg(long)]
        from: String,
        /// Arrival airport code
        #[arg(long)]
        to: String,
        /// Departure date (YYYY-MM-DD)
        #[arg(long)]
        depart: String,
        /// Return date (YYYY-MM-DD)
        #[arg(long = "return")]
        return_date: Option<String>,
    },

    /// Search hotels
    Hotels {
        location: String,
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        check_in: String,
        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        check_out: String,
        #[arg(long, default_value_t = 2)]
        guests: u32,
    },

    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        full_name: Option<String>,
    },

    /// Log in; the password is prompted for
    Login { username: String },

    /// Forget the stored token
    Logout,

    /// Show the logged-in user's profile
    Me,

    /// Show the resolved configuration
    Config {
        /// Persist this API URL to the configuration file
        #[arg(long)]
        set_api_url: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_arguments() {
        let args = Args::parse_from(["trip", "plan", "Tokyo", "--days", "5"]);
        match args.command {
            Some(Command::Plan {
                destination,
                days,
                budget,
            }) => {
                assert_eq!(destination, "Tokyo");
                assert_eq!(days, 5);
                assert_eq!(budget, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_recent_limit_bounds() {
        let args = Args::parse_from(["trip", "recent", "--limit", "50"]);
        assert!(matches!(args.command, Some(Command::Recent { limit: Some(50) })));

        assert!(Args::try_parse_from(["trip", "recent", "--limit", "0"]).is_err());
        assert!(Args::try_parse_from(["trip", "recent", "--limit", "51"]).is_err());
    }

    #[test]
    fn test_negative_days_reach_validation() {
        let args = Args::parse_from(["trip", "plan", "Tokyo", "-d", "-2"]);
        assert!(matches!(args.command, Some(Command::Plan { days: -2, .. })));
    }

    #[test]
    fn test_global_api_url_after_subcommand() {
        let args = Args::parse_from(["trip", "me", "--api-url", "http://example.test/api"]);
        assert_eq!(args.api_url.as_deref(), Some("http://example.test/api"));
        assert!(matches!(args.command, Some(Command::Me)));
    }
}
