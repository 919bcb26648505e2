use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use colored::*;
use trip_core::TripError;

/// Format an amount as en-US dollars, e.g. `$1,234.50`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Render a server timestamp as a local calendar date.
///
/// Accepts RFC 3339 and naive ISO timestamps; anything else is shown as-is.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return "Recently".to_string();
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format("%Y-%m-%d").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        if let Some(local) = Local.from_local_datetime(&naive).earliest() {
            return local.format("%Y-%m-%d").to_string();
        }
    }
    raw.to_string()
}

/// Print an error the way the user should see it
pub fn print_error(err: &anyhow::Error) {
    let message = match err.downcast_ref::<TripError>() {
        Some(trip_err) => trip_err.user_message(),
        None => err.to_string(),
    };
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn print_notice(message: &str) {
    println!("{}", message.green());
}

/// Show usage instructions when no command is given
pub fn print_usage_instructions() {
    println!("{}", "Usage:".yellow().bold());
    println!("  {}", "trip plan \"Tokyo\" --days 5".green().bold());
    println!("    Plan a trip and save it locally");
    println!();
    println!("  {}", "trip dashboard".green().bold());
    println!("    Recent trips and popular destinations");
    println!();
    println!("  {}", "trip chat -i".green().bold());
    println!("    Start an interactive chat with the assistant");
    println!();
    println!("{}", "Options:".cyan());
    println!("  --api-url <URL>   Travel API base URL");
    println!("  --help            Show all commands");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(45.0), "$45.00");
        assert_eq!(format_currency(259.99), "$259.99");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-12.5), "-$12.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(None), "Recently");
        assert_eq!(format_date(Some("")), "Recently");
        assert_eq!(format_date(Some("2026-10-01T12:00:00")), "2026-10-01");
        assert_eq!(format_date(Some("not a date")), "not a date");

        let formatted = format_date(Some("2026-10-01T12:00:00+00:00"));
        assert!(formatted.starts_with("2026-"));
        assert_eq!(formatted.len(), 10);
    }
}
