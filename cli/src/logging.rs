use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map a configured level name to a filter, defaulting to warnings
pub fn level_from_name(level: Option<&str>) -> LevelFilter {
    level
        .map(|level| match level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            "off" => LevelFilter::OFF,
            _ => LevelFilter::WARN,
        })
        .unwrap_or(LevelFilter::WARN)
}

/// Install the stderr subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(level: Option<&str>, verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        level_from_name(level)
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_name() {
        assert_eq!(level_from_name(Some("DEBUG")), LevelFilter::DEBUG);
        assert_eq!(level_from_name(Some("error")), LevelFilter::ERROR);
        assert_eq!(level_from_name(Some("chatty")), LevelFilter::WARN);
        assert_eq!(level_from_name(None), LevelFilter::WARN);
    }
}
