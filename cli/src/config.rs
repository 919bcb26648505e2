use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use trip_core::config::{get_default_config_file, TripConfig, APP_NAME};

/// Configuration after layering file, environment and command-line values
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: TripConfig,
    pub path: PathBuf,
}

/// Layer config sources: file, then `TRIP_API_URL`, then `--api-url`
pub fn resolve_config(
    config_path: Option<&Path>,
    api_url_flag: Option<&str>,
) -> Result<ResolvedConfig> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => get_default_config_file(APP_NAME)
            .context("Failed to locate the configuration file")?,
    };

    let file_config = TripConfig::load_from_file(&path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

    let flag_config = TripConfig {
        api_url: api_url_flag.map(str::to_string),
        ..TripConfig::default()
    };

    let config = file_config
        .merge(&TripConfig::from_env())
        .merge(&flag_config);

    Ok(ResolvedConfig { config, path })
}

/// Persist a new base URL, keeping every other value from the file
pub fn save_api_url(path: &Path, api_url: &str) -> Result<()> {
    let mut file_config = TripConfig::load_from_file(path)?;
    file_config.api_url = Some(api_url.trim_end_matches('/').to_string());
    file_config.save_to_file(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"http://file.test/api\"\nrecent_limit = 3\n",
        )
        .unwrap();

        let resolved =
            resolve_config(Some(path.as_path()), Some("http://flag.test/api")).unwrap();
        assert_eq!(resolved.config.base_url(), "http://flag.test/api");
        assert_eq!(resolved.config.recent_limit(), 3);
        assert_eq!(resolved.path, path);
    }

    #[test]
    fn test_save_api_url_keeps_other_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 20\n").unwrap();

        save_api_url(&path, "https://travel.example/api/").unwrap();

        let loaded = TripConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.api_url.as_deref(), Some("https://travel.example/api"));
        assert_eq!(loaded.timeout_secs, Some(20));
    }
}
