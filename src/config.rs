//! Runtime configuration read from the environment (and `.env`)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be a positive integer, got '{1}'")]
    InvalidNumber(&'static str, String),
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub chart_width: u32,
    pub chart_height: u32,
    pub session_file: PathBuf,
}

impl Config {
    const DEFAULT_API_URL: &'static str = "http://localhost:8080";
    const DEFAULT_WIDTH: u32 = 1024;
    const DEFAULT_HEIGHT: u32 = 768;
    const DEFAULT_SESSION_FILE: &'static str = ".pcdeals_session.json";

    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("PCDEALS_API_URL") {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::Empty("PCDEALS_API_URL")),
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => Self::DEFAULT_API_URL.to_string(),
        };

        let chart_width = parse_dimension(&lookup, "CHART_WIDTH", Self::DEFAULT_WIDTH)?;
        let chart_height = parse_dimension(&lookup, "CHART_HEIGHT", Self::DEFAULT_HEIGHT)?;

        let session_file = lookup("PCDEALS_SESSION_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_SESSION_FILE));

        Ok(Self {
            api_url,
            chart_width,
            chart_height,
            session_file,
        })
    }
}

fn parse_dimension<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => Ok(value),
            _ => Err(ConfigError::InvalidNumber(key, raw)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!((config.chart_width, config.chart_height), (1024, 768));
        assert_eq!(config.session_file, PathBuf::from(".pcdeals_session.json"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PCDEALS_API_URL", "https://deals.example.com/"),
            ("CHART_WIDTH", "800"),
            ("CHART_HEIGHT", "600"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://deals.example.com");
        assert_eq!((config.chart_width, config.chart_height), (800, 600));
    }

    #[test]
    fn test_bad_dimension() {
        let err = Config::from_lookup(lookup_from(&[("CHART_WIDTH", "wide")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber("CHART_WIDTH", _)));
        assert!(Config::from_lookup(lookup_from(&[("CHART_HEIGHT", "0")])).is_err());
    }

    #[test]
    fn test_empty_api_url() {
        let err = Config::from_lookup(lookup_from(&[("PCDEALS_API_URL", " ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("PCDEALS_API_URL")));
    }
}
