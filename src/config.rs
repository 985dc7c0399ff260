//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development.

use std::env;
use std::path::PathBuf;

/// Default location of the activity snapshot written by `fetch_activities`.
pub const DEFAULT_DATA_PATH: &str = "public/activities_data.json";

/// Default COROS team API endpoint.
pub const DEFAULT_COROS_API_URL: &str = "https://teamcnapi.coros.com";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Local activity snapshot (JSON array of records)
    pub data_path: PathBuf,
    /// Remote activity snapshot; takes precedence over `data_path` when set
    pub data_url: Option<String>,
}

impl Config {
    /// Config for tests: no remote source, no token.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            data_url: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        Ok(Self {
            port,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            data_path: env::var("ACTIVITIES_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_PATH)),
            data_url: non_empty_var("ACTIVITIES_DATA_URL"),
        })
    }
}

/// Settings for `fetch_activities`. Only the COROS variables are read, so a
/// broken server setting does not stop an export.
#[derive(Debug, Clone)]
pub struct CorosConfig {
    /// COROS API base URL
    pub api_url: String,
    /// COROS access token
    pub token: Option<String>,
}

impl CorosConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: non_empty_var("COROS_API_URL")
                .unwrap_or_else(|| DEFAULT_COROS_API_URL.to_string()),
            token: non_empty_var("COROS_TOKEN"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test touching the process environment to avoid races between tests.
    #[test]
    fn test_config_from_env() {
        env::set_var("PORT", "9090");
        env::set_var("ACTIVITIES_DATA_PATH", "/tmp/activities.json");
        env::set_var("ACTIVITIES_DATA_URL", "  ");
        env::set_var("COROS_TOKEN", " abc123 ");
        env::remove_var("COROS_API_URL");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/activities.json"));
        assert_eq!(config.data_url, None);

        env::set_var("PORT", "not-a-port");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));

        // The fetcher settings ignore the broken PORT
        let coros = CorosConfig::from_env();
        assert_eq!(coros.token.as_deref(), Some("abc123"));
        assert_eq!(coros.api_url, DEFAULT_COROS_API_URL);

        env::remove_var("PORT");
        env::remove_var("ACTIVITIES_DATA_PATH");
        env::remove_var("ACTIVITIES_DATA_URL");
        env::remove_var("COROS_TOKEN");
    }
}
