use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub parse_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            port: parse_env("PORT", 3000)?,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 10)?,
            parse_timeout_secs: parse_env("PARSE_TIMEOUT_SECS", 120)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsing runs an LLM over the whole resume and gets a longer budget.
    pub fn parse_timeout(&self) -> Duration {
        Duration::from_secs(self.parse_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backend_url: "http://localhost:8000".to_string(),
            port: 3000,
            request_timeout_secs: 10,
            parse_timeout_secs: 120,
            rust_log: "info".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_backend_budgets() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.parse_timeout(), Duration::from_secs(120));
        assert_eq!(config.backend_url, "http://localhost:8000");
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let port: u16 = parse_env("EDITOR_TEST_UNSET_PORT_VAR", 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("EDITOR_TEST_BAD_TIMEOUT", "ten");
        let result: Result<u64> = parse_env("EDITOR_TEST_BAD_TIMEOUT", 10);
        assert!(result.is_err());
        std::env::remove_var("EDITOR_TEST_BAD_TIMEOUT");
    }
}
