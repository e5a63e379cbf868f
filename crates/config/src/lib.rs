use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str =
    "api_server=debug,application=info,infrastructure=info,tower_http=debug";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: String,
    pub api_host: String,
    pub api_port: u16,
    pub upstream_api_url: String,
    pub upstream_timeout_seconds: u64,
    pub bcrypt_cost: u32,
    pub session_cookie: String,
    pub session_cookie_secure: bool,
    pub log_filter: String,
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

impl AppConfig {
    /// Load configuration from the process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bcrypt_cost = parse(&lookup, "BCRYPT_COST", 12u32)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!("{} is outside 4..=31", bcrypt_cost),
            });
        }

        let session_cookie = text("SESSION_COOKIE", "anime_session");
        if session_cookie.is_empty()
            || !session_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Invalid {
                key: "SESSION_COOKIE",
                reason: format!("'{}' is not a valid cookie name", session_cookie),
            });
        }

        Ok(AppConfig {
            database_path: text("DATABASE_PATH", "anime_reviews.db"),
            api_host: text("API_HOST", "127.0.0.1"),
            api_port: parse(&lookup, "API_PORT", 3000u16)?,
            upstream_api_url: text("UPSTREAM_API_URL", "https://api.jikan.moe/v4"),
            upstream_timeout_seconds: parse(&lookup, "UPSTREAM_TIMEOUT_SECONDS", 10u64)?,
            bcrypt_cost,
            session_cookie,
            session_cookie_secure: parse(&lookup, "SESSION_COOKIE_SECURE", false)?,
            log_filter: text("LOG_FILTER", DEFAULT_LOG_FILTER),
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_path, "anime_reviews.db");
        assert_eq!(config.api_address(), "127.0.0.1:3000");
        assert_eq!(config.upstream_api_url, "https://api.jikan.moe/v4");
        assert_eq!(config.upstream_timeout(), Duration::from_secs(10));
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.session_cookie, "anime_session");
        assert!(!config.session_cookie_secure);
    }

    #[test]
    fn values_override_defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("API_PORT", "8080"),
            ("BCRYPT_COST", "4"),
            ("DATABASE_PATH", "/tmp/test.db"),
            ("SESSION_COOKIE_SECURE", "true"),
        ]))
        .unwrap();
        assert!(config.session_cookie_secure);
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.database_path, "/tmp/test.db");
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[("API_PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "API_PORT", .. }));

        let err = AppConfig::from_lookup(lookup(&[("BCRYPT_COST", "40")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BCRYPT_COST", .. }));

        let err = AppConfig::from_lookup(lookup(&[("SESSION_COOKIE_SECURE", "yes")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SESSION_COOKIE_SECURE", .. }));
    }

    #[test]
    fn cookie_name_must_be_a_token() {
        let err = AppConfig::from_lookup(lookup(&[("SESSION_COOKIE", "my session")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SESSION_COOKIE", .. }));
    }
}
