use std::time::Duration;

use chrono::FixedOffset;

pub const DEFAULT_GUEST_PASSWORD: &str = "5678";
pub const DEFAULT_UTC_OFFSET: &str = "+09:00";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_APP_NAME: &str = "SNUMINTON";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set and non-empty")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub backend_key: String,
    pub backend_timeout: Option<Duration>,
    pub guest_password: String,
    pub utc_offset: FixedOffset,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub app_name: String,
}

impl Config {
    /// Load from the process environment (after `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let backend_url = required("BACKEND_URL")?;
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            return Err(ConfigError::Invalid { key: "BACKEND_URL", value: backend_url });
        }
        let backend_key = required("BACKEND_ANON_KEY")?;

        let backend_timeout = match optional("BACKEND_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => return Err(ConfigError::Invalid { key: "BACKEND_TIMEOUT_SECS", value: raw }),
            },
            None => None,
        };

        let offset_raw = optional("CLUB_UTC_OFFSET").unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset = offset_raw
            .parse::<FixedOffset>()
            .map_err(|_| ConfigError::Invalid { key: "CLUB_UTC_OFFSET", value: offset_raw.clone() })?;

        Ok(Self {
            backend_url,
            backend_key,
            backend_timeout,
            guest_password: optional("GUEST_PASSWORD")
                .unwrap_or_else(|| DEFAULT_GUEST_PASSWORD.to_string()),
            utc_offset,
            bind_addr: optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            session_key: optional("SESSION_KEY"),
            app_name: optional("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
        })
    }
}
