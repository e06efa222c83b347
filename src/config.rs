use crate::errors::ConfigError;
use std::{env, time::Duration};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DELIVERIES_URL: &str = "http://127.0.0.1:5000/deliveries";
const DEFAULT_REFRESH_SECS: u64 = 10;
const DEFAULT_ADVANCE_SECS: u64 = 15;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// What the content region shows while the last refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailureDisplay {
    /// Only the warning banner.
    #[default]
    Replace,
    /// The banner above the card that was on screen.
    Overlay,
}

#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub port: u16,
    pub deliveries_url: String,
    pub refresh_interval: Duration,
    pub advance_interval: Duration,
    pub fetch_timeout: Duration,
    pub failure_display: FailureDisplay,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            deliveries_url: DEFAULT_DELIVERIES_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            advance_interval: Duration::from_secs(DEFAULT_ADVANCE_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            failure_display: FailureDisplay::default(),
        }
    }
}

impl BoardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset or blank keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let mut config = Self::default();

        if let Some(raw) = value("PORT") {
            config.port = raw
                .parse::<u16>()
                .ok()
                .filter(|port| *port > 0)
                .ok_or(ConfigError::InvalidNumber { name: "PORT", value: raw })?;
        }
        if let Some(url) = value("DELIVERIES_URL") {
            config.deliveries_url = url;
        }
        if let Some(raw) = value("REFRESH_INTERVAL_SECS") {
            config.refresh_interval = parse_secs("REFRESH_INTERVAL_SECS", raw)?;
        }
        if let Some(raw) = value("ADVANCE_INTERVAL_SECS") {
            config.advance_interval = parse_secs("ADVANCE_INTERVAL_SECS", raw)?;
        }
        if let Some(raw) = value("FETCH_TIMEOUT_SECS") {
            config.fetch_timeout = parse_secs("FETCH_TIMEOUT_SECS", raw)?;
        }
        if let Some(raw) = value("FAILURE_DISPLAY") {
            config.failure_display = match raw.to_ascii_lowercase().as_str() {
                "replace" => FailureDisplay::Replace,
                "overlay" => FailureDisplay::Overlay,
                _ => return Err(ConfigError::InvalidFailureDisplay(raw)),
            };
        }

        Ok(config)
    }
}

fn parse_secs(name: &'static str, raw: String) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}
