//! Build-time Configuration
//!
//! Values are baked in from environment variables at compile time
//! (`VDF_API_BASE_URL=https://... trunk build`).

use log::LevelFilter;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_SESSION_POLL_MS: u32 = 15_000;
pub const DEFAULT_NOTIFICATION_POLL_MS: u32 = 30_000;
pub const DEFAULT_LOG_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// REST API prefix, without trailing slash
    pub api_base_url: String,
    /// Refresh interval of the admin session list
    pub session_poll_ms: u32,
    /// Refresh interval of unread notification counts
    pub notification_poll_ms: u32,
    pub log_level: LevelFilter,
    /// Lines kept by the rolling console logger
    pub log_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_poll_ms: DEFAULT_SESSION_POLL_MS,
            notification_poll_ms: DEFAULT_NOTIFICATION_POLL_MS,
            log_level: LevelFilter::Info,
            log_capacity: DEFAULT_LOG_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Configuration compiled into this build
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                "VDF_API_BASE_URL" => option_env!("VDF_API_BASE_URL"),
                "VDF_SESSION_POLL_MS" => option_env!("VDF_SESSION_POLL_MS"),
                "VDF_NOTIFICATION_POLL_MS" => option_env!("VDF_NOTIFICATION_POLL_MS"),
                "VDF_LOG_LEVEL" => option_env!("VDF_LOG_LEVEL"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base_url = lookup("VDF_API_BASE_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        Self {
            api_base_url,
            session_poll_ms: parse_or(&lookup, "VDF_SESSION_POLL_MS", defaults.session_poll_ms),
            notification_poll_ms: parse_or(&lookup, "VDF_NOTIFICATION_POLL_MS", defaults.notification_poll_ms),
            log_level: parse_or(&lookup, "VDF_LOG_LEVEL", defaults.log_level),
            log_capacity: defaults.log_capacity,
        }
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("[CONFIG] ignoring invalid {}={:?}", key, raw);
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VDF_API_BASE_URL", "https://bank.example.org/api/"),
            ("VDF_SESSION_POLL_MS", "5000"),
            ("VDF_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(config.api_base_url, "https://bank.example.org/api");
        assert_eq!(config.session_poll_ms, 5000);
        assert_eq!(config.notification_poll_ms, DEFAULT_NOTIFICATION_POLL_MS);
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[("VDF_NOTIFICATION_POLL_MS", "soon")]));
        assert_eq!(config.notification_poll_ms, DEFAULT_NOTIFICATION_POLL_MS);
    }
}
