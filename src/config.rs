use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Log file used when `LOG_FILE` is unset.
pub const DEFAULT_LOG_FILE: &str = "./data/bot.log";

/// Upper bound for the schedule spacing settings (30 days).
pub const MAX_SPACING_HOURS: u64 = 720;

/// Path of the append-only log file.
///
/// Read separately from [`Config::from_env`] because logging starts before
/// the configuration is loaded.
#[must_use]
pub fn log_file_from_env() -> PathBuf {
    PathBuf::from(env_or_default("LOG_FILE", DEFAULT_LOG_FILE))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("failed to parse {name} as boolean: {value}")]
    ParseBool { name: String, value: String },
}

/// Static X (Twitter) credentials for OAuth 1.0a user-context requests.
#[derive(Clone)]
pub struct XCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
    /// App-only token; used for search when present.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for XCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XCredentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .field("access_token", &"<redacted>")
            .field("access_token_secret", &"<redacted>")
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Credentials
    pub x: XCredentials,
    pub youtube_api_key: String,
    pub trend_api_key: Option<String>,

    // API endpoints
    pub x_api_base: String,
    pub youtube_api_base: String,
    pub trend_api_base: String,
    pub http_timeout: Duration,

    // Local state
    pub schedule_path: PathBuf,
    pub schedule_spacing_min_hours: u64,
    pub schedule_spacing_max_hours: u64,

    // Web Server
    pub web_enabled: bool,
    pub web_host: String,
    pub web_port: u16,

    // Autonomous posting
    pub autopost_enabled: bool,
    pub autopost_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Credentials
            x: XCredentials {
                api_key: required_env("X_API_KEY")?,
                api_secret: required_env("X_API_SECRET")?,
                access_token: required_env("X_ACCESS_TOKEN")?,
                access_token_secret: required_env("X_ACCESS_TOKEN_SECRET")?,
                bearer_token: optional_env("X_BEARER_TOKEN"),
            },
            youtube_api_key: required_env("YOUTUBE_API_KEY")?,
            trend_api_key: optional_env("TREND_API_KEY"),

            // API endpoints
            x_api_base: env_or_default("X_API_BASE", "https://api.twitter.com"),
            youtube_api_base: env_or_default("YOUTUBE_API_BASE", "https://www.googleapis.com"),
            trend_api_base: env_or_default("TREND_API_BASE", "https://serpapi.com"),
            http_timeout: Duration::from_secs(parse_env_u64("HTTP_TIMEOUT_SECS", 30)?),

            // Local state
            schedule_path: PathBuf::from(env_or_default(
                "SCHEDULE_PATH",
                "./data/scheduled_posts.json",
            )),
            schedule_spacing_min_hours: parse_env_u64("SCHEDULE_SPACING_MIN_HOURS", 7)?,
            schedule_spacing_max_hours: parse_env_u64("SCHEDULE_SPACING_MAX_HOURS", 9)?,

            // Web Server
            web_enabled: parse_env_bool("WEB_ENABLED", true)?,
            web_host: env_or_default("WEB_HOST", "127.0.0.1"),
            web_port: parse_env_u16("WEB_PORT", 5000)?,

            // Autonomous posting
            autopost_enabled: parse_env_bool("AUTOPOST_ENABLED", false)?,
            autopost_interval: hours_to_duration(
                "AUTOPOST_INTERVAL_HOURS",
                parse_env_u64("AUTOPOST_INTERVAL_HOURS", 8)?,
            )?,
        })
    }

    /// A complete configuration with dummy credentials, for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            x: XCredentials {
                api_key: "test-key".to_string(),
                api_secret: "test-secret".to_string(),
                access_token: "test-token".to_string(),
                access_token_secret: "test-token-secret".to_string(),
                bearer_token: None,
            },
            youtube_api_key: "test-youtube-key".to_string(),
            trend_api_key: None,
            x_api_base: "http://127.0.0.1:9".to_string(),
            youtube_api_base: "http://127.0.0.1:9".to_string(),
            trend_api_base: "http://127.0.0.1:9".to_string(),
            http_timeout: Duration::from_secs(5),
            schedule_path: PathBuf::from("./data/test_scheduled_posts.json"),
            schedule_spacing_min_hours: 7,
            schedule_spacing_max_hours: 9,
            web_enabled: true,
            web_host: "127.0.0.1".to_string(),
            web_port: 5000,
            autopost_enabled: false,
            autopost_interval: Duration::from_secs(8 * 3600),
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.youtube_api_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "YOUTUBE_API_KEY".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.schedule_spacing_min_hours > self.schedule_spacing_max_hours {
            return Err(ConfigError::InvalidValue {
                name: "SCHEDULE_SPACING_MIN_HOURS".to_string(),
                message: "must not exceed SCHEDULE_SPACING_MAX_HOURS".to_string(),
            });
        }
        if self.schedule_spacing_max_hours > MAX_SPACING_HOURS {
            return Err(ConfigError::InvalidValue {
                name: "SCHEDULE_SPACING_MAX_HOURS".to_string(),
                message: format!("must not exceed {MAX_SPACING_HOURS}"),
            });
        }
        if self.autopost_enabled && self.autopost_interval.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: "AUTOPOST_INTERVAL_HOURS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if !self.web_enabled && !self.autopost_enabled {
            return Err(ConfigError::InvalidValue {
                name: "WEB_ENABLED".to_string(),
                message: "at least one of WEB_ENABLED or AUTOPOST_ENABLED must be true"
                    .to_string(),
            });
        }
        Ok(())
    }
}

fn required_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn hours_to_duration(name: &str, hours: u64) -> Result<Duration, ConfigError> {
    hours
        .checked_mul(3600)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("{hours} hours is out of range"),
        })
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => match val.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::ParseBool {
                name: name.to_string(),
                value: val,
            }),
        },
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const REQUIRED: [&str; 5] = [
        "X_API_KEY",
        "X_API_SECRET",
        "X_ACCESS_TOKEN",
        "X_ACCESS_TOKEN_SECRET",
        "YOUTUBE_API_KEY",
    ];

    fn set_required() {
        for name in REQUIRED {
            std::env::set_var(name, "value");
        }
    }

    fn clear_required() {
        for name in REQUIRED {
            std::env::remove_var(name);
        }
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_env_bool("NICHE_POSTER_NONEXISTENT_VAR", true).unwrap());
        assert!(!parse_env_bool("NICHE_POSTER_NONEXISTENT_VAR", false).unwrap());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        set_required();
        let config = Config::from_env().unwrap();
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.autopost_interval, Duration::from_secs(8 * 3600));
        assert_eq!(config.x_api_base, "https://api.twitter.com");
        assert!(config.trend_api_key.is_none());
        assert!(config.validate().is_ok());
        clear_required();
    }

    #[test]
    #[serial]
    fn test_missing_credentials() {
        clear_required();
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(name) if name == "X_API_KEY"));
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        set_required();
        std::env::set_var("WEB_PORT", "not-a-port");
        let result = Config::from_env();
        std::env::remove_var("WEB_PORT");
        clear_required();
        assert!(matches!(result, Err(ConfigError::ParseInt { .. })));
    }

    #[test]
    fn test_validate_spacing() {
        let config = Config {
            schedule_spacing_min_hours: 10,
            schedule_spacing_max_hours: 9,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_caps_spacing() {
        let config = Config {
            schedule_spacing_min_hours: 10_000_000_000,
            schedule_spacing_max_hours: 10_000_000_000,
            ..Config::for_testing()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name, .. }) if name == "SCHEDULE_SPACING_MAX_HOURS"
        ));
    }

    #[test]
    #[serial]
    fn test_huge_autopost_interval_is_rejected() {
        set_required();
        std::env::set_var("AUTOPOST_INTERVAL_HOURS", u64::MAX.to_string());
        let result = Config::from_env();
        std::env::remove_var("AUTOPOST_INTERVAL_HOURS");
        clear_required();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    #[serial]
    fn test_log_file_from_env() {
        std::env::remove_var("LOG_FILE");
        assert_eq!(log_file_from_env(), PathBuf::from(DEFAULT_LOG_FILE));
        std::env::set_var("LOG_FILE", "/tmp/niche.log");
        let path = log_file_from_env();
        std::env::remove_var("LOG_FILE");
        assert_eq!(path, PathBuf::from("/tmp/niche.log"));
    }

    #[test]
    fn test_validate_needs_a_surface() {
        let config = Config {
            web_enabled: false,
            autopost_enabled: false,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_are_redacted() {
        let debug = format!("{:?}", Config::for_testing().x);
        assert!(!debug.contains("test-secret"));
    }
}
