use order_watch::MonitorSettings;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";
const MAX_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the admin token comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenSource {
    Env(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server_url: String,
    pub token_source: TokenSource,
    pub request_timeout: Duration,
    pub settings: MonitorSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup, e.g. a map in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_url = lookup("SERVER_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| {
                info!("SERVER_URL not set, using default: {DEFAULT_SERVER_URL}");
                DEFAULT_SERVER_URL.to_string()
            });

        let token_source = match lookup("ADMIN_TOKEN_FILE") {
            Some(path) if !path.trim().is_empty() => TokenSource::File(PathBuf::from(path.trim())),
            _ => TokenSource::Env("ADMIN_TOKEN".to_string()),
        };

        let defaults = MonitorSettings::default();
        let settings = MonitorSettings {
            poll_interval: secs(&lookup, "POLL_INTERVAL_SECS", defaults.poll_interval)?,
            stale_after: secs(&lookup, "STALE_AFTER_SECS", defaults.stale_after)?,
            alert_ttl: secs(&lookup, "ALERT_TTL_SECS", defaults.alert_ttl)?,
            ..defaults
        };

        Ok(Self {
            server_url,
            token_source,
            request_timeout: secs(&lookup, "REQUEST_TIMEOUT_SECS", Duration::from_secs(30))?,
            settings,
        })
    }
}

fn secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError> {
    let secs: u64 = try_load(lookup, key, default.as_secs())?;
    if secs == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    if secs > MAX_SECS {
        return Err(ConfigError::Invalid {
            key,
            value: secs.to_string(),
            reason: format!("must be at most {MAX_SECS} (one year)"),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            warn!("Invalid {key} value: {e}");
            ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
