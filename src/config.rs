//! Process-wide configuration, resolved once at cold start.

use std::time::Duration;

use crate::models::ConfigError;

const APP_URL: &str = "APP_URL";
const UPSTREAM_TIMEOUT: &str = "APP_UPSTREAM_TIMEOUT_SECS";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Read-only settings shared by every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Application base URL that event paths are joined onto.
    pub base_url: String,
    /// Request timeout used by the forwarding kernel.
    pub upstream_timeout: Duration,
}

impl AdapterConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }

    /// Loads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `APP_URL` is missing or either variable is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `APP_URL` is missing, is not an absolute
    /// `http`/`https` URL, or the timeout is not a whole number of seconds.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(APP_URL)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(APP_URL))?;
        let base_url = base_url.trim().to_string();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                name: APP_URL,
                reason: format!("expected an absolute http(s) URL, got {base_url:?}"),
            });
        }

        let upstream_timeout = match lookup(UPSTREAM_TIMEOUT) {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                    name: UPSTREAM_TIMEOUT,
                    reason: e.to_string(),
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url,
            upstream_timeout,
        })
    }
}
