use std::str::FromStr;
use std::time::Duration;

use feedback_client::ClientConfig;
use feedback_ui::dashboard::REFRESH_INTERVAL;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How often the dashboard poller refreshes (default: 30s).
    pub refresh_interval: Duration,
    /// Backend location and client timeout.
    pub client: ClientConfig,
}

impl WebConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default   |
    /// |-------------------------|-----------|
    /// | `HOST`                  | `0.0.0.0` |
    /// | `PORT`                  | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`      |
    /// | `REFRESH_INTERVAL_SECS` | `30`      |
    ///
    /// Backend settings come from [`ClientConfig::from_env`]. Unparseable
    /// values are logged and replaced by the default.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = env_or("PORT", 3000u16);
        let request_timeout_secs = env_or("REQUEST_TIMEOUT_SECS", 30u64);
        let refresh_secs = env_or("REFRESH_INTERVAL_SECS", REFRESH_INTERVAL.as_secs());

        Self {
            host,
            port,
            request_timeout_secs,
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
            client: ClientConfig::from_env(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            request_timeout_secs: 30,
            refresh_interval: REFRESH_INTERVAL,
            client: ClientConfig::default(),
        }
    }
}

fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(var = name, value = %raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
