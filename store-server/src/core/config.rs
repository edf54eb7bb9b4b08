use std::collections::HashMap;

/// Server configuration
///
/// # Environment variables
///
/// Every setting can be overridden through the environment:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | /var/lib/storefront | Working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | STOCK_SWEEP_INTERVAL_SECS | 300 | Back-in-stock sweep interval |
/// | NOTIFY_API_URL | (unset) | Messaging API base URL; unset disables sends |
/// | NOTIFY_TOKEN | (unset) | Messaging API bearer token |
/// | NOTIFY_ACCOUNTING_CHANNEL | (unset) | Channel for the accounting copy |
/// | NOTIFY_LOCATION_CHANNELS | (unset) | `name=channel` pairs, comma separated |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/storefront HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Seconds between back-in-stock sweep runs
    pub stock_sweep_interval_secs: u64,
    /// Notification dispatcher configuration
    pub notify: NotifyConfig,
}

/// Explicit dispatcher configuration.
///
/// The dispatcher receives this at construction instead of reading the
/// environment itself; the recognized location→channel mappings are
/// enumerated here once at startup.
#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    /// Messaging API base URL; `None` disables all sends
    pub api_url: Option<String>,
    /// Bearer token for the messaging API
    pub token: Option<String>,
    /// Channel receiving a copy of every order summary
    pub accounting_channel: Option<String>,
    /// Location name → channel identifier
    pub location_channels: HashMap<String, String>,
}

impl NotifyConfig {
    /// Load from `NOTIFY_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("NOTIFY_API_URL").ok(),
            token: std::env::var("NOTIFY_TOKEN").ok(),
            accounting_channel: std::env::var("NOTIFY_ACCOUNTING_CHANNEL").ok(),
            location_channels: std::env::var("NOTIFY_LOCATION_CHANNELS")
                .map(|raw| parse_channel_map(&raw))
                .unwrap_or_default(),
        }
    }

    /// Whether the dispatcher has an API to talk to at all.
    pub fn is_enabled(&self) -> bool {
        self.api_url.is_some()
    }

    /// Resolve the channel for a pickup location by name.
    pub fn channel_for_location(&self, location_name: &str) -> Option<&str> {
        self.location_channels
            .get(location_name)
            .map(String::as_str)
    }
}

/// Parse `name=channel` pairs separated by commas. Malformed entries
/// are skipped with a warning rather than failing startup.
fn parse_channel_map(raw: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.split_once('=') {
            Some((name, channel)) if !name.is_empty() && !channel.is_empty() => {
                map.insert(name.trim().to_string(), channel.trim().to_string());
            }
            _ => {
                tracing::warn!(entry = %entry, "Ignoring malformed NOTIFY_LOCATION_CHANNELS entry");
            }
        }
    }
    map
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/storefront".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            stock_sweep_interval_secs: std::env::var("STOCK_SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(300),
            notify: NotifyConfig::from_env(),
        }
    }

    /// Override work dir and port (test scenarios).
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
