use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://www.trip.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`crate::TripClient::from_config`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-request timeout of each session
    pub timeout: Duration,
    /// Line-oriented `user:pass@host:port` list; direct connection when unset
    pub proxies_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxies_file: None,
        }
    }
}

impl ClientConfig {
    /// Reads `TRIP_BASE_URL`, `TRIP_TIMEOUT_SECS` and `TRIP_PROXIES_FILE`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("TRIP_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("TRIP_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(_) => warn!(
                    "Ignoring TRIP_TIMEOUT_SECS={:?}, using {}s",
                    secs, DEFAULT_TIMEOUT_SECS
                ),
            }
        }
        if let Some(path) = lookup("TRIP_PROXIES_FILE").filter(|v| !v.trim().is_empty()) {
            config.proxies_file = Some(PathBuf::from(path));
        }

        config
    }
}
