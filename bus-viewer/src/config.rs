//! Viewer configuration.
//!
//! Read from environment variables at startup; anything unset or
//! unparseable falls back to the default.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::warn;

use crate::dataset::{DEFAULT_FETCH_TIMEOUT, DatasetSource};

/// Dataset URL or file path.
pub const ENV_DATASET: &str = "BUS_VIEWER_DATASET";
/// Dataset fetch timeout in seconds.
pub const ENV_FETCH_TIMEOUT: &str = "BUS_VIEWER_FETCH_TIMEOUT_SECS";
/// Listen address.
pub const ENV_ADDR: &str = "BUS_VIEWER_ADDR";
/// Static assets directory.
pub const ENV_STATIC_DIR: &str = "BUS_VIEWER_STATIC_DIR";

/// Configuration for the viewer server.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Where to load routes from.
    pub dataset: DatasetSource,

    /// Upper bound on the dataset fetch.
    pub fetch_timeout: Duration,

    /// Address to listen on.
    pub addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: String,
}

impl ViewerConfig {
    /// Build from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(location) = lookup(ENV_DATASET).filter(|s| !s.trim().is_empty()) {
            config.dataset = DatasetSource::parse(&location);
        }

        if let Some(raw) = lookup(ENV_FETCH_TIMEOUT) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.fetch_timeout = Duration::from_secs(secs),
                _ => warn!(value = %raw, "ignoring invalid {}", ENV_FETCH_TIMEOUT),
            }
        }

        if let Some(raw) = lookup(ENV_ADDR) {
            match raw.trim().parse::<SocketAddr>() {
                Ok(addr) => config.addr = addr,
                Err(_) => warn!(value = %raw, "ignoring invalid {}", ENV_ADDR),
            }
        }

        if let Some(dir) = lookup(ENV_STATIC_DIR).filter(|s| !s.trim().is_empty()) {
            config.static_dir = dir;
        }

        config
    }

    /// Set the dataset source.
    pub fn with_dataset(mut self, dataset: DatasetSource) -> Self {
        self.dataset = dataset;
        self
    }

    /// Set the fetch timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetSource::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: "static".to_string(),
        }
    }
}
