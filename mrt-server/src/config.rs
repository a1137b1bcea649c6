//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::data::CacheConfig;
use crate::planner::SearchConfig;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

/// Default snapshot path, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/network.json";

/// Everything `main` needs to start serving.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub data_path: PathBuf,
    pub cache: CacheConfig,
    pub search: SearchConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from `MRT_*` environment variables.
    ///
    /// Unset variables take their defaults. Invalid values are logged and
    /// also fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = parse_var(&lookup, "MRT_LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Some(path) = lookup("MRT_DATA_PATH").filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "MRT_CACHE_TTL_SECS") {
            config.cache.ttl = Duration::from_secs(secs);
        }
        if let Some(max_hops) = parse_var(&lookup, "MRT_MAX_HOPS") {
            config.search.max_hops = max_hops;
        }

        config
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring invalid configuration value");
            None
        }
    }
}
