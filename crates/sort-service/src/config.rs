//! # Service Configuration
//!
//! Defaults: port 7040, quicksort, and a 15 second budget both per request
//! and for shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use slow_sort::SortMethod;
use tracing::{info, warn};

/// Environment variable naming the algorithm ("random" or "bubble")
pub const SORT_TYPE_ENV: &str = "SORT_TYPE";
/// Environment variable overriding the listening port
pub const SORT_PORT_ENV: &str = "SORT_PORT";

pub const DEFAULT_PORT: u16 = 7040;

/// Complete service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listening port.
    pub port: u16,
    /// Algorithm used for every request.
    pub sort_method: SortMethod,
    /// Deadline attached to each request's cancellation signal.
    pub request_timeout: Duration,
    /// How long in-flight requests may run after a shutdown signal.
    pub shutdown_grace: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            sort_method: SortMethod::Quick,
            request_timeout: Duration::from_secs(15),
            shutdown_grace: Duration::from_secs(15),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// An unknown `SORT_TYPE` falls back to quicksort, as does an unset one.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup(SORT_TYPE_ENV) {
            match name.parse::<SortMethod>() {
                Ok(method) => {
                    config.sort_method = method;
                    info!(method = %method, "Loaded sort method from environment");
                }
                Err(e) => warn!(error = %e, "Ignoring {SORT_TYPE_ENV}, using quicksort"),
            }
        }

        if let Some(port) = lookup(SORT_PORT_ENV) {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => warn!(value = %port, "{SORT_PORT_ENV} must be a port number"),
            }
        }

        config
    }

    /// Address to bind on all interfaces.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
