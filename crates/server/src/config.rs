//! Server configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use gist_core::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, FetchConfig};

/// Address the server binds when `GIST_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub fetch: FetchConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = lookup("GIST_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let timeout = match lookup("GIST_FETCH_TIMEOUT") {
            Some(value) => value.parse().context("GIST_FETCH_TIMEOUT must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            addr: addr.parse().with_context(|| format!("GIST_ADDR is not a socket address: {}", addr))?,
            fetch: FetchConfig {
                timeout,
                user_agent: lookup("GIST_USER_AGENT").unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            },
        })
    }
}
