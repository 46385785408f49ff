//! Board configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Polling interval used when none is configured.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(20);

/// Configuration for a board server.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardConfig {
    /// URL or file path of the snapshot document
    pub source: String,

    /// HTTP listen address
    pub api_addr: SocketAddr,

    /// Polling interval
    pub refresh: Duration,

    /// Keep showing the last good board when a refresh fails
    pub keep_last_good: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            source: "./state.json".to_string(),
            api_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            refresh: DEFAULT_REFRESH,
            keep_last_good: false,
        }
    }
}

impl BoardConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let source = lookup("RANKDOWN_SOURCE")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.source);

        let api_addr = match lookup("RANKDOWN_API_ADDR") {
            Some(addr) => addr
                .parse()
                .map_err(|_| Error::Config(format!("RANKDOWN_API_ADDR={addr:?} is not a socket address")))?,
            None => defaults.api_addr,
        };

        let refresh = match lookup("RANKDOWN_REFRESH_SECS") {
            Some(secs) => match secs.trim().parse::<u64>() {
                Ok(n) if n > 0 => Duration::from_secs(n),
                _ => {
                    return Err(Error::Config(format!(
                        "RANKDOWN_REFRESH_SECS={secs:?} must be a positive number of seconds"
                    )))
                }
            },
            None => defaults.refresh,
        };

        let keep_last_good = match lookup("RANKDOWN_KEEP_LAST_GOOD") {
            Some(flag) => parse_flag(&flag).ok_or_else(|| {
                Error::Config(format!("RANKDOWN_KEEP_LAST_GOOD={flag:?} is not a boolean"))
            })?,
            None => defaults.keep_last_good,
        };

        Ok(Self {
            source,
            api_addr,
            refresh,
            keep_last_good,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
