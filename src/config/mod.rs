//! Runtime settings, read from the environment after `.env` is loaded.
//!
//! - `SERVER_ADDR`: bind address (default `127.0.0.1:8080`)
//! - `SEED_FILE`: optional JSON file with initial `dishes` and `orders`

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(&'static str, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] but with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.into());
        let server_addr = raw_addr
            .parse()
            .map_err(|e| ConfigError::InvalidEnvVar("SERVER_ADDR", format!("{raw_addr}: {e}")))?;

        let seed_file = lookup("SEED_FILE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            server_addr,
            seed_file,
        })
    }
}
