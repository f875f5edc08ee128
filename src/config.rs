//! Runtime configuration, read from the environment.

use crate::error::{Error, Result};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DB_PATH: &str = ".video_notes_db";
pub const DEFAULT_ADDR: &str = "127.0.0.1:3030";

pub const ENV_DB_PATH: &str = "VIDEO_NOTES_DB";
pub const ENV_ADDR: &str = "VIDEO_NOTES_ADDR";
pub const ENV_OEMBED: &str = "VIDEO_NOTES_OEMBED";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Look up missing titles from the video host's oEmbed endpoint
    pub oembed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable lookup; `from_env` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(ENV_DB_PATH)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DB_PATH));

        let addr = lookup(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| Error::InvalidInput(format!("{} '{}': {}", ENV_ADDR, addr, e)))?;

        let oembed = lookup(ENV_OEMBED)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Ok(Self {
            db_path,
            bind_addr,
            oembed,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            oembed: false,
        }
    }
}
