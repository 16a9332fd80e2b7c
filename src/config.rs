//! Server configuration from environment variables

use crate::types::Roster;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATA_FILE: &str = "game_data.json";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Where the game document is persisted
    pub data_file: PathBuf,
    /// Directory served for the player page
    pub static_dir: PathBuf,
    pub roster: Roster,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            roster: Roster::default(),
        }
    }
}

/// Read a non-empty, trimmed environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl ServerConfig {
    /// Load config from environment variables. Invalid values fall back to
    /// defaults with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = match env_var("BIND_ADDR").map(|v| v.parse::<IpAddr>()) {
            Some(Ok(addr)) => addr,
            Some(Err(e)) => {
                tracing::warn!("Invalid BIND_ADDR ({}), using {}", e, defaults.bind_addr);
                defaults.bind_addr
            }
            None => defaults.bind_addr,
        };

        let port = match env_var("PORT").map(|v| v.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(e)) => {
                tracing::warn!("Invalid PORT ({}), using {}", e, defaults.port);
                defaults.port
            }
            None => defaults.port,
        };

        let roster = match env_var("GAME_PLAYERS").map(|v| Roster::parse(&v)) {
            Some(Ok(roster)) => roster,
            Some(Err(e)) => {
                tracing::warn!("Invalid GAME_PLAYERS ({}), using default roster", e);
                defaults.roster
            }
            None => defaults.roster,
        };

        Self {
            bind_addr,
            port,
            data_file: env_var("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            static_dir: env_var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            roster,
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}
