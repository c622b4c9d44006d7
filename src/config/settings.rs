use std::net::SocketAddr;

use serde::Deserialize;
use crate::config::env::{self, EnvKey};

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_SEED_PATH: &str = "data/movies.json";

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub server_port: u16,
    pub seed_path: String,
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            server_port: env::get_parsed(EnvKey::ServerPort, DEFAULT_PORT),
            seed_path: env::get_or(EnvKey::SeedPath, DEFAULT_SEED_PATH),
        }
    }

    /// Every interface, on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.server_port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            seed_path: DEFAULT_SEED_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_uses_configured_port() {
        let config = AppConfig {
            server_port: 4100,
            ..Default::default()
        };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:4100");
        assert_eq!(AppConfig::default().bind_addr().port(), DEFAULT_PORT);
    }
}
