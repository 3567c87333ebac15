//! Application configuration

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Where the session is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceBackend {
    InMemory,
    Sqlite,
}

impl FromStr for PersistenceBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "in-memory" | "inmemory" => Ok(Self::InMemory),
            "sqlite" => Ok(Self::Sqlite),
            other => anyhow::bail!("Unknown persistence backend: '{}'", other),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Interface the HTTP/WebSocket server binds to
    pub server_host: String,
    pub server_port: u16,

    pub persistence_backend: PersistenceBackend,
    /// SQLite database file (used by the sqlite backend)
    pub sqlite_path: String,

    /// Buffered store events per receiver before slow receivers start lagging
    pub event_channel_capacity: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,

            persistence_backend: env::var("PERSISTENCE_BACKEND")
                .unwrap_or_else(|_| "sqlite".to_string())
                .parse()
                .context("PERSISTENCE_BACKEND must be 'sqlite' or 'memory'")?,
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "charsheet.db".to_string()),

            event_channel_capacity: env::var("EVENT_CHANNEL_CAPACITY")
                .unwrap_or_else(|_| "64".to_string())
                .parse()
                .context("EVENT_CHANNEL_CAPACITY must be a positive integer")?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("SQLite".parse::<PersistenceBackend>().unwrap(), PersistenceBackend::Sqlite);
        assert_eq!("memory".parse::<PersistenceBackend>().unwrap(), PersistenceBackend::InMemory);
        assert!("postgres".parse::<PersistenceBackend>().is_err());
    }
}
