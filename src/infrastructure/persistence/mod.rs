//! Session persistence adapters
//!
//! The backend is picked at startup from configuration: in-memory for
//! throwaway sessions, SQLite to resume after a restart.

mod in_memory_session_repository;
mod sqlite_session_repository;

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

use crate::application::ports::outbound::SessionRepositoryPort;
use crate::infrastructure::config::{AppConfig, PersistenceBackend};

pub use in_memory_session_repository::InMemorySessionRepository;
pub use sqlite_session_repository::SqliteSessionRepository;

/// Build the repository selected by `PERSISTENCE_BACKEND`
pub async fn create_session_repository(
    config: &AppConfig,
) -> Result<Arc<dyn SessionRepositoryPort>> {
    match config.persistence_backend {
        PersistenceBackend::InMemory => {
            info!("Using in-memory session storage");
            Ok(Arc::new(InMemorySessionRepository::new()))
        }
        PersistenceBackend::Sqlite => {
            if let Some(parent) = std::path::Path::new(&config.sqlite_path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .context("Failed to create session database directory")?;
                }
            }

            let pool = SqlitePoolOptions::new()
                .connect(&format!("sqlite:{}?mode=rwc", config.sqlite_path))
                .await
                .context("Failed to connect to SQLite session database")?;
            info!("Connected to SQLite session database: {}", config.sqlite_path);

            let repository = SqliteSessionRepository::new(pool)
                .await
                .context("Failed to prepare session table")?;
            Ok(Arc::new(repository))
        }
    }
}
