//! SQLite session storage
//!
//! One key/value row per piece of session state. Values are the same JSON
//! documents the HTTP API serves, so a stored sheet can be inspected or
//! re-imported by hand.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::application::dto::{CharacterSheetDto, ThemeDto};
use crate::application::ports::outbound::{RepositoryError, SessionRepositoryPort, StoredSession};
use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::CharacterTheme;

const SHEET_KEY: &str = "sheet";
const THEME_KEY: &str = "theme";
const AUTO_FILL_KEY: &str = "auto_fill";

pub struct SqliteSessionRepository {
    pool: SqlitePool,
}

impl SqliteSessionRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS session_state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    async fn put(&self, key: &str, value: String) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT OR REPLACE INTO session_state (key, value, updated_at) \
             VALUES (?, ?, CURRENT_TIMESTAMP)",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
        debug!(key, "Session state saved");
        Ok(())
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn from_json<T: serde::de::DeserializeOwned>(key: &str, value: &str) -> Result<T, RepositoryError> {
    serde_json::from_str(value)
        .map_err(|e| RepositoryError::Serialization(format!("{}: {}", key, e)))
}

#[async_trait]
impl SessionRepositoryPort for SqliteSessionRepository {
    async fn load(&self) -> Result<StoredSession, RepositoryError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM session_state")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let mut session = StoredSession::default();
        for (key, value) in rows {
            match key.as_str() {
                SHEET_KEY => {
                    let dto: CharacterSheetDto = from_json(&key, &value)?;
                    let sheet = CharacterSheet::try_from(dto)
                        .map_err(|e| RepositoryError::Invalid(e.to_string()))?;
                    session.sheet = Some(sheet);
                }
                THEME_KEY => {
                    let dto: ThemeDto = from_json(&key, &value)?;
                    let theme = CharacterTheme::try_from(dto)
                        .map_err(|e| RepositoryError::Invalid(e.to_string()))?;
                    session.theme = Some(theme);
                }
                AUTO_FILL_KEY => session.auto_fill = Some(from_json(&key, &value)?),
                _ => {}
            }
        }

        Ok(session)
    }

    async fn save_sheet(&self, sheet: &CharacterSheet) -> Result<(), RepositoryError> {
        self.put(SHEET_KEY, to_json(&CharacterSheetDto::from(sheet))?).await
    }

    async fn save_theme(&self, theme: &CharacterTheme) -> Result<(), RepositoryError> {
        self.put(THEME_KEY, to_json(&ThemeDto::from(theme))?).await
    }

    async fn save_auto_fill(&self, enabled: bool) -> Result<(), RepositoryError> {
        self.put(AUTO_FILL_KEY, to_json(&enabled)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::derived;
    use crate::domain::value_objects::{Ability, HexColor, PaletteSlot, ThemePalette};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqliteSessionRepository {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteSessionRepository::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_database_loads_nothing() {
        let repo = repository().await;
        assert_eq!(repo.load().await.unwrap(), StoredSession::default());
    }

    #[tokio::test]
    async fn test_round_trip() {
        let repo = repository().await;
        let sheet = derived(
            CharacterSheet::default()
                .with_name("Oona")
                .with_score(Ability::Wisdom, 15),
        );
        let theme = CharacterTheme::custom(
            ThemePalette::default().with_color(PaletteSlot::Text, HexColor::rgb(0x10, 0x20, 0x30)),
        );

        repo.save_sheet(&sheet).await.unwrap();
        repo.save_theme(&theme).await.unwrap();
        repo.save_auto_fill(false).await.unwrap();

        let stored = repo.load().await.unwrap();
        assert_eq!(stored.sheet, Some(sheet));
        assert_eq!(stored.theme, Some(theme));
        assert_eq!(stored.auto_fill, Some(false));
    }

    #[tokio::test]
    async fn test_later_save_overwrites() {
        let repo = repository().await;
        repo.save_auto_fill(false).await.unwrap();
        repo.save_auto_fill(true).await.unwrap();
        assert_eq!(repo.load().await.unwrap().auto_fill, Some(true));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let repo = repository().await;
        repo.put(SHEET_KEY, "{not json".to_string()).await.unwrap();
        assert!(matches!(
            repo.load().await,
            Err(RepositoryError::Serialization(_))
        ));
    }
}
