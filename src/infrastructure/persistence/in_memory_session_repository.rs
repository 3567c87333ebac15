use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{RepositoryError, SessionRepositoryPort, StoredSession};
use crate::domain::entities::CharacterSheet;
use crate::domain::value_objects::CharacterTheme;

/// Keeps the session for the lifetime of the process only
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    session: RwLock<StoredSession>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepositoryPort for InMemorySessionRepository {
    async fn load(&self) -> Result<StoredSession, RepositoryError> {
        Ok(self.session.read().await.clone())
    }

    async fn save_sheet(&self, sheet: &CharacterSheet) -> Result<(), RepositoryError> {
        self.session.write().await.sheet = Some(sheet.clone());
        Ok(())
    }

    async fn save_theme(&self, theme: &CharacterTheme) -> Result<(), RepositoryError> {
        self.session.write().await.theme = Some(theme.clone());
        Ok(())
    }

    async fn save_auto_fill(&self, enabled: bool) -> Result<(), RepositoryError> {
        self.session.write().await.auto_fill = Some(enabled);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::ThemePreset;

    #[tokio::test]
    async fn test_save_and_load() {
        let repo = InMemorySessionRepository::new();
        assert_eq!(repo.load().await.unwrap(), StoredSession::default());

        let sheet = CharacterSheet::default().with_name("Ilse");
        let theme = CharacterTheme::from_preset(ThemePreset::Forest);
        repo.save_sheet(&sheet).await.unwrap();
        repo.save_theme(&theme).await.unwrap();
        repo.save_auto_fill(false).await.unwrap();

        let stored = repo.load().await.unwrap();
        assert_eq!(stored.sheet, Some(sheet));
        assert_eq!(stored.theme, Some(theme));
        assert_eq!(stored.auto_fill, Some(false));
    }
}
