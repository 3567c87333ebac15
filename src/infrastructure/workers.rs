//! Background workers

use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError};

use crate::application::ports::outbound::SessionRepositoryPort;
use crate::domain::events::DomainEvent;

/// Saves every store change through the session repository.
///
/// Runs until the event channel closes. A lagging receiver skips the missed
/// events; the next one carries the full current value anyway.
pub async fn persistence_worker(
    mut events: broadcast::Receiver<DomainEvent>,
    repository: Arc<dyn SessionRepositoryPort>,
) {
    tracing::info!("Starting persistence worker");
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Persistence worker lagged, skipped {} events", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let result = match &event {
            DomainEvent::CharacterChanged { sheet, .. } => repository.save_sheet(sheet).await,
            DomainEvent::ThemeChanged { theme, .. } => repository.save_theme(theme).await,
            DomainEvent::AutoFillChanged { enabled, .. } => {
                repository.save_auto_fill(*enabled).await
            }
        };

        match result {
            Ok(()) => tracing::debug!(
                "Persisted {} from {}",
                event.event_type(),
                event.metadata().timestamp.to_rfc3339()
            ),
            Err(e) => tracing::error!("Failed to persist {}: {}", event.event_type(), e),
        }
    }
    tracing::info!("Persistence worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CharacterSheet;
    use crate::domain::value_objects::{CharacterTheme, ThemePreset};
    use crate::infrastructure::persistence::InMemorySessionRepository;

    #[tokio::test]
    async fn test_worker_saves_each_kind_of_event() {
        let repository = Arc::new(InMemorySessionRepository::new());
        let (sender, receiver) = broadcast::channel(8);
        let worker = tokio::spawn(persistence_worker(receiver, repository.clone()));

        let sheet = CharacterSheet::default().with_name("Wren");
        let theme = CharacterTheme::from_preset(ThemePreset::Fire);
        sender.send(DomainEvent::character_changed(sheet.clone())).unwrap();
        sender.send(DomainEvent::theme_changed(theme.clone())).unwrap();
        sender.send(DomainEvent::auto_fill_changed(false)).unwrap();
        drop(sender);
        worker.await.unwrap();

        let stored = repository.load().await.unwrap();
        assert_eq!(stored.sheet, Some(sheet));
        assert_eq!(stored.theme, Some(theme));
        assert_eq!(stored.auto_fill, Some(false));
    }

    #[tokio::test]
    async fn test_worker_survives_lag() {
        let repository = Arc::new(InMemorySessionRepository::new());
        let (sender, receiver) = broadcast::channel(1);
        sender.send(DomainEvent::auto_fill_changed(false)).unwrap();
        sender.send(DomainEvent::auto_fill_changed(true)).unwrap();
        drop(sender);

        persistence_worker(receiver, repository.clone()).await;
        assert_eq!(repository.load().await.unwrap().auto_fill, Some(true));
    }
}
