//! Shared application state

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::application::ports::outbound::{RandomPort, SessionRepositoryPort, StoredSession};
use crate::application::services::{
    CharacterStore, DiceRollService, ExportFormat, ExportService, RollTiming, ThemeService,
};
use crate::domain::entities::CharacterSheet;
use crate::domain::events::DomainEvent;
use crate::domain::services::derived;
use crate::domain::value_objects::{AppSettings, CharacterTheme, ThemePreset};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::{JsonRenderer, TextRenderer};
use crate::infrastructure::persistence::create_session_repository;
use crate::infrastructure::random_adapter::ThreadRngAdapter;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub settings: AppSettings,
    /// The session; every mutation holds the write lock until subscribers ran
    pub store: RwLock<CharacterStore>,
    pub themes: RwLock<ThemeService>,
    pub dice: DiceRollService,
    pub export: ExportService,
    /// Store events fanned out to WebSocket clients and the persistence worker
    pub events: broadcast::Sender<DomainEvent>,
    pub repository: Arc<dyn SessionRepositoryPort>,
}

impl AppState {
    pub async fn new(config: AppConfig, settings: AppSettings) -> Result<Self> {
        let repository = create_session_repository(&config).await?;
        let random: Arc<dyn RandomPort> = Arc::new(ThreadRngAdapter::new());
        Ok(Self::with_ports(config, settings, repository, random).await)
    }

    /// Wire the state around the given ports, resuming whatever the
    /// repository has stored
    pub async fn with_ports(
        config: AppConfig,
        settings: AppSettings,
        repository: Arc<dyn SessionRepositoryPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let stored = match repository.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Could not load stored session, starting fresh: {}", e);
                StoredSession::default()
            }
        };

        let resumed = stored.sheet.is_some();
        let sheet = derived(stored.sheet.unwrap_or_default());
        let theme = stored
            .theme
            .unwrap_or_else(|| default_theme(&settings.default_theme));
        let auto_fill = stored.auto_fill.unwrap_or(settings.auto_fill_default);
        info!(
            resumed,
            theme_id = %theme.id,
            auto_fill,
            "Session ready"
        );

        let themes = ThemeService::resume(&theme);
        let mut store = CharacterStore::new(sheet, theme, auto_fill);

        let (events, _) = broadcast::channel(config.event_channel_capacity.max(1));
        let sender = events.clone();
        store.subscribe(move |event| {
            // No receivers is fine: nobody is connected and persistence is off
            let _ = sender.send(event.clone());
        });

        let dice = DiceRollService::new(random, RollTiming::from_settings(&settings));
        let export = ExportService::new(&settings)
            .with_renderer(ExportFormat::Text, Arc::new(TextRenderer::default()))
            .with_renderer(ExportFormat::Json, Arc::new(JsonRenderer));

        Self {
            config,
            settings,
            store: RwLock::new(store),
            themes: RwLock::new(themes),
            dice,
            export,
            events,
            repository,
        }
    }
}

fn default_theme(id: &str) -> CharacterTheme {
    match ThemePreset::from_id(id) {
        Some(preset) => CharacterTheme::from_preset(preset),
        None => {
            warn!(theme_id = %id, "Unknown default theme, using Goblin Grape");
            CharacterTheme::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::application::ports::outbound::FixedRandomPort;
    use crate::domain::value_objects::Ability;
    use crate::infrastructure::config::PersistenceBackend;
    use crate::infrastructure::persistence::InMemorySessionRepository;

    pub(crate) fn test_config() -> AppConfig {
        AppConfig {
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            persistence_backend: PersistenceBackend::InMemory,
            sqlite_path: String::new(),
            event_channel_capacity: 16,
        }
    }

    pub(crate) async fn test_state(repository: Arc<dyn SessionRepositoryPort>) -> AppState {
        AppState::with_ports(
            test_config(),
            AppSettings::default(),
            repository,
            Arc::new(FixedRandomPort::new(vec![6, 5, 5, 1])),
        )
        .await
    }

    #[tokio::test]
    async fn test_fresh_session_uses_defaults() {
        let state = test_state(Arc::new(InMemorySessionRepository::new())).await;
        let store = state.store.read().await;
        assert_eq!(store.theme().id, "goblin-grape");
        assert!(store.auto_fill_enabled());
        assert_eq!(store.character().passive_perception, 10);
    }

    #[tokio::test]
    async fn test_stored_session_is_resumed_and_derived() {
        let repository = Arc::new(InMemorySessionRepository::new());
        let stale = CharacterSheet::default().with_score(Ability::Wisdom, 16);
        repository.save_sheet(&stale).await.unwrap();
        repository
            .save_theme(&CharacterTheme::custom(ThemePreset::Ocean.palette()))
            .await
            .unwrap();
        repository.save_auto_fill(false).await.unwrap();

        let state = test_state(repository).await;
        let store = state.store.read().await;
        assert_eq!(store.character().abilities[Ability::Wisdom].modifier, 3);
        assert_eq!(store.character().passive_perception, 13);
        assert!(!store.auto_fill_enabled());
        assert!(state.themes.read().await.custom_mode());
    }

    #[tokio::test]
    async fn test_store_events_reach_the_channel() {
        let state = test_state(Arc::new(InMemorySessionRepository::new())).await;
        let mut receiver = state.events.subscribe();
        state.store.write().await.toggle_auto_fill();
        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "AutoFillChanged");
    }

    #[test]
    fn test_unknown_default_theme_falls_back() {
        assert_eq!(default_theme("plaid").id, "goblin-grape");
        assert_eq!(default_theme("fire").id, "fire");
    }
}
