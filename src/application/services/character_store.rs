//! Character Store - The single owner of session state
//!
//! Holds the current sheet, theme and auto-fill toggle. Every mutation runs to
//! completion and then notifies subscribers synchronously, in the order they
//! subscribed. Readers only ever get copies.

use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::domain::entities::CharacterSheet;
use crate::domain::events::DomainEvent;
use crate::domain::services::derive;
use crate::domain::value_objects::{Ability, CharacterTheme, SubscriptionId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Skill not found: '{0}'")]
    SkillNotFound(String),
}

/// Callback invoked after each settled mutation
pub type Subscriber = Box<dyn Fn(&DomainEvent) + Send + Sync>;

pub struct CharacterStore {
    sheet: CharacterSheet,
    theme: CharacterTheme,
    auto_fill: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl CharacterStore {
    /// Start a session. The sheet is stored as given; pass a derived sheet if
    /// derived fields must be consistent from the start.
    pub fn new(sheet: CharacterSheet, theme: CharacterTheme, auto_fill: bool) -> Self {
        Self {
            sheet,
            theme,
            auto_fill,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(
        &mut self,
        callback: impl Fn(&DomainEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribers.push((id, Box::new(callback)));
        debug!(subscription_id = %id, "Subscriber added");
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(subscription_id = %id, "Subscriber removed");
        }
        removed
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn character(&self) -> CharacterSheet {
        self.sheet.clone()
    }

    pub fn theme(&self) -> CharacterTheme {
        self.theme.clone()
    }

    pub fn auto_fill_enabled(&self) -> bool {
        self.auto_fill
    }

    /// Overwrite the sheet as-is: no validation, no derivation
    pub fn replace_character(&mut self, sheet: CharacterSheet) {
        self.sheet = sheet;
        info!(name = %self.sheet.character_name, "Character replaced");
        self.notify_character();
    }

    pub fn set_theme(&mut self, theme: CharacterTheme) {
        info!(theme_id = %theme.id, "Theme changed");
        self.theme = theme;
        self.notify(DomainEvent::theme_changed(self.theme.clone()));
    }

    pub fn toggle_auto_fill(&mut self) -> bool {
        self.set_auto_fill(!self.auto_fill);
        self.auto_fill
    }

    pub fn set_auto_fill(&mut self, enabled: bool) {
        self.auto_fill = enabled;
        info!(enabled, "Auto-fill changed");
        self.notify(DomainEvent::auto_fill_changed(enabled));
    }

    #[instrument(skip(self))]
    pub fn set_ability_score(&mut self, ability: Ability, score: i32) {
        self.sheet.abilities[ability].score = score;
        self.settle();
    }

    #[instrument(skip(self))]
    pub fn set_proficiency_bonus(&mut self, bonus: i32) {
        self.sheet.proficiency_bonus = bonus;
        self.settle();
    }

    /// Flip a skill's proficiency; returns the new flag
    #[instrument(skip(self))]
    pub fn toggle_skill_proficiency(&mut self, name: &str) -> Result<bool, StoreError> {
        let skill = self
            .sheet
            .skill_mut(name)
            .ok_or_else(|| StoreError::SkillNotFound(name.to_string()))?;
        skill.proficient = !skill.proficient;
        let proficient = skill.proficient;
        self.settle();
        Ok(proficient)
    }

    /// Flip a saving throw's proficiency; returns the new flag
    #[instrument(skip(self))]
    pub fn toggle_saving_throw_proficiency(&mut self, ability: Ability) -> bool {
        let save = &mut self.sheet.saving_throws[ability];
        save.proficient = !save.proficient;
        let proficient = save.proficient;
        self.settle();
        proficient
    }

    /// Apply an arbitrary edit, then re-derive and notify once
    pub fn update_character(&mut self, edit: impl FnOnce(&mut CharacterSheet)) {
        edit(&mut self.sheet);
        self.settle();
    }

    fn settle(&mut self) {
        derive(&mut self.sheet);
        debug!(
            passive_perception = self.sheet.passive_perception,
            initiative = self.sheet.initiative,
            "Sheet re-derived"
        );
        self.notify_character();
    }

    fn notify_character(&self) {
        self.notify(DomainEvent::character_changed(self.sheet.clone()));
    }

    fn notify(&self, event: DomainEvent) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&event);
        }
    }
}

impl Default for CharacterStore {
    fn default() -> Self {
        let mut sheet = CharacterSheet::default();
        derive(&mut sheet);
        Self::new(sheet, CharacterTheme::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::is_consistent;
    use crate::domain::value_objects::ThemePreset;
    use std::sync::{Arc, Mutex};

    fn recording_store() -> (CharacterStore, Arc<Mutex<Vec<&'static str>>>) {
        let mut store = CharacterStore::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |event| sink.lock().unwrap().push(event.event_type()));
        (store, seen)
    }

    #[test]
    fn test_default_session() {
        let store = CharacterStore::default();
        assert!(store.auto_fill_enabled());
        assert_eq!(store.theme().id, "goblin-grape");
        assert_eq!(store.character().passive_perception, 10);
        assert!(is_consistent(&store.character()));
    }

    #[test]
    fn test_subscribers_notified_synchronously() {
        let (mut store, seen) = recording_store();
        store.set_ability_score(Ability::Dexterity, 14);
        assert_eq!(*seen.lock().unwrap(), vec!["CharacterChanged"]);
        assert_eq!(store.character().initiative, 2);
    }

    #[test]
    fn test_subscribers_run_in_order() {
        let mut store = CharacterStore::default();
        let order = Arc::new(Mutex::new(Vec::new()));
        for n in 0..3 {
            let order = order.clone();
            store.subscribe(move |_| order.lock().unwrap().push(n));
        }
        store.toggle_auto_fill();
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_unsubscribed_callback_is_not_called() {
        let mut store = CharacterStore::default();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let id = store.subscribe(move |_| *counter.lock().unwrap() += 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_proficiency_bonus(3);
        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_reads_are_copies() {
        let store = CharacterStore::default();
        let mut copy = store.character();
        copy.character_name = "Changed".to_string();
        copy.abilities[Ability::Strength].score = 30;
        assert_eq!(store.character().character_name, "");
        assert_eq!(store.character().abilities[Ability::Strength].score, 10);
    }

    #[test]
    fn test_replace_does_not_derive() {
        let (mut store, seen) = recording_store();
        let raw = CharacterSheet::default().with_score(Ability::Strength, 18);
        store.replace_character(raw.clone());
        assert_eq!(store.character(), raw);
        assert_eq!(store.character().abilities[Ability::Strength].modifier, 0);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_theme_switch_is_one_notification() {
        let (mut store, seen) = recording_store();
        let forest = CharacterTheme::from_preset(ThemePreset::Forest);
        store.set_theme(forest.clone());
        assert_eq!(store.theme(), forest);
        assert_eq!(*seen.lock().unwrap(), vec!["ThemeChanged"]);
    }

    #[test]
    fn test_toggle_auto_fill() {
        let (mut store, seen) = recording_store();
        assert!(!store.toggle_auto_fill());
        assert!(store.toggle_auto_fill());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_skill_proficiency_propagates() {
        let mut store = CharacterStore::default();
        store.set_ability_score(Ability::Wisdom, 12);
        assert_eq!(store.toggle_skill_proficiency("Perception"), Ok(true));

        let sheet = store.character();
        assert_eq!(sheet.skill("Perception").map(|s| s.value), Some(3));
        assert_eq!(sheet.passive_perception, 13);
    }

    #[test]
    fn test_unknown_skill_is_reported_without_notifying() {
        let (mut store, seen) = recording_store();
        let err = store.toggle_skill_proficiency("Basket Weaving").unwrap_err();
        assert_eq!(err, StoreError::SkillNotFound("Basket Weaving".to_string()));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_saving_throw_toggle_and_bonus() {
        let mut store = CharacterStore::default();
        store.set_ability_score(Ability::Constitution, 15);
        assert!(store.toggle_saving_throw_proficiency(Ability::Constitution));
        store.set_proficiency_bonus(3);
        assert_eq!(store.character().saving_throws[Ability::Constitution].value, 5);
    }

    #[test]
    fn test_update_character_keeps_sheet_consistent() {
        let mut store = CharacterStore::default();
        store.update_character(|sheet| {
            sheet.character_name = "Nyx".to_string();
            sheet.abilities[Ability::Charisma].score = 17;
        });
        let sheet = store.character();
        assert_eq!(sheet.character_name, "Nyx");
        assert!(is_consistent(&sheet));
    }
}
