//! Dice Roll Service - 4d6-drop-lowest ability rolls
//!
//! A roll can stand alone or target an ability; with auto-fill on, a targeted
//! roll writes its total into the sheet through the store, which re-derives.
//! The animated variant paces the roll with two timers (rolling, then result
//! visible) and tracks what the dice display shows.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::CharacterStore;
use crate::application::dto::{AbilityRollDto, RollDisplayDto};
use crate::application::ports::outbound::RandomPort;
use crate::domain::value_objects::{Ability, AbilityRoll, AppSettings, ABILITY_DICE, DIE_SIDES};

/// Roll four dice through the port and drop the lowest
pub fn roll_ability_score(random: &dyn RandomPort) -> AbilityRoll {
    let rolls: [i32; ABILITY_DICE] = std::array::from_fn(|_| random.random_range(1, DIE_SIDES));
    AbilityRoll::from_dice(rolls)
}

/// A finished roll and whether it landed on the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: AbilityRoll,
    pub ability: Option<Ability>,
    pub applied: bool,
}

impl RollOutcome {
    pub fn to_dto(&self) -> AbilityRollDto {
        AbilityRollDto::new(&self.roll, self.ability, self.applied)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling {
        ability: Option<Ability>,
    },
    ShowingResult(RollOutcome),
}

impl RollPhase {
    pub fn to_dto(&self) -> RollDisplayDto {
        match self {
            RollPhase::Idle => RollDisplayDto::Idle,
            RollPhase::Rolling { ability } => RollDisplayDto::Rolling { ability: *ability },
            RollPhase::ShowingResult(outcome) => RollDisplayDto::ShowingResult {
                roll: outcome.to_dto(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollTiming {
    pub rolling_delay: Duration,
    pub display_duration: Duration,
}

impl RollTiming {
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self {
            rolling_delay: Duration::from_millis(settings.dice_rolling_delay_ms),
            display_duration: Duration::from_millis(settings.dice_result_display_ms),
        }
    }
}

impl Default for RollTiming {
    fn default() -> Self {
        Self::from_settings(&AppSettings::default())
    }
}

#[derive(Debug, Default)]
struct DisplayState {
    /// Bumped by every animated roll; a hide timer only acts on its own generation
    generation: u64,
    phase: RollPhase,
}

pub struct DiceRollService {
    random: Arc<dyn RandomPort>,
    timing: RollTiming,
    display: Arc<RwLock<DisplayState>>,
}

impl DiceRollService {
    pub fn new(random: Arc<dyn RandomPort>, timing: RollTiming) -> Self {
        Self {
            random,
            timing,
            display: Arc::new(RwLock::new(DisplayState::default())),
        }
    }

    /// Roll for an ability and auto-fill it when the store allows
    #[instrument(skip(self, store))]
    pub fn roll_for_ability(&self, store: &mut CharacterStore, ability: Ability) -> RollOutcome {
        let roll = roll_ability_score(self.random.as_ref());
        Self::apply(store, ability, roll)
    }

    /// Roll with display pacing: show "rolling", wait, roll and apply, show the
    /// result, then hide it in the background after the display duration.
    #[instrument(skip(self, store))]
    pub async fn roll_animated(
        &self,
        store: &RwLock<CharacterStore>,
        ability: Option<Ability>,
    ) -> RollOutcome {
        let generation = {
            let mut display = self.display.write().await;
            display.generation += 1;
            display.phase = RollPhase::Rolling { ability };
            display.generation
        };

        tokio::time::sleep(self.timing.rolling_delay).await;

        let outcome = match ability {
            Some(ability) => self.roll_for_ability(&mut *store.write().await, ability),
            None => {
                let roll = roll_ability_score(self.random.as_ref());
                debug!(rolls = ?roll.rolls, total = roll.total, "Standalone roll");
                RollOutcome {
                    roll,
                    ability: None,
                    applied: false,
                }
            }
        };

        {
            let mut display = self.display.write().await;
            if display.generation == generation {
                display.phase = RollPhase::ShowingResult(outcome);
            } else {
                debug!(generation, "Roll superseded before its result was shown");
            }
        }

        let display = self.display.clone();
        let hide_after = self.timing.display_duration;
        tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            let mut display = display.write().await;
            if display.generation == generation {
                display.phase = RollPhase::Idle;
            }
        });

        outcome
    }

    pub async fn display(&self) -> RollPhase {
        self.display.read().await.phase
    }

    fn apply(store: &mut CharacterStore, ability: Ability, roll: AbilityRoll) -> RollOutcome {
        let applied = store.auto_fill_enabled();
        if applied {
            store.set_ability_score(ability, roll.total);
        }
        info!(
            ability = %ability,
            total = roll.total,
            applied,
            "{}",
            roll.breakdown()
        );
        RollOutcome {
            roll,
            ability: Some(ability),
            applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::outbound::{FixedRandomPort, MockRandomPort};
    use mockall::predicate::eq;

    fn mock_dice(values: Vec<i32>) -> MockRandomPort {
        let mut mock = MockRandomPort::new();
        let mut values = values.into_iter();
        mock.expect_random_range()
            .with(eq(1), eq(6))
            .times(4)
            .returning(move |_, _| values.next().unwrap_or(1));
        mock
    }

    #[test]
    fn test_roll_drops_first_lowest() {
        let roll = roll_ability_score(&FixedRandomPort::new(vec![2, 5, 6, 2]));
        assert_eq!(roll.dropped_index, 0);
        assert_eq!(roll.total, 13);
    }

    #[test]
    fn test_auto_fill_writes_score_and_derives() {
        let service =
            DiceRollService::new(Arc::new(mock_dice(vec![6, 5, 5, 1])), RollTiming::default());
        let mut store = CharacterStore::default();
        store.toggle_saving_throw_proficiency(Ability::Strength);

        let outcome = service.roll_for_ability(&mut store, Ability::Strength);
        assert!(outcome.applied);
        assert_eq!(outcome.roll.total, 16);

        let sheet = store.character();
        assert_eq!(sheet.abilities[Ability::Strength].score, 16);
        assert_eq!(sheet.abilities[Ability::Strength].modifier, 3);
        assert_eq!(sheet.saving_throws[Ability::Strength].value, 5);
        assert_eq!(sheet.skill("Athletics").map(|s| s.value), Some(3));
    }

    #[test]
    fn test_auto_fill_off_leaves_sheet_untouched() {
        let service =
            DiceRollService::new(Arc::new(mock_dice(vec![6, 5, 5, 1])), RollTiming::default());
        let mut store = CharacterStore::default();
        store.set_auto_fill(false);
        let before = store.character();

        let outcome = service.roll_for_ability(&mut store, Ability::Strength);
        assert!(!outcome.applied);
        assert_eq!(outcome.roll.total, 16);
        assert_eq!(store.character(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_standalone_roll_leaves_sheet_alone_with_auto_fill_on() {
        let service = DiceRollService::new(
            Arc::new(FixedRandomPort::constant(3)),
            RollTiming::default(),
        );
        let store = RwLock::new(CharacterStore::default());
        assert!(store.read().await.auto_fill_enabled());
        let before = store.read().await.character();

        let outcome = service.roll_animated(&store, None).await;
        assert_eq!(outcome.roll.total, 9);
        assert_eq!(outcome.ability, None);
        assert!(!outcome.applied);
        assert_eq!(service.display().await, RollPhase::ShowingResult(outcome));
        assert_eq!(store.read().await.character(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animation_phases() {
        let service = Arc::new(DiceRollService::new(
            Arc::new(FixedRandomPort::new(vec![6, 6, 4, 1])),
            RollTiming::default(),
        ));
        let store = Arc::new(RwLock::new(CharacterStore::default()));

        let task = {
            let service = service.clone();
            let store = store.clone();
            tokio::spawn(async move {
                service
                    .roll_animated(&store, Some(Ability::Dexterity))
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(
            service.display().await,
            RollPhase::Rolling { ability: Some(Ability::Dexterity) }
        );

        let outcome = task.await.unwrap();
        assert_eq!(outcome.roll.total, 16);
        assert_eq!(service.display().await, RollPhase::ShowingResult(outcome));
        assert_eq!(store.read().await.character().initiative, 3);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(service.display().await, RollPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_roll_supersedes_stale_hide_timer() {
        let service =
            DiceRollService::new(Arc::new(FixedRandomPort::constant(4)), RollTiming::default());
        let store = RwLock::new(CharacterStore::default());

        service.roll_animated(&store, Some(Ability::Strength)).await;
        tokio::time::sleep(Duration::from_millis(2000)).await;
        let second = service.roll_animated(&store, Some(Ability::Wisdom)).await;

        // The first roll's hide timer has fired by now and must be ignored
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(service.display().await, RollPhase::ShowingResult(second));

        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(service.display().await, RollPhase::Idle);
    }

    #[test]
    fn test_timing_follows_settings() {
        let settings = AppSettings {
            dice_rolling_delay_ms: 250,
            dice_result_display_ms: 750,
            ..AppSettings::default()
        };
        let timing = RollTiming::from_settings(&settings);
        assert_eq!(timing.rolling_delay, Duration::from_millis(250));
        assert_eq!(timing.display_duration, Duration::from_millis(750));
    }
}
