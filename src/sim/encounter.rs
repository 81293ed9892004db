//! End-of-level encounter
//!
//! `Idle -> Triggered -> Resolved(Win | Lose)`. The first container hit on the
//! boss triggers it; the outcome is decided at that moment and announced after
//! a fixed presentational delay.

use serde::{Deserialize, Serialize};

use super::boss::BossCleaner;
use super::hooks::{Outcome, OutcomeHandler, Presentation, SoundId};
use super::timer::Timer;
use crate::settings::EncounterSettings;

/// What the thrown container touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColliderTag {
    Boss,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EncounterPhase {
    Idle,
    /// Waiting out the delay with the outcome already captured
    Triggered { timer: Timer, boss_cleaned: bool },
    Resolved(Outcome),
    /// Torn down before resolving; nothing was announced
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    phase: EncounterPhase,
    /// Set by the first boss collision, never cleared
    triggered: bool,
    resolve_delay: f32,
}

impl Encounter {
    pub fn new(settings: &EncounterSettings) -> Self {
        Self {
            phase: EncounterPhase::Idle,
            triggered: false,
            resolve_delay: settings.resolve_delay,
        }
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// One-shot latch: true from the first qualifying collision onward
    pub fn triggered(&self) -> bool {
        self.triggered
    }

    /// `None` while pending
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            EncounterPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Handle a container collision. Returns true if this one triggered the encounter.
    pub fn on_collision(
        &mut self,
        other: ColliderTag,
        boss: &mut BossCleaner,
        fill_level: f32,
        presentation: &mut dyn Presentation,
    ) -> bool {
        if other != ColliderTag::Boss || self.triggered || self.phase == EncounterPhase::Cancelled {
            return false;
        }
        self.triggered = true;

        presentation.play_explosion();
        presentation.play_sound(SoundId::Explosion);
        presentation.break_window();

        // Decided now; the delay below is only for show
        let boss_cleaned = boss.attempt_clean(fill_level, presentation);
        self.phase = EncounterPhase::Triggered {
            timer: Timer::new(self.resolve_delay),
            boss_cleaned,
        };
        log::info!("Encounter triggered (boss cleaned: {boss_cleaned})");
        true
    }

    /// Count down the delay and announce the outcome once.
    ///
    /// `handler` is `None` when the owner of the outcome is gone; the
    /// resolution is then dropped silently.
    pub fn tick(&mut self, dt: f32, handler: Option<&mut dyn OutcomeHandler>) {
        let EncounterPhase::Triggered {
            mut timer,
            boss_cleaned,
        } = self.phase
        else {
            return;
        };

        if !timer.advance(dt) {
            self.phase = EncounterPhase::Triggered {
                timer,
                boss_cleaned,
            };
            return;
        }

        let Some(handler) = handler else {
            log::debug!("Encounter owner gone before resolution; skipping");
            self.phase = EncounterPhase::Cancelled;
            return;
        };

        let outcome = if boss_cleaned {
            handler.win();
            Outcome::Win
        } else {
            handler.lose();
            Outcome::Lose
        };
        log::info!("Encounter resolved: {outcome:?}");
        self.phase = EncounterPhase::Resolved(outcome);
    }

    /// Tear down: a pending resolution never fires
    pub fn cancel(&mut self) {
        if !matches!(self.phase, EncounterPhase::Resolved(_)) {
            self.phase = EncounterPhase::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{RESOLVE_DELAY, SIM_DT};
    use crate::settings::BossSettings;
    use crate::sim::hooks::{EventLog, GameEvent};

    fn setup() -> (Encounter, BossCleaner, EventLog) {
        (
            Encounter::new(&EncounterSettings::default()),
            BossCleaner::new(&BossSettings::default()),
            EventLog::new(),
        )
    }

    fn wait(encounter: &mut Encounter, log: &mut EventLog, seconds: f32) {
        let steps = (seconds / SIM_DT).ceil() as u32 + 1;
        for _ in 0..steps {
            encounter.tick(SIM_DT, Some(&mut *log as &mut dyn OutcomeHandler));
        }
    }

    #[test]
    fn test_clean_boss_wins_after_delay() {
        let (mut enc, mut boss, mut log) = setup();
        assert!(enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log));
        assert!(log.events.contains(&GameEvent::Explosion));
        assert!(log.events.contains(&GameEvent::WindowBroken));
        assert!(log.events.contains(&GameEvent::Sound(SoundId::Explosion)));

        wait(&mut enc, &mut log, RESOLVE_DELAY * 0.5);
        assert!(log.outcomes().is_empty());
        assert_eq!(enc.outcome(), None);

        wait(&mut enc, &mut log, RESOLVE_DELAY);
        assert_eq!(log.outcomes(), vec![Outcome::Win]);
        assert_eq!(enc.outcome(), Some(Outcome::Win));
    }

    #[test]
    fn test_dirty_boss_loses() {
        let (mut enc, mut boss, mut log) = setup();
        enc.on_collision(ColliderTag::Boss, &mut boss, 40.0, &mut log);
        wait(&mut enc, &mut log, RESOLVE_DELAY * 2.0);
        assert_eq!(log.outcomes(), vec![Outcome::Lose]);
    }

    #[test]
    fn test_double_collision_triggers_once() {
        let (mut enc, mut boss, mut log) = setup();
        assert!(enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log));
        assert!(!enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log));
        assert_eq!(log.count(&GameEvent::Explosion), 1);

        wait(&mut enc, &mut log, RESOLVE_DELAY * 3.0);
        assert_eq!(log.outcomes(), vec![Outcome::Win]);
    }

    #[test]
    fn test_other_colliders_ignored() {
        let (mut enc, mut boss, mut log) = setup();
        assert!(!enc.on_collision(ColliderTag::Other, &mut boss, 100.0, &mut log));
        assert!(!enc.triggered());
        assert!(log.events.is_empty());
    }

    #[test]
    fn test_decision_captured_at_collision() {
        let (mut enc, mut boss, mut log) = setup();
        enc.on_collision(ColliderTag::Boss, &mut boss, 10.0, &mut log);
        // Later cleaning does not change the captured outcome
        boss.attempt_clean(1000.0, &mut log);
        wait(&mut enc, &mut log, RESOLVE_DELAY * 2.0);
        assert_eq!(log.outcomes(), vec![Outcome::Lose]);
    }

    #[test]
    fn test_missing_owner_skips_resolution() {
        let (mut enc, mut boss, mut log) = setup();
        enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log);
        enc.tick(RESOLVE_DELAY + 1.0, None);
        assert_eq!(enc.phase(), EncounterPhase::Cancelled);
        assert!(log.outcomes().is_empty());
    }

    #[test]
    fn test_cancel_drops_pending_resolution() {
        let (mut enc, mut boss, mut log) = setup();
        enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log);
        enc.cancel();
        wait(&mut enc, &mut log, RESOLVE_DELAY * 2.0);
        assert!(log.outcomes().is_empty());
        assert!(!enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log));
    }

    #[test]
    fn test_cancel_before_collision_is_not_a_trigger() {
        let (mut enc, mut boss, mut log) = setup();
        enc.cancel();
        assert!(!enc.triggered());
        assert_eq!(enc.phase(), EncounterPhase::Cancelled);

        // Torn down: later hits do nothing
        assert!(!enc.on_collision(ColliderTag::Boss, &mut boss, 100.0, &mut log));
        assert!(!enc.triggered());
        assert!(log.events.is_empty());
    }
}
