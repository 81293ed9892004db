//! Boss cleaning
//!
//! The boss starts dirty. Each cleaning attempt spends the player's water and
//! fades the displayed dirt toward the new value over a short fixed duration.

use serde::{Deserialize, Serialize};

use super::hooks::Presentation;
use super::timer::Timer;
use crate::settings::BossSettings;

/// An in-flight dirtiness fade
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CleanTask {
    pub start: f32,
    pub target: f32,
    pub timer: Timer,
}

impl CleanTask {
    fn value(&self) -> f32 {
        self.start + (self.target - self.start) * self.timer.progress()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossCleaner {
    dirty_threshold: f32,
    clean_duration: f32,
    /// Last value written to the material
    dirtiness: f32,
    task: Option<CleanTask>,
}

impl BossCleaner {
    pub fn new(settings: &BossSettings) -> Self {
        Self {
            dirty_threshold: settings.dirty_threshold,
            clean_duration: settings.clean_duration,
            dirtiness: settings.initial_dirtiness.max(0.0),
            task: None,
        }
    }

    /// Push the starting look to the presentation (health bar and dirt)
    pub fn attach(&self, presentation: &mut dyn Presentation) {
        presentation.init_health(self.dirty_threshold);
        presentation.set_dirtiness(self.dirtiness);
    }

    /// Currently displayed dirtiness
    pub fn dirtiness(&self) -> f32 {
        self.dirtiness
    }

    /// Where the current fade will end, or the displayed value when idle
    pub fn target_dirtiness(&self) -> f32 {
        self.task.map_or(self.dirtiness, |t| t.target)
    }

    pub fn is_cleaning(&self) -> bool {
        self.task.is_some()
    }

    pub fn dirty_threshold(&self) -> f32 {
        self.dirty_threshold
    }

    /// Spend `fill_level` water on the boss.
    ///
    /// Any fade in progress is dropped and a new one starts from the displayed
    /// value. Returns whether the boss will be fully clean once the fade ends.
    pub fn attempt_clean(&mut self, fill_level: f32, presentation: &mut dyn Presentation) -> bool {
        if self.task.take().is_some() {
            log::debug!("Cleaning restarted at dirtiness {}", self.dirtiness);
        }

        if !(self.dirty_threshold > 0.0 && self.dirty_threshold.is_finite()) {
            log::error!(
                "Boss dirty threshold {} must be positive; cleaning skipped",
                self.dirty_threshold
            );
            return false;
        }

        let fill_level = if fill_level.is_finite() { fill_level } else { 0.0 };
        let start = self.dirtiness;
        let target = (start - fill_level / self.dirty_threshold).max(0.0);
        self.task = Some(CleanTask {
            start,
            target,
            timer: Timer::new(self.clean_duration),
        });
        presentation.set_dirtiness(start);
        presentation.set_health(target * self.dirty_threshold);

        log::info!("Cleaning boss: {start} -> {target} (fill {fill_level})");
        target <= 0.0
    }

    /// Advance the fade, writing the interpolated dirt every step
    pub fn tick(&mut self, dt: f32, presentation: &mut dyn Presentation) {
        let Some(task) = self.task.as_mut() else {
            return;
        };
        if task.timer.advance(dt) {
            // Pin exactly to the target so no lerp residue is left behind
            self.dirtiness = task.target;
            self.task = None;
        } else {
            self.dirtiness = task.value();
        }
        presentation.set_dirtiness(self.dirtiness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::hooks::{EventLog, GameEvent};

    fn boss() -> BossCleaner {
        BossCleaner::new(&BossSettings::default())
    }

    fn run_until_idle(boss: &mut BossCleaner, log: &mut EventLog) {
        for _ in 0..1000 {
            if !boss.is_cleaning() {
                return;
            }
            boss.tick(SIM_DT, log);
        }
        panic!("cleaning never finished");
    }

    #[test]
    fn test_full_clean_lands_exactly_on_zero() {
        let mut boss = boss();
        let mut log = EventLog::new();
        assert!(boss.attempt_clean(100.0, &mut log));
        run_until_idle(&mut boss, &mut log);

        let writes = log.dirtiness_writes();
        assert_eq!(writes.first(), Some(&1.0));
        assert_eq!(writes.last(), Some(&0.0));
        assert_eq!(boss.dirtiness(), 0.0);
        assert!(log.events.contains(&GameEvent::Health(0.0)));
    }

    #[test]
    fn test_partial_clean_stays_in_bounds() {
        let mut boss = boss();
        let mut log = EventLog::new();
        assert!(!boss.attempt_clean(50.0, &mut log));
        assert_eq!(boss.target_dirtiness(), 0.5);
        run_until_idle(&mut boss, &mut log);

        for d in log.dirtiness_writes() {
            assert!((0.0..=1.0).contains(&d), "dirtiness {d} out of range");
        }
        assert_eq!(boss.dirtiness(), 0.5);
    }

    #[test]
    fn test_prediction_ignores_displayed_value() {
        let mut boss = boss();
        let mut log = EventLog::new();
        assert!(boss.attempt_clean(250.0, &mut log));
        // Nothing has animated yet
        assert_eq!(boss.dirtiness(), 1.0);
        assert_eq!(boss.target_dirtiness(), 0.0);
    }

    #[test]
    fn test_new_attempt_cancels_previous_fade() {
        let mut boss = boss();
        let mut log = EventLog::new();
        boss.attempt_clean(80.0, &mut log);
        boss.tick(0.05, &mut log);
        let midway = boss.dirtiness();
        assert!(midway < 1.0 && midway > 0.2);

        // Restarts from the displayed value, not the old target
        assert!(!boss.attempt_clean(10.0, &mut log));
        let expected = midway - 0.1;
        assert!((boss.target_dirtiness() - expected).abs() < 1e-6);
        run_until_idle(&mut boss, &mut log);
        assert!((boss.dirtiness() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_completes_next_tick() {
        let settings = BossSettings {
            clean_duration: 0.0,
            ..Default::default()
        };
        let mut boss = BossCleaner::new(&settings);
        let mut log = EventLog::new();
        boss.attempt_clean(30.0, &mut log);
        boss.tick(0.0, &mut log);
        assert!(!boss.is_cleaning());
        assert!((boss.dirtiness() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_zero_threshold_never_cleans() {
        let settings = BossSettings {
            dirty_threshold: 0.0,
            ..Default::default()
        };
        let mut boss = BossCleaner::new(&settings);
        let mut log = EventLog::new();
        assert!(!boss.attempt_clean(0.0, &mut log));
        assert!(!boss.attempt_clean(500.0, &mut log));
        assert!(!boss.is_cleaning());
        assert_eq!(boss.dirtiness(), 1.0);
        assert!(log.events.is_empty());
    }

    #[test]
    fn test_attach_initializes_health_bar() {
        let boss = boss();
        let mut log = EventLog::new();
        boss.attach(&mut log);
        assert_eq!(
            log.events,
            vec![GameEvent::HealthInit(100.0), GameEvent::Dirtiness(1.0)]
        );
    }
}
