//! Run state
//!
//! One `RunState` per play session: exactly one player, one boss, one
//! encounter and one pause gate, handed to whoever drives the frame loop.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::boss::BossCleaner;
use super::encounter::Encounter;
use super::hooks::{GameLoopHooks, InputToggle, Outcome, Presentation};
use super::locomotion::LocomotionController;
use super::pause::{GateContext, NoInputGate};
use super::projectile::Projectile;
use crate::settings::Settings;

/// Where the session is in the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Player runs down the lane
    Running,
    /// Stopped at the finish line, waiting for the throw clip to end
    Throwing,
    /// Container in the air
    InFlight,
    /// Container hit the boss, waiting for the outcome
    Resolving,
    Finished(Outcome),
    /// Container never reached the boss
    Missed,
    /// Torn down before the outcome was announced
    Abandoned,
}

impl RunPhase {
    pub fn is_over(&self) -> bool {
        matches!(
            self,
            RunPhase::Finished(_) | RunPhase::Missed | RunPhase::Abandoned
        )
    }
}

#[derive(Debug)]
pub struct RunState {
    pub settings: Settings,
    pub player: LocomotionController,
    pub boss: BossCleaner,
    pub encounter: Encounter,
    pub gate: NoInputGate,
    pub projectile: Option<Projectile>,
    pub phase: RunPhase,
    /// Seconds simulated this session
    pub time: f32,
}

impl RunState {
    pub fn new(settings: Settings) -> Self {
        Self::with_gate(settings, NoInputGate::new())
    }

    /// Session whose pause gate runs a callback on every pause.
    ///
    /// Settings that fail validation are replaced by the defaults.
    pub fn with_gate(settings: Settings, gate: NoInputGate) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(err) => {
                log::error!("{err}; running with default settings");
                Settings::default()
            }
        };
        let mut player = LocomotionController::new(settings.player.clone());
        player.configure_width(settings.level_width);
        Self {
            boss: BossCleaner::new(&settings.boss),
            encounter: Encounter::new(&settings.encounter),
            player,
            gate,
            projectile: None,
            phase: RunPhase::Running,
            time: 0.0,
            settings,
        }
    }

    /// Show the boss and let the player run
    pub fn start(&mut self, presentation: &mut dyn Presentation) {
        self.boss.attach(presentation);
        self.player.set_can_move(true);
        log::info!(
            "Run started: boss at {}, throw line z = {}",
            self.boss_position(),
            self.throw_line()
        );
    }

    pub fn boss_position(&self) -> Vec3 {
        self.settings.boss.position
    }

    /// Lane distance at which the player stops and throws
    pub fn throw_line(&self) -> f32 {
        self.settings.boss.position.z - self.settings.encounter.throw_distance
    }

    /// Enter the no-input pause
    pub fn pause<'a>(
        &mut self,
        input: Option<&'a mut dyn InputToggle>,
        game_loop: &'a mut dyn GameLoopHooks,
    ) {
        self.gate.enter(GateContext {
            input: input.map(|i| -> &mut dyn InputToggle { i }),
            game_loop,
            player: &mut self.player,
        });
    }

    /// Leave the no-input pause
    pub fn resume<'a>(
        &mut self,
        input: Option<&'a mut dyn InputToggle>,
        game_loop: &'a mut dyn GameLoopHooks,
    ) {
        self.gate.exit(GateContext {
            input: input.map(|i| -> &mut dyn InputToggle { i }),
            game_loop,
            player: &mut self.player,
        });
        // Past the throw line the player stays put
        if self.phase != RunPhase::Running {
            self.player.set_can_move(false);
        }
    }

    /// Drop everything still in flight. No outcome will be announced.
    pub fn teardown(&mut self) {
        self.encounter.cancel();
        self.projectile = None;
        if !self.phase.is_over() {
            self.phase = RunPhase::Abandoned;
        }
        log::info!("Run torn down after {:.2}s", self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DIRTY_THRESHOLD, SIM_DT};
    use crate::sim::encounter::EncounterPhase;
    use crate::sim::hooks::{EventLog, GameEvent, InputFlag, NullPresentation};
    use crate::sim::tick::{TickInput, tick};

    #[test]
    fn test_new_configures_lane() {
        let settings = Settings {
            level_width: 6.0,
            ..Default::default()
        };
        let state = RunState::new(settings);
        assert_eq!(state.player.motion().max_lateral(), 3.0);
        assert_eq!(state.phase, RunPhase::Running);
        assert!(!state.player.can_move());
    }

    #[test]
    fn test_invalid_settings_fall_back_to_defaults() {
        let mut settings = Settings::default();
        settings.boss.dirty_threshold = 0.0;
        let state = RunState::new(settings);
        assert_eq!(state.settings.boss.dirty_threshold, DIRTY_THRESHOLD);
        assert_eq!(state.boss.dirty_threshold(), DIRTY_THRESHOLD);
    }

    #[test]
    fn test_start_shows_boss() {
        let mut state = RunState::new(Settings::default());
        let mut log = EventLog::new();
        state.start(&mut log);
        assert!(state.player.can_move());
        assert_eq!(log.events[0], GameEvent::HealthInit(100.0));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = RunState::new(Settings::default());
        let mut log = EventLog::new();
        state.start(&mut log);
        let mut input = InputFlag(true);

        state.pause(Some(&mut input), &mut log);
        assert!(!state.player.can_move());
        assert!(!input.0);

        state.resume(Some(&mut input), &mut log);
        assert!(state.player.can_move());
        assert!(input.0);
    }

    #[test]
    fn test_resume_while_throwing_keeps_player_still() {
        let mut settings = Settings {
            level_width: 4.0,
            ..Default::default()
        };
        settings.boss.position = Vec3::new(0.0, 0.0, 20.0);
        settings.encounter.throw_distance = 8.0;
        let mut state = RunState::new(settings);
        let mut log = EventLog::new();
        state.start(&mut log);

        let idle = TickInput::default();
        for _ in 0..10_000 {
            tick(&mut state, &idle, SIM_DT, &mut NullPresentation, None);
            if state.phase == RunPhase::Throwing {
                break;
            }
        }
        assert_eq!(state.phase, RunPhase::Throwing);
        let z = state.player.motion().position().z;

        let mut input = InputFlag(true);
        state.pause(Some(&mut input), &mut log);
        state.resume(Some(&mut input), &mut log);
        assert!(input.0);
        assert!(!state.player.can_move());

        for _ in 0..120 {
            tick(&mut state, &idle, SIM_DT, &mut NullPresentation, None);
        }
        assert_eq!(state.player.motion().position().z, z);
        assert_eq!(state.player.motion().current_speed(), 0.0);
        assert!(z < state.boss_position().z);
    }

    #[test]
    fn test_teardown() {
        let mut state = RunState::new(Settings::default());
        state.teardown();
        assert_eq!(state.phase, RunPhase::Abandoned);
        assert_eq!(state.encounter.phase(), EncounterPhase::Cancelled);
        assert!(!state.encounter.triggered());
    }
}
