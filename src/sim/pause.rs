//! No-input pause gate
//!
//! While active, input processing is off and the player cannot move. Entering
//! remembers whether input was on; leaving only restores it if it was.

use super::hooks::{GameLoopHooks, InputToggle};
use super::locomotion::LocomotionController;

/// Everything the gate switches on and off
pub struct GateContext<'a> {
    /// `None` when the host has no input manager right now
    pub input: Option<&'a mut dyn InputToggle>,
    pub game_loop: &'a mut dyn GameLoopHooks,
    pub player: &'a mut LocomotionController,
}

#[derive(Default)]
pub struct NoInputGate {
    active: bool,
    input_was_enabled: bool,
    on_pause: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for NoInputGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoInputGate")
            .field("active", &self.active)
            .field("input_was_enabled", &self.input_was_enabled)
            .field("on_pause", &self.on_pause.is_some())
            .finish()
    }
}

impl NoInputGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate with a callback run on every `enter`
    pub fn with_callback(on_pause: impl FnMut() + 'static) -> Self {
        Self {
            on_pause: Some(Box::new(on_pause)),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn input_was_enabled(&self) -> bool {
        self.input_was_enabled
    }

    pub fn enter(&mut self, ctx: GateContext<'_>) {
        if !self.active {
            self.active = true;
            match ctx.input {
                Some(input) => {
                    self.input_was_enabled = input.enabled();
                    input.set_enabled(false);
                    ctx.game_loop.pause_begin();
                    ctx.player.set_can_move(false);
                    log::debug!("No-input pause entered (input was {})", self.input_was_enabled);
                }
                None => {
                    self.input_was_enabled = false;
                    log::warn!("No-input pause entered without an input manager");
                }
            }
        }

        // Runs on every enter, snapshot or not
        if let Some(on_pause) = self.on_pause.as_mut() {
            on_pause();
        }
    }

    pub fn exit(&mut self, ctx: GateContext<'_>) {
        if !self.active {
            return;
        }
        self.active = false;
        let was_enabled = std::mem::take(&mut self.input_was_enabled);
        if !was_enabled {
            return;
        }

        match ctx.input {
            Some(input) => {
                input.set_enabled(true);
                ctx.game_loop.pause_end();
                ctx.player.set_can_move(true);
                log::debug!("No-input pause exited, input restored");
            }
            None => log::warn!("No-input pause exited without an input manager; input not restored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PlayerSettings;
    use crate::sim::hooks::{EventLog, GameEvent, InputFlag};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixture {
        gate: NoInputGate,
        input: InputFlag,
        log: EventLog,
        player: LocomotionController,
    }

    impl Fixture {
        fn new(gate: NoInputGate, input_enabled: bool) -> Self {
            let mut player = LocomotionController::new(PlayerSettings::default());
            player.set_can_move(true);
            Self {
                gate,
                input: InputFlag(input_enabled),
                log: EventLog::new(),
                player,
            }
        }

        fn enter(&mut self) {
            self.gate.enter(GateContext {
                input: Some(&mut self.input),
                game_loop: &mut self.log,
                player: &mut self.player,
            });
        }

        fn exit(&mut self) {
            self.gate.exit(GateContext {
                input: Some(&mut self.input),
                game_loop: &mut self.log,
                player: &mut self.player,
            });
        }
    }

    #[test]
    fn test_enter_then_exit_restores_input() {
        let mut f = Fixture::new(NoInputGate::new(), true);
        f.enter();
        assert!(f.gate.is_active());
        assert!(!f.input.0);
        assert!(!f.player.can_move());

        f.exit();
        assert!(!f.gate.is_active());
        assert!(f.input.0);
        assert!(f.player.can_move());
        assert_eq!(f.log.events, vec![GameEvent::PauseBegin, GameEvent::PauseEnd]);
    }

    #[test]
    fn test_exit_keeps_input_disabled_if_it_was_off() {
        let mut f = Fixture::new(NoInputGate::new(), false);
        f.enter();
        f.exit();
        assert!(!f.input.0);
        assert!(!f.player.can_move());
        assert_eq!(f.log.events, vec![GameEvent::PauseBegin]);
    }

    #[test]
    fn test_double_enter_keeps_first_snapshot() {
        let mut f = Fixture::new(NoInputGate::new(), true);
        f.enter();
        f.enter();
        assert!(f.gate.input_was_enabled());
        assert_eq!(f.log.count(&GameEvent::PauseBegin), 1);

        f.exit();
        f.exit();
        assert!(f.input.0);
        assert_eq!(f.log.count(&GameEvent::PauseEnd), 1);
    }

    #[test]
    fn test_callback_runs_on_every_enter() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let gate = NoInputGate::with_callback(move || counter.set(counter.get() + 1));
        let mut f = Fixture::new(gate, false);
        f.enter();
        f.enter();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_missing_input_manager() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut gate = NoInputGate::with_callback(move || counter.set(counter.get() + 1));
        let mut log = EventLog::new();
        let mut player = LocomotionController::new(PlayerSettings::default());
        player.set_can_move(true);

        gate.enter(GateContext {
            input: None,
            game_loop: &mut log,
            player: &mut player,
        });
        assert_eq!(calls.get(), 1);
        assert!(player.can_move());
        assert!(!gate.input_was_enabled());

        gate.exit(GateContext {
            input: None,
            game_loop: &mut log,
            player: &mut player,
        });
        assert!(log.events.is_empty());
    }
}
