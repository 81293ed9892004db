//! Collaborator interfaces
//!
//! The simulation only ever writes to these. Nothing here is read back as a
//! source of truth, and every call is fire-and-forget.

use serde::{Deserialize, Serialize};

/// Audio clip ids the sound system knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundId {
    None,
    Coin,
    Soap,
    Key,
    Button,
    MenuMusic,
    Throw,
    Explosion,
}

/// Which way a win/lose resolution went
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Visual, animation and audio side effects
///
/// Every method defaults to a no-op so hosts only implement what they render.
pub trait Presentation {
    /// Animator speed parameter (distance per second)
    fn set_speed(&mut self, _speed: f32) {}
    /// Animator trigger for the throw clip
    fn trigger_throw(&mut self) {}
    /// Boss material dirt amount
    fn set_dirtiness(&mut self, _dirtiness: f32) {}
    /// Boss health bar setup
    fn init_health(&mut self, _max: f32) {}
    fn set_health(&mut self, _value: f32) {}
    fn play_sound(&mut self, _sound: SoundId) {}
    /// Explosion particles at the impact point
    fn play_explosion(&mut self) {}
    fn break_window(&mut self) {}
}

/// Game loop notifications around no-input pauses
pub trait GameLoopHooks {
    fn pause_begin(&mut self);
    fn pause_end(&mut self);
}

/// Host input processing switch
pub trait InputToggle {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// Receives the result of the encounter
pub trait OutcomeHandler {
    fn win(&mut self);
    fn lose(&mut self);
}

/// Presentation that drops everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}

/// A recorded collaborator call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Speed(f32),
    ThrowTriggered,
    Dirtiness(f32),
    HealthInit(f32),
    Health(f32),
    Sound(SoundId),
    Explosion,
    WindowBroken,
    PauseBegin,
    PauseEnd,
    Resolved(Outcome),
}

/// Records every collaborator call in order
///
/// Used by the demo binary and tests. Speed telemetry arrives every tick, so it
/// is only recorded when `record_speed` is set.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
    pub record_speed: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded events
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every dirtiness write, in order
    pub fn dirtiness_writes(&self) -> Vec<f32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Dirtiness(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    /// Every win/lose call, in order
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                GameEvent::Resolved(o) => Some(*o),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &GameEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl Presentation for EventLog {
    fn set_speed(&mut self, speed: f32) {
        if self.record_speed {
            self.events.push(GameEvent::Speed(speed));
        }
    }

    fn trigger_throw(&mut self) {
        self.events.push(GameEvent::ThrowTriggered);
    }

    fn set_dirtiness(&mut self, dirtiness: f32) {
        self.events.push(GameEvent::Dirtiness(dirtiness));
    }

    fn init_health(&mut self, max: f32) {
        self.events.push(GameEvent::HealthInit(max));
    }

    fn set_health(&mut self, value: f32) {
        self.events.push(GameEvent::Health(value));
    }

    fn play_sound(&mut self, sound: SoundId) {
        self.events.push(GameEvent::Sound(sound));
    }

    fn play_explosion(&mut self) {
        self.events.push(GameEvent::Explosion);
    }

    fn break_window(&mut self) {
        self.events.push(GameEvent::WindowBroken);
    }
}

impl GameLoopHooks for EventLog {
    fn pause_begin(&mut self) {
        self.events.push(GameEvent::PauseBegin);
    }

    fn pause_end(&mut self) {
        self.events.push(GameEvent::PauseEnd);
    }
}

impl OutcomeHandler for EventLog {
    fn win(&mut self) {
        self.events.push(GameEvent::Resolved(Outcome::Win));
    }

    fn lose(&mut self) {
        self.events.push(GameEvent::Resolved(Outcome::Lose));
    }
}

/// Plain input flag, for hosts without their own input manager
#[derive(Debug, Clone, Copy)]
pub struct InputFlag(pub bool);

impl Default for InputFlag {
    fn default() -> Self {
        Self(true)
    }
}

impl InputToggle for InputFlag {
    fn enabled(&self) -> bool {
        self.0
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.0 = enabled;
    }
}
