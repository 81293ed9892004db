//! Simulation module
//!
//! All gameplay logic lives here. Single-threaded, tick driven:
//! - Every timed sequence is an elapsed-time counter advanced by `tick`
//! - Presentation is write-only, through the traits in `hooks`
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod clock;
pub mod encounter;
pub mod hooks;
pub mod locomotion;
pub mod motion;
pub mod pause;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod timer;

pub use boss::{BossCleaner, CleanTask};
pub use clock::FixedClock;
pub use encounter::{ColliderTag, Encounter, EncounterPhase};
pub use hooks::{
    EventLog, GameEvent, GameLoopHooks, InputFlag, InputToggle, NullPresentation, Outcome,
    OutcomeHandler, Presentation, SoundId,
};
pub use locomotion::LocomotionController;
pub use motion::MotionState;
pub use pause::{GateContext, NoInputGate};
pub use projectile::Projectile;
pub use state::{RunPhase, RunState};
pub use tick::{Pickup, TickInput, tick};
pub use timer::Timer;
