//! Boss Runner - lane runner simulation core
//!
//! Core modules:
//! - `sim`: Per-frame simulation (locomotion, boss cleaning, encounter, pause gate)
//! - `settings`: Data-driven tunables
//! - `error`: Crate error type
//!
//! Presentation (audio, animation, materials, UI) is not part of this crate.
//! The simulation talks to it through the one-way traits in [`sim::hooks`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{BossSettings, EncounterSettings, PlayerSettings, Settings, SpeedPreset, ThrowSettings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Smallest local scale any scale component may reach
    pub const MINIMUM_SCALE: f32 = 0.5;
    /// Level is centered at x = 0, so the lateral limit is half the width
    pub const HALF_WIDTH: f32 = 0.5;

    /// Preset forward speeds (units/s)
    pub const SLOW_SPEED: f32 = 5.0;
    pub const MEDIUM_SPEED: f32 = 10.0;
    pub const FAST_SPEED: f32 = 20.0;

    /// Player defaults
    pub const ACCELERATION: f32 = 10.0;
    pub const DECELERATION: f32 = 20.0;
    pub const HORIZONTAL_SPEED_FACTOR: f32 = 0.5;
    pub const SCALE_VELOCITY: f32 = 2.0;
    pub const FILL_SCALE_VELOCITY: f32 = 2.0;
    /// Fill amount that grows the water container by one scale unit
    pub const FILL_DIVIDER: f32 = 50.0;

    /// Boss defaults
    pub const DIRTY_THRESHOLD: f32 = 100.0;
    pub const CLEAN_DURATION: f32 = 0.1;
    pub const INITIAL_DIRTINESS: f32 = 1.0;
    pub const BOSS_RADIUS: f32 = 2.0;

    /// Seconds between the container hitting the boss and the win/lose call
    pub const RESOLVE_DELAY: f32 = 3.0;

    /// Throw defaults
    pub const THROW_SPEED_DIVISOR: f32 = 8.0;
    pub const GRAVITY: f32 = -9.81;
    pub const MAX_FLIGHT_TIME: f32 = 5.0;
}

/// Float comparison with a relative tolerance (plus a tiny absolute floor)
#[inline]
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Component-wise [`approximately`]
#[inline]
pub fn approximately_vec3(a: Vec3, b: Vec3) -> bool {
    approximately(a.x, b.x) && approximately(a.y, b.y) && approximately(a.z, b.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximately() {
        assert!(approximately(1.0, 1.0));
        assert!(approximately(1.0, 1.0 + 1e-7));
        assert!(!approximately(1.0, 1.001));
        assert!(approximately(0.0, 0.0));
    }
}
