//! Game tunables
//!
//! Everything the designers tweak per level lives here. Loaded from JSON with
//! every field optional; missing fields fall back to the shipped defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};

/// Forward speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Slow,
    #[default]
    Medium,
    Fast,
    /// Use `PlayerSettings::custom_speed`
    Custom,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Slow => "Slow",
            SpeedPreset::Medium => "Medium",
            SpeedPreset::Fast => "Fast",
            SpeedPreset::Custom => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "slow" => Some(SpeedPreset::Slow),
            "medium" | "med" => Some(SpeedPreset::Medium),
            "fast" => Some(SpeedPreset::Fast),
            "custom" => Some(SpeedPreset::Custom),
            _ => None,
        }
    }

    /// Preset speed, or `None` for `Custom`
    pub fn speed(&self) -> Option<f32> {
        match self {
            SpeedPreset::Slow => Some(SLOW_SPEED),
            SpeedPreset::Medium => Some(MEDIUM_SPEED),
            SpeedPreset::Fast => Some(FAST_SPEED),
            SpeedPreset::Custom => None,
        }
    }
}

/// Player locomotion tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    pub speed_preset: SpeedPreset,
    /// Only read when `speed_preset` is `Custom`
    pub custom_speed: f32,
    /// units/s²
    pub acceleration: f32,
    /// units/s²
    pub deceleration: f32,
    /// Lateral speed as a fraction of forward distance per tick
    pub horizontal_speed_factor: f32,
    pub scale_velocity: f32,
    pub fill_scale_velocity: f32,
    pub fill_divider: f32,
    /// Keep running forward without steering input
    pub auto_move_forward: bool,
    pub start_position: Vec3,
    pub default_scale: Vec3,
    pub default_fill_scale: Vec3,
    /// Height of the player mesh at scale 1
    pub start_height: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed_preset: SpeedPreset::Medium,
            custom_speed: MEDIUM_SPEED,
            acceleration: ACCELERATION,
            deceleration: DECELERATION,
            horizontal_speed_factor: HORIZONTAL_SPEED_FACTOR,
            scale_velocity: SCALE_VELOCITY,
            fill_scale_velocity: FILL_SCALE_VELOCITY,
            fill_divider: FILL_DIVIDER,
            auto_move_forward: true,
            start_position: Vec3::ZERO,
            default_scale: Vec3::ONE,
            default_fill_scale: Vec3::ONE,
            start_height: 1.0,
        }
    }
}

impl PlayerSettings {
    /// Default forward speed for the selected preset
    pub fn default_speed(&self) -> f32 {
        self.speed_preset.speed().unwrap_or(self.custom_speed)
    }
}

/// Boss cleaning tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossSettings {
    /// Fill level that removes one full unit of dirtiness
    pub dirty_threshold: f32,
    /// Seconds the dirtiness takes to animate to its new value
    pub clean_duration: f32,
    pub initial_dirtiness: f32,
    pub position: Vec3,
    pub radius: f32,
}

impl Default for BossSettings {
    fn default() -> Self {
        Self {
            dirty_threshold: DIRTY_THRESHOLD,
            clean_duration: CLEAN_DURATION,
            initial_dirtiness: INITIAL_DIRTINESS,
            position: Vec3::new(0.0, 0.0, 100.0),
            radius: BOSS_RADIUS,
        }
    }
}

/// End-of-level encounter tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterSettings {
    /// Seconds between impact and the win/lose call
    pub resolve_delay: f32,
    /// Distance short of the boss where the player stops and throws
    pub throw_distance: f32,
}

impl Default for EncounterSettings {
    fn default() -> Self {
        Self {
            resolve_delay: RESOLVE_DELAY,
            throw_distance: 10.0,
        }
    }
}

/// Container throw tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrowSettings {
    /// Larger divisor = longer, higher arc
    pub speed_divisor: f32,
    /// Added to the aim direction
    pub aim_offset: Vec3,
    pub gravity: Vec3,
    pub max_flight_time: f32,
}

impl Default for ThrowSettings {
    fn default() -> Self {
        Self {
            speed_divisor: THROW_SPEED_DIVISOR,
            aim_offset: Vec3::new(1.0, 0.0, -1.0),
            gravity: Vec3::new(0.0, GRAVITY, 0.0),
            max_flight_time: MAX_FLIGHT_TIME,
        }
    }
}

/// All tunables for one level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Full lane width; the player is limited to ±width/2
    pub level_width: f32,
    pub player: PlayerSettings,
    pub boss: BossSettings,
    pub encounter: EncounterSettings,
    pub throw: ThrowSettings,
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings (speed preset {}, width {})",
            settings.player.speed_preset.as_str(),
            settings.level_width
        );
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        fn check(name: &'static str, value: f32, ok: bool) -> Result<()> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(SimError::InvalidSetting { name, value })
            }
        }

        let p = &self.player;
        check("level_width", self.level_width, self.level_width >= 0.0)?;
        check("player.custom_speed", p.custom_speed, p.custom_speed >= 0.0)?;
        check("player.acceleration", p.acceleration, p.acceleration >= 0.0)?;
        check("player.deceleration", p.deceleration, p.deceleration >= 0.0)?;
        check("player.fill_divider", p.fill_divider, p.fill_divider > 0.0)?;
        check("player.start_height", p.start_height, p.start_height > 0.0)?;

        let b = &self.boss;
        check("boss.dirty_threshold", b.dirty_threshold, b.dirty_threshold > 0.0)?;
        check("boss.clean_duration", b.clean_duration, b.clean_duration >= 0.0)?;
        check("boss.initial_dirtiness", b.initial_dirtiness, b.initial_dirtiness >= 0.0)?;
        check("boss.radius", b.radius, b.radius > 0.0)?;

        let e = &self.encounter;
        check("encounter.resolve_delay", e.resolve_delay, e.resolve_delay >= 0.0)?;
        check("encounter.throw_distance", e.throw_distance, e.throw_distance >= 0.0)?;

        let t = &self.throw;
        check("throw.speed_divisor", t.speed_divisor, t.speed_divisor > 0.0)?;
        check("throw.max_flight_time", t.max_flight_time, t.max_flight_time > 0.0)?;
        Ok(())
    }
}
