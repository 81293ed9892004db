//! Per-frame motion state of the player
//!
//! Owned by the locomotion controller. Every mutator keeps the invariants:
//! - target scales never drop below [`MINIMUM_SCALE`] on any axis
//! - the lateral target stays within `[-max_lateral, max_lateral]`
//! - the target speed is never negative
//! - speed changes move toward their target and never cross it

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::approximately_vec3;
use crate::consts::MINIMUM_SCALE;
use crate::error::{Result, SimError};

#[inline]
fn floor_scale(scale: Vec3) -> Vec3 {
    scale.max(Vec3::splat(MINIMUM_SCALE))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionState {
    /// x = lateral, y = externally driven height, z = distance down the lane
    position: Vec3,
    /// Unit facing vector
    forward: Vec3,
    last_position: Vec3,

    current_speed: f32,
    target_speed: f32,

    current_scale: Vec3,
    target_scale: Vec3,
    /// Water container scale
    current_fill_scale: Vec3,
    target_fill_scale: Vec3,

    lateral_position: f32,
    lateral_target: f32,
    max_lateral: f32,

    has_lateral_input: bool,
    can_move: bool,
}

impl MotionState {
    pub fn new(position: Vec3, scale: Vec3, fill_scale: Vec3, target_speed: f32) -> Self {
        let scale = floor_scale(scale);
        let fill_scale = floor_scale(fill_scale);
        Self {
            position,
            forward: Vec3::Z,
            last_position: position,
            current_speed: 0.0,
            target_speed: target_speed.max(0.0),
            current_scale: scale,
            target_scale: scale,
            current_fill_scale: fill_scale,
            target_fill_scale: fill_scale,
            lateral_position: position.x,
            lateral_target: position.x,
            max_lateral: 0.0,
            has_lateral_input: false,
            can_move: false,
        }
    }

    /// World position; z is distance run down the lane
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing, turned toward the direction of travel
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Position at the end of the previous tick
    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    /// Forward speed this tick (units/s)
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Speed the player accelerates or decelerates toward
    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    /// Displayed body scale
    pub fn current_scale(&self) -> Vec3 {
        self.current_scale
    }

    pub fn target_scale(&self) -> Vec3 {
        self.target_scale
    }

    /// Displayed water container scale, which lags its target
    pub fn current_fill_scale(&self) -> Vec3 {
        self.current_fill_scale
    }

    pub fn target_fill_scale(&self) -> Vec3 {
        self.target_fill_scale
    }

    /// Lateral offset from the lane center
    pub fn lateral_position(&self) -> f32 {
        self.lateral_position
    }

    /// Lateral offset the player steers toward
    pub fn lateral_target(&self) -> f32 {
        self.lateral_target
    }

    /// Half the lane width; 0 until the width is configured
    pub fn max_lateral(&self) -> f32 {
        self.max_lateral
    }

    /// True while the player is steering
    pub fn has_lateral_input(&self) -> bool {
        self.has_lateral_input
    }

    /// False while paused or once the player has stopped to throw
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    // --- Input-facing mutators ---

    pub(crate) fn set_can_move(&mut self, can_move: bool) {
        self.can_move = can_move;
    }

    pub(crate) fn set_max_lateral(&mut self, max_lateral: f32) {
        self.max_lateral = max_lateral.max(0.0);
        self.lateral_target = self.lateral_target.clamp(-self.max_lateral, self.max_lateral);
    }

    /// Shift the lateral target by a fraction of the full lane width
    pub(crate) fn shift_lateral_target(&mut self, normalized_delta: f32) -> Result<()> {
        if self.max_lateral == 0.0 {
            return Err(SimError::LateralRangeUnset);
        }
        let full_width = self.max_lateral * 2.0;
        self.lateral_target = (self.lateral_target + full_width * normalized_delta)
            .clamp(-self.max_lateral, self.max_lateral);
        self.has_lateral_input = true;
        Ok(())
    }

    pub(crate) fn clear_lateral_input(&mut self) {
        self.has_lateral_input = false;
    }

    pub(crate) fn adjust_target_speed(&mut self, delta: f32) {
        self.target_speed = (self.target_speed + delta).max(0.0);
    }

    pub(crate) fn reset_speed(&mut self, default_speed: f32) {
        self.current_speed = 0.0;
        self.target_speed = default_speed.max(0.0);
    }

    pub(crate) fn adjust_target_scale(&mut self, delta: f32) {
        self.target_scale = floor_scale(self.target_scale + Vec3::splat(delta));
    }

    pub(crate) fn reset_scale(&mut self, scale: Vec3) {
        let scale = floor_scale(scale);
        self.current_scale = scale;
        self.target_scale = scale;
    }

    pub(crate) fn adjust_target_fill_scale(&mut self, delta: f32) {
        self.target_fill_scale = floor_scale(self.target_fill_scale + Vec3::splat(delta));
    }

    pub(crate) fn reset_fill_scale(&mut self, scale: Vec3) {
        let scale = floor_scale(scale);
        self.current_fill_scale = scale;
        self.target_fill_scale = scale;
    }

    /// Put the player back at `start` with no lateral offset or pending input
    pub(crate) fn reset_position(&mut self, start: Vec3) {
        self.position = start;
        self.lateral_position = 0.0;
        self.position.x = 0.0;
        self.lateral_target = 0.0;
        self.last_position = self.position;
        self.has_lateral_input = false;
    }

    /// Height is owned by whatever drives y (ground snapping, jumps)
    pub(crate) fn set_height(&mut self, y: f32) {
        self.position.y = y;
    }

    pub(crate) fn set_forward(&mut self, forward: Vec3) {
        if let Some(dir) = forward.try_normalize() {
            self.forward = dir;
        }
    }

    // --- Per-tick steps ---

    /// Lerp the body scale toward its target. Returns false when already there.
    pub(crate) fn smooth_scale(&mut self, t: f32) -> bool {
        if approximately_vec3(self.current_scale, self.target_scale) {
            return false;
        }
        self.current_scale = floor_scale(self.current_scale.lerp(self.target_scale, t.clamp(0.0, 1.0)));
        true
    }

    /// Lerp the container scale toward its target. Returns false when already there.
    pub(crate) fn smooth_fill_scale(&mut self, t: f32) -> bool {
        if approximately_vec3(self.current_fill_scale, self.target_fill_scale) {
            return false;
        }
        self.current_fill_scale = floor_scale(
            self.current_fill_scale
                .lerp(self.target_fill_scale, t.clamp(0.0, 1.0)),
        );
        true
    }

    /// Speed up by `rate * dt`, capped at `target`
    pub(crate) fn accelerate(&mut self, rate: f32, dt: f32, target: f32) {
        self.current_speed = (self.current_speed + rate * dt).min(target);
    }

    /// Slow down by `rate * dt`, floored at `target`
    pub(crate) fn decelerate(&mut self, rate: f32, dt: f32, target: f32) {
        self.current_speed = (self.current_speed - rate * dt).max(target);
    }

    pub(crate) fn advance_forward(&mut self, distance: f32) {
        self.position.z += distance;
    }

    /// Slide toward the lateral target, at most `horizontal_speed` this tick
    pub(crate) fn step_lateral(&mut self, horizontal_speed: f32) {
        let t = horizontal_speed.clamp(0.0, 1.0);
        let stepped = self.lateral_position + (self.lateral_target - self.lateral_position) * t;
        let delta = (stepped - self.lateral_position).clamp(-horizontal_speed, horizontal_speed);
        self.lateral_position += delta;
        self.position.x = self.lateral_position;
    }

    /// Turn toward the direction moved since last tick, faster at higher speed
    pub(crate) fn turn_toward_motion(&mut self, distance: f32) {
        if self.position == self.last_position {
            return;
        }
        let Some(dir) = (self.position - self.last_position).try_normalize() else {
            return;
        };
        let blended = self.forward.lerp(dir, distance.clamp(0.0, 1.0));
        if let Some(forward) = blended.try_normalize() {
            self.forward = forward;
        }
    }

    /// Distance covered since the last committed position
    pub fn travelled(&self) -> f32 {
        (self.position - self.last_position).length()
    }

    pub(crate) fn commit_position(&mut self) {
        self.last_position = self.position;
    }
}
