//! Player locomotion
//!
//! Advances [`MotionState`] once per tick from the steering and gameplay
//! commands it has been given. The update order inside a tick is fixed:
//! scale, fill scale, speed, forward position, lateral position, facing.

use glam::Vec3;

use super::hooks::Presentation;
use super::motion::MotionState;
use crate::consts::HALF_WIDTH;
use crate::error::Result;
use crate::settings::PlayerSettings;

#[derive(Debug, Clone)]
pub struct LocomotionController {
    settings: PlayerSettings,
    motion: MotionState,
    throwing: bool,
}

impl LocomotionController {
    pub fn new(settings: PlayerSettings) -> Self {
        let motion = MotionState::new(
            settings.start_position,
            settings.default_scale,
            settings.default_fill_scale,
            settings.default_speed(),
        );
        Self {
            settings,
            motion,
            throwing: false,
        }
    }

    /// Current motion state, read-only
    pub fn motion(&self) -> &MotionState {
        &self.motion
    }

    /// Tunables this controller was built with
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Forward speed for the configured preset
    pub fn default_speed(&self) -> f32 {
        self.settings.default_speed()
    }

    /// Constrain the player to a lane centered on x = 0
    pub fn configure_width(&mut self, level_width: f32) {
        let max_lateral = if level_width.is_finite() {
            level_width * HALF_WIDTH
        } else {
            0.0
        };
        self.motion.set_max_lateral(max_lateral);
        log::debug!("Lateral range set to ±{}", self.motion.max_lateral());
    }

    // --- Steering ---

    /// Move the lateral target by a fraction of the full lane width.
    ///
    /// Ignored (and reported) if the lane width was never configured.
    pub fn set_lateral_delta(&mut self, normalized_delta: f32) -> Result<()> {
        if !normalized_delta.is_finite() {
            log::debug!("Ignoring non-finite lateral delta {normalized_delta}");
            return Ok(());
        }
        self.motion.shift_lateral_target(normalized_delta).inspect_err(|err| {
            log::error!("{err}");
        })
    }

    /// Stop steering. The lateral target is kept.
    pub fn cancel_lateral_input(&mut self) {
        self.motion.clear_lateral_input();
    }

    /// Stop steering and running, and restore the default target speed
    pub fn cancel_all_movement(&mut self) {
        self.motion.clear_lateral_input();
        self.motion.set_can_move(false);
        self.reset_speed();
    }

    /// Whether the player may run this tick
    pub fn can_move(&self) -> bool {
        self.motion.can_move()
    }

    /// Allow or stop running. Speed eases down to 0 when stopped.
    pub fn set_can_move(&mut self, can_move: bool) {
        self.motion.set_can_move(can_move);
    }

    // --- Gameplay adjustments ---

    /// Change the target speed by `delta`, never below 0
    pub fn adjust_target_speed(&mut self, delta: f32) {
        if delta.is_finite() {
            self.motion.adjust_target_speed(delta);
        }
    }

    /// Stop dead and restore the preset target speed
    pub fn reset_speed(&mut self) {
        self.motion.reset_speed(self.settings.default_speed());
    }

    /// Grow or shrink the body, never below the minimum scale
    pub fn adjust_target_scale(&mut self, delta: f32) {
        if delta.is_finite() {
            self.motion.adjust_target_scale(delta);
        }
    }

    pub fn reset_scale(&mut self) {
        self.motion.reset_scale(self.settings.default_scale);
    }

    /// Add water to the container. `fill_divider` units grow it by one scale step.
    pub fn adjust_fill_level(&mut self, amount: f32) {
        if amount.is_finite() {
            self.motion
                .adjust_target_fill_scale(amount / self.settings.fill_divider);
        }
    }

    /// Empty the container
    pub fn reset_fill(&mut self) {
        self.motion.reset_fill_scale(self.settings.default_fill_scale);
    }

    /// Water carried, read from the displayed container scale
    pub fn query_fill_level(&self) -> f32 {
        (self.motion.current_fill_scale().x - self.settings.default_fill_scale.x)
            * self.settings.fill_divider
    }

    /// Top of the player mesh at its current scale
    pub fn player_top(&self) -> Vec3 {
        let height = self.settings.start_height;
        self.motion.position() + Vec3::Y * (height * self.motion.current_scale().y - height)
    }

    /// Back to the start line with default speed and scale
    pub fn reset_player(&mut self) {
        self.motion.reset_position(self.settings.start_position);
        self.throwing = false;
        self.reset_speed();
        self.reset_scale();
    }

    /// Ground height under the player
    pub fn set_height(&mut self, y: f32) {
        if y.is_finite() {
            self.motion.set_height(y);
        }
    }

    // --- Throw ---

    /// Face a world point. A zero-length direction leaves facing unchanged.
    pub fn face_towards(&mut self, point: Vec3) {
        self.motion.set_forward(point - self.motion.position());
    }

    /// Start the throw animation aimed at `target`
    pub fn launch_throw(&mut self, target: Vec3, presentation: &mut dyn Presentation) {
        self.throwing = true;
        presentation.trigger_throw();
        self.face_towards(target);
    }

    /// The throw clip finished. Returns false if no throw was in progress.
    pub fn finish_throw(&mut self) -> bool {
        std::mem::replace(&mut self.throwing, false)
    }

    /// True between `launch_throw` and `finish_throw`
    pub fn is_throwing(&self) -> bool {
        self.throwing
    }

    // --- Per-frame update ---

    pub fn tick(&mut self, dt: f32, presentation: &mut dyn Presentation) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        let s = &self.settings;
        let m = &mut self.motion;

        m.smooth_scale(dt * s.scale_velocity);
        m.smooth_fill_scale(dt * s.fill_scale_velocity);

        let target = m.target_speed();
        if (!s.auto_move_forward && !m.has_lateral_input()) || !m.can_move() {
            m.decelerate(s.deceleration, dt, 0.0);
        } else if target < m.current_speed() {
            m.decelerate(s.deceleration, dt, target);
        } else if target > m.current_speed() {
            m.accelerate(s.acceleration, dt, target);
        }

        let distance = m.current_speed() * dt;
        m.advance_forward(distance);

        if m.has_lateral_input() {
            m.step_lateral(distance * s.horizontal_speed_factor);
        }

        presentation.set_speed(m.travelled() / dt);

        // Rotation rate scales with distance, so turning is sluggish at low speed
        m.turn_toward_motion(distance);
        m.commit_position();
    }
}
