//! Per-frame simulation tick
//!
//! Single entry point that advances a whole run by `dt` seconds.

use serde::{Deserialize, Serialize};

use super::encounter::{ColliderTag, EncounterPhase};
use super::hooks::{OutcomeHandler, Presentation, SoundId};
use super::projectile::Projectile;
use super::state::{RunPhase, RunState};

/// Something the player ran through this tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Pickup {
    /// Target speed change
    Speed(f32),
    /// Body scale change
    Scale(f32),
    /// Water added to the container
    Water(f32),
}

impl Pickup {
    pub fn sound(&self) -> SoundId {
        match self {
            Pickup::Speed(_) => SoundId::Coin,
            Pickup::Scale(_) => SoundId::Key,
            Pickup::Water(_) => SoundId::Soap,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steering drag since last tick, as a fraction of the lane width
    pub lateral_delta: Option<f32>,
    /// Steering released
    pub release: bool,
    /// Pickups collected this tick
    pub pickups: Vec<Pickup>,
    /// The throw clip reached its release frame
    pub throw_animation_end: bool,
    /// Ground height under the player, when the host tracks it
    pub height: Option<f32>,
}

/// Advance the run by `dt` seconds.
///
/// `outcome` is `None` once the owner of the win/lose handlers is gone; a
/// pending resolution is then skipped.
pub fn tick(
    state: &mut RunState,
    input: &TickInput,
    dt: f32,
    presentation: &mut dyn Presentation,
    outcome: Option<&mut dyn OutcomeHandler>,
) {
    if state.phase.is_over() || !(dt >= 0.0 && dt.is_finite()) {
        return;
    }
    state.time += dt;

    if state.phase == RunPhase::Running {
        apply_input(state, input, presentation);
    }
    if let Some(y) = input.height {
        state.player.set_height(y);
    }

    state.player.tick(dt, presentation);

    match state.phase {
        RunPhase::Running => {
            if state.player.motion().position().z >= state.throw_line() {
                let boss = state.boss_position();
                state.player.cancel_all_movement();
                state.player.launch_throw(boss, presentation);
                state.phase = RunPhase::Throwing;
                log::info!("Reached the boss, throwing (fill {:.1})", state.player.query_fill_level());
            }
        }
        RunPhase::Throwing => {
            if input.throw_animation_end && state.player.finish_throw() {
                release_container(state, presentation);
            }
        }
        RunPhase::InFlight => fly_container(state, dt, presentation),
        _ => {}
    }

    state.boss.tick(dt, presentation);
    state.encounter.tick(dt, outcome);

    match state.encounter.phase() {
        EncounterPhase::Resolved(result) => state.phase = RunPhase::Finished(result),
        EncounterPhase::Cancelled => state.phase = RunPhase::Abandoned,
        _ => {}
    }
}

fn apply_input(state: &mut RunState, input: &TickInput, presentation: &mut dyn Presentation) {
    if let Some(delta) = input.lateral_delta {
        // Reported inside; the rest of the tick carries on
        let _ = state.player.set_lateral_delta(delta);
    }
    if input.release {
        state.player.cancel_lateral_input();
    }

    for pickup in &input.pickups {
        match *pickup {
            Pickup::Speed(delta) => state.player.adjust_target_speed(delta),
            Pickup::Scale(delta) => state.player.adjust_target_scale(delta),
            Pickup::Water(amount) => state.player.adjust_fill_level(amount),
        }
        presentation.play_sound(pickup.sound());
    }
}

fn release_container(state: &mut RunState, presentation: &mut dyn Presentation) {
    let thrower = state.player.motion().position();
    let from = state.player.player_top();
    match Projectile::launch(from, thrower, state.boss_position(), &state.settings.throw) {
        Some(projectile) => {
            presentation.play_sound(SoundId::Throw);
            state.projectile = Some(projectile);
            state.phase = RunPhase::InFlight;
        }
        None => {
            log::warn!("Container thrown with no aim; skipping the throw");
            state.phase = RunPhase::Missed;
        }
    }
}

fn fly_container(state: &mut RunState, dt: f32, presentation: &mut dyn Presentation) {
    let Some(projectile) = state.projectile.as_mut() else {
        state.phase = RunPhase::Missed;
        return;
    };
    projectile.step(dt);

    if projectile.hits(state.settings.boss.position, state.settings.boss.radius) {
        state.projectile = None;
        let fill = state.player.query_fill_level();
        state
            .encounter
            .on_collision(ColliderTag::Boss, &mut state.boss, fill, presentation);
        state.phase = RunPhase::Resolving;
    } else if projectile.expired() {
        log::warn!("Container missed the boss (last at {})", projectile.pos);
        state.projectile = None;
        state.phase = RunPhase::Missed;
    }
}
