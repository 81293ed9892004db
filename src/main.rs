//! Boss Runner headless demo
//!
//! Plays one level with seeded random steering and pickups, then prints the
//! outcome. Pass a settings JSON path as the first argument to override the
//! defaults.

#[cfg(not(target_arch = "wasm32"))]
use boss_runner::{
    Settings,
    consts::SIM_DT,
    sim::{
        EventLog, FixedClock, GameEvent, InputFlag, OutcomeHandler, Pickup, RunPhase, RunState,
        TickInput, tick,
    },
};
#[cfg(not(target_arch = "wasm32"))]
use rand::{Rng, SeedableRng};
#[cfg(not(target_arch = "wasm32"))]
use rand_pcg::Pcg32;

/// Host frame time (deliberately not a multiple of the sim step)
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 45.0;
/// How long the throw clip plays before the container leaves the hand
#[cfg(not(target_arch = "wasm32"))]
const THROW_CLIP_SECS: f32 = 0.8;
/// Give up if the run somehow never ends
#[cfg(not(target_arch = "wasm32"))]
const MAX_SECONDS: f32 = 120.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Boss Runner (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{path}: {err}");
                std::process::exit(1);
            }
        },
        None => Settings {
            level_width: 6.0,
            ..Default::default()
        },
    };

    let seed = std::env::var("BOSS_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345u64);
    log::info!("Seed: {seed}");

    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = RunState::new(settings);
    let mut fx = EventLog::new();
    let mut outcomes = EventLog::new();
    let mut input_flag = InputFlag::default();
    let mut clock = FixedClock::new();

    state.start(&mut fx);

    let mut frame_time = 0.0f32;
    let mut throw_clip = 0.0f32;
    let mut paused_at: Option<f32> = None;

    while !state.phase.is_over() && frame_time < MAX_SECONDS {
        frame_time += FRAME_DT;

        // A short no-input pause two seconds in, like a tutorial prompt
        if paused_at.is_none() && frame_time >= 2.0 {
            state.pause(Some(&mut input_flag), &mut fx);
            paused_at = Some(frame_time);
        } else if paused_at.is_some_and(|t| frame_time - t >= 1.0) && state.gate.is_active() {
            state.resume(Some(&mut input_flag), &mut fx);
        }

        for _ in 0..clock.advance(FRAME_DT) {
            let mut input = TickInput::default();

            if input_flag.0 && state.phase == RunPhase::Running {
                if rng.random_bool(0.05) {
                    input.lateral_delta = Some(rng.random_range(-0.2..0.2));
                } else if rng.random_bool(0.02) {
                    input.release = true;
                }
                if rng.random_bool(0.03) {
                    input.pickups.push(Pickup::Water(rng.random_range(5.0..25.0)));
                }
                if rng.random_bool(0.005) {
                    input.pickups.push(Pickup::Speed(rng.random_range(-2.0..3.0)));
                }
                if rng.random_bool(0.005) {
                    input.pickups.push(Pickup::Scale(rng.random_range(-0.2..0.3)));
                }
            }

            if state.phase == RunPhase::Throwing {
                throw_clip += SIM_DT;
                input.throw_animation_end = throw_clip >= THROW_CLIP_SECS;
            }

            tick(
                &mut state,
                &input,
                SIM_DT,
                &mut fx,
                Some(&mut outcomes as &mut dyn OutcomeHandler),
            );
        }
    }

    if !state.phase.is_over() {
        log::warn!("Run did not finish within {MAX_SECONDS}s");
        state.teardown();
    }

    let sounds = fx
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::Sound(_)))
        .count();
    println!("Result: {:?} after {:.2}s simulated", state.phase, state.time);
    println!(
        "Fill carried: {:.1}, boss dirtiness: {:.3}, sounds played: {sounds}",
        state.player.query_fill_level(),
        state.boss.dirtiness()
    );
    match serde_json::to_string_pretty(state.player.motion()) {
        Ok(json) => println!("Final motion state:\n{json}"),
        Err(err) => log::warn!("Could not serialize motion state: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless demo is native only
}
