//! Table rally simulation core
//!
//! Ball flight, paddle collision bands, scoring and the AI opponent for a
//! single-player VR table-tennis game. The host owns rendering, audio and
//! XR input; it calls [`step`] once per display refresh and reacts to the
//! returned [`Outcome`].

pub mod components;
pub mod config;
pub mod error;
pub mod params;
pub mod resources;
pub mod systems;

pub use components::*;
pub use config::*;
pub use error::*;
pub use params::*;
pub use resources::*;
pub use systems::collision::{is_within_collision_band, BandContact};
pub use systems::movement::{ball_state, paddle_position};
pub use systems::tracking::Difficulty;

use hecs::World;
use systems::*;

/// Run one frame of the rally: controller, AI paddle, ball, bookkeeping.
///
/// The order is fixed so the AI always reacts to where the ball was at the
/// end of the previous frame.
#[allow(clippy::too_many_arguments)]
pub fn step(
    world: &mut World,
    time: &mut Time,
    config: &Config,
    difficulty: Difficulty,
    input: &ControllerInput,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) -> Outcome {
    // Clamp dt to prevent large jumps
    let clamped_dt = if time.dt.is_finite() {
        time.dt.clamp(0.0, Params::MAX_DT)
    } else {
        0.0
    };
    let step_time = Time::new(clamped_dt, time.now);

    // Clear events at start of frame
    events.clear();

    // 1. Human paddle from the controller pose
    ingest_controller(world, input, config);

    // 2. AI paddle tracks the ball
    move_ai_paddles(world, &step_time, config, difficulty, rng);

    // 3. Ball flight, collisions and goal lines
    let (outcome, contacts) = advance_balls(world, &step_time, config, rng);

    // 4. Score and event flags
    record_outcome(outcome, contacts, score, events);

    time.now += clamped_dt;
    outcome
}

/// Helper to create a paddle entity on its lane
pub fn create_paddle(world: &mut World, role: PaddleRole, config: &Config) -> hecs::Entity {
    world.spawn((Paddle::new(role, config),))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec3, vel: glam::Vec3) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel),))
}

/// Helper to create a ball freshly served from table center
pub fn create_served_ball(world: &mut World, config: &Config, rng: &mut GameRng) -> hecs::Entity {
    world.spawn((Ball::served(config, rng),))
}

/// Put every ball back at table center with a fresh serve
pub fn reset_balls(world: &mut World, config: &Config, rng: &mut GameRng) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.reset(config, rng);
    }
}
