use glam::Vec3;
use hecs::World;

use crate::systems::tracking::Difficulty;
use crate::{Ball, Config, Contacts, ControllerInput, GameRng, Outcome, Paddle, PaddleRole, Time};

/// Apply the latest controller sample to the human paddle
pub fn ingest_controller(world: &mut World, input: &ControllerInput, config: &Config) {
    let Some(x) = input.paddle_x else {
        return;
    };
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.role() == PaddleRole::Human {
            let mut pose = paddle.position();
            pose.x = x;
            paddle.set_position(pose, config);
        }
    }
}

/// Let every AI paddle track the ball
pub fn move_ai_paddles(
    world: &mut World,
    time: &Time,
    config: &Config,
    difficulty: Difficulty,
    rng: &mut GameRng,
) {
    // Collect ball position first; the AI never sees velocity
    let ball_pos = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| ball.position())
    };
    let Some(ball_pos) = ball_pos else {
        return;
    };

    let frame_scale = config.motion.frame_scale(time.dt);
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        paddle.advance_ai(ball_pos, difficulty, config, time.now, frame_scale, rng);
    }
}

/// Move the ball one frame against the current paddle positions
pub fn advance_balls(
    world: &mut World,
    time: &Time,
    config: &Config,
    rng: &mut GameRng,
) -> (Outcome, Contacts) {
    let human = paddle_position(world, PaddleRole::Human)
        .unwrap_or_else(|| config.paddle_spawn(PaddleRole::Human));
    let ai = paddle_position(world, PaddleRole::Ai)
        .unwrap_or_else(|| config.paddle_spawn(PaddleRole::Ai));

    let mut result = (Outcome::None, Contacts::default());
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let outcome = ball.advance(time.dt, human, ai, config, rng);
        result = (outcome, ball.contacts());
    }
    result
}

/// Current position of the paddle with the given role
pub fn paddle_position(world: &World, role: PaddleRole) -> Option<Vec3> {
    world
        .query::<&Paddle>()
        .iter()
        .find(|(_e, p)| p.role() == role)
        .map(|(_e, p)| p.position())
}

/// Position and velocity of the ball, if one exists
pub fn ball_state(world: &World) -> Option<(Vec3, Vec3)> {
    world
        .query::<&Ball>()
        .iter()
        .next()
        .map(|(_e, ball)| (ball.position(), ball.velocity()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle};

    fn setup_world() -> (World, Config, GameRng) {
        let mut world = World::new();
        let config = Config::new();
        create_paddle(&mut world, PaddleRole::Human, &config);
        create_paddle(&mut world, PaddleRole::Ai, &config);
        (world, config, GameRng::new(12345))
    }

    #[test]
    fn test_controller_moves_only_human_paddle() {
        let (mut world, config, _) = setup_world();
        ingest_controller(&mut world, &ControllerInput::at(0.25), &config);

        assert_eq!(paddle_position(&world, PaddleRole::Human).map(|p| p.x), Some(0.25));
        assert_eq!(paddle_position(&world, PaddleRole::Ai).map(|p| p.x), Some(0.0));
    }

    #[test]
    fn test_missing_controller_sample_keeps_paddle() {
        let (mut world, config, _) = setup_world();
        ingest_controller(&mut world, &ControllerInput::at(-0.3), &config);
        ingest_controller(&mut world, &ControllerInput::new(), &config);
        assert_eq!(paddle_position(&world, PaddleRole::Human).map(|p| p.x), Some(-0.3));
    }

    #[test]
    fn test_ai_paddle_follows_ball() {
        let (mut world, mut config, mut rng) = setup_world();
        config.ai.aim_noise = 0.0;
        create_ball(
            &mut world,
            Vec3::new(0.4, config.ball_height, -1.0),
            Vec3::ZERO,
        );

        let mut time = Time::default();
        for _ in 0..30 {
            move_ai_paddles(&mut world, &time, &config, Difficulty::normal(), &mut rng);
            time.now += time.dt;
        }

        let ai_x = paddle_position(&world, PaddleRole::Ai).map(|p| p.x).unwrap_or(0.0);
        assert!(ai_x > 0.0, "AI paddle should move toward the ball, got {ai_x}");
        assert_eq!(paddle_position(&world, PaddleRole::Human).map(|p| p.x), Some(0.0));
    }

    #[test]
    fn test_no_ball_no_ai_motion() {
        let (mut world, config, mut rng) = setup_world();
        move_ai_paddles(&mut world, &Time::default(), &config, Difficulty::hard(), &mut rng);
        assert_eq!(paddle_position(&world, PaddleRole::Ai).map(|p| p.x), Some(0.0));
    }

    #[test]
    fn test_advance_without_ball_is_quiet() {
        let (mut world, config, mut rng) = setup_world();
        let (outcome, contacts) = advance_balls(&mut world, &Time::default(), &config, &mut rng);
        assert_eq!(outcome, Outcome::None);
        assert_eq!(contacts, Contacts::default());
    }

    #[test]
    fn test_ball_state_reads_back() {
        let (mut world, config, _) = setup_world();
        let pos = Vec3::new(0.1, config.ball_height, -0.8);
        let vel = Vec3::new(0.001, 0.0, 0.002);
        create_ball(&mut world, pos, vel);
        assert_eq!(ball_state(&world), Some((pos, vel)));
    }
}
