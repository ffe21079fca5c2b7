use glam::Vec3;
use rand::Rng;

use crate::{Config, GameRng, PaddleRole};

/// Result of the per-paddle band test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BandContact {
    /// Ball meets the front face; `offset` is ball x minus paddle x
    Face { offset: f32 },
    /// Ball clips the paddle's side, just outside the face
    Edge { offset: f32 },
}

/// Simplified paddle collision test.
///
/// Instead of intersecting bounding volumes, a ball is considered touching a
/// paddle when its depth lies within `collision_band_half_depth` of the
/// paddle's lane and its lateral offset is within the paddle half-width
/// (face) or within the half-width plus `side_contact_margin` (edge).
pub fn is_within_collision_band(
    ball: Vec3,
    paddle: Vec3,
    config: &Config,
) -> Option<BandContact> {
    if (ball.z - paddle.z).abs() > config.collision_band_half_depth {
        return None;
    }

    let offset = ball.x - paddle.x;
    let reach = offset.abs();
    if reach <= config.paddle_half_width {
        Some(BandContact::Face { offset })
    } else if reach <= config.side_contact_reach() {
        Some(BandContact::Edge { offset })
    } else {
        None
    }
}

/// Reflect off the table's side rails. Returns true on a bounce.
pub fn bounce_off_side_walls(position: &mut Vec3, velocity: &mut Vec3, half_width: f32) -> bool {
    if position.x.abs() > half_width {
        position.x = half_width.copysign(position.x);
        velocity.x = -velocity.x;
        true
    } else {
        false
    }
}

/// Angle-only deflection off a paddle face.
///
/// The hit offset, normalized by the paddle half-width, maps linearly onto
/// `[-max_deflection, +max_deflection]`. Speed is preserved; the ball leaves
/// in the returning paddle's direction of play.
pub fn deflect_off_face(velocity: Vec3, offset: f32, role: PaddleRole, config: &Config) -> Vec3 {
    let speed = velocity.length();
    let normalized = (offset / config.paddle_half_width).clamp(-1.0, 1.0);
    let angle = normalized * config.max_deflection_deg.to_radians();
    Vec3::new(
        angle.sin() * speed,
        0.0,
        angle.cos() * speed * role.return_direction(),
    )
}

/// The AI's return: straight reflection in depth with a little lateral jitter
pub fn return_off_ai_face(velocity: Vec3, config: &Config, rng: &mut GameRng) -> Vec3 {
    let jitter = (rng.0.gen::<f32>() - 0.5) * config.ai_return_jitter;
    Vec3::new(velocity.x + jitter, 0.0, -velocity.z)
}

/// Damp lateral velocity after the ball clips a paddle's side.
///
/// Only a ball closing on the paddle laterally is pushed back; one already
/// moving away keeps going. Returns true when the damping applied.
pub fn graze_edge(velocity: &mut Vec3, offset: f32, damping: f32) -> bool {
    if offset * velocity.x < 0.0 {
        velocity.x *= -damping;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ball, Outcome};

    const EPS: f32 = 1e-7;

    fn paddles(config: &Config) -> (Vec3, Vec3) {
        (
            config.paddle_spawn(PaddleRole::Human),
            config.paddle_spawn(PaddleRole::Ai),
        )
    }

    #[test]
    fn test_band_face_edge_and_miss() {
        let config = Config::new();
        let paddle = config.paddle_spawn(PaddleRole::Human);
        let at = |x: f32, z: f32| Vec3::new(x, config.ball_height, z);

        assert_eq!(
            is_within_collision_band(at(0.05, -0.1), paddle, &config),
            Some(BandContact::Face { offset: 0.05 })
        );
        assert_eq!(
            is_within_collision_band(at(-0.16, -0.15), paddle, &config),
            Some(BandContact::Edge { offset: -0.16 })
        );
        assert_eq!(is_within_collision_band(at(0.3, -0.1), paddle, &config), None);
        // Outside the band depth
        assert_eq!(is_within_collision_band(at(0.0, -0.5), paddle, &config), None);
    }

    #[test]
    fn test_wall_bounce_clamps_and_flips() {
        let mut position = Vec3::new(-0.73, 0.9, -1.0);
        let mut velocity = Vec3::new(-0.004, 0.0, 0.003);

        assert!(bounce_off_side_walls(&mut position, &mut velocity, 0.7));
        assert_eq!(position.x, -0.7);
        assert_eq!(velocity.x, 0.004);
        assert_eq!(velocity.z, 0.003);
    }

    #[test]
    fn test_no_wall_bounce_inside_table() {
        let mut position = Vec3::new(0.7, 0.9, -1.0);
        let mut velocity = Vec3::new(0.004, 0.0, 0.003);
        assert!(!bounce_off_side_walls(&mut position, &mut velocity, 0.7));
        assert_eq!(velocity.x, 0.004);
    }

    #[test]
    fn test_ball_reaches_wall_and_reflects() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        let mut ball = Ball::new(
            Vec3::new(0.0, config.ball_height, -1.0),
            Vec3::new(0.005, 0.0, 0.005),
        );

        let mut frames = 0;
        while ball.velocity().x > 0.0 {
            let outcome = ball.advance(0.016, human, ai, &config, &mut rng);
            assert_eq!(outcome, Outcome::None);
            frames += 1;
            assert!(frames < 200, "ball never reached the wall");
        }

        assert!(ball.contacts().wall);
        assert_eq!(ball.position().x, config.table_half_width);
        assert_eq!(ball.velocity().x, -0.005);
        assert_eq!(ball.velocity().z, 0.005);
    }

    #[test]
    fn test_center_hit_preserves_speed() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        let velocity = Vec3::new(0.002, 0.0, 0.006);
        let speed = velocity.length();
        let mut ball = Ball::new(
            Vec3::new(-0.1 - velocity.x, config.ball_height, -0.12 - velocity.z),
            velocity,
        );

        let outcome = ball.advance(0.016, human, ai, &config, &mut rng);

        assert_eq!(outcome, Outcome::PlayerReturn);
        assert!((ball.speed() - speed).abs() < EPS);
        assert!(ball.velocity().z < 0.0, "ball heads back toward the AI");
        assert!(ball.velocity().x < 0.0, "left-of-center hit angles left");
    }

    #[test]
    fn test_deflection_angle_is_linear_in_offset() {
        let config = Config::new();
        let incoming = Vec3::new(0.0, 0.0, 0.01);

        let straight = deflect_off_face(incoming, 0.0, PaddleRole::Human, &config);
        assert!(straight.x.abs() < EPS);
        assert!((straight.z + 0.01).abs() < EPS);

        let rim = deflect_off_face(incoming, config.paddle_half_width, PaddleRole::Human, &config);
        let angle = rim.x.atan2(-rim.z).to_degrees();
        assert!((angle - config.max_deflection_deg).abs() < 1e-3);

        let half = deflect_off_face(incoming, -config.paddle_half_width / 2.0, PaddleRole::Ai, &config);
        let angle = half.x.atan2(half.z).to_degrees();
        assert!((angle + config.max_deflection_deg / 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_edge_hit_damps_lateral_only() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        // Lands 0.16 right of the paddle center, drifting back toward it
        let velocity = Vec3::new(-0.002, 0.0, 0.004);
        let mut ball = Ball::new(
            Vec3::new(0.16 - velocity.x, config.ball_height, -0.1 - velocity.z),
            velocity,
        );

        let outcome = ball.advance(0.016, human, ai, &config, &mut rng);

        assert_eq!(outcome, Outcome::None);
        assert_eq!(ball.hits(), 0);
        assert_eq!(ball.contacts().edge, Some(PaddleRole::Human));
        assert_eq!(ball.velocity().z, velocity.z);
        assert!((ball.velocity().x - velocity.x * -config.edge_damping).abs() < EPS);
    }

    #[test]
    fn test_edge_hit_ball_can_still_score() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        let velocity = Vec3::new(-0.002, 0.0, 0.02);
        let mut ball = Ball::new(
            Vec3::new(0.165 - velocity.x, config.ball_height, -0.1 - velocity.z),
            velocity,
        );

        assert_eq!(ball.advance(0.016, human, ai, &config, &mut rng), Outcome::None);
        let mut outcome = Outcome::None;
        for _ in 0..10 {
            outcome = ball.advance(0.016, human, ai, &config, &mut rng);
            if outcome != Outcome::None {
                break;
            }
        }
        assert_eq!(outcome, Outcome::AiScore);
    }

    #[test]
    fn test_ai_center_hit_reflects_depth() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        let velocity = Vec3::new(0.0, 0.0, -0.006);
        let mut ball = Ball::new(
            Vec3::new(0.02, config.ball_height, config.ai_lane_z - velocity.z),
            velocity,
        );

        let outcome = ball.advance(0.016, human, ai, &config, &mut rng);

        assert_eq!(outcome, Outcome::AiReturn);
        assert_eq!(ball.hits(), 1);
        assert_eq!(ball.velocity().z, 0.006);
        assert!(ball.velocity().x.abs() <= config.ai_return_jitter / 2.0);
    }

    #[test]
    fn test_ball_moving_away_is_not_returned() {
        let config = Config::new();
        let mut rng = GameRng::new(12345);
        let (human, ai) = paddles(&config);
        let mut ball = Ball::new(
            Vec3::new(0.0, config.ball_height, -0.1),
            Vec3::new(0.0, 0.0, -0.005),
        );

        assert_eq!(ball.advance(0.016, human, ai, &config, &mut rng), Outcome::None);
        assert_eq!(ball.hits(), 0);
        assert_eq!(ball.velocity().z, -0.005);
    }
}
