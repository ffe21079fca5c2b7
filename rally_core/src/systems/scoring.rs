use glam::Vec3;

use crate::{Config, Contacts, Events, Outcome, PaddleRole, Score};

/// Check if the ball crossed either end of the table
pub fn check_goal_lines(z: f32, config: &Config) -> Option<Outcome> {
    if z > config.human_goal_z() {
        // Behind the human
        Some(Outcome::AiScore)
    } else if z < config.ai_goal_z() {
        Some(Outcome::PlayerScore)
    } else {
        None
    }
}

/// Speed up the ball on every `hits_per_escalation`-th counted hit, keeping
/// its direction and never exceeding the max speed
pub fn escalate(velocity: Vec3, hits: u32, config: &Config) -> Vec3 {
    if hits == 0 || hits % config.hits_per_escalation != 0 {
        return velocity;
    }
    let speed = velocity.length();
    let boosted = (speed * config.ball_speed_increase).min(config.ball_speed_max);
    velocity.normalize_or_zero() * boosted
}

/// Fold one frame's outcome and contacts into the score and event flags
pub fn record_outcome(outcome: Outcome, contacts: Contacts, score: &mut Score, events: &mut Events) {
    match outcome {
        Outcome::None => {}
        Outcome::PlayerReturn => events.player_return = true,
        Outcome::AiReturn => events.ai_return = true,
        Outcome::PlayerScore => {
            score.increment_player();
            events.player_scored = true;
        }
        Outcome::AiScore => {
            score.increment_ai();
            events.ai_scored = true;
        }
    }
    if contacts.wall {
        events.wall_bounce = true;
    }
    match contacts.edge {
        Some(PaddleRole::Human) => events.human_edge_contact = true,
        Some(PaddleRole::Ai) => events.ai_edge_contact = true,
        None => {}
    }
}
