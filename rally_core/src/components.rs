use glam::Vec3;
use rand::Rng;

use crate::systems::collision::{
    bounce_off_side_walls, deflect_off_face, graze_edge, is_within_collision_band,
    return_off_ai_face, BandContact,
};
use crate::systems::scoring::{check_goal_lines, escalate};
use crate::systems::tracking::{ease_toward, lerp, Difficulty};
use crate::{Config, GameRng};

/// Who moves a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaddleRole {
    /// Written from the tracked VR controller, near end of the table
    Human,
    /// Moved by its own tracking controller, far end of the table
    Ai,
}

impl PaddleRole {
    /// Depth direction a ball travels after this paddle returns it
    pub fn return_direction(self) -> f32 {
        match self {
            PaddleRole::Human => -1.0,
            PaddleRole::Ai => 1.0,
        }
    }
}

/// What a single ball advance produced. Exactly one per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    None,
    PlayerReturn,
    AiReturn,
    PlayerScore,
    AiScore,
}

impl Outcome {
    pub fn is_score(self) -> bool {
        matches!(self, Outcome::PlayerScore | Outcome::AiScore)
    }

    pub fn is_return(self) -> bool {
        matches!(self, Outcome::PlayerReturn | Outcome::AiReturn)
    }
}

/// Non-scoring contacts seen during the last advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contacts {
    pub wall: bool,
    /// Side of a paddle grazed (no return credit)
    pub edge: Option<PaddleRole>,
}

/// Ball component - moves on a constant-height plane above the table
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    position: Vec3,
    velocity: Vec3,
    hits: u32,
    contacts: Contacts,
}

impl Ball {
    /// Place a ball mid-flight. The vertical velocity component is dropped.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::new(velocity.x, 0.0, velocity.z),
            hits: 0,
            contacts: Contacts::default(),
        }
    }

    /// A freshly served ball at table center
    pub fn served(config: &Config, rng: &mut GameRng) -> Self {
        let mut ball = Self::new(Vec3::ZERO, Vec3::ZERO);
        ball.reset(config, rng);
        ball
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Counted paddle returns since the last reset
    pub fn hits(&self) -> u32 {
        self.hits
    }

    pub fn contacts(&self) -> Contacts {
        self.contacts
    }

    /// Return the ball to table center, served toward the human at the
    /// initial speed with a random lateral sign
    pub fn reset(&mut self, config: &Config, rng: &mut GameRng) {
        let lateral = if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 };
        self.position = config.table_center();
        self.velocity = Vec3::new(lateral, 0.0, 1.0).normalize() * config.ball_speed_initial;
        self.hits = 0;
    }

    /// Advance one frame and resolve walls, both paddles and goal lines.
    ///
    /// `delta` only matters under [`crate::MotionPolicy::Scaled`]; with the
    /// default fixed-step policy the ball moves by exactly `velocity`.
    pub fn advance(
        &mut self,
        delta: f32,
        human_paddle: Vec3,
        ai_paddle: Vec3,
        config: &Config,
        rng: &mut GameRng,
    ) -> Outcome {
        self.contacts = Contacts::default();

        self.position += self.velocity * config.motion.frame_scale(delta);

        if bounce_off_side_walls(&mut self.position, &mut self.velocity, config.table_half_width) {
            self.contacts.wall = true;
        }

        let mut outcome = Outcome::None;

        // Only a ball heading toward a paddle can touch it
        if self.velocity.z > 0.0 {
            match is_within_collision_band(self.position, human_paddle, config) {
                Some(BandContact::Face { offset }) => {
                    self.velocity =
                        deflect_off_face(self.velocity, offset, PaddleRole::Human, config);
                    outcome = Outcome::PlayerReturn;
                }
                Some(BandContact::Edge { offset }) => {
                    if graze_edge(&mut self.velocity, offset, config.edge_damping) {
                        self.contacts.edge = Some(PaddleRole::Human);
                    }
                }
                None => {}
            }
        }

        if self.velocity.z < 0.0 && outcome == Outcome::None {
            match is_within_collision_band(self.position, ai_paddle, config) {
                Some(BandContact::Face { .. }) => {
                    self.velocity = return_off_ai_face(self.velocity, config, rng);
                    outcome = Outcome::AiReturn;
                }
                Some(BandContact::Edge { offset }) => {
                    if graze_edge(&mut self.velocity, offset, config.edge_damping) {
                        self.contacts.edge = Some(PaddleRole::Ai);
                    }
                }
                None => {}
            }
        }

        if outcome.is_return() {
            self.hits += 1;
            self.velocity = escalate(self.velocity, self.hits, config);
        }
        self.velocity = self.velocity.clamp_length_max(config.ball_speed_max);

        if let Some(score) = check_goal_lines(self.position.z, config) {
            self.reset(config, rng);
            return score;
        }

        self.position.y = config.ball_height;
        outcome
    }
}

/// Smoothing state of an AI paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct AiTracker {
    /// Last ball x accepted as a sample
    pub last_sample_x: f32,
    /// Smoothed target prediction
    pub predicted_x: f32,
    pub aim_offset: f32,
    /// Simulation time of the last accepted sample
    pub last_update: Option<f32>,
}

/// Paddle component - only x moves; y and z stay on the paddle's lane
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    position: Vec3,
    role: PaddleRole,
    tracker: AiTracker,
}

impl Paddle {
    pub fn new(role: PaddleRole, config: &Config) -> Self {
        Self {
            position: config.paddle_spawn(role),
            role,
            tracker: AiTracker::default(),
        }
    }

    pub fn role(&self) -> PaddleRole {
        self.role
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn tracker(&self) -> &AiTracker {
        &self.tracker
    }

    /// Write the paddle from a tracked controller pose. Only x is taken; it
    /// is clamped to the playable band. Non-finite x is ignored, and so is
    /// any write to an AI paddle.
    pub fn set_position(&mut self, position: Vec3, config: &Config) {
        if self.role == PaddleRole::Human && position.x.is_finite() {
            self.position.x = config.clamp_paddle_x(position.x);
        }
    }

    /// Track the ball. Does nothing for a human paddle.
    ///
    /// The sample gate (`resample_threshold`, `reaction_interval`) filters
    /// jitter; `ai.smoothing` shapes how the prediction glides; `difficulty`
    /// alone bounds how far the paddle may move this frame.
    pub fn update_ai(
        &mut self,
        ball_position: Vec3,
        difficulty: Difficulty,
        config: &Config,
        now: f32,
        rng: &mut GameRng,
    ) {
        self.advance_ai(ball_position, difficulty, config, now, 1.0, rng);
    }

    pub(crate) fn advance_ai(
        &mut self,
        ball_position: Vec3,
        difficulty: Difficulty,
        config: &Config,
        now: f32,
        frame_scale: f32,
        rng: &mut GameRng,
    ) {
        if self.role != PaddleRole::Ai {
            return;
        }
        let tuning = &config.ai;
        let tracker = &mut self.tracker;

        if ball_position.x.is_finite() {
            // Nothing off the table is worth chasing
            let ball_x = ball_position
                .x
                .clamp(-config.table_half_width, config.table_half_width);
            let moved = (ball_x - tracker.last_sample_x).abs() > tuning.resample_threshold;
            let ready = tracker
                .last_update
                .map_or(true, |t| now - t >= tuning.reaction_interval);
            if moved && ready {
                tracker.last_sample_x = ball_x;
                tracker.last_update = Some(now);
                tracker.aim_offset = if tuning.aim_noise > 0.0 {
                    rng.0.gen_range(-tuning.aim_noise..=tuning.aim_noise)
                } else {
                    0.0
                };
            }
        }

        tracker.predicted_x = lerp(tracker.predicted_x, tracker.last_sample_x, tuning.smoothing);
        let target = tracker.predicted_x + tracker.aim_offset;

        let max_step = difficulty.max_step() * frame_scale;
        let x = ease_toward(self.position.x, target, max_step, tuning.ease_distance);
        self.position.x = config.clamp_paddle_x(x);
    }
}

/// Latest controller sample for the human paddle
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerInput {
    pub paddle_x: Option<f32>,
}

impl ControllerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(x: f32) -> Self {
        Self { paddle_x: Some(x) }
    }
}
