use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::Params;
use crate::PaddleRole;

/// How a frame's elapsed time turns into ball and paddle displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionPolicy {
    /// Constant displacement per frame; simulation speed follows the
    /// display refresh rate.
    #[default]
    FixedStep,
    /// Displacement scaled by `delta * reference_hz`, so the per-frame
    /// constants describe motion at the reference rate.
    Scaled { reference_hz: f32 },
}

impl MotionPolicy {
    /// Multiplier applied to per-frame displacements for this frame
    pub fn frame_scale(&self, delta: f32) -> f32 {
        match *self {
            MotionPolicy::FixedStep => 1.0,
            MotionPolicy::Scaled { reference_hz } => {
                let dt = if delta.is_finite() {
                    delta.clamp(0.0, Params::MAX_DT)
                } else {
                    0.0
                };
                dt * reference_hz
            }
        }
    }

    /// Largest `frame_scale` any frame can produce
    pub fn max_frame_scale(&self) -> f32 {
        match *self {
            MotionPolicy::FixedStep => 1.0,
            MotionPolicy::Scaled { reference_hz } => Params::MAX_DT * reference_hz,
        }
    }
}

/// AI opponent tuning. Reaction speed lives in [`crate::Difficulty`], not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Lerp factor pulling the prediction toward the last accepted sample
    pub smoothing: f32,
    pub resample_threshold: f32,
    /// Minimum seconds between accepted samples
    pub reaction_interval: f32,
    pub aim_noise: f32,
    /// Distance at which the paddle stops easing and moves at full speed
    pub ease_distance: f32,
    pub adaptive_difficulty: bool,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            smoothing: Params::AI_SMOOTHING,
            resample_threshold: Params::AI_RESAMPLE_THRESHOLD,
            reaction_interval: Params::AI_REACTION_INTERVAL,
            aim_noise: Params::AI_AIM_NOISE,
            ease_distance: Params::AI_EASE_DISTANCE,
            adaptive_difficulty: true,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub table_half_width: f32,
    pub ball_height: f32,
    pub human_lane_z: f32,
    pub ai_lane_z: f32,
    pub paddle_half_width: f32,
    pub collision_band_half_depth: f32,
    pub side_contact_margin: f32,
    pub edge_damping: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub hits_per_escalation: u32,
    pub max_deflection_deg: f32,
    pub ai_return_jitter: f32,
    pub win_score: u8,
    pub countdown_secs: f32,
    /// Seconds of play before the match is decided on points; 0 disables the timer
    pub match_duration_secs: f32,
    pub haptic_cooldown_ms: u64,
    pub motion: MotionPolicy,
    pub ai: AiTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_half_width: Params::TABLE_HALF_WIDTH,
            ball_height: Params::BALL_HEIGHT,
            human_lane_z: Params::HUMAN_LANE_Z,
            ai_lane_z: Params::AI_LANE_Z,
            paddle_half_width: Params::PADDLE_HALF_WIDTH,
            collision_band_half_depth: Params::COLLISION_BAND_HALF_DEPTH,
            side_contact_margin: Params::SIDE_CONTACT_MARGIN,
            edge_damping: Params::EDGE_DAMPING,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            hits_per_escalation: Params::HITS_PER_ESCALATION,
            max_deflection_deg: Params::MAX_DEFLECTION_DEG,
            ai_return_jitter: Params::AI_RETURN_JITTER,
            win_score: Params::WIN_SCORE,
            countdown_secs: Params::COUNTDOWN_SECS,
            match_duration_secs: Params::MATCH_DURATION_SECS,
            haptic_cooldown_ms: Params::HAPTIC_COOLDOWN_MS,
            motion: MotionPolicy::default(),
            ai: AiTuning::default(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON override and validate the result.
    /// Missing fields fall back to [`Params`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("table_half_width", self.table_half_width),
            ("paddle_half_width", self.paddle_half_width),
            ("collision_band_half_depth", self.collision_band_half_depth),
            ("ball_speed_initial", self.ball_speed_initial),
            ("ball_speed_max", self.ball_speed_max),
            ("ball_speed_increase", self.ball_speed_increase),
            ("max_deflection_deg", self.max_deflection_deg),
            ("ai.ease_distance", self.ai.ease_distance),
        ];
        for (field, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let non_negatives = [
            ("side_contact_margin", self.side_contact_margin),
            ("edge_damping", self.edge_damping),
            ("ai_return_jitter", self.ai_return_jitter),
            ("countdown_secs", self.countdown_secs),
            ("match_duration_secs", self.match_duration_secs),
            ("ai.aim_noise", self.ai.aim_noise),
            ("ai.resample_threshold", self.ai.resample_threshold),
            ("ai.reaction_interval", self.ai.reaction_interval),
        ];
        for (field, value) in non_negatives {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.paddle_half_width >= self.table_half_width {
            return Err(ConfigError::PaddleWiderThanTable {
                paddle_half_width: self.paddle_half_width,
                table_half_width: self.table_half_width,
            });
        }
        if self.ball_speed_max < self.ball_speed_initial {
            return Err(ConfigError::MaxSpeedBelowInitial {
                initial: self.ball_speed_initial,
                max: self.ball_speed_max,
            });
        }
        if self.ai_lane_z + self.collision_band_half_depth
            >= self.human_lane_z - self.collision_band_half_depth
        {
            return Err(ConfigError::OverlappingLanes {
                human_lane_z: self.human_lane_z,
                ai_lane_z: self.ai_lane_z,
            });
        }
        if !(self.ai.smoothing > 0.0 && self.ai.smoothing <= 1.0) {
            return Err(ConfigError::InvalidSmoothing(self.ai.smoothing));
        }
        if self.hits_per_escalation == 0 {
            return Err(ConfigError::ZeroEscalationPeriod);
        }
        if self.win_score == 0 {
            return Err(ConfigError::ZeroWinScore);
        }
        if let MotionPolicy::Scaled { reference_hz } = self.motion {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(ConfigError::NonPositive {
                    field: "motion.reference_hz",
                    value: reference_hz,
                });
            }
        }
        // A ball moving farther than the band depth in one frame can skip a paddle
        let max_displacement = self.ball_speed_max * self.motion.max_frame_scale();
        if max_displacement >= 2.0 * self.collision_band_half_depth {
            return Err(ConfigError::TunnelingRisk {
                max_displacement,
                band_depth: 2.0 * self.collision_band_half_depth,
            });
        }
        Ok(())
    }

    /// Largest |x| a paddle center may reach
    pub fn paddle_limit(&self) -> f32 {
        self.table_half_width - self.paddle_half_width
    }

    /// Clamp paddle X to the playable band
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        let limit = self.paddle_limit();
        x.clamp(-limit, limit)
    }

    pub fn lane_z(&self, role: PaddleRole) -> f32 {
        match role {
            PaddleRole::Human => self.human_lane_z,
            PaddleRole::Ai => self.ai_lane_z,
        }
    }

    /// Where a paddle of the given role sits at match setup
    pub fn paddle_spawn(&self, role: PaddleRole) -> Vec3 {
        Vec3::new(0.0, self.ball_height, self.lane_z(role))
    }

    pub fn table_center(&self) -> Vec3 {
        Vec3::new(
            0.0,
            self.ball_height,
            (self.human_lane_z + self.ai_lane_z) / 2.0,
        )
    }

    /// Ball past this z (toward the human) is a point for the AI
    pub fn human_goal_z(&self) -> f32 {
        self.human_lane_z + self.collision_band_half_depth
    }

    /// Ball past this z (toward the AI) is a point for the human
    pub fn ai_goal_z(&self) -> f32 {
        self.ai_lane_z - self.collision_band_half_depth
    }

    /// Lateral offset from a paddle center that still counts as a side contact
    pub fn side_contact_reach(&self) -> f32 {
        self.paddle_half_width + self.side_contact_margin
    }
}
