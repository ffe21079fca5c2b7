use thiserror::Error;

/// Rejected configuration. The simulation itself never fails; only loading
/// or validating a [`crate::Config`] does.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("Paddle half-width {paddle_half_width} does not fit table half-width {table_half_width}")]
    PaddleWiderThanTable {
        paddle_half_width: f32,
        table_half_width: f32,
    },

    #[error("Max ball speed {max} is below initial speed {initial}")]
    MaxSpeedBelowInitial { initial: f32, max: f32 },

    #[error("Ball can move {max_displacement} in one frame, skipping a collision band {band_depth} deep")]
    TunnelingRisk {
        max_displacement: f32,
        band_depth: f32,
    },

    #[error("Collision bands overlap: human lane {human_lane_z}, AI lane {ai_lane_z}")]
    OverlappingLanes { human_lane_z: f32, ai_lane_z: f32 },

    #[error("AI smoothing must be in (0, 1], got {0}")]
    InvalidSmoothing(f32),

    #[error("hits_per_escalation must be at least 1")]
    ZeroEscalationPeriod,

    #[error("win_score must be at least 1")]
    ZeroWinScore,

    #[error("Difficulty step {0} must be positive")]
    InvalidDifficulty(f32),
}
