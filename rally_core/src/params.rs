/// Game tuning parameters for the table rally
///
/// All distances are in table-local units (x = lateral, y = height,
/// z = depth along the play axis). Speeds are displacements per frame.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table
    pub const TABLE_HALF_WIDTH: f32 = 0.7;
    pub const BALL_HEIGHT: f32 = 0.9; // resting height of the ball plane
    pub const HUMAN_LANE_Z: f32 = -0.1; // near end
    pub const AI_LANE_Z: f32 = -1.9; // far end

    // Paddle
    pub const PADDLE_HALF_WIDTH: f32 = 0.15;
    pub const COLLISION_BAND_HALF_DEPTH: f32 = 0.1;
    pub const SIDE_CONTACT_MARGIN: f32 = 0.02; // ball radius
    pub const EDGE_DAMPING: f32 = 0.8;

    // Ball
    pub const BALL_SPEED_INITIAL: f32 = 0.005;
    pub const BALL_SPEED_MAX: f32 = 0.03;
    pub const BALL_SPEED_INCREASE: f32 = 1.1;
    pub const HITS_PER_ESCALATION: u32 = 2;
    pub const MAX_DEFLECTION_DEG: f32 = 45.0;
    pub const AI_RETURN_JITTER: f32 = 0.005;

    // AI
    pub const AI_SMOOTHING: f32 = 0.1;
    pub const AI_RESAMPLE_THRESHOLD: f32 = 0.01;
    pub const AI_REACTION_INTERVAL: f32 = 0.05; // seconds
    pub const AI_AIM_NOISE: f32 = 0.02;
    pub const AI_EASE_DISTANCE: f32 = 0.15;
    pub const AI_STEP_EASY: f32 = 0.008;
    pub const AI_STEP_NORMAL: f32 = 0.012;
    pub const AI_STEP_HARD: f32 = 0.02;
    pub const AI_ADAPT_RATE: f32 = 0.1; // per point of lead

    // Match
    pub const WIN_SCORE: u8 = 5;
    pub const COUNTDOWN_SECS: f32 = 3.0;
    pub const MATCH_DURATION_SECS: f32 = 0.0; // untimed
    pub const HAPTIC_COOLDOWN_MS: u64 = 100;

    // Frame timing
    pub const REFERENCE_HZ: f32 = 60.0;
    pub const MAX_DT: f32 = 0.1;
}
