use rally_core::Outcome;

/// Length of every paddle pulse
pub const PULSE_MS: u32 = 50;
/// Intensity for a graze off the human paddle's side
pub const EDGE_PULSE_INTENSITY: f32 = 0.3;
const RETURN_PULSE_FLOOR: f32 = 0.2;
const RETURN_PULSE_RANGE: f32 = 0.8;

/// Audio cues the host can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    PaddleHit,
    AiHit,
    WallBounce,
    Score,
    Victory,
    Defeat,
}

impl Cue {
    /// Cue for a frame outcome, if it has one
    pub fn for_outcome(outcome: Outcome) -> Option<Cue> {
        match outcome {
            Outcome::None => None,
            Outcome::PlayerReturn => Some(Cue::PaddleHit),
            Outcome::AiReturn => Some(Cue::AiHit),
            Outcome::PlayerScore | Outcome::AiScore => Some(Cue::Score),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::PaddleHit => "paddle_hit",
            Cue::AiHit => "ai_hit",
            Cue::WallBounce => "wall_bounce",
            Cue::Score => "score",
            Cue::Victory => "victory",
            Cue::Defeat => "defeat",
        }
    }
}

/// Audio and haptic sink supplied by the host
pub trait Feedback {
    fn cue(&mut self, cue: Cue);
    /// Pulse the controller actuators; intensity in [0, 1]
    fn pulse(&mut self, intensity: f32, duration_ms: u32);
}

/// Feedback sink that drops everything (headless runs)
#[derive(Debug, Default)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn cue(&mut self, _cue: Cue) {}
    fn pulse(&mut self, _intensity: f32, _duration_ms: u32) {}
}

/// Feedback sink that records to `tracing` at debug level
#[derive(Debug, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn cue(&mut self, cue: Cue) {
        tracing::debug!(cue = cue.name(), "cue");
    }

    fn pulse(&mut self, intensity: f32, duration_ms: u32) {
        tracing::debug!(intensity, duration_ms, "haptic pulse");
    }
}

/// Pulse strength for a player return: faster balls kick harder
pub fn return_pulse_intensity(speed: f32, max_speed: f32) -> f32 {
    let normalized = if max_speed > 0.0 {
        (speed / max_speed).clamp(0.0, 1.0)
    } else {
        1.0
    };
    RETURN_PULSE_FLOOR + RETURN_PULSE_RANGE * normalized
}

/// Debounce for haptic pulses
#[derive(Debug, Clone)]
pub struct HapticGate {
    cooldown_ms: u64,
    last_fire: Option<u64>,
}

impl HapticGate {
    pub fn new(cooldown_ms: u64) -> Self {
        Self {
            cooldown_ms,
            last_fire: None,
        }
    }

    /// Returns true (and arms the cooldown) when a pulse may fire at `now_ms`
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_fire {
            if now_ms.saturating_sub(last) < self.cooldown_ms {
                return false;
            }
        }
        self.last_fire = Some(now_ms);
        true
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}
