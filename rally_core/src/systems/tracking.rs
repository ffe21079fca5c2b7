use crate::error::ConfigError;
use crate::params::Params;

/// How fast the AI paddle may move: the largest x displacement per frame.
///
/// Kept apart from `AiTuning::smoothing`, which only shapes how the
/// prediction glides toward the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    max_step: f32,
}

impl Difficulty {
    pub fn new(max_step: f32) -> Result<Self, ConfigError> {
        if max_step.is_finite() && max_step > 0.0 {
            Ok(Self { max_step })
        } else {
            Err(ConfigError::InvalidDifficulty(max_step))
        }
    }

    pub fn easy() -> Self {
        Self {
            max_step: Params::AI_STEP_EASY,
        }
    }

    pub fn normal() -> Self {
        Self {
            max_step: Params::AI_STEP_NORMAL,
        }
    }

    pub fn hard() -> Self {
        Self {
            max_step: Params::AI_STEP_HARD,
        }
    }

    /// Parse a preset name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Some(Self::easy()),
            "normal" => Some(Self::normal()),
            "hard" => Some(Self::hard()),
            _ => None,
        }
    }

    pub fn max_step(&self) -> f32 {
        self.max_step
    }

    /// Rebalance around `base` so a leading player meets a quicker opponent
    /// and a trailing one a slower one.
    ///
    /// The factor on `base` is bounded by the easy/normal and hard/normal
    /// ratios, so the presets map onto easy..hard while a custom base keeps
    /// its own scale and is returned unchanged on a tied score.
    pub fn rebalanced(base: Difficulty, player_points: u8, ai_points: u8) -> Self {
        let lead = player_points as f32 - ai_points as f32;
        let factor = (1.0 + Params::AI_ADAPT_RATE * lead).clamp(
            Params::AI_STEP_EASY / Params::AI_STEP_NORMAL,
            Params::AI_STEP_HARD / Params::AI_STEP_NORMAL,
        );
        Self {
            max_step: base.max_step * factor,
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::normal()
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Move `x` toward `target` with quadratic easing.
///
/// Full `max_step` while farther than `ease_distance`, then the step shrinks
/// with the square of the remaining distance. Never overshoots.
pub fn ease_toward(x: f32, target: f32, max_step: f32, ease_distance: f32) -> f32 {
    let delta = target - x;
    let distance = delta.abs();
    if !distance.is_finite() || distance == 0.0 {
        return x;
    }
    let urgency = (distance / ease_distance).min(1.0);
    let step = (max_step * urgency * urgency).min(distance);
    x + step.copysign(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_ordered() {
        assert!(Difficulty::easy().max_step() < Difficulty::normal().max_step());
        assert!(Difficulty::normal().max_step() < Difficulty::hard().max_step());
        assert_eq!(Difficulty::from_name("HARD"), Some(Difficulty::hard()));
        assert_eq!(Difficulty::from_name("brutal"), None);
    }

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(Difficulty::new(0.0).is_err());
        assert!(Difficulty::new(f32::NAN).is_err());
        assert_eq!(Difficulty::new(0.01).map(|d| d.max_step()).ok(), Some(0.01));
    }

    #[test]
    fn test_rebalanced_tracks_the_lead() {
        let base = Difficulty::normal();
        assert_eq!(Difficulty::rebalanced(base, 2, 2), base);
        assert!(Difficulty::rebalanced(base, 3, 1).max_step() > base.max_step());
        assert!(Difficulty::rebalanced(base, 0, 2).max_step() < base.max_step());
        let hard = Difficulty::rebalanced(base, 40, 0).max_step();
        let easy = Difficulty::rebalanced(base, 0, 40).max_step();
        assert!((hard - Difficulty::hard().max_step()).abs() < 1e-6, "got {hard}");
        assert!((easy - Difficulty::easy().max_step()).abs() < 1e-6, "got {easy}");
    }

    #[test]
    fn test_rebalanced_keeps_custom_base_scale() {
        let base = Difficulty::new(0.05).unwrap();
        assert_eq!(Difficulty::rebalanced(base, 0, 0), base);
        assert_eq!(Difficulty::rebalanced(base, 5, 5), base);
        assert!(Difficulty::rebalanced(base, 1, 0).max_step() > 0.05);

        let slow = Difficulty::new(0.001).unwrap();
        assert_eq!(Difficulty::rebalanced(slow, 3, 3), slow);
        assert!(Difficulty::rebalanced(slow, 0, 1).max_step() < 0.001);
    }

    #[test]
    fn test_ease_full_speed_when_far() {
        assert!((ease_toward(0.0, 0.5, 0.01, 0.15) - 0.01).abs() < 1e-7);
        assert!((ease_toward(0.0, -0.5, 0.01, 0.15) + 0.01).abs() < 1e-7);
    }

    #[test]
    fn test_ease_slows_near_target() {
        let far = ease_toward(0.0, 0.2, 0.01, 0.15);
        let near = ease_toward(0.0, 0.05, 0.01, 0.15);
        assert!(near < far);
        assert!(near > 0.0);
    }

    #[test]
    fn test_ease_never_overshoots() {
        assert_eq!(ease_toward(0.1, 0.1, 0.5, 0.15), 0.1);
        let x = ease_toward(0.0, 0.001, 10.0, 0.001);
        assert!(x <= 0.001);
    }
}
