//! Match phase machine
//!
//! Idle → Countdown → Playing ⇄ Paused → GameOver, with Quit back to Idle
//! from anywhere but Idle. The session drives it; the web bridge exposes
//! `transition_str` so the page can push the same actions by name.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Match phases
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Idle,
    Countdown,
    Playing,
    Paused,
    GameOver,
}

/// Actions that trigger phase transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchAction {
    Start,
    CountdownDone,
    Pause,
    Resume,
    GameOver,
    PlayAgain,
    Quit,
}

impl MatchAction {
    /// Parse the SCREAMING_SNAKE action names used by the page
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "START" => Some(MatchAction::Start),
            "COUNTDOWN_DONE" => Some(MatchAction::CountdownDone),
            "PAUSE" => Some(MatchAction::Pause),
            "RESUME" => Some(MatchAction::Resume),
            "GAME_OVER" => Some(MatchAction::GameOver),
            "PLAY_AGAIN" => Some(MatchAction::PlayAgain),
            "QUIT" => Some(MatchAction::Quit),
            _ => None,
        }
    }
}

/// Result of a transition attempt
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_phase: MatchPhase,
    to_phase: MatchPhase,
    action: Option<MatchAction>,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_phase(&self) -> MatchPhase {
        self.from_phase
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_phase(&self) -> MatchPhase {
        self.to_phase
    }
}

impl TransitionResult {
    /// The action that was attempted; `None` for an unknown action name
    pub fn action(&self) -> Option<MatchAction> {
        self.action
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct MatchFsm {
    phase: MatchPhase,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl MatchFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            phase: MatchPhase::Idle,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Current phase as string (for JS interop)
    pub fn phase_string(&self) -> String {
        format!("{:?}", self.phase)
    }

    /// Transition using an action name (for easier JS interop)
    pub fn transition_str(&mut self, action: &str) -> TransitionResult {
        match MatchAction::from_name(action) {
            Some(action) => self.transition(action),
            None => TransitionResult {
                success: false,
                from_phase: self.phase,
                to_phase: self.phase,
                action: None,
            },
        }
    }

    pub fn reset(&mut self) {
        self.phase = MatchPhase::Idle;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == MatchPhase::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}

impl MatchFsm {
    pub fn can_transition(&self, action: MatchAction) -> bool {
        self.next_phase(action).is_some()
    }

    pub fn transition(&mut self, action: MatchAction) -> TransitionResult {
        let from_phase = self.phase;

        if let Some(next_phase) = self.next_phase(action) {
            self.phase = next_phase;
            TransitionResult {
                success: true,
                from_phase,
                to_phase: next_phase,
                action: Some(action),
            }
        } else {
            TransitionResult {
                success: false,
                from_phase,
                to_phase: from_phase,
                action: Some(action),
            }
        }
    }

    fn next_phase(&self, action: MatchAction) -> Option<MatchPhase> {
        match (self.phase, action) {
            // From Idle
            (MatchPhase::Idle, MatchAction::Start) => Some(MatchPhase::Countdown),

            // From Countdown
            (MatchPhase::Countdown, MatchAction::CountdownDone) => Some(MatchPhase::Playing),
            (MatchPhase::Countdown, MatchAction::Quit) => Some(MatchPhase::Idle),

            // From Playing
            (MatchPhase::Playing, MatchAction::Pause) => Some(MatchPhase::Paused),
            (MatchPhase::Playing, MatchAction::GameOver) => Some(MatchPhase::GameOver),
            (MatchPhase::Playing, MatchAction::Quit) => Some(MatchPhase::Idle),

            // From Paused
            (MatchPhase::Paused, MatchAction::Resume) => Some(MatchPhase::Playing),
            (MatchPhase::Paused, MatchAction::Quit) => Some(MatchPhase::Idle),

            // From GameOver
            (MatchPhase::GameOver, MatchAction::PlayAgain) => Some(MatchPhase::Countdown),
            (MatchPhase::GameOver, MatchAction::Quit) => Some(MatchPhase::Idle),

            // Invalid transition
            _ => None,
        }
    }
}

impl Default for MatchFsm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_phase() {
        let fsm = MatchFsm::new();
        assert_eq!(fsm.phase(), MatchPhase::Idle);
    }

    #[test]
    fn test_valid_transition() {
        let mut fsm = MatchFsm::new();
        let result = fsm.transition(MatchAction::Start);
        assert!(result.success());
        assert_eq!(result.from_phase(), MatchPhase::Idle);
        assert_eq!(fsm.phase(), MatchPhase::Countdown);
    }

    #[test]
    fn test_invalid_transition() {
        let mut fsm = MatchFsm::new();
        let result = fsm.transition(MatchAction::GameOver);
        assert!(!result.success());
        assert_eq!(fsm.phase(), MatchPhase::Idle);
        assert!(!fsm.can_transition(MatchAction::Pause));
    }

    #[test]
    fn test_full_match_flow() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Start);
        fsm.transition(MatchAction::CountdownDone);
        assert!(fsm.is_playing());
        fsm.transition(MatchAction::Pause);
        assert_eq!(fsm.phase(), MatchPhase::Paused);
        fsm.transition(MatchAction::Resume);
        assert!(fsm.is_playing());
        fsm.transition(MatchAction::GameOver);
        assert!(fsm.is_game_over());
        fsm.transition(MatchAction::PlayAgain);
        assert_eq!(fsm.phase(), MatchPhase::Countdown);
    }

    #[test]
    fn test_pause_only_while_playing() {
        let mut fsm = MatchFsm::new();
        fsm.transition(MatchAction::Start);
        assert!(!fsm.transition(MatchAction::Pause).success());
        assert_eq!(fsm.phase(), MatchPhase::Countdown);
    }

    #[test]
    fn test_quit_returns_to_idle() {
        for setup in [
            &[MatchAction::Start][..],
            &[MatchAction::Start, MatchAction::CountdownDone][..],
            &[MatchAction::Start, MatchAction::CountdownDone, MatchAction::Pause][..],
            &[MatchAction::Start, MatchAction::CountdownDone, MatchAction::GameOver][..],
        ] {
            let mut fsm = MatchFsm::new();
            for action in setup {
                fsm.transition(*action);
            }
            assert!(fsm.transition(MatchAction::Quit).success());
            assert_eq!(fsm.phase(), MatchPhase::Idle);
        }
    }

    #[test]
    fn test_transition_str() {
        let mut fsm = MatchFsm::new();
        let result = fsm.transition_str("START");
        assert!(result.success());
        assert_eq!(result.action(), Some(MatchAction::Start));
        assert_eq!(fsm.phase(), MatchPhase::Countdown);

        let result = fsm.transition_str("WARP");
        assert!(!result.success());
        assert_eq!(result.action(), None);
        assert_eq!(fsm.phase_string(), "Countdown");
    }
}
