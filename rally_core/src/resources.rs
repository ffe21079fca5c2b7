use crate::PaddleRole;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Seconds since the previous frame
    pub now: f32, // Seconds since the session began
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.016,
            now: 0.0,
        }
    }
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub player: u8,
    pub ai: u8,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_player(&mut self) {
        self.player = self.player.saturating_add(1);
    }

    pub fn increment_ai(&mut self) {
        self.ai = self.ai.saturating_add(1);
    }

    pub fn has_winner(&self, win_score: u8) -> Option<PaddleRole> {
        if self.player >= win_score {
            Some(PaddleRole::Human)
        } else if self.ai >= win_score {
            Some(PaddleRole::Ai)
        } else {
            None
        }
    }

    /// Side ahead on points, `None` when tied
    pub fn leader(&self) -> Option<PaddleRole> {
        match self.player.cmp(&self.ai) {
            std::cmp::Ordering::Greater => Some(PaddleRole::Human),
            std::cmp::Ordering::Less => Some(PaddleRole::Ai),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub player_return: bool,
    pub ai_return: bool,
    pub player_scored: bool,
    pub ai_scored: bool,
    pub wall_bounce: bool,
    pub human_edge_contact: bool,
    pub ai_edge_contact: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.player_return
            || self.ai_return
            || self.player_scored
            || self.ai_scored
            || self.wall_bounce
            || self.human_edge_contact
            || self.ai_edge_contact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_increment_player() {
        let mut score = Score::new();
        assert_eq!(score.player, 0);
        score.increment_player();
        assert_eq!(score.player, 1);
        score.increment_player();
        assert_eq!(score.player, 2);
    }

    #[test]
    fn test_score_increment_ai() {
        let mut score = Score::new();
        assert_eq!(score.ai, 0);
        score.increment_ai();
        assert_eq!(score.ai, 1);
    }

    #[test]
    fn test_score_has_winner_player() {
        let mut score = Score::new();
        for _ in 0..5 {
            score.increment_player();
        }
        assert_eq!(score.has_winner(5), Some(PaddleRole::Human), "Player should win at 5");
    }

    #[test]
    fn test_score_has_winner_ai() {
        let mut score = Score::new();
        for _ in 0..5 {
            score.increment_ai();
        }
        assert_eq!(score.has_winner(5), Some(PaddleRole::Ai), "AI should win at 5");
    }

    #[test]
    fn test_score_no_winner_below_threshold() {
        let mut score = Score::new();
        for _ in 0..4 {
            score.increment_player();
        }
        assert_eq!(score.has_winner(5), None, "No winner below threshold");
    }

    #[test]
    fn test_score_leader() {
        let mut score = Score::new();
        assert_eq!(score.leader(), None);
        score.increment_ai();
        assert_eq!(score.leader(), Some(PaddleRole::Ai));
        score.increment_player();
        score.increment_player();
        assert_eq!(score.leader(), Some(PaddleRole::Human));
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.player_scored = true;
        events.ai_scored = true;
        events.player_return = true;
        events.wall_bounce = true;
        assert!(events.any());

        events.clear();

        assert!(!events.player_scored);
        assert!(!events.ai_scored);
        assert!(!events.player_return);
        assert!(!events.wall_bounce);
        assert!(!events.any());
    }
}
