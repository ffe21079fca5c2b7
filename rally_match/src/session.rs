#![allow(unknown_lints)]
#![allow(clippy::manual_is_multiple_of)]
use glam::Vec3;
use hecs::World;
use rally_core::*;
use serde::Serialize;

use crate::feedback::{
    return_pulse_intensity, Cue, Feedback, HapticGate, EDGE_PULSE_INTENSITY, PULSE_MS,
};
use crate::fsm::{MatchAction, MatchFsm, MatchPhase};

// Abstract environment (Time, Logging)
pub trait Environment {
    fn now(&self) -> u64; // ms
    fn log(&self, msg: String);
}

/// Native environment: monotonic clock, log lines go to `tracing`
#[cfg(not(target_arch = "wasm32"))]
pub struct TracingEnv {
    started: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl TracingEnv {
    pub fn new() -> Self {
        Self {
            started: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for TracingEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Environment for TracingEnv {
    fn now(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn log(&self, msg: String) {
        tracing::info!("{msg}");
    }
}

/// How a finished match was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    PlayerWins,
    AiWins,
    /// Timer ran out on level points
    Draw,
}

/// What happened during one call to [`MatchSession::frame`]
#[derive(Debug, Clone)]
pub struct FrameReport {
    pub phase: MatchPhase,
    pub outcome: Outcome,
    pub events: Events,
    pub score: Score,
    /// Seconds left before play starts; 0 outside the countdown
    pub countdown_remaining: f32,
    /// Set on the frame the match ends and every frame after
    pub verdict: Option<Verdict>,
}

/// A single-player match: the world, the phase machine and the host sinks
pub struct MatchSession {
    pub env: Box<dyn Environment>,
    pub feedback: Box<dyn Feedback>,
    pub world: World,
    pub time: Time,
    pub config: Config,
    pub score: Score,
    pub events: Events,
    pub rng: GameRng,
    fsm: MatchFsm,
    base_difficulty: Difficulty,
    difficulty: Difficulty,
    haptics: HapticGate,
    countdown_remaining: f32,
    play_elapsed: f32,
    verdict: Option<Verdict>,
    frame_count: u32,
}

impl MatchSession {
    pub fn new(
        env: Box<dyn Environment>,
        feedback: Box<dyn Feedback>,
        config: Config,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            env,
            feedback,
            world: World::new(),
            time: Time::default(),
            haptics: HapticGate::new(config.haptic_cooldown_ms),
            countdown_remaining: 0.0,
            config,
            score: Score::new(),
            events: Events::new(),
            rng: GameRng::new(seed),
            fsm: MatchFsm::new(),
            base_difficulty: Difficulty::default(),
            difficulty: Difficulty::default(),
            play_elapsed: 0.0,
            verdict: None,
            frame_count: 0,
        };
        session.spawn_table();
        Ok(session)
    }

    /// Pick the opponent's reaction speed; applies from the next frame
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.base_difficulty = difficulty;
        self.difficulty = self.rebalanced();
    }

    /// Leave Idle and start the countdown
    pub fn start(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::Start).success() {
            return false;
        }
        self.countdown_remaining = self.config.countdown_secs;
        self.env
            .log(format!("Match starting, countdown {:.0}s", self.countdown_remaining));
        true
    }

    /// Advance one display frame.
    ///
    /// `controller_x` is the tracked controller's lateral position, or
    /// `None` when tracking is lost this frame. `delta` is seconds since the
    /// previous frame; non-finite or negative values count as 0.
    pub fn frame(&mut self, controller_x: Option<f32>, delta: f32) -> FrameReport {
        let dt = if delta.is_finite() {
            delta.clamp(0.0, Params::MAX_DT)
        } else {
            0.0
        };
        let input = ControllerInput { paddle_x: controller_x };
        let mut outcome = Outcome::None;
        self.events.clear();

        match self.fsm.phase() {
            MatchPhase::Countdown => {
                // The paddle follows the hand before the serve
                systems::ingest_controller(&mut self.world, &input, &self.config);
                self.tick_countdown(dt);
            }
            MatchPhase::Playing => {
                outcome = self.play(&input, dt);
            }
            MatchPhase::Idle | MatchPhase::Paused | MatchPhase::GameOver => {}
        }

        self.report(outcome)
    }

    pub fn pause(&mut self) -> bool {
        let paused = self.fsm.transition(MatchAction::Pause).success();
        if paused {
            self.env.log("Match paused".to_string());
        }
        paused
    }

    pub fn resume(&mut self) -> bool {
        let resumed = self.fsm.transition(MatchAction::Resume).success();
        if resumed {
            self.env.log("Match resumed".to_string());
        }
        resumed
    }

    /// Reset game state for a rematch. Only valid once the match is over.
    pub fn restart_match(&mut self) -> bool {
        if !self.fsm.can_transition(MatchAction::PlayAgain) {
            return false;
        }

        self.env.log("Restarting match".to_string());
        self.reset_match();
        self.fsm.transition(MatchAction::PlayAgain);
        self.countdown_remaining = self.config.countdown_secs;
        true
    }

    /// Abandon the match from any phase and return to Idle
    pub fn quit(&mut self) -> bool {
        if !self.fsm.transition(MatchAction::Quit).success() {
            return false;
        }
        self.env.log("Match abandoned".to_string());
        self.reset_match();
        true
    }

    /// Apply a named action from the page. Start, Pause, Resume, PlayAgain
    /// and Quit go through the same paths as the direct calls; the others
    /// are driven by the session itself and are refused.
    pub fn apply(&mut self, action: MatchAction) -> bool {
        match action {
            MatchAction::Start => self.start(),
            MatchAction::Pause => self.pause(),
            MatchAction::Resume => self.resume(),
            MatchAction::PlayAgain => self.restart_match(),
            MatchAction::Quit => self.quit(),
            MatchAction::CountdownDone | MatchAction::GameOver => false,
        }
    }

    pub fn phase(&self) -> MatchPhase {
        self.fsm.phase()
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn countdown_remaining(&self) -> f32 {
        self.countdown_remaining
    }

    /// Seconds of live play this match (pauses and countdown excluded)
    pub fn play_elapsed(&self) -> f32 {
        self.play_elapsed
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn ball_position(&self) -> Vec3 {
        ball_state(&self.world)
            .map(|(position, _)| position)
            .unwrap_or_else(|| self.config.table_center())
    }

    pub fn ball_velocity(&self) -> Vec3 {
        ball_state(&self.world)
            .map(|(_, velocity)| velocity)
            .unwrap_or(Vec3::ZERO)
    }

    pub fn paddle_position(&self, role: PaddleRole) -> Vec3 {
        paddle_position(&self.world, role).unwrap_or_else(|| self.config.paddle_spawn(role))
    }

    fn spawn_table(&mut self) {
        create_paddle(&mut self.world, PaddleRole::Human, &self.config);
        create_paddle(&mut self.world, PaddleRole::Ai, &self.config);
        create_served_ball(&mut self.world, &self.config, &mut self.rng);
    }

    fn reset_match(&mut self) {
        self.score = Score::new();
        self.events = Events::new();
        self.time = Time::default();
        self.verdict = None;
        self.play_elapsed = 0.0;
        self.countdown_remaining = 0.0;
        self.frame_count = 0;
        self.difficulty = self.base_difficulty;
        self.haptics.reset();

        // Reset world entities
        self.world.clear();
        self.spawn_table();
    }

    /// Process one countdown frame. Returns true when play begins.
    fn tick_countdown(&mut self, dt: f32) -> bool {
        let before = self.countdown_remaining.ceil();
        self.countdown_remaining = (self.countdown_remaining - dt).max(0.0);
        let after = self.countdown_remaining.ceil();
        if after < before && after > 0.0 {
            self.env.log(format!("Countdown: {after:.0}"));
        }

        if self.countdown_remaining > 0.0 {
            return false;
        }
        self.env.log("Countdown complete, serve!".to_string());
        self.fsm.transition(MatchAction::CountdownDone);
        true
    }

    fn play(&mut self, input: &ControllerInput, dt: f32) -> Outcome {
        self.time.dt = dt;
        self.frame_count += 1;

        if self.frame_count % 600 == 0 {
            self.env.log(format!(
                "Rally running, frame={}, score={}-{}, ai_step={:.4}",
                self.frame_count,
                self.score.player,
                self.score.ai,
                self.difficulty.max_step()
            ));
        }

        let outcome = step(
            &mut self.world,
            &mut self.time,
            &self.config,
            self.difficulty,
            input,
            &mut self.score,
            &mut self.events,
            &mut self.rng,
        );
        self.play_elapsed += dt;

        self.dispatch_feedback(outcome);

        if outcome.is_score() {
            self.env.log(format!(
                "Point to {}: {}-{}",
                if outcome == Outcome::PlayerScore { "player" } else { "ai" },
                self.score.player,
                self.score.ai
            ));
            self.difficulty = self.rebalanced();
        }

        if let Some(verdict) = self.decide() {
            self.finish(verdict);
        }
        outcome
    }

    fn rebalanced(&self) -> Difficulty {
        if self.config.ai.adaptive_difficulty {
            Difficulty::rebalanced(self.base_difficulty, self.score.player, self.score.ai)
        } else {
            self.base_difficulty
        }
    }

    fn dispatch_feedback(&mut self, outcome: Outcome) {
        if let Some(cue) = Cue::for_outcome(outcome) {
            self.feedback.cue(cue);
        }
        if self.events.wall_bounce {
            self.feedback.cue(Cue::WallBounce);
        }

        let pulse = if outcome == Outcome::PlayerReturn {
            let speed = self.ball_velocity().length();
            Some(return_pulse_intensity(speed, self.config.ball_speed_max))
        } else if self.events.human_edge_contact {
            Some(EDGE_PULSE_INTENSITY)
        } else {
            None
        };
        if let Some(intensity) = pulse {
            if self.haptics.try_fire(self.env.now()) {
                self.feedback.pulse(intensity, PULSE_MS);
            }
        }
    }

    fn decide(&self) -> Option<Verdict> {
        match self.score.has_winner(self.config.win_score) {
            Some(PaddleRole::Human) => return Some(Verdict::PlayerWins),
            Some(PaddleRole::Ai) => return Some(Verdict::AiWins),
            None => {}
        }

        let duration = self.config.match_duration_secs;
        if duration > 0.0 && self.play_elapsed >= duration {
            return Some(match self.score.leader() {
                Some(PaddleRole::Human) => Verdict::PlayerWins,
                Some(PaddleRole::Ai) => Verdict::AiWins,
                None => Verdict::Draw,
            });
        }
        None
    }

    fn finish(&mut self, verdict: Verdict) {
        self.verdict = Some(verdict);
        self.fsm.transition(MatchAction::GameOver);
        match verdict {
            Verdict::PlayerWins => self.feedback.cue(Cue::Victory),
            Verdict::AiWins => self.feedback.cue(Cue::Defeat),
            Verdict::Draw => {}
        }
        self.env.log(format!(
            "Game over: {:?} ({}-{}) after {:.1}s",
            verdict, self.score.player, self.score.ai, self.play_elapsed
        ));
    }

    fn report(&self, outcome: Outcome) -> FrameReport {
        FrameReport {
            phase: self.fsm.phase(),
            outcome,
            events: self.events.clone(),
            score: self.score,
            countdown_remaining: self.countdown_remaining,
            verdict: self.verdict,
        }
    }
}
