//! WebAssembly bridge for the table rally
//!
//! The page owns the XR session, the scene and the audio graph. Once per
//! animation frame it passes the controller's lateral position and the
//! frame delta to [`WebMatch::frame`], then reads positions back for
//! rendering. Sounds and haptics come back through JS callbacks.

#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use rally_core::{Config, Difficulty, Outcome, PaddleRole};
use rally_match::{Cue, Environment, Feedback, MatchPhase, MatchSession, Verdict};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start_module() {
    console_error_panic_hook::set_once();
}

/// Browser clock and console
struct WebEnv;

impl Environment for WebEnv {
    fn now(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn log(&self, msg: String) {
        web_sys::console::log_1(&JsValue::from_str(&msg));
    }
}

#[derive(Default)]
struct Callbacks {
    on_cue: Option<js_sys::Function>,
    on_pulse: Option<js_sys::Function>,
}

/// Forwards cues and pulses to whatever callbacks the page registered
struct JsFeedback {
    callbacks: Rc<RefCell<Callbacks>>,
}

impl Feedback for JsFeedback {
    fn cue(&mut self, cue: Cue) {
        if let Some(callback) = &self.callbacks.borrow().on_cue {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(cue.name())) {
                web_sys::console::error_2(&JsValue::from_str("cue callback failed:"), &e);
            }
        }
    }

    fn pulse(&mut self, intensity: f32, duration_ms: u32) {
        if let Some(callback) = &self.callbacks.borrow().on_pulse {
            let result = callback.call2(
                &JsValue::NULL,
                &JsValue::from_f64(f64::from(intensity)),
                &JsValue::from_f64(f64::from(duration_ms)),
            );
            if let Err(e) = result {
                web_sys::console::error_2(&JsValue::from_str("pulse callback failed:"), &e);
            }
        }
    }
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::None => "none",
        Outcome::PlayerReturn => "player_return",
        Outcome::AiReturn => "ai_return",
        Outcome::PlayerScore => "player_score",
        Outcome::AiScore => "ai_score",
    }
}

fn verdict_name(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::PlayerWins => "player_wins",
        Verdict::AiWins => "ai_wins",
        Verdict::Draw => "draw",
    }
}

fn to_array(v: Vec3) -> Vec<f32> {
    vec![v.x, v.y, v.z]
}

/// A match driven from the page
#[wasm_bindgen]
pub struct WebMatch {
    session: MatchSession,
    callbacks: Rc<RefCell<Callbacks>>,
}

#[wasm_bindgen]
impl WebMatch {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<WebMatch, JsValue> {
        Self::build(Config::new(), seed)
    }

    /// Build a match from a JSON override of the default tuning
    pub fn with_config_json(seed: u32, json: &str) -> Result<WebMatch, JsValue> {
        let config = Config::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
        Self::build(config, seed)
    }

    /// Register `callback(name)` for audio cues
    pub fn on_cue(&mut self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().on_cue = Some(callback);
    }

    /// Register `callback(intensity, durationMs)` for controller haptics
    pub fn on_pulse(&mut self, callback: js_sys::Function) {
        self.callbacks.borrow_mut().on_pulse = Some(callback);
    }

    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsValue> {
        let difficulty = Difficulty::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown difficulty: {name}")))?;
        self.session.set_difficulty(difficulty);
        Ok(())
    }

    pub fn start(&mut self) -> bool {
        self.session.start()
    }

    /// Run one animation frame; returns the frame outcome name
    pub fn frame(&mut self, controller_x: Option<f32>, delta: f32) -> String {
        let report = self.session.frame(controller_x, delta);
        outcome_name(report.outcome).to_string()
    }

    pub fn pause(&mut self) -> bool {
        self.session.pause()
    }

    pub fn resume(&mut self) -> bool {
        self.session.resume()
    }

    pub fn restart(&mut self) -> bool {
        self.session.restart_match()
    }

    pub fn quit(&mut self) -> bool {
        self.session.quit()
    }

    /// Apply an action by name (START, PAUSE, RESUME, PLAY_AGAIN, QUIT)
    pub fn transition(&mut self, action: &str) -> bool {
        match rally_match::MatchAction::from_name(action) {
            Some(action) => self.session.apply(action),
            None => false,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> MatchPhase {
        self.session.phase()
    }

    #[wasm_bindgen(getter)]
    pub fn verdict(&self) -> Option<String> {
        self.session.verdict().map(|v| verdict_name(v).to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn player_score(&self) -> u8 {
        self.session.score.player
    }

    #[wasm_bindgen(getter)]
    pub fn ai_score(&self) -> u8 {
        self.session.score.ai
    }

    #[wasm_bindgen(getter)]
    pub fn countdown_remaining(&self) -> f32 {
        self.session.countdown_remaining()
    }

    /// `[x, y, z]` in table space
    pub fn ball_position(&self) -> Vec<f32> {
        to_array(self.session.ball_position())
    }

    pub fn player_paddle_position(&self) -> Vec<f32> {
        to_array(self.session.paddle_position(PaddleRole::Human))
    }

    pub fn ai_paddle_position(&self) -> Vec<f32> {
        to_array(self.session.paddle_position(PaddleRole::Ai))
    }
}

impl WebMatch {
    fn build(config: Config, seed: u32) -> Result<WebMatch, JsValue> {
        let callbacks = Rc::new(RefCell::new(Callbacks::default()));
        let feedback = JsFeedback {
            callbacks: callbacks.clone(),
        };
        let session = MatchSession::new(
            Box::new(WebEnv),
            Box::new(feedback),
            config,
            u64::from(seed),
        )
        .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?;
        Ok(WebMatch { session, callbacks })
    }
}
