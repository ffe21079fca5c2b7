//! Rally Sim CLI
//!
//! Plays headless matches against the AI with a scripted controller and
//! prints a JSON summary per match. Used to tune difficulty and speeds.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rally_core::{Config, Difficulty};
use rally_match::{MatchSession, MatchPhase, TracingEnv, TracingFeedback, Verdict};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rally-sim")]
#[command(about = "Simulate table rally matches against the AI", long_about = None)]
struct Cli {
    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// RNG seed of the first match; later matches use seed + index
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// AI preset: easy, normal or hard
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// JSON config overrides (any subset of fields)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated display refresh rate
    #[arg(long, default_value_t = 72.0)]
    hz: f32,

    /// Largest lateral move of the scripted controller per frame
    #[arg(long, default_value_t = 0.02)]
    reach: f32,

    /// Give up on a match after this many frames
    #[arg(long, default_value_t = 200_000)]
    max_frames: u32,
}

#[derive(Serialize)]
struct MatchSummary {
    seed: u64,
    verdict: Option<Verdict>,
    player: u8,
    ai: u8,
    frames: u32,
    play_secs: f32,
    final_ai_step: f32,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if !(cli.hz.is_finite() && cli.hz > 0.0) {
        bail!("--hz must be a positive number, got {}", cli.hz);
    }
    let difficulty = Difficulty::from_name(&cli.difficulty)
        .with_context(|| format!("unknown difficulty '{}'", cli.difficulty))?;
    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Config::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => Config::new(),
    };

    for index in 0..cli.matches {
        let seed = cli.seed.wrapping_add(u64::from(index));
        let summary = simulate(&cli, config.clone(), difficulty, seed)?;
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}

fn simulate(cli: &Cli, config: Config, difficulty: Difficulty, seed: u64) -> Result<MatchSummary> {
    let mut session = MatchSession::new(
        Box::new(TracingEnv::new()),
        Box::new(TracingFeedback),
        config,
        seed,
    )?;
    session.set_difficulty(difficulty);
    session.start();

    let delta = 1.0 / cli.hz;
    let mut hand_x = 0.0f32;
    let mut frames = 0;
    while frames < cli.max_frames && session.phase() != MatchPhase::GameOver {
        // Chase the ball with a bounded hand speed
        let target = session.ball_position().x;
        hand_x += (target - hand_x).clamp(-cli.reach, cli.reach);
        session.frame(Some(hand_x), delta);
        frames += 1;
    }

    if session.verdict().is_none() {
        tracing::warn!(seed, frames, "match did not finish");
    }

    Ok(MatchSummary {
        seed,
        verdict: session.verdict(),
        player: session.score.player,
        ai: session.score.ai,
        frames,
        play_secs: session.play_elapsed(),
        final_ai_step: session.difficulty().max_step(),
    })
}
