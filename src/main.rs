//! openflap entry point
//!
//! Runs the game headless under the autopilot, prints how each run ended,
//! and records or verifies replay tapes.
//!
//! Usage:
//!   openflap [--seed <n>] [--frames <n>] [--sessions <n>] [--record <tape.json>]
//!   openflap --verify <tape.json>

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use openflap::audio::LogSink;
use openflap::highscores::format_time;
use openflap::platform::{Autopilot, Clock, ManualClock, SystemClock};
use openflap::renderer::TraceRenderer;
use openflap::replay::Replay;
use openflap::{App, GameLoop, Settings};

#[derive(Parser)]
#[command(name = "openflap")]
#[command(about = "Side-scrolling arcade game with a deterministic, replayable simulation")]
struct Args {
    /// Pin every run to this RNG seed
    #[arg(long)]
    seed: Option<u32>,

    /// Settings file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame budget before stopping
    #[arg(long, default_value_t = 6000)]
    frames: u64,

    /// Simulated display refresh rate for headless runs
    #[arg(long, default_value_t = 60.0)]
    display_hz: f32,

    /// Use the wall clock and pace frames instead of a simulated display
    #[arg(long)]
    realtime: bool,

    /// Number of runs the autopilot plays before quitting
    #[arg(long, default_value_t = 3)]
    sessions: u32,

    /// Write a replay tape of the first finished run
    #[arg(long)]
    record: Option<PathBuf>,

    /// Replay a tape and check its score
    #[arg(long)]
    verify: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    if let Some(path) = &args.verify {
        let replay = Replay::load(path)
            .with_context(|| format!("Failed to load replay {}", path.display()))?;
        let score = replay.verify().context("Replay verification failed")?;
        println!("Verified: seed {} survived {}s", replay.seed, format_time(score));
        return Ok(());
    }

    if args.display_hz <= 0.0 {
        bail!("--display-hz must be positive");
    }

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Settings::default_path().context("Failed to locate settings file")?,
    };
    let settings = Settings::load_or_create(&config_path);
    log::info!(
        "openflap starting: {}x{}, {} frames, {} runs",
        settings.screen_width,
        settings.screen_height,
        args.frames,
        args.sessions
    );

    let app = App::new(settings, LogSink::new(), args.seed);
    let pilot = Autopilot::new(args.sessions);
    let app = if args.realtime {
        play(app, pilot, SystemClock::new(), args.frames, true)
    } else {
        play(app, pilot, ManualClock::from_hz(args.display_hz), args.frames, false)
    };

    println!("Runs:");
    for result in app.results() {
        println!(
            "  #{:<3} seed {:<10} time {:>7}{}",
            result.attempt,
            result.seed,
            format_time(result.score),
            if result.new_high_score { "  (new best)" } else { "" }
        );
    }
    if app.results().is_empty() {
        println!("  (none finished, still playing after {}s)", format_time(app.session.elapsed));
    }
    println!("High score: {}", format_time(app.session.high_score.best()));

    if let Some(path) = &args.record {
        let attempt = app
            .results()
            .first()
            .map(|result| result.attempt)
            .context("No finished run to record")?;
        let replay = Replay::record(&app, attempt)?;
        replay
            .save(path)
            .with_context(|| format!("Failed to write replay {}", path.display()))?;
        println!("Recorded run #{} to {}", attempt, path.display());
    }

    Ok(())
}

fn play<C: Clock>(app: App<LogSink>, pilot: Autopilot, clock: C, frames: u64, realtime: bool) -> App<LogSink> {
    let mut game = GameLoop::new(app, pilot, clock, TraceRenderer::new()).with_pacing(realtime);
    game.run(Some(frames));
    game.into_app()
}
