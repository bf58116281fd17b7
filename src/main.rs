//! Bouncing Circles entry point
//!
//! Headless native runner: builds a scene for a fixed viewport, drives it on
//! the configured tick interval and prints the final frame as JSON.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use bouncing_circles::{Animator, ConfigError, Settings};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// settings JSON file (defaults are used when omitted)
    settings: Option<PathBuf>,

    /// ticks to run before printing the final frame
    #[arg(long, default_value_t = 300)]
    ticks: u64,

    /// viewport width
    #[arg(long, default_value_t = 720)]
    width: i32,

    /// viewport height
    #[arg(long, default_value_t = 1280)]
    height: i32,
}

/// An explicit settings file must load; defaults only apply when none is given
fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    match path {
        Some(path) => {
            let settings = Settings::load_from(path)?;
            log::info!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    log::info!("Bouncing Circles (native) starting...");

    let settings = match load_settings(args.settings.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: could not load settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let interval = Duration::from_millis(settings.tick_interval_ms);
    let mut animator = Animator::new(settings);

    if let Err(e) = animator.on_viewport_ready(args.width, args.height) {
        eprintln!("error: could not build scene: {}", e);
        return ExitCode::FAILURE;
    }

    let mut last = Instant::now();
    while animator.ticks() < args.ticks {
        std::thread::sleep(interval);
        let now = Instant::now();
        let elapsed = now.duration_since(last).as_millis() as u64;
        last = now;

        if animator.advance(elapsed) {
            log::debug!("Repaint frame {}", animator.frame().tick);
        }
    }
    animator.stop();

    match serde_json::to_string_pretty(animator.frame()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("error: could not serialize frame: {}", e);
            return ExitCode::FAILURE;
        }
    }

    log::info!("Ran {} ticks (seed {})", animator.ticks(), animator.seed());
    ExitCode::SUCCESS
}
