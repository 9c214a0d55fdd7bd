//! Hilltop headless simulator
//!
//! Runs one scripted session against a headless scene at a fixed 60 Hz and
//! prints what happened.
//!
//! Run with: cargo run --bin hilltop-sim -- [config.toml] [--frames N] [--pause-at N]

use std::path::PathBuf;

use hilltop_core::ManualClock;
use hilltop_game::prelude::*;
use hilltop_hud::LogHud;

const FRAME: f32 = 1.0 / 60.0;
/// Frames spent paused when `--pause-at` is given
const PAUSE_FRAMES: u64 = 60;

/// Command line options
#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    frames: u64,
    pause_at: Option<u64>,
}

impl Args {
    fn parse() -> std::result::Result<Self, String> {
        let mut args = Args {
            config: None,
            frames: 1800,
            pause_at: None,
        };

        let mut iter = std::env::args().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--frames" => args.frames = Self::number(&arg, iter.next())?,
                "--pause-at" => args.pause_at = Some(Self::number(&arg, iter.next())?),
                flag if flag.starts_with("--") => return Err(format!("Unknown flag: {}", flag)),
                // First non-flag argument is the config path
                path if args.config.is_none() => args.config = Some(PathBuf::from(path)),
                extra => return Err(format!("Unexpected argument: {}", extra)),
            }
        }
        Ok(args)
    }

    fn number(flag: &str, value: Option<String>) -> std::result::Result<u64, String> {
        let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
        value
            .parse()
            .map_err(|_| format!("{} expects a number, got {:?}", flag, value))
    }
}

/// Scripted input: start, walk uphill with regular jumps, optional pause,
/// then quit once the run is over and the menu is back.
fn scripted_input(frame: u64, state: GameState, args: &Args, played: bool) -> InputState {
    if let Some(pause_at) = args.pause_at {
        if frame == pause_at && state == GameState::Playing {
            return InputState::command(Command::TogglePause);
        }
        if frame == pause_at + PAUSE_FRAMES && state == GameState::Paused {
            return InputState::command(Command::TogglePause);
        }
    }

    match state {
        GameState::Menu if played => InputState::command(Command::Quit),
        GameState::Menu => InputState::command(Command::Start),
        GameState::Playing => {
            let input = InputState::idle().with_move(0.0, 1.0);
            if frame % 20 == 0 {
                input.with_jump()
            } else {
                input
            }
        }
        _ => InputState::idle(),
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("usage: hilltop-sim [config.toml] [--frames N] [--pause-at N]");
            std::process::exit(2);
        }
    };

    let config = match GameConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let mut session = Session::new(config, HeadlessScene::new(), LogHud::new());
    let mut clock = ManualClock::new();
    let mut played = false;
    let mut transitions = 0;

    log::info!("Simulating up to {} frames", args.frames);
    for frame in 0..args.frames {
        clock.advance(FRAME);
        let input = scripted_input(frame, session.state(), &args, played);
        if let Some(transition) = session.update(&clock, &input) {
            transitions += 1;
            played |= transition.to == GameState::Playing;
        }
        if session.quit_requested() {
            break;
        }
    }

    println!();
    println!("Hilltop simulation summary");
    println!("  simulated time : {:.2}s", session.sim_time());
    println!("  final state    : {}", session.state());
    println!("  health         : {}", session.health());
    println!("  score          : {}", session.score());
    println!("  transitions    : {}", transitions);
    if let Some(boss) = session.boss() {
        println!("  boss hp        : {}", boss.hp);
    }
    println!("  live entities  : {}", session.registry().len());
}
