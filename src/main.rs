//! Penguin Lure headless runner
//!
//! Replays a scripted list of taps through the same input and scheduling
//! path a real front end uses, logs what happens, and prints the final
//! render snapshot as JSON.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use penguin_lure::consts::SIM_DT;
use penguin_lure::platform::{PointerTracker, TickScheduler};
use penguin_lure::sim::{GameEvent, GameState, RenderSnapshot, TickInput, tick};
use penguin_lure::{LevelPack, Settings};

/// One scripted tap
#[derive(Debug, Clone, Deserialize)]
struct ScriptedTap {
    tick: u64,
    x: f32,
    y: f32,
}

/// Replay scripted taps through the simulation and print the final snapshot
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level pack JSON (defaults to the built-in floes)
    #[arg(long, value_name = "PATH")]
    levels: Option<PathBuf>,
    /// Settings JSON (defaults to built-in settings)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// JSON list of `{ "tick", "x", "y" }` taps
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
    /// Simulation ticks to run
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,
}

/// Taps that walk from the title screen into the first level
fn default_script() -> Vec<ScriptedTap> {
    vec![
        ScriptedTap { tick: 1, x: 320.0, y: 240.0 },
        ScriptedTap { tick: 2, x: 320.0, y: 240.0 },
        ScriptedTap { tick: 3, x: 496.0, y: 208.0 },
    ]
}

fn run(args: Args) -> Result<RenderSnapshot, Box<dyn std::error::Error>> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let levels = match &args.levels {
        Some(path) => LevelPack::load(path)?,
        None => LevelPack::builtin(),
    };
    let script = match &args.script {
        Some(path) => serde_json::from_str::<Vec<ScriptedTap>>(&std::fs::read_to_string(path)?)?,
        None => default_script(),
    };
    let max_ticks = args.ticks;

    log::info!(
        "Penguin Lure: {} levels, fish order {}",
        levels.len(),
        settings.bait_order.as_str()
    );

    let mut state = GameState::new(levels, settings);
    let mut pointer = PointerTracker::new();
    let mut scheduler = TickScheduler::default();

    // Simulated 60 Hz display driving the 30 Hz simulation
    let frame_dt = SIM_DT / 2.0;
    while state.time_ticks < max_ticks {
        for _ in 0..scheduler.advance(frame_dt) {
            let next_tick = state.time_ticks + 1;
            for tap in script.iter().filter(|t| t.tick == next_tick) {
                pointer.press(tap.x, tap.y);
                pointer.release(tap.x, tap.y);
            }
            let input = TickInput::from_sample(&pointer.sample(), true);
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::PhaseChanged { .. } | GameEvent::LevelRejected { .. } => {
                        log::info!("tick {}: {:?}", state.time_ticks, event)
                    }
                    _ => log::debug!("tick {}: {:?}", state.time_ticks, event),
                }
            }
        }
    }

    Ok(RenderSnapshot::capture(&state))
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();

    match run(Args::parse()).and_then(|snapshot| Ok(serde_json::to_string_pretty(&snapshot)?)) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    }
}
