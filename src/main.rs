//! Ghost Flyer entry point
//!
//! Headless native driver: runs the simulation in demo mode at a fixed
//! timestep and hands every snapshot to the frame builder.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use ghost_flyer::consts::MAX_SUBSTEPS;
use ghost_flyer::renderer::build_frame;
use ghost_flyer::sim::{GameEvent, SimulationEngine, TickInput};
use ghost_flyer::Settings;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run the Ghost Flyer simulation headless", long_about = None)]
struct Args {
    /// Settings JSON (viewport, tick rate, levels)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the gap placement seed
    #[arg(long)]
    seed: Option<u64>,
    /// Ticks to simulate
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
    /// Pace ticks in real time instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Print the final snapshot as JSON
    #[arg(long)]
    dump_snapshot: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    settings
        .validate()
        .context("settings failed validation")?;

    log::info!("Ghost Flyer (native) starting, seed {}", settings.seed);
    let tick_rate = settings.tick_rate;
    let mut engine = SimulationEngine::new(settings);
    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut best = 0;
    if args.realtime {
        // Fixed timestep accumulator
        let dt = Duration::from_secs_f64(1.0 / tick_rate as f64);
        let mut accumulator = Duration::ZERO;
        let mut last = Instant::now();
        let mut done = 0;
        while done < args.ticks {
            let now = Instant::now();
            accumulator += now - last;
            last = now;

            let mut substeps = 0;
            while accumulator >= dt && substeps < MAX_SUBSTEPS && done < args.ticks {
                best = best.max(run_tick(&mut engine, &idle));
                accumulator -= dt;
                substeps += 1;
                done += 1;
            }
            if substeps == MAX_SUBSTEPS {
                accumulator = Duration::ZERO;
            }
            std::thread::sleep(dt / 2);
        }
    } else {
        for _ in 0..args.ticks {
            best = best.max(run_tick(&mut engine, &idle));
        }
    }

    log::info!(
        "Finished {} ticks: best score {}, current score {} on level {}",
        args.ticks,
        best,
        engine.score(),
        engine.level()
    );

    if args.dump_snapshot {
        let json = serde_json::to_string_pretty(&engine.snapshot())
            .context("failed to serialize snapshot")?;
        println!("{}", json);
    }
    Ok(())
}

/// Step once, build the frame, log what changed. Returns the current score.
fn run_tick(engine: &mut SimulationEngine, input: &TickInput) -> u32 {
    engine.step(input);
    let snapshot = engine.snapshot();
    let frame = build_frame(&snapshot);

    for event in &snapshot.events {
        match event {
            GameEvent::Jumped { .. } => {}
            GameEvent::Passed { score } => log::debug!("Score {}", score),
            GameEvent::LevelUp { .. } | GameEvent::TransitionEnded { .. } => {
                log::info!("HUD: {}", frame.label_texts().join(" | "));
            }
            GameEvent::Crashed { score } => {
                log::info!("Crashed with score {} ({} vertices on screen)", score, frame.vertices.len());
            }
            GameEvent::Reset => log::info!("Restarted"),
        }
    }
    snapshot.score
}
