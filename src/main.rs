//! Command-line runner for the gravity sandbox
//!
//! Loads a built-in preset or a YAML scenario file, ticks the simulation
//! headless, and prints periodic state reports.

use anyhow::{bail, Context, Result};
use clap::Parser;
use gravity_sandbox::presets::{self, ScenarioFile};
use gravity_sandbox::{SimConfig, Simulation, Snapshot};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gravity_sandbox", about = "Headless N-body gravity sandbox")]
struct Args {
    /// Built-in preset to load
    #[arg(long, default_value = "binary")]
    preset: String,

    /// YAML scenario file; overrides --preset
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Time scale multiplier applied to every tick
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Ticks between progress reports (0 reports only the final state)
    #[arg(long, default_value_t = 120)]
    report_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (config, preset) = match &args.scenario {
        Some(path) => {
            let scenario = ScenarioFile::load(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?;
            (scenario.config, scenario.into_preset())
        }
        None => match presets::builtin(&args.preset) {
            Some(preset) => (SimConfig::default(), preset),
            None => bail!(
                "unknown preset '{}' (built-ins: {})",
                args.preset,
                presets::BUILTIN_NAMES.join(", ")
            ),
        },
    };

    let mut sim = Simulation::new(config);
    sim.load_preset(&preset)?;
    println!(
        "{}: {} bodies, {} ticks at time scale {}",
        preset.name,
        sim.live_count(),
        args.ticks,
        args.time_scale
    );

    for _ in 0..args.ticks {
        let snapshot = sim.tick(args.time_scale)?;
        if args.report_every > 0 && snapshot.tick % args.report_every == 0 {
            report(&snapshot);
        }
    }

    if !final_tick_reported(args.ticks, args.report_every) {
        report(&sim.snapshot());
    }
    let momentum = sim.total_momentum();
    println!(
        "done: {} bodies live, {} merges, momentum ({:.3}, {:.3}), kinetic energy {:.3}",
        sim.live_count(),
        sim.merge_count(),
        momentum.x,
        momentum.y,
        sim.total_kinetic_energy()
    );
    for body in sim.bodies() {
        println!(
            "  {}  mass={:<10.2} pos=({:.2}, {:.2}) vel=({:.2}, {:.2})",
            body.id, body.mass, body.position.x, body.position.y, body.velocity.x, body.velocity.y
        );
    }

    Ok(())
}

/// True when the periodic reporting inside the tick loop already printed
/// the final tick
fn final_tick_reported(ticks: u64, report_every: u64) -> bool {
    report_every > 0 && ticks > 0 && ticks % report_every == 0
}

fn report(snapshot: &Snapshot) {
    let com = match snapshot.center_of_mass {
        Some(c) => format!("({:.2}, {:.2})", c.x, c.y),
        None => "none".to_string(),
    };
    println!(
        "tick {:>6}  t={:<9.3} bodies={:<4} com={}",
        snapshot.tick, snapshot.time, snapshot.live_count, com
    );
}
