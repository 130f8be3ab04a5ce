//! Predator/Prey headless runner
//!
//! Usage: predator-prey [scenario.json] [ticks]

use std::time::Duration;

use simulation::ScenarioConfig;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const DEFAULT_TICKS: u64 = 100;

/// Mean wall time per tick; `ticks` may be any `u64`.
fn per_tick(elapsed: Duration, ticks: u64) -> Duration {
    elapsed.div_f64(ticks.max(1) as f64)
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            info!("Loading scenario from {}", path);
            ScenarioConfig::load(&path)?
        }
        None => {
            info!("No scenario given, using the reference predator/prey scenario");
            ScenarioConfig::predator_prey()
        }
    };
    let ticks = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_TICKS,
    };

    let mut world = config.build_world()?;
    info!("Initial counts: {:?}", world.counts());

    let start = std::time::Instant::now();
    for _ in 0..ticks {
        let result = world.step();
        if result.timestep % 10 == 0 {
            info!("t={} population={} counts={:?}", result.timestep, result.population, world.counts());
        }
    }
    let elapsed = start.elapsed();

    info!(
        "Run complete: {:?} total, {:?} per tick, final counts {:?}",
        elapsed,
        per_tick(elapsed, ticks),
        world.counts()
    );

    Ok(())
}
