//! Headless runner: loads a preset, advances the grid for a fixed number of
//! ticks at 60 Hz and optionally writes the final items as JSON.
//!
//! ```text
//! vectorgrid <preset.toml> [ticks] [snapshot.json]
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use vectorgrid::{Options, VectorGridEngine, VectorGridError};
use web_time::Instant;

const CONTAINER_WIDTH: f32 = 800.0;
const CONTAINER_HEIGHT: f32 = 600.0;
const DEFAULT_TICKS: u32 = 600;
const TICK_MS: f64 = 1000.0 / 60.0;

struct RunArgs {
    preset: PathBuf,
    ticks: u32,
    output: Option<PathBuf>,
}

fn parse_args() -> Option<RunArgs> {
    let mut args = std::env::args().skip(1);
    let preset = PathBuf::from(args.next()?);
    let ticks = match args.next() {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(e) => {
                log::error!("invalid tick count '{raw}': {e}");
                return None;
            }
        },
        None => DEFAULT_TICKS,
    };
    let output = args.next().map(PathBuf::from);
    Some(RunArgs {
        preset,
        ticks,
        output,
    })
}

fn write_snapshot(
    engine: &VectorGridEngine,
    path: &Path,
) -> Result<(), VectorGridError> {
    let json = engine.snapshot_json()?;
    std::fs::write(path, json)?;
    Ok(())
}

fn run(args: &RunArgs) -> Result<(), VectorGridError> {
    let options = Options::load(&args.preset)?;
    log::info!(
        "running '{}' ({}) for {} ticks",
        args.preset.display(),
        options.animation.kind.tag(),
        args.ticks
    );

    let mut engine =
        VectorGridEngine::with_size(options, CONTAINER_WIDTH, CONTAINER_HEIGHT);
    let dims = engine.grid_dimensions();
    log::info!(
        "grid {}x{} at {:.1}px spacing{}",
        dims.rows,
        dims.cols,
        dims.spacing,
        if dims.capped { " (capped)" } else { "" }
    );

    let started = Instant::now();
    let mut visible_total = 0usize;
    for _ in 0..args.ticks {
        let _ = engine.tick(TICK_MS);
        visible_total += engine.frame().len();
    }
    let elapsed = started.elapsed();

    let events = engine.take_pulse_events();
    let per_tick_us = if args.ticks > 0 {
        elapsed.as_secs_f64() * 1e6 / f64::from(args.ticks)
    } else {
        0.0
    };
    log::info!(
        "{} ticks in {:.1} ms ({per_tick_us:.1} us/tick), {:.1} visible/tick, {} pulse events",
        args.ticks,
        elapsed.as_secs_f64() * 1000.0,
        visible_total as f64 / f64::from(args.ticks.max(1)),
        events.len()
    );

    if let Some(path) = &args.output {
        write_snapshot(&engine, path)?;
        log::info!("snapshot written to {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let Some(args) = parse_args() else {
        log::error!("Usage: vectorgrid <preset.toml> [ticks] [snapshot.json]");
        return ExitCode::FAILURE;
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
