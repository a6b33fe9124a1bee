//! Counter race demo: two workers, one lock, one shared counter.
//!
//! Run with: cargo run [config.toml]
//!
//! With no argument the run uses the built-in defaults (2^25 - 1 iterations,
//! one incrementing and one decrementing worker). Set RUST_LOG=debug for the
//! per-worker lifecycle lines.

use std::env;
use std::path::Path;
use std::process;

use colored::Colorize;

use counter_race::{HarnessError, RaceConfig, RaceHarness};

fn load_config() -> Result<RaceConfig, HarnessError> {
    match env::args().nth(1) {
        Some(path) => Ok(RaceConfig::from_path(Path::new(&path))?),
        None => Ok(RaceConfig::default()),
    }
}

fn run() -> Result<(), HarnessError> {
    let config = load_config()?;

    println!("{}", "=== Counter Race: two workers, one lock ===".bold());
    println!("Iterations per worker: {}", config.iterations);
    println!("Roles: {}\n", config.roles);

    let report = RaceHarness::new(config).run()?;
    print!("{}", report.render());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        eprintln!("{} {err}", "error:".red().bold());
        process::exit(1);
    }
}
