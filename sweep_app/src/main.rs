//! Sweep demo: resolve one step of swept circle collisions
//!
//! Usage: `sweep_demo [scenario.toml|scenario.ron]`. Without an argument a
//! built-in scene runs. Set `RUST_LOG=debug` to see every query.

mod scenario;

use clifford_engine::config::{Config, ConfigError};
use clifford_engine::foundation::logging;

use scenario::{Scenario, ScenarioError};

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Failed to load scenario: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid scenario: {0}")]
    Scenario(#[from] ScenarioError),
}

fn run() -> Result<(), DemoError> {
    let scenario = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scenario from {path}");
            Scenario::load_from_file(&path)?
        }
        None => {
            log::info!("No scenario given, using the built-in scene");
            Scenario::default()
        }
    };
    scenario.validate()?;

    log::info!(
        "Sweeping {} bodies against {} walls (epsilon {})",
        scenario.bodies.len(),
        scenario.walls.len(),
        scenario.collision.epsilon
    );

    let contacts = scenario.contacts();
    for contact in &contacts {
        log::info!(
            "{} reaches {} at t = {:.6}, stopping at ({:.4}, {:.4})",
            contact.body,
            contact.other,
            contact.time,
            contact.resting.x,
            contact.resting.y
        );
    }

    let free = scenario.bodies.iter().filter(|body| !contacts.iter().any(|c| c.body == body.name));
    for body in free {
        log::info!("{} moves freely to ({:.4}, {:.4})", body.name, body.end.x, body.end.y);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting sweep demo");

    match run() {
        Ok(()) => {
            log::info!("Sweep demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Sweep demo failed: {e}");
            Err(e.into())
        }
    }
}
