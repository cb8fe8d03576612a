mod app;
mod config;
mod game;

use anyhow::Result;

use dod_engine::logging::init_logging;
use dod_engine::window::Runtime;

use crate::app::Playground;
use crate::config::{PlaygroundConfig, SIMULATION_SEED};
use crate::game::Simulation;

fn main() -> Result<()> {
    let config = PlaygroundConfig::default();
    init_logging(config.logging.clone());

    let app = Playground::new(Simulation::new(SIMULATION_SEED), &config);
    Runtime::run(config.runtime, config.gpu, app)
}
