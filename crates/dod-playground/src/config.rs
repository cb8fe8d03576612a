use std::path::{Path, PathBuf};

use dod_engine::coords::ColorRgba;
use dod_engine::device::GpuInit;
use dod_engine::logging::LoggingConfig;
use dod_engine::render::sprites::SpriteRendererConfig;
use dod_engine::window::RuntimeConfig;

/// Sprites the renderer can draw per frame.
pub const MAX_SPRITE_COUNT: usize = 11_000;

/// Seed for the simulation's initial layout.
pub const SIMULATION_SEED: u64 = 0x5eed_d0d0;

/// Everything the playground binary needs to start.
#[derive(Debug, Clone)]
pub struct PlaygroundConfig {
    pub logging: LoggingConfig,
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub renderer: SpriteRendererConfig,
    pub texture_path: PathBuf,
    pub clear_color: ColorRgba,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            runtime: RuntimeConfig::default(),
            gpu: GpuInit {
                sample_count: 4,
                ..GpuInit::default()
            },
            renderer: SpriteRendererConfig {
                capacity: MAX_SPRITE_COUNT,
                ..SpriteRendererConfig::default()
            },
            texture_path: Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sprite.png"),
            clear_color: ColorRgba::gray(0.1),
        }
    }
}
