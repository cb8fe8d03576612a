//! Sprite data and the per-frame game contract.
//!
//! The engine never simulates anything itself. Each frame a [`Game`] fills a
//! fixed-capacity [`SpriteBuffer`] and [`run_frame`] forwards exactly the
//! filled prefix to a [`SpriteCommands`] sink (the GPU renderer in practice).

mod buffer;
mod data;
mod frame;
mod game;

pub use buffer::SpriteBuffer;
pub use data::SpriteData;
pub use frame::{run_frame, FrameStats, SpriteCommands, QUAD_INDEX_COUNT};
pub use game::Game;
