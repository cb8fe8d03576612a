//! dod engine crate.
//!
//! Owns the platform + GPU runtime pieces used by the playground: window and
//! event loop, wgpu bootstrap, the instanced sprite renderer and the game
//! contract that fills it each frame.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod assets;
pub mod render;
pub mod sprite;
