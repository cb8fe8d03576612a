//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single Window, wires them to the GPU
//! layer, and drives the app's init/frame/cleanup callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
