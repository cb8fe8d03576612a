//! Coordinate and color types shared across the runtime and renderers.
//!
//! Window-facing sizes are logical pixels (DPI-aware). Sprite positions are
//! already in clip space and never pass through here.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
