//! Instanced sprite rendering.
//!
//! One pipeline, one texture, one instance buffer: every sprite is the same
//! textured quad tinted by its instance color.

mod renderer;
mod shader;

pub use renderer::{SpritePass, SpriteRenderer, SpriteRendererConfig};
pub use shader::{SpriteShader, WgslSpriteShader};
