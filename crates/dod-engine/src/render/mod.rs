//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers, textures) and issue
//! commands via wgpu into a [`RenderTarget`] provided by the frame context.
//!
//! Convention:
//! - sprite positions are already in clip space
//! - the vertex shader only applies per-instance scale and the viewport aspect

mod ctx;
mod error;
pub mod sprites;

pub use ctx::{RenderCtx, RenderTarget};
pub use error::RenderError;
