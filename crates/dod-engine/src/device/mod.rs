//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - owning the multisampled color and depth attachments
//! - acquiring frames and providing encoders/views for rendering

mod gpu;
mod surface;
mod targets;

pub use gpu::{Gpu, GpuFrame, GpuInit, SurfaceErrorAction};
pub use targets::DEPTH_FORMAT;
