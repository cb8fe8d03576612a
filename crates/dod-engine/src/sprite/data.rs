use bytemuck::{Pod, Zeroable};

use crate::coords::ColorRgba;

/// Per-instance sprite record, uploaded verbatim to the instance buffer.
///
/// `x`/`y` are the quad's bottom-left corner in clip space, `scale` its width
/// in clip units (height is scaled by the viewport aspect in the shader).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct SpriteData {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub color: [f32; 4],
}

impl SpriteData {
    #[inline]
    pub const fn new(x: f32, y: f32, scale: f32, color: ColorRgba) -> Self {
        Self {
            x,
            y,
            scale,
            color: color.to_array(),
        }
    }

    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x3, // x, y, scale
        1 => Float32x4  // color
    ];

    /// Instance-rate vertex layout matching the field order above.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteData>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
