use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::assets::ImageData;
use crate::render::{RenderCtx, RenderError, RenderTarget};
use crate::sprite::{SpriteCommands, SpriteData};

use super::SpriteShader;

/// Quad corners addressed by vertex index: `qx = i / 2`, `qy = i & 1`.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

const TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

// ── config ────────────────────────────────────────────────────────────────

/// Static sprite renderer settings.
#[derive(Debug, Clone)]
pub struct SpriteRendererConfig {
    /// Maximum sprites per frame; sizes the instance buffer.
    pub capacity: usize,

    /// Texture filtering for both minification and magnification.
    pub filter: wgpu::FilterMode,
}

impl Default for SpriteRendererConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            filter: wgpu::FilterMode::Linear,
        }
    }
}

// ── uniforms ──────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct SpriteParams {
    aspect: f32,
    _pad: [f32; 3], // 16-byte uniform size
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Instanced textured-quad renderer.
///
/// All GPU resources are created up front in [`new`](Self::new) and live until
/// the renderer is dropped. Per frame, [`begin_pass`](Self::begin_pass) opens a
/// render pass that accepts [`SpriteCommands`].
pub struct SpriteRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    params_ubo: wgpu::Buffer,
    quad_ibo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
    capacity: usize,
}

impl SpriteRenderer {
    /// Creates the instance/index/uniform buffers, texture, sampler and
    /// pipeline for drawing into targets described by `ctx`.
    pub fn new<S>(
        ctx: &RenderCtx<'_>,
        config: &SpriteRendererConfig,
        texture: &ImageData,
        shader: &S,
    ) -> Result<Self, RenderError>
    where
        S: SpriteShader + ?Sized,
    {
        let instance_bytes = check_limits(config.capacity, texture, &ctx.device.limits())?;

        let instance_vbo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dod sprite instance vbo"),
            size: instance_bytes,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let quad_ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("dod sprite quad ibo"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let params_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("dod sprite params ubo"),
            size: std::mem::size_of::<SpriteParams>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let texture_view = upload_texture(ctx, texture);
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("dod sprite sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.filter,
            min_filter: config.filter,
            ..Default::default()
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dod sprite bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<SpriteParams>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dod sprite bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = create_pipeline(ctx, &bgl, shader);

        log::info!(
            "sprite renderer ready: capacity {} ({} KiB instance buffer), texture {}x{}",
            config.capacity,
            instance_bytes / 1024,
            texture.width,
            texture.height
        );

        Ok(Self {
            pipeline,
            bind_group,
            params_ubo,
            quad_ibo,
            instance_vbo,
            capacity: config.capacity,
        })
    }

    /// Maximum sprites per frame.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Opens a sprite render pass over `target`.
    ///
    /// The pass loads the existing color/depth contents; clearing is the frame
    /// context's job. The pass ends when the returned value is dropped.
    pub fn begin_pass<'a>(
        &'a self,
        ctx: &'a RenderCtx<'_>,
        target: &'a mut RenderTarget<'_>,
    ) -> SpritePass<'a> {
        let color = target.color_attachment(wgpu::LoadOp::Load);
        let depth = target.depth_attachment(wgpu::LoadOp::Load);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dod sprite pass"),
            color_attachments: &[Some(color)],
            depth_stencil_attachment: Some(depth),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.instance_vbo.slice(..));
        rpass.set_index_buffer(self.quad_ibo.slice(..), wgpu::IndexFormat::Uint16);

        SpritePass {
            renderer: self,
            queue: ctx.queue,
            rpass,
        }
    }
}

/// An open sprite render pass; the GPU side of [`crate::sprite::run_frame`].
///
/// Buffer writes go through the queue and land before this frame's command
/// buffer executes.
pub struct SpritePass<'a> {
    renderer: &'a SpriteRenderer,
    queue: &'a wgpu::Queue,
    rpass: wgpu::RenderPass<'a>,
}

impl SpriteCommands for SpritePass<'_> {
    fn set_aspect(&mut self, aspect: f32) {
        let params = SpriteParams {
            aspect,
            _pad: [0.0; 3],
        };
        self.queue
            .write_buffer(&self.renderer.params_ubo, 0, bytemuck::bytes_of(&params));
    }

    fn upload_instances(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        assert!(
            bytes.len() <= self.renderer.capacity * std::mem::size_of::<SpriteData>(),
            "instance upload of {} bytes overflows a {}-sprite buffer",
            bytes.len(),
            self.renderer.capacity
        );
        self.queue.write_buffer(&self.renderer.instance_vbo, 0, bytes);
    }

    fn draw_instanced(&mut self, index_count: u32, instance_count: u32) {
        self.rpass.draw_indexed(0..index_count, 0, 0..instance_count);
    }
}

// ── setup helpers ─────────────────────────────────────────────────────────

/// Validates renderer inputs against device limits.
///
/// Returns the instance buffer size in bytes.
fn check_limits(
    capacity: usize,
    texture: &ImageData,
    limits: &wgpu::Limits,
) -> Result<u64, RenderError> {
    if capacity == 0 {
        return Err(RenderError::ZeroCapacity);
    }

    let max = limits.max_texture_dimension_2d;
    if texture.width > max || texture.height > max {
        return Err(RenderError::TextureTooLarge {
            width: texture.width,
            height: texture.height,
            max,
        });
    }

    let bytes = (capacity as u64).saturating_mul(std::mem::size_of::<SpriteData>() as u64);
    if bytes > limits.max_buffer_size {
        return Err(RenderError::InstanceBufferTooLarge {
            bytes,
            max: limits.max_buffer_size,
        });
    }

    Ok(bytes)
}

fn upload_texture(ctx: &RenderCtx<'_>, image: &ImageData) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width: image.width,
        height: image.height,
        depth_or_array_layers: 1,
    };

    let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("dod sprite texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: TEXTURE_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    ctx.queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &image.rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(image.bytes_per_row()),
            rows_per_image: Some(image.height),
        },
        size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_pipeline<S>(
    ctx: &RenderCtx<'_>,
    bgl: &wgpu::BindGroupLayout,
    shader: &S,
) -> wgpu::RenderPipeline
where
    S: SpriteShader + ?Sized,
{
    let module = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(shader.label()),
        source: shader.source(),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("dod sprite pipeline layout"),
        bind_group_layouts: &[bgl],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("dod sprite pipeline"),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &module,
            entry_point: Some(shader.vertex_entry()),
            compilation_options: Default::default(),
            buffers: &[SpriteData::layout()],
        },

        fragment: Some(wgpu::FragmentState {
            module: &module,
            entry_point: Some(shader.fragment_entry()),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: Some(wgpu::DepthStencilState {
            format: ctx.depth_format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),

        multisample: wgpu::MultisampleState {
            count: ctx.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },

        multiview_mask: None,
        cache: None,
    })
}

/// Straight (non-premultiplied) alpha blending on color and alpha.
fn alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: component,
        alpha: component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(w: u32, h: u32) -> ImageData {
        ImageData::solid(w, h, [255; 4])
    }

    #[test]
    fn limits_accept_typical_setup() {
        let bytes = check_limits(11_000, &image(64, 64), &wgpu::Limits::default()).unwrap();
        assert_eq!(bytes, 11_000 * 28);
    }

    #[test]
    fn zero_capacity_rejected() {
        let err = check_limits(0, &image(1, 1), &wgpu::Limits::default()).unwrap_err();
        assert!(matches!(err, RenderError::ZeroCapacity));
    }

    #[test]
    fn oversized_texture_rejected() {
        let limits = wgpu::Limits {
            max_texture_dimension_2d: 32,
            ..wgpu::Limits::default()
        };
        let err = check_limits(1, &image(33, 8), &limits).unwrap_err();
        assert!(matches!(
            err,
            RenderError::TextureTooLarge { width: 33, height: 8, max: 32 }
        ));
        assert!(check_limits(1, &image(32, 32), &limits).is_ok());
    }

    #[test]
    fn oversized_instance_buffer_rejected() {
        let limits = wgpu::Limits {
            max_buffer_size: 280,
            ..wgpu::Limits::default()
        };
        assert_eq!(check_limits(10, &image(1, 1), &limits).unwrap(), 280);
        let err = check_limits(11, &image(1, 1), &limits).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InstanceBufferTooLarge { bytes: 308, max: 280 }
        ));
    }

    #[test]
    fn quad_indices_cover_both_triangles() {
        assert_eq!(QUAD_INDICES, [0, 1, 2, 2, 1, 3]);
        assert_eq!(QUAD_INDICES.len() as u32, crate::sprite::QUAD_INDEX_COUNT);
    }

    #[test]
    fn blend_is_straight_alpha() {
        let b = alpha_blend();
        assert_eq!(b.color.src_factor, wgpu::BlendFactor::SrcAlpha);
        assert_eq!(b.alpha.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
    }
}
