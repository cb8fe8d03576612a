use winit::dpi::PhysicalSize;

/// Depth attachment format shared by every pipeline drawing into the frame.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Offscreen attachments that track the surface size.
///
/// With `sample_count > 1` rendering goes to `msaa` and is resolved into the
/// surface texture; the depth buffer always matches the color sample count.
pub(crate) struct RenderTargets {
    pub(crate) msaa: Option<wgpu::TextureView>,
    pub(crate) depth: wgpu::TextureView,
    pub(crate) sample_count: u32,
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        size: PhysicalSize<u32>,
        sample_count: u32,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        };

        let msaa = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("dod msaa color"),
                    size: extent,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        let depth = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("dod depth"),
                size: extent,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default());

        log::debug!(
            "render targets {}x{} ({}x msaa)",
            extent.width,
            extent.height,
            sample_count
        );

        Self {
            msaa,
            depth,
            sample_count,
        }
    }
}
