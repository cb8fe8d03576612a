use winit::window::{Window, WindowId};

use crate::coords::{ColorRgba, Viewport};
use crate::device::{Gpu, SurfaceErrorAction, DEPTH_FORMAT};
use crate::render::{RenderCtx, RenderTarget};
use crate::time::FrameTime;

use super::app::AppControl;

/// Window handle and immutable window metadata.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl<'a> WindowCtx<'a> {
    /// Returns the logical window size as `(width, height)` in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let phys  = self.window.inner_size();
        let scale = self.window.scale_factor();
        let logi: winit::dpi::LogicalSize<f64> = phys.to_logical(scale);
        (logi.width as f32, logi.height as f32)
    }

    /// Returns the logical window size as a [`Viewport`].
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.logical_size();
        Viewport::new(w, h)
    }
}

fn render_ctx<'a>(gpu: &'a Gpu<'_>) -> RenderCtx<'a> {
    RenderCtx::new(
        gpu.device(),
        gpu.queue(),
        gpu.surface_format(),
        DEPTH_FORMAT,
        gpu.sample_count(),
    )
}

/// Context passed to `core::App::init`.
pub struct InitCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu:    &'a Gpu<'w>,
}

impl<'a, 'w> InitCtx<'a, 'w> {
    /// Device/queue/format bundle for creating renderer resources.
    pub fn render_ctx(&self) -> RenderCtx<'_> {
        render_ctx(self.gpu)
    }
}

/// Per-frame context passed to `core::App::frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: WindowCtx<'a>,
    pub gpu:    &'a mut Gpu<'w>,
    pub time:   FrameTime,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Clears color and depth, calls `draw` with a ready [`RenderCtx`] and
    /// [`RenderTarget`], then presents the frame.
    ///
    /// Surface errors are absorbed here: the frame is skipped and only a fatal
    /// error turns into [`AppControl::Exit`].
    pub fn render<F>(&mut self, clear: ColorRgba, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let viewport = self.window.viewport();
        if !viewport.is_valid() {
            // Minimized; nothing to present into.
            return AppControl::Continue;
        }

        let mut frame = match self.gpu.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("surface error: {err}");
                let action = self.gpu.handle_surface_error(err);
                if action == SurfaceErrorAction::Fatal {
                    return AppControl::Exit;
                }
                return AppControl::Continue;
            }
        };

        let (color_view, resolve_view) = match frame.msaa_view {
            Some(msaa) => (msaa, Some(&frame.view)),
            None => (&frame.view, None),
        };

        {
            let mut target =
                RenderTarget::new(&mut frame.encoder, color_view, resolve_view, frame.depth_view);

            // Clear pass; dropped before the target is handed to `draw`.
            {
                let color = target.color_attachment(wgpu::LoadOp::Clear(clear.into()));
                let depth = target.depth_attachment(wgpu::LoadOp::Clear(1.0));
                let _rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label:                    Some("dod clear"),
                    color_attachments:        &[Some(color)],
                    depth_stencil_attachment: Some(depth),
                    timestamp_writes:         None,
                    occlusion_query_set:      None,
                    multiview_mask:           None,
                });
            }

            let rctx = render_ctx(self.gpu);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);

        AppControl::Continue
    }
}
