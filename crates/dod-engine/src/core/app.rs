use winit::event::WindowEvent;

use super::ctx::{FrameCtx, InitCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime calls `init` once the window and GPU exist, `frame` once per
/// redraw, and `cleanup` exactly once on shutdown. Everything the app creates
/// during `init` lives in `State`, which the runtime owns between callbacks;
/// if `init` fails there is no state and `cleanup` is never called.
pub trait App {
    /// Per-run resources created in `init` and consumed by `cleanup`.
    type State;

    /// Creates GPU resources and any other run state.
    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> anyhow::Result<Self::State>;

    /// Called for window events.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per rendered frame.
    fn frame(&mut self, state: &mut Self::State, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Releases run state.
    fn cleanup(&mut self, state: Self::State);
}
