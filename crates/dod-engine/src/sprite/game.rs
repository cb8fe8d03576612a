use super::SpriteData;

/// Game-logic collaborator that produces sprites each frame.
pub trait Game {
    /// Called once, after all GPU resources exist.
    fn initialize(&mut self) {}

    /// Writes this frame's sprites into `sprites` starting at index 0 and
    /// returns how many were written.
    ///
    /// `sprites` always spans the full buffer capacity. `elapsed` is seconds
    /// since startup, `dt` seconds since the previous frame. Returning more than
    /// `sprites.len()` is a contract violation and aborts the frame loop.
    fn update(&mut self, sprites: &mut [SpriteData], elapsed: f64, dt: f32) -> usize;

    /// Called once at shutdown.
    fn destroy(&mut self) {}
}
