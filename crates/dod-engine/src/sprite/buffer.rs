use super::{Game, SpriteData};

/// Fixed-capacity sprite array filled by a [`Game`] once per frame.
///
/// Allocated once; capacity never changes. `count` is the length of the prefix
/// written by the last update and is always `<= capacity`.
#[derive(Debug)]
pub struct SpriteBuffer {
    sprites: Box<[SpriteData]>,
    count: usize,
}

impl SpriteBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sprites: vec![SpriteData::default(); capacity].into_boxed_slice(),
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.sprites.len()
    }

    /// Number of valid sprites from the last update.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Lets `game` overwrite the buffer and records the returned count.
    ///
    /// # Panics
    ///
    /// If the game reports more sprites than the buffer holds.
    pub fn update<G: Game + ?Sized>(&mut self, game: &mut G, elapsed: f64, dt: f32) -> usize {
        let count = game.update(&mut self.sprites, elapsed, dt);
        assert!(
            count <= self.sprites.len(),
            "Game::update returned {count} sprites; capacity is {}",
            self.sprites.len()
        );
        self.count = count;
        count
    }

    /// The sprites written by the last update.
    #[inline]
    pub fn active(&self) -> &[SpriteData] {
        &self.sprites[..self.count]
    }

    /// Raw bytes of [`active`](Self::active), ready for a buffer upload.
    #[inline]
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl Game for Fixed {
        fn update(&mut self, sprites: &mut [SpriteData], _: f64, _: f32) -> usize {
            for (i, s) in sprites.iter_mut().take(self.0).enumerate() {
                s.x = i as f32;
            }
            self.0
        }
    }

    #[test]
    fn starts_empty_at_full_capacity() {
        let buf = SpriteBuffer::with_capacity(16);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.count(), 0);
        assert!(buf.active().is_empty());
        assert!(buf.instance_bytes().is_empty());
    }

    #[test]
    fn update_exposes_written_prefix() {
        let mut buf = SpriteBuffer::with_capacity(8);
        assert_eq!(buf.update(&mut Fixed(3), 0.0, 0.0), 3);
        let xs: Vec<f32> = buf.active().iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
        assert_eq!(buf.instance_bytes().len(), 3 * std::mem::size_of::<SpriteData>());
    }

    #[test]
    fn count_tracks_latest_update_only() {
        let mut buf = SpriteBuffer::with_capacity(8);
        buf.update(&mut Fixed(8), 0.0, 0.0);
        buf.update(&mut Fixed(2), 0.1, 0.1);
        assert_eq!(buf.count(), 2);
        assert_eq!(buf.active().len(), 2);
    }

    #[test]
    fn full_capacity_is_allowed() {
        let mut buf = SpriteBuffer::with_capacity(4);
        assert_eq!(buf.update(&mut Fixed(4), 0.0, 0.0), 4);
    }

    #[test]
    #[should_panic(expected = "capacity is 4")]
    fn overflowing_count_is_fatal() {
        let mut buf = SpriteBuffer::with_capacity(4);
        buf.update(&mut Fixed(5), 0.0, 0.0);
    }

    #[test]
    fn zero_capacity_buffer_accepts_zero() {
        let mut buf = SpriteBuffer::with_capacity(0);
        assert_eq!(buf.update(&mut Fixed(0), 1.0, 1.0), 0);
    }
}
