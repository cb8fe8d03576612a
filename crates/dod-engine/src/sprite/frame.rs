use crate::time::FrameTime;

use super::{Game, SpriteBuffer, SpriteData};

/// Indices per sprite quad (two triangles).
pub const QUAD_INDEX_COUNT: u32 = 6;

/// GPU-side operations a sprite frame needs, in the order they are issued.
///
/// Implemented by the wgpu sprite pass; tests substitute a recorder.
pub trait SpriteCommands {
    /// Sets the per-frame viewport aspect ratio (width / height).
    fn set_aspect(&mut self, aspect: f32);

    /// Replaces the start of the instance buffer with `bytes`.
    fn upload_instances(&mut self, bytes: &[u8]);

    /// Draws `instance_count` quads from the instance buffer.
    fn draw_instanced(&mut self, index_count: u32, instance_count: u32);
}

/// What one frame did, for logging and tests.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameStats {
    pub sprite_count: usize,
    pub uploaded_bytes: usize,
    pub draw_calls: u32,
}

/// Runs one frame: game update, instance upload, and the instanced draw.
///
/// The upload is exactly `count * size_of::<SpriteData>()` bytes. No draw is
/// issued when the game produced no sprites.
pub fn run_frame<G, C>(
    game: &mut G,
    sprites: &mut SpriteBuffer,
    time: &FrameTime,
    aspect: f32,
    commands: &mut C,
) -> FrameStats
where
    G: Game + ?Sized,
    C: SpriteCommands + ?Sized,
{
    let count = sprites.update(game, time.elapsed, time.dt);

    commands.set_aspect(aspect);

    let bytes = sprites.instance_bytes();
    debug_assert_eq!(bytes.len(), count * std::mem::size_of::<SpriteData>());
    commands.upload_instances(bytes);

    let mut draw_calls = 0;
    if count > 0 {
        commands.draw_instanced(QUAD_INDEX_COUNT, count as u32);
        draw_calls = 1;
    }

    let stats = FrameStats {
        sprite_count: count,
        uploaded_bytes: bytes.len(),
        draw_calls,
    };
    log::trace!("frame {}: {stats:?}", time.frame_index);
    stats
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::coords::ColorRgba;

    #[derive(Debug, PartialEq)]
    enum Cmd {
        Aspect(f32),
        Upload(usize),
        Draw { index_count: u32, instance_count: u32 },
    }

    #[derive(Default)]
    struct Recorder {
        cmds: Vec<Cmd>,
        last_upload: Vec<u8>,
    }

    impl SpriteCommands for Recorder {
        fn set_aspect(&mut self, aspect: f32) {
            self.cmds.push(Cmd::Aspect(aspect));
        }

        fn upload_instances(&mut self, bytes: &[u8]) {
            self.last_upload = bytes.to_vec();
            self.cmds.push(Cmd::Upload(bytes.len()));
        }

        fn draw_instanced(&mut self, index_count: u32, instance_count: u32) {
            self.cmds.push(Cmd::Draw { index_count, instance_count });
        }
    }

    /// Always one white sprite at the origin.
    struct SingleSprite;

    impl Game for SingleSprite {
        fn update(&mut self, sprites: &mut [SpriteData], _: f64, _: f32) -> usize {
            sprites[0] = SpriteData::new(0.0, 0.0, 0.1, ColorRgba::white());
            1
        }
    }

    /// Writes `n` sprites and records the times it was given.
    struct Counted {
        n: usize,
        seen: Vec<(f64, f32)>,
    }

    impl Game for Counted {
        fn update(&mut self, sprites: &mut [SpriteData], elapsed: f64, dt: f32) -> usize {
            self.seen.push((elapsed, dt));
            for s in &mut sprites[..self.n] {
                *s = SpriteData::new(0.5, -0.5, 0.05, ColorRgba::gray(0.5));
            }
            self.n
        }
    }

    fn time(elapsed: f64, dt: f32) -> FrameTime {
        FrameTime { dt, elapsed, now: Instant::now(), frame_index: 0 }
    }

    #[test]
    fn single_sprite_end_to_end() {
        let mut sprites = SpriteBuffer::with_capacity(64);
        let mut rec = Recorder::default();

        let stats = run_frame(&mut SingleSprite, &mut sprites, &time(0.0, 0.0), 4.0 / 3.0, &mut rec);

        let size = std::mem::size_of::<SpriteData>();
        assert_eq!(
            rec.cmds,
            vec![
                Cmd::Aspect(4.0 / 3.0),
                Cmd::Upload(size),
                Cmd::Draw { index_count: 6, instance_count: 1 },
            ]
        );
        assert_eq!(stats, FrameStats { sprite_count: 1, uploaded_bytes: size, draw_calls: 1 });

        let uploaded: SpriteData = bytemuck::pod_read_unaligned(&rec.last_upload);
        assert_eq!(uploaded, SpriteData::new(0.0, 0.0, 0.1, ColorRgba::white()));
    }

    #[test]
    fn zero_sprites_skip_the_draw() {
        let mut sprites = SpriteBuffer::with_capacity(64);
        let mut rec = Recorder::default();
        let mut game = Counted { n: 0, seen: Vec::new() };

        let stats = run_frame(&mut game, &mut sprites, &time(1.0, 0.016), 1.0, &mut rec);

        assert_eq!(rec.cmds, vec![Cmd::Aspect(1.0), Cmd::Upload(0)]);
        assert_eq!(stats.draw_calls, 0);
        assert_eq!(stats.uploaded_bytes, 0);
    }

    #[test]
    fn upload_size_is_exact_for_every_count() {
        let cap = 32;
        let size = std::mem::size_of::<SpriteData>();
        let mut sprites = SpriteBuffer::with_capacity(cap);

        for n in [0, 1, 2, 17, cap - 1, cap] {
            let mut rec = Recorder::default();
            let mut game = Counted { n, seen: Vec::new() };
            let stats = run_frame(&mut game, &mut sprites, &time(0.5, 0.01), 1.0, &mut rec);

            assert_eq!(rec.last_upload.len(), n * size, "count {n}");
            assert_eq!(stats.uploaded_bytes, n * size);
            let draws: Vec<_> = rec.cmds.iter().filter(|c| matches!(c, Cmd::Draw { .. })).collect();
            if n == 0 {
                assert!(draws.is_empty());
            } else {
                assert_eq!(draws, vec![&Cmd::Draw { index_count: 6, instance_count: n as u32 }]);
            }
        }
    }

    #[test]
    fn game_receives_frame_times() {
        let mut sprites = SpriteBuffer::with_capacity(4);
        let mut rec = Recorder::default();
        let mut game = Counted { n: 1, seen: Vec::new() };

        run_frame(&mut game, &mut sprites, &time(12.5, 0.02), 1.0, &mut rec);
        run_frame(&mut game, &mut sprites, &time(12.52, 0.0), 1.0, &mut rec);

        assert_eq!(game.seen, vec![(12.5, 0.02), (12.52, 0.0)]);
    }

    #[test]
    #[should_panic(expected = "capacity is 2")]
    fn game_overrunning_capacity_aborts() {
        struct Liar;
        impl Game for Liar {
            fn update(&mut self, _: &mut [SpriteData], _: f64, _: f32) -> usize {
                3
            }
        }

        let mut sprites = SpriteBuffer::with_capacity(2);
        run_frame(&mut Liar, &mut sprites, &time(0.0, 0.0), 1.0, &mut Recorder::default());
    }
}
