use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use dod_engine::assets::ImageData;
use dod_engine::coords::ColorRgba;
use dod_engine::core::{App, AppControl, FrameCtx, InitCtx};
use dod_engine::render::sprites::{SpriteRenderer, SpriteRendererConfig, WgslSpriteShader};
use dod_engine::sprite::{run_frame, FrameStats, Game, SpriteBuffer};
use dod_engine::time::FrameTime;

use crate::config::PlaygroundConfig;

const STATS_INTERVAL: Duration = Duration::from_secs(1);

/// Drives a [`Game`] through the sprite renderer.
pub struct Playground<G: Game> {
    game: G,
    texture_path: PathBuf,
    renderer: SpriteRendererConfig,
    clear_color: ColorRgba,
}

impl<G: Game> Playground<G> {
    pub fn new(game: G, config: &PlaygroundConfig) -> Self {
        Self {
            game,
            texture_path: config.texture_path.clone(),
            renderer: config.renderer.clone(),
            clear_color: config.clear_color,
        }
    }
}

/// Run state created in `init` and released in `cleanup`.
pub struct PlaygroundState {
    renderer: SpriteRenderer,
    sprites: SpriteBuffer,
    stats: StatsLog,
}

impl<G: Game> App for Playground<G> {
    type State = PlaygroundState;

    fn init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<PlaygroundState> {
        let texture = ImageData::from_file(&self.texture_path)
            .with_context(|| format!("failed to load {}", self.texture_path.display()))?;

        let rctx = ctx.render_ctx();
        let renderer = SpriteRenderer::new(&rctx, &self.renderer, &texture, &WgslSpriteShader)
            .context("failed to create sprite renderer")?;
        let sprites = SpriteBuffer::with_capacity(renderer.capacity());

        self.game.initialize();

        Ok(PlaygroundState {
            renderer,
            sprites,
            stats: StatsLog::default(),
        })
    }

    fn frame(&mut self, state: &mut PlaygroundState, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let time = ctx.time;
        let aspect = ctx.window.viewport().aspect();

        let game = &mut self.game;
        let renderer = &state.renderer;
        let sprites = &mut state.sprites;
        let mut stats = None;

        let control = ctx.render(self.clear_color, |rctx, target| {
            let mut pass = renderer.begin_pass(rctx, target);
            stats = Some(run_frame(game, sprites, &time, aspect, &mut pass));
        });

        if let Some(stats) = stats {
            state.stats.record(&time, stats);
        }

        control
    }

    fn cleanup(&mut self, state: PlaygroundState) {
        self.game.destroy();
        drop(state);
        log::info!("playground resources released");
    }
}

/// Per-second frame summary at debug level.
#[derive(Debug, Default)]
struct StatsLog {
    window_start: Option<Instant>,
    frames: u32,
    sprites: usize,
    bytes: usize,
}

impl StatsLog {
    /// Accumulates one frame; returns `(fps, avg sprites)` when an interval closes.
    fn record(&mut self, time: &FrameTime, stats: FrameStats) -> Option<(f64, usize)> {
        let start = *self.window_start.get_or_insert(time.now);

        self.frames += 1;
        self.sprites += stats.sprite_count;
        self.bytes += stats.uploaded_bytes;

        let span = time.now.saturating_duration_since(start);
        if span < STATS_INTERVAL {
            return None;
        }

        let fps = f64::from(self.frames) / span.as_secs_f64();
        let avg = self.sprites / self.frames as usize;
        log::debug!(
            "{fps:.1} fps, {avg} sprites/frame, {} KiB uploaded",
            self.bytes / 1024
        );

        *self = StatsLog {
            window_start: Some(time.now),
            ..StatsLog::default()
        };
        Some((fps, avg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, millis: u64) -> FrameTime {
        FrameTime {
            dt: 0.0,
            elapsed: millis as f64 / 1000.0,
            now: start + Duration::from_millis(millis),
            frame_index: 0,
        }
    }

    fn frame(sprites: usize) -> FrameStats {
        FrameStats {
            sprite_count: sprites,
            uploaded_bytes: sprites * 28,
            draw_calls: u32::from(sprites > 0),
        }
    }

    #[test]
    fn stats_summarize_once_per_interval() {
        let start = Instant::now();
        let mut log = StatsLog::default();

        assert_eq!(log.record(&at(start, 0), frame(10)), None);
        assert_eq!(log.record(&at(start, 500), frame(20)), None);

        let (fps, avg) = log.record(&at(start, 1000), frame(30)).unwrap();
        assert!((fps - 3.0).abs() < 1e-9);
        assert_eq!(avg, 20);

        // Next window starts at the closing frame.
        assert_eq!(log.record(&at(start, 1500), frame(0)), None);
        assert_eq!(log.frames, 1);
    }
}
