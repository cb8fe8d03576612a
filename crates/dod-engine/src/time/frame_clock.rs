use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Wall-clock seconds since the clock was created.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped from above to avoid pathological values when the
/// application is paused by the debugger, minimized, or stalls. There is no
/// lower clamp: two ticks inside the timer resolution yield `dt == 0.0`.
///
/// `elapsed` is never clamped and always reflects real time since creation.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Default upper bound for a single frame delta.
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    /// Creates a new clock with default clamps.
    pub fn new() -> Self {
        Self::with_clamps(Duration::ZERO, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock to an explicit instant.
    ///
    /// Instants earlier than the previous tick produce `dt == dt_min`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = self.last.max(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn first_tick_measures_from_creation() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        let ft = clock.tick_at(t0 + ms(16));
        assert!((ft.dt - 0.016).abs() < 1e-6);
        assert!((ft.elapsed - 0.016).abs() < 1e-9);
        assert_eq!(ft.frame_index, 0);
    }

    #[test]
    fn elapsed_accumulates_and_frame_index_increments() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        clock.tick_at(t0 + ms(10));
        let ft = clock.tick_at(t0 + ms(30));
        assert!((ft.dt - 0.020).abs() < 1e-6);
        assert!((ft.elapsed - 0.030).abs() < 1e-9);
        assert_eq!(ft.frame_index, 1);
    }

    #[test]
    fn long_stall_clamps_dt_but_not_elapsed() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        let ft = clock.tick_at(t0 + Duration::from_secs(5));
        assert!((ft.dt - 0.25).abs() < 1e-6);
        assert!((ft.elapsed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_instant_yields_zero_dt() {
        let mut clock = FrameClock::new();
        let t0 = clock.start;
        clock.tick_at(t0 + ms(5));
        let ft = clock.tick_at(t0 + ms(5));
        assert_eq!(ft.dt, 0.0);
    }

    #[test]
    fn custom_minimum_applies() {
        let mut clock = FrameClock::with_clamps(ms(1), ms(100));
        let t0 = clock.start;
        let ft = clock.tick_at(t0);
        assert!((ft.dt - 0.001).abs() < 1e-6);
    }
}
