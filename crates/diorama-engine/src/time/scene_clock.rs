use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall-clock samples are reduced modulo this value (ms) to keep scene time small
/// enough for `f32` phase math.
pub const SCENE_TIME_MODULUS_MS: u64 = 1_000_000;

/// Scene timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneTime {
    /// Wrapping scene time in seconds, in `[0, 1000)`.
    pub time: f32,

    /// Seconds elapsed since the previous tick. Never negative.
    pub delta: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Scene clock producing `SceneTime` snapshots.
///
/// Scene time is the wall clock (ms since the Unix epoch) reduced modulo
/// [`SCENE_TIME_MODULUS_MS`] and expressed in seconds. The previous sample starts
/// at zero, so the first delta is the full scene time unless clamped.
///
/// Wraparound: when a sample lands below the previous one (modulus rollover, or the
/// wall clock stepping backwards) the baseline is resynchronized and the frame
/// reports a zero delta.
///
/// Delta time is clamped to `dt_max` so that the first frame and long stalls do not
/// launch particles across the scene.
#[derive(Debug, Clone)]
pub struct SceneClock {
    previous: f32,
    frame_index: u64,
    dt_max: Option<f32>,
}

impl SceneClock {
    /// Creates a new clock with the default 0.25 s upper clamp.
    pub fn new() -> Self {
        Self::with_max_delta(Duration::from_millis(250))
    }

    /// Creates a clock with a custom upper clamp on delta time.
    pub fn with_max_delta(dt_max: Duration) -> Self {
        Self {
            previous: 0.0,
            frame_index: 0,
            dt_max: Some(dt_max.as_secs_f32()),
        }
    }

    /// Creates a clock that reports raw deltas (wrap policy still applies).
    pub fn unclamped() -> Self {
        Self {
            previous: 0.0,
            frame_index: 0,
            dt_max: None,
        }
    }

    /// Last scene time observed, in seconds.
    pub fn previous(&self) -> f32 {
        self.previous
    }

    /// Samples the wall clock and advances.
    pub fn tick(&mut self) -> SceneTime {
        let ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_else(|err| {
                log::warn!("system clock is before the Unix epoch: {err}");
                0
            });
        self.on_sample(ms)
    }

    /// Advances the clock using a wall-clock sample in milliseconds.
    pub fn on_sample(&mut self, wall_clock_ms: u64) -> SceneTime {
        let current = (wall_clock_ms % SCENE_TIME_MODULUS_MS) as f32 / 1000.0;

        let mut delta = current - self.previous;
        if delta < 0.0 {
            log::debug!(
                "scene clock wrapped ({:.3}s -> {:.3}s); resynchronizing",
                self.previous,
                current
            );
            delta = 0.0;
        }
        if let Some(max) = self.dt_max {
            delta = delta.min(max);
        }

        self.previous = current;

        let st = SceneTime {
            time: current,
            delta,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        st
    }
}

impl Default for SceneClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn first_sample_measures_from_zero() {
        let mut clock = SceneClock::unclamped();
        let st = clock.on_sample(1_500);
        assert!((st.time - 1.5).abs() < EPS);
        assert!((st.delta - 1.5).abs() < EPS);
        assert_eq!(st.frame_index, 0);
    }

    #[test]
    fn first_sample_is_clamped_by_default() {
        let mut clock = SceneClock::new();
        let st = clock.on_sample(123_456);
        assert!((st.delta - 0.25).abs() < EPS);
    }

    #[test]
    fn sample_is_reduced_modulo() {
        let mut clock = SceneClock::unclamped();
        let st = clock.on_sample(1_700_000_002_500);
        assert!((st.time - 2.5).abs() < EPS);
    }

    #[test]
    fn consecutive_samples_produce_delta() {
        let mut clock = SceneClock::unclamped();
        clock.on_sample(10_000);
        let st = clock.on_sample(10_016);
        assert!((st.delta - 0.016).abs() < EPS);
        assert_eq!(st.frame_index, 1);
    }

    #[test]
    fn wraparound_reports_zero_delta_and_resyncs() {
        let mut clock = SceneClock::unclamped();
        clock.on_sample(SCENE_TIME_MODULUS_MS - 10);
        let wrapped = clock.on_sample(SCENE_TIME_MODULUS_MS + 6);
        assert_eq!(wrapped.delta, 0.0);
        assert!((wrapped.time - 0.006).abs() < EPS);

        // Baseline follows the wrapped sample.
        let next = clock.on_sample(SCENE_TIME_MODULUS_MS + 22);
        assert!((next.delta - 0.016).abs() < EPS);
    }

    #[test]
    fn backwards_wall_clock_never_goes_negative() {
        let mut clock = SceneClock::new();
        clock.on_sample(50_000);
        let st = clock.on_sample(49_000);
        assert_eq!(st.delta, 0.0);
        assert!((clock.previous() - 49.0).abs() < EPS);
    }

    #[test]
    fn stall_is_clamped() {
        let mut clock = SceneClock::with_max_delta(Duration::from_millis(100));
        clock.on_sample(1_000);
        let st = clock.on_sample(5_000);
        assert!((st.delta - 0.1).abs() < EPS);
    }
}
