use std::time::{Duration, Instant};

/// Longest step a single frame may report. Longer stalls (a debugger pause,
/// a window drag) are clamped to this.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

/// Wall-clock frame timer feeding [`Application::run_frame`](crate::Application::run_frame).
#[derive(Debug, Clone)]
pub struct Timer {
    started: Instant,
    previous: Instant,
    delta: Duration,
    frames: u64,
    pub max_delta: Duration,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            previous: now,
            delta: Duration::ZERO,
            frames: 0,
            max_delta: DEFAULT_MAX_DELTA,
        }
    }

    /// Closes the current frame and returns its clamped length in seconds.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.previous).min(self.max_delta);
        self.previous = now;
        self.frames += 1;
        self.delta.as_secs_f32()
    }

    /// Clamped length of the last frame.
    #[inline]
    #[must_use]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    /// Unclamped wall time since the timer was created.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
