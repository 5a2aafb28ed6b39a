//! Frame cost measurement.
//!
//! Tracks a smoothed per-frame cost and counts frames whose camera work
//! ran over budget.

use web_time::{Duration, Instant};

/// Measures how long the camera work of each frame takes and flags frames
/// that exceed their budget.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Budget for one frame's camera work.
    budget: Duration,
    /// Start of the frame being measured.
    started: Option<Instant>,
    /// Exponential moving average of frame cost in milliseconds.
    smoothed_ms: f32,
    /// Weight of the newest sample (0.0-1.0).
    smoothing: f32,
    over_budget: u64,
    frames: u64,
}

impl FrameTiming {
    /// Create a timer with a per-frame budget.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            started: None,
            smoothed_ms: 0.0,
            smoothing: 0.05,
            over_budget: 0,
            frames: 0,
        }
    }

    /// Mark the start of a frame.
    pub fn begin(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Mark the end of a frame and return its cost. Logs a warning when
    /// the frame went over budget. Returns `None` without a matching
    /// [`FrameTiming::begin`].
    pub fn end(&mut self) -> Option<Duration> {
        let cost = self.started.take()?.elapsed();
        self.record(cost);
        Some(cost)
    }

    fn record(&mut self, cost: Duration) {
        let ms = cost.as_secs_f32() * 1000.0;
        self.smoothed_ms = if self.frames == 0 {
            ms
        } else {
            self.smoothed_ms * (1.0 - self.smoothing) + ms * self.smoothing
        };
        self.frames += 1;
        if cost > self.budget {
            self.over_budget += 1;
            log::warn!(
                "frame {} camera work took {ms:.3} ms (budget {:.3} ms)",
                self.frames,
                self.budget.as_secs_f32() * 1000.0
            );
        }
    }

    /// Smoothed frame cost in milliseconds.
    #[must_use]
    pub fn average_ms(&self) -> f32 {
        self.smoothed_ms
    }

    /// Frames measured so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Frames that exceeded the budget.
    #[must_use]
    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }
}
