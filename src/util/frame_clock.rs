//! Wall-clock frame delta for the update tick, with a smoothed FPS readout.

use web_time::Instant;

/// Longest delta one tick will integrate, in seconds. A host resuming after
/// a long stall (backgrounded tab, debugger pause) must not fast-forward the
/// entrance animation or platform rings in a single step.
pub const MAX_FRAME_DT: f32 = 0.1;

/// Measures the elapsed time between frames and keeps an exponential moving
/// average of the frame rate.
pub struct FrameClock {
    last_frame: Instant,
    smoothed_fps: f32,
}

impl FrameClock {
    /// Clock starting now, with the FPS estimate seeded at 60.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
        }
    }

    /// End the current frame. Returns the elapsed time in seconds, clamped
    /// to [`MAX_FRAME_DT`], suitable as the `dt` for the update tick. The
    /// FPS average is fed the unclamped elapsed time.
    pub fn end_frame(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if elapsed > 0.0 {
            // 5% new sample, 95% history, so the readout does not flicker.
            self.smoothed_fps =
                self.smoothed_fps * 0.95 + (1.0 / elapsed) * 0.05;
        }
        elapsed.min(MAX_FRAME_DT)
    }

    /// Smoothed frames-per-second estimate.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
