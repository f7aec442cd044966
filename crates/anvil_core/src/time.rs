//! Frame timing
//!
//! Fixed 60Hz frame step used by the runtime loop and sprite animation

use std::time::Duration;

/// Target frame rate (60 Hz = 16.666ms per frame)
pub const FRAME_RATE_HZ: u32 = 60;
pub const FRAME_DURATION: Duration = Duration::from_micros(16_666); // ~16.666ms

/// Frame clock: counts frames and accumulated time
pub struct FrameClock {
    frame_count: u64,
    elapsed: Duration,
    last_delta: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_count: 0,
            elapsed: Duration::ZERO,
            last_delta: Duration::ZERO,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advance by one fixed frame.
    pub fn advance_frame(&mut self) {
        self.advance(FRAME_DURATION);
    }

    /// Advance by an arbitrary delta (variable-rate loops).
    pub fn advance(&mut self, delta: Duration) {
        self.frame_count += 1;
        self.elapsed += delta;
        self.last_delta = delta;
    }

    /// Delta of the most recent frame in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.last_delta.as_secs_f32()
    }

    pub fn total_time(&self) -> Duration {
        self.elapsed
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

    #[test]
    fn test_advance_frame() {
        let mut clock = FrameClock::new();
        clock.advance_frame();
        clock.advance_frame();

        assert_eq!(clock.frame_count(), 2);
        assert_eq!(clock.total_time(), FRAME_DURATION * 2);
        assert!((clock.delta_seconds() - 0.016_666).abs() < 1e-6);
    }
}
