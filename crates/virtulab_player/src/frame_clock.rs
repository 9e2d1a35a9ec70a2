// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame clock driving sequencer playback.
//!
//! The clock is the sole progress driver for interpolation: every rendered
//! frame produces one `dt`, and nothing advances between frames.

use std::time::{Duration, Instant};

/// Nominal frame interval for the headless render loop (~60 fps)
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Per-frame delta-time source
pub struct FrameClock {
    last: Instant,
    /// Playback speed multiplier (1.0 = normal speed)
    pub time_scale: f32,
    /// Frames ticked since creation
    pub frame_count: u64,
    /// Scaled time elapsed since creation
    pub elapsed_time: f64,
}

impl FrameClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            time_scale: 1.0,
            frame_count: 0,
            elapsed_time: 0.0,
        }
    }

    /// Tick against the wall clock, returning the scaled frame delta
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Tick against an explicit instant
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.last).as_secs_f32() * self.time_scale;
        self.last = now;
        self.frame_count += 1;
        self.elapsed_time += f64::from(dt);
        dt
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
    fn test_tick_measures_frame_delta() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.last = start;
        let dt = clock.tick_at(start + Duration::from_millis(32));
        assert!((dt - 0.032).abs() < 1e-4);
        assert_eq!(clock.frame_count, 1);
    }

    #[test]
    fn test_time_scale_stretches_delta() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.last = start;
        clock.time_scale = 2.0;
        let dt = clock.tick_at(start + Duration::from_millis(100));
        assert!((dt - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_past_instant_yields_zero() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.last = start + Duration::from_millis(50);
        let dt = clock.tick_at(start);
        assert_eq!(dt, 0.0);
    }
}
