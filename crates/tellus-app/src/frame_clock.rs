//! Fixed-timestep update clock.
//!
//! Rendering runs at whatever rate the compositor grants; control updates
//! (damping, auto-rotate, tweens) run at a fixed 60 Hz through an
//! accumulator so their feel does not change with the display's refresh
//! rate.

use std::time::Instant;
use tracing::warn;

/// Fixed update timestep: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Frame time clamp. A frame longer than this (debugger pause, window drag
/// on some platforms) is truncated instead of replayed as a burst of
/// catch-up updates.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Accumulator-based fixed-timestep clock.
pub struct FrameClock {
    previous_time: Instant,
    accumulator: f64,
    frame_count: u64,
    update_count: u64,
}

impl FrameClock {
    /// Create a clock starting from the current instant.
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Run one frame: measures elapsed wall time and invokes `update` zero
    /// or more times with [`FIXED_DT`] in seconds.
    pub fn tick(&mut self, update: impl FnMut(f32)) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;

        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.0}ms exceeds maximum, clamping to {:.0}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
        }
        self.advance(frame_time, update);
    }

    /// Core stepping logic, separated from wall-clock measurement so tests
    /// can drive it with explicit frame times.
    fn advance(&mut self, frame_time: f64, mut update: impl FnMut(f32)) {
        self.accumulator += frame_time.min(MAX_FRAME_TIME);

        while self.accumulator >= FIXED_DT {
            update(FIXED_DT as f32);
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }
        self.frame_count += 1;
    }

    /// Total frames ticked.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Total fixed updates executed.
    pub fn update_count(&self) -> u64 {
        self.update_count
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

    fn clock() -> FrameClock {
        FrameClock {
            previous_time: Instant::now(),
            accumulator: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    #[test]
    fn test_exact_step_runs_one_update() {
        let mut clock = clock();
        let mut updates = 0u32;
        clock.advance(FIXED_DT, |_| updates += 1);
        assert_eq!(updates, 1);
        assert!(clock.accumulator.abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_runs_multiple_updates() {
        let mut clock = clock();
        let mut updates = 0u32;
        clock.advance(3.0 * FIXED_DT, |_| updates += 1);
        assert_eq!(updates, 3);
    }

    #[test]
    fn test_short_frame_accumulates() {
        let mut clock = clock();
        let mut updates = 0u32;
        clock.advance(0.5 * FIXED_DT, |_| updates += 1);
        assert_eq!(updates, 0);
        clock.advance(0.5 * FIXED_DT, |_| updates += 1);
        assert_eq!(updates, 1);
    }

    #[test]
    fn test_huge_frame_clamped() {
        let mut clock = clock();
        let mut updates = 0u32;
        clock.advance(5.0, |_| updates += 1);
        let max_updates = (MAX_FRAME_TIME / FIXED_DT).ceil() as u32;
        assert!(
            updates <= max_updates,
            "Expected at most {max_updates} updates, got {updates}"
        );
        assert!(updates > 0);
    }

    #[test]
    fn test_update_receives_fixed_dt() {
        let mut clock = clock();
        clock.advance(FIXED_DT * 2.0, |dt| {
            assert!((dt - FIXED_DT as f32).abs() < 1e-9);
        });
    }

    #[test]
    fn test_counters_advance() {
        let mut clock = clock();
        for _ in 0..10 {
            clock.advance(FIXED_DT, |_| {});
        }
        assert_eq!(clock.frame_count(), 10);
        assert_eq!(clock.update_count(), 10);
    }
}
