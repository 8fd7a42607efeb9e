//! Quadratic ease-out tween for camera distance.

/// Quadratic ease-out: fast start, gentle landing.
fn ease_out_quad(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv
}

/// Animates a scalar from `start` to `target` over `duration` seconds.
#[derive(Debug, Clone, Copy)]
pub struct ZoomTween {
    start: f32,
    target: f32,
    duration: f32,
    elapsed: f32,
}

impl ZoomTween {
    /// Create a tween. A non-positive duration completes on the first step.
    pub fn new(start: f32, target: f32, duration: f32) -> Self {
        Self {
            start,
            target,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// The value the tween is heading to.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Advance by `dt` seconds and return the current value.
    pub fn step(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        self.value()
    }

    /// Current value without advancing.
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.target;
        }
        let t = self.elapsed / self.duration;
        self.start + (self.target - self.start) * ease_out_quad(t)
    }

    /// Whether the tween has reached its target.
    pub fn is_finished(&self) -> bool {
        self.duration <= 0.0 || self.elapsed >= self.duration
    }
}
