//! Orbit camera controller with inertial damping and auto-rotation.

use glam::Vec3;
use tellus_config::ControlsConfig;

use crate::state::ViewState;
use crate::tween::ZoomTween;

/// Radians of yaw/pitch per pixel of drag at rotate speed 1.0.
const DRAG_RADIANS_PER_PIXEL: f32 = 0.005;

/// Pitch limit just short of the poles, where the view basis degenerates.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Spherical camera pose around the globe center plus input integration.
///
/// Drag input feeds angular velocity rather than the pose directly; the
/// velocity decays by the damping factor each fixed step, which gives the
/// orbit its inertial glide after the cursor stops.
#[derive(Debug, Clone)]
pub struct OrbitController {
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_tween: Option<ZoomTween>,
    rotate_speed: f32,
    damping: f32,
    min_distance: f32,
    max_distance: f32,
    auto_rotate_speed: f32,
    zoom_step: f32,
    zoom_duration: f32,
}

impl OrbitController {
    /// Create a controller from config, starting on the +Z axis at
    /// `start_distance` (clamped into the configured band).
    pub fn new(config: &ControlsConfig, start_distance: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: start_distance.clamp(config.min_distance, config.max_distance),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_tween: None,
            rotate_speed: config.rotate_speed,
            damping: config.damping.clamp(0.001, 1.0),
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            auto_rotate_speed: config.auto_rotate_speed,
            zoom_step: config.zoom_step,
            zoom_duration: config.zoom_duration,
        }
    }

    /// Feed a drag delta in pixels. Dragging right orbits the camera left
    /// around the globe, matching the grab-the-globe feel.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        let scale = DRAG_RADIANS_PER_PIXEL * self.rotate_speed;
        self.yaw_velocity -= dx * scale;
        self.pitch_velocity += dy * scale;
    }

    /// Feed a scroll amount in lines; positive zooms in.
    pub fn apply_scroll(&mut self, lines: f32) {
        if lines != 0.0 {
            self.start_zoom(-lines * self.zoom_step);
        }
    }

    /// Start an eased zoom toward the camera by `zoom_step`.
    pub fn zoom_in(&mut self) {
        self.start_zoom(-self.zoom_step);
    }

    /// Start an eased zoom away from the camera by `zoom_step`.
    pub fn zoom_out(&mut self) {
        self.start_zoom(self.zoom_step);
    }

    fn start_zoom(&mut self, delta: f32) {
        // Retarget from the in-flight tween so rapid presses accumulate.
        let from = self.distance;
        let base = self
            .zoom_tween
            .as_ref()
            .map_or(from, |tween| tween.target());
        let target = (base + delta).clamp(self.min_distance, self.max_distance);
        self.zoom_tween = Some(ZoomTween::new(from, target, self.zoom_duration));
    }

    /// Advance one fixed step of `dt` seconds.
    pub fn update(&mut self, dt: f32, view: &ViewState) {
        if view.auto_rotate {
            self.yaw += self.auto_rotate_speed.to_radians() * dt;
        }

        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);

        let decay = 1.0 - self.damping;
        self.yaw_velocity *= decay;
        self.pitch_velocity *= decay;

        if let Some(tween) = &mut self.zoom_tween {
            self.distance = tween
                .step(dt)
                .clamp(self.min_distance, self.max_distance);
            if tween.is_finished() {
                self.zoom_tween = None;
            }
        }
    }

    /// Camera position in world space for the current pose.
    pub fn camera_position(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        )
    }

    /// Current distance from the globe center.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Current yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current pitch angle in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Whether a zoom tween is currently running.
    pub fn is_zooming(&self) -> bool {
        self.zoom_tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn controller() -> OrbitController {
        OrbitController::new(&ControlsConfig::default(), 2.5)
    }

    #[test]
    fn test_initial_pose_on_positive_z() {
        let orbit = controller();
        let pos = orbit.camera_position();
        assert!((pos - Vec3::new(0.0, 0.0, 2.5)).length() < 1e-5);
    }

    #[test]
    fn test_start_distance_clamped_to_band() {
        let orbit = OrbitController::new(&ControlsConfig::default(), 10.0);
        assert_eq!(orbit.distance(), 4.0);
        let orbit = OrbitController::new(&ControlsConfig::default(), 0.5);
        assert_eq!(orbit.distance(), 1.5);
    }

    #[test]
    fn test_auto_rotate_advances_yaw() {
        let mut orbit = controller();
        let view = ViewState::new(true);
        for _ in 0..60 {
            orbit.update(DT, &view);
        }
        // 3 degrees/second for one second.
        assert!(
            (orbit.yaw() - 3.0_f32.to_radians()).abs() < 1e-4,
            "Yaw after 1s = {} rad",
            orbit.yaw()
        );
    }

    #[test]
    fn test_auto_rotate_off_keeps_yaw() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        for _ in 0..60 {
            orbit.update(DT, &view);
        }
        assert_eq!(orbit.yaw(), 0.0);
    }

    #[test]
    fn test_drag_glides_then_settles() {
        let mut orbit = controller();
        let view = ViewState::new(false);

        orbit.apply_drag(100.0, 0.0);
        orbit.update(DT, &view);
        let yaw_after_one = orbit.yaw();
        assert!(yaw_after_one != 0.0);

        // Inertia: yaw keeps moving after the drag stops...
        orbit.update(DT, &view);
        assert!((orbit.yaw() - yaw_after_one).abs() > 1e-6);

        // ...but damping brings it to rest.
        for _ in 0..600 {
            orbit.update(DT, &view);
        }
        let settled = orbit.yaw();
        orbit.update(DT, &view);
        assert!((orbit.yaw() - settled).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped_at_poles() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        for _ in 0..100 {
            orbit.apply_drag(0.0, 10_000.0);
            orbit.update(DT, &view);
        }
        assert!(orbit.pitch() <= MAX_PITCH);
        // Camera stays a finite distance from the pole axis.
        let pos = orbit.camera_position();
        assert!(pos.y < orbit.distance());
    }

    #[test]
    fn test_zoom_in_respects_min_distance() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        for _ in 0..10 {
            orbit.zoom_in();
            for _ in 0..60 {
                orbit.update(DT, &view);
            }
        }
        assert!(
            (orbit.distance() - 1.5).abs() < 1e-4,
            "Distance {} should settle at the 1.5 minimum",
            orbit.distance()
        );
    }

    #[test]
    fn test_zoom_out_respects_max_distance() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        for _ in 0..10 {
            orbit.zoom_out();
            for _ in 0..60 {
                orbit.update(DT, &view);
            }
        }
        assert!(
            (orbit.distance() - 4.0).abs() < 1e-4,
            "Distance {} should settle at the 4.0 maximum",
            orbit.distance()
        );
    }

    #[test]
    fn test_zoom_is_gradual() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        orbit.zoom_in();
        orbit.update(DT, &view);
        assert!(orbit.is_zooming());
        let d = orbit.distance();
        assert!(
            d < 2.5 && d > 2.0,
            "One step into the tween should sit between 2.0 and 2.5, got {d}"
        );
    }

    #[test]
    fn test_rapid_zoom_presses_accumulate() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        orbit.zoom_in();
        orbit.zoom_in();
        for _ in 0..120 {
            orbit.update(DT, &view);
        }
        assert!(
            (orbit.distance() - 1.5).abs() < 1e-4,
            "Two presses should target 2.5 - 1.0 = 1.5, got {}",
            orbit.distance()
        );
    }

    #[test]
    fn test_scroll_zooms_in_and_out() {
        let mut orbit = controller();
        let view = ViewState::new(false);
        orbit.apply_scroll(1.0);
        for _ in 0..60 {
            orbit.update(DT, &view);
        }
        assert!(orbit.distance() < 2.5);

        orbit.apply_scroll(-2.0);
        for _ in 0..60 {
            orbit.update(DT, &view);
        }
        assert!(orbit.distance() > 2.0);
    }

    #[test]
    fn test_camera_distance_matches_pose() {
        let mut orbit = controller();
        let view = ViewState::new(true);
        orbit.apply_drag(37.0, -12.0);
        for _ in 0..30 {
            orbit.update(DT, &view);
        }
        let pos = orbit.camera_position();
        assert!(
            (pos.length() - orbit.distance()).abs() < 1e-4,
            "Camera position length {} != distance {}",
            pos.length(),
            orbit.distance()
        );
    }
}
