//! Cursor drag tracking for orbit input.

use glam::Vec2;

/// Tracks the primary-button drag gesture and yields per-move deltas.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    dragging: bool,
    last_position: Option<Vec2>,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a primary-button press or release.
    pub fn on_button(&mut self, pressed: bool) {
        self.dragging = pressed;
        if !pressed {
            self.last_position = None;
        }
    }

    /// Process a cursor move. Returns the delta since the previous move
    /// while the button is held, `None` otherwise.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Option<Vec2> {
        let position = Vec2::new(x as f32, y as f32);
        if !self.dragging {
            self.last_position = Some(position);
            return None;
        }
        let delta = self.last_position.map(|last| position - last);
        self.last_position = Some(position);
        // The first move after a press establishes the anchor.
        delta.filter(|d| *d != Vec2::ZERO)
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_delta_without_press() {
        let mut drag = DragTracker::new();
        assert!(drag.on_cursor_moved(10.0, 10.0).is_none());
        assert!(drag.on_cursor_moved(20.0, 20.0).is_none());
    }

    #[test]
    fn test_delta_while_dragging() {
        let mut drag = DragTracker::new();
        drag.on_cursor_moved(100.0, 100.0);
        drag.on_button(true);
        let delta = drag.on_cursor_moved(110.0, 95.0).unwrap();
        assert_eq!(delta, Vec2::new(10.0, -5.0));
    }

    #[test]
    fn test_release_ends_drag() {
        let mut drag = DragTracker::new();
        drag.on_button(true);
        drag.on_cursor_moved(0.0, 0.0);
        drag.on_button(false);
        assert!(!drag.is_dragging());
        assert!(drag.on_cursor_moved(50.0, 50.0).is_none());
    }

    #[test]
    fn test_first_move_after_press_anchors_without_delta() {
        let mut drag = DragTracker::new();
        drag.on_button(true);
        assert!(drag.on_cursor_moved(500.0, 500.0).is_none());
        assert_eq!(
            drag.on_cursor_moved(510.0, 500.0),
            Some(Vec2::new(10.0, 0.0))
        );
    }
}
