//! Pointer position as seen by the simulation

use glam::Vec2;

use crate::consts::POINTER_RADIUS;

/// Current pointer and its influence radius
///
/// Starts absent: no pointer connections are drawn until the host reports
/// a first position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
    pub radius: f32,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::absent(POINTER_RADIUS)
    }
}

impl PointerState {
    pub fn absent(radius: f32) -> Self {
        Self {
            position: None,
            radius,
        }
    }

    pub fn at(x: f32, y: f32, radius: f32) -> Self {
        Self {
            position: Some(Vec2::new(x, y)),
            radius,
        }
    }

    /// Record a pointer move. Non-finite coordinates are ignored.
    pub fn move_to(&mut self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.position = Some(Vec2::new(x, y));
        }
    }

    /// Pointer left the surface
    pub fn clear(&mut self) {
        self.position = None;
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn is_present(&self) -> bool {
        self.position.is_some()
    }
}
