//! Abstract 2D drawing surface
//!
//! The simulation only ever issues three primitives. The browser host
//! implements them on a canvas 2D context; tests and the native binary
//! use [`RecordingSurface`].

use glam::Vec2;

use crate::color::Color;

/// Drawing primitives consumed by the simulation
pub trait Surface {
    /// Clear an axis-aligned rectangle to transparent
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Fill a circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Stroke a straight line segment
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
}

/// A single recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
}

/// Surface that records every call in order
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all recorded commands
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
