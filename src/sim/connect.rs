//! Per-frame connection pass
//!
//! Connections are recomputed from scratch every frame and never stored.
//! The particle-particle test is all-pairs, O(n^2); at the densities the
//! field generates (a few hundred particles) that is well within budget.

use glam::Vec2;

use super::particle::Particle;
use super::pointer::PointerState;
use crate::color::Color;
use crate::consts::*;
use crate::surface::Surface;

/// Line styling and distance thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionStyle {
    /// Particle-particle lines require distance < this
    pub connect_threshold: f32,
    pub line_alpha: f32,
    pub line_width: f32,
    pub pointer_line_alpha: f32,
    pub pointer_line_width: f32,
    pub color: Color,
}

impl Default for ConnectionStyle {
    fn default() -> Self {
        Self {
            connect_threshold: CONNECT_THRESHOLD,
            line_alpha: LINE_ALPHA,
            line_width: LINE_WIDTH,
            pointer_line_alpha: POINTER_LINE_ALPHA,
            pointer_line_width: POINTER_LINE_WIDTH,
            color: PARTICLE_COLOR,
        }
    }
}

/// Far end of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Another particle, by index
    Particle(usize),
    Pointer,
}

/// One visible line for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the particle the line starts at
    pub from: usize,
    pub to: Endpoint,
    pub start: Vec2,
    pub end: Vec2,
    pub distance: f32,
    pub opacity: f32,
    pub width: f32,
}

/// Counts from one render pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub particle_links: usize,
    pub pointer_links: usize,
}

/// Linear falloff: `(1 - d / limit) * peak` for `d < limit`, otherwise none
#[inline]
pub fn falloff_opacity(distance: f32, limit: f32, peak: f32) -> Option<f32> {
    (distance < limit).then(|| (1.0 - distance / limit) * peak)
}

/// Draws the proximity web over particles and pointer
#[derive(Debug, Clone, Default)]
pub struct ConnectionRenderer {
    pub style: ConnectionStyle,
}

impl ConnectionRenderer {
    pub fn new(style: ConnectionStyle) -> Self {
        Self { style }
    }

    /// Every visible connection, in paint order
    ///
    /// For particle `a`: links to `b` in `a+1..n`, then `a`'s pointer
    /// link, then on to `a+1`. Each unordered pair appears exactly once.
    /// Self-pairs are zero-length and skipped.
    pub fn connections(&self, particles: &[Particle], pointer: &PointerState) -> Vec<Connection> {
        let style = &self.style;
        let pointer_pos = pointer.position();
        let mut out = Vec::new();

        for (a, pa) in particles.iter().enumerate() {
            for (offset, pb) in particles[a + 1..].iter().enumerate() {
                let distance = pa.pos.distance(pb.pos);
                if let Some(opacity) =
                    falloff_opacity(distance, style.connect_threshold, style.line_alpha)
                {
                    out.push(Connection {
                        from: a,
                        to: Endpoint::Particle(a + 1 + offset),
                        start: pa.pos,
                        end: pb.pos,
                        distance,
                        opacity,
                        width: style.line_width,
                    });
                }
            }

            // Absent pointer: skip entirely, never measure against a missing position
            if let Some(target) = pointer_pos {
                let distance = pa.pos.distance(target);
                if let Some(opacity) =
                    falloff_opacity(distance, pointer.radius, style.pointer_line_alpha)
                {
                    out.push(Connection {
                        from: a,
                        to: Endpoint::Pointer,
                        start: pa.pos,
                        end: target,
                        distance,
                        opacity,
                        width: style.pointer_line_width,
                    });
                }
            }
        }

        out
    }

    /// Draw all connections for this frame
    pub fn render<S: Surface + ?Sized>(
        &self,
        particles: &[Particle],
        pointer: &PointerState,
        surface: &mut S,
    ) -> RenderStats {
        let mut stats = RenderStats::default();

        for conn in self.connections(particles, pointer) {
            match conn.to {
                Endpoint::Particle(_) => stats.particle_links += 1,
                Endpoint::Pointer => stats.pointer_links += 1,
            }
            let color = self.style.color.with_alpha(conn.opacity);
            surface.stroke_line(conn.start, conn.end, color, conn.width);
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn dot(x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 1.0)
    }

    #[test]
    fn test_scenario_particle_link() {
        let renderer = ConnectionRenderer::default();
        let particles = [dot(0.0, 0.0), dot(100.0, 0.0)];
        let conns = renderer.connections(&particles, &PointerState::default());

        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].to, Endpoint::Particle(1));
        assert!((conns[0].distance - 100.0).abs() < 1e-4);
        assert!((conns[0].opacity - 0.0667).abs() < 1e-3);
        assert_eq!(conns[0].width, 1.0);
    }

    #[test]
    fn test_scenario_pointer_link() {
        let renderer = ConnectionRenderer::default();
        let particles = [dot(0.0, 0.0)];
        let pointer = PointerState::at(170.0, 0.0, 180.0);
        let conns = renderer.connections(&particles, &pointer);

        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].to, Endpoint::Pointer);
        assert_eq!(conns[0].end, Vec2::new(170.0, 0.0));
        assert!((conns[0].opacity - 0.0278).abs() < 1e-3);
        assert_eq!(conns[0].width, 1.5);
    }

    #[test]
    fn test_threshold_is_strict() {
        let renderer = ConnectionRenderer::default();
        let at_threshold = [dot(0.0, 0.0), dot(150.0, 0.0)];
        assert!(
            renderer
                .connections(&at_threshold, &PointerState::default())
                .is_empty()
        );

        let just_inside = [dot(0.0, 0.0), dot(149.99, 0.0)];
        let conns = renderer.connections(&just_inside, &PointerState::default());
        assert_eq!(conns.len(), 1);
        assert!(conns[0].opacity > 0.0 && conns[0].opacity < 1e-4);

        let pointer = PointerState::at(180.0, 0.0, 180.0);
        assert!(renderer.connections(&[dot(0.0, 0.0)], &pointer).is_empty());
    }

    #[test]
    fn test_absent_pointer_draws_no_pointer_lines() {
        let renderer = ConnectionRenderer::default();
        let particles: Vec<_> = (0..10).map(|i| dot(i as f32 * 5.0, 0.0)).collect();
        let mut surface = RecordingSurface::new();
        let stats = renderer.render(&particles, &PointerState::default(), &mut surface);

        assert_eq!(stats.pointer_links, 0);
        assert_eq!(stats.particle_links, 45);
        for cmd in surface.lines() {
            if let DrawCommand::Line { from, to, .. } = cmd {
                assert!(from.is_finite() && to.is_finite());
            }
        }
    }

    #[test]
    fn test_paint_order_interleaves_pointer() {
        let renderer = ConnectionRenderer::default();
        let particles = [dot(0.0, 0.0), dot(10.0, 0.0), dot(20.0, 0.0)];
        let pointer = PointerState::at(5.0, 5.0, 180.0);
        let order: Vec<_> = renderer
            .connections(&particles, &pointer)
            .iter()
            .map(|c| (c.from, c.to))
            .collect();

        assert_eq!(
            order,
            vec![
                (0, Endpoint::Particle(1)),
                (0, Endpoint::Particle(2)),
                (0, Endpoint::Pointer),
                (1, Endpoint::Particle(2)),
                (1, Endpoint::Pointer),
                (2, Endpoint::Pointer),
            ]
        );
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = ConnectionRenderer::default();
        let particles = [dot(0.0, 0.0), dot(40.0, 30.0), dot(300.0, 300.0)];
        let pointer = PointerState::at(20.0, 20.0, 180.0);

        let mut first = RecordingSurface::new();
        let mut second = RecordingSurface::new();
        renderer.render(&particles, &pointer, &mut first);
        renderer.render(&particles, &pointer, &mut second);

        assert_eq!(first.commands, second.commands);
        assert_eq!(
            renderer.connections(&particles, &pointer),
            renderer.connections(&particles, &pointer)
        );
    }

    #[test]
    fn test_render_line_style() {
        let renderer = ConnectionRenderer::default();
        let particles = [dot(0.0, 0.0), dot(75.0, 0.0)];
        let mut surface = RecordingSurface::new();
        renderer.render(&particles, &PointerState::default(), &mut surface);

        match &surface.commands[..] {
            [DrawCommand::Line { color, width, .. }] => {
                assert_eq!((color.r, color.g, color.b), (0, 242, 255));
                assert!((color.a - 0.1).abs() < 1e-6);
                assert_eq!(*width, 1.0);
            }
            other => panic!("expected one line, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_particles() {
        let renderer = ConnectionRenderer::default();
        let pointer = PointerState::at(1.0, 1.0, 180.0);
        let mut surface = RecordingSurface::new();
        assert_eq!(
            renderer.render(&[], &pointer, &mut surface),
            RenderStats::default()
        );
        assert!(surface.commands.is_empty());
    }
}
