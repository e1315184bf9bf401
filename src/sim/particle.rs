//! Particle records and their per-frame operations

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::surface::Surface;

/// A single drifting point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Units per frame, fixed for the particle's lifetime
    pub vel: Vec2,
    pub radius: f32,
}

/// Half-open sampling range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRange {
    pub min: f32,
    pub max: f32,
}

impl SpawnRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample; an empty range always yields `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Spawn uniformly inside `[0, width) x [0, height)`
    ///
    /// Each component is drawn independently.
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f32,
        height: f32,
        radius: SpawnRange,
        speed: SpawnRange,
    ) -> Self {
        let pos = Vec2::new(
            SpawnRange::new(0.0, width).sample(rng),
            SpawnRange::new(0.0, height).sample(rng),
        );
        let radius = radius.sample(rng);
        let vel = Vec2::new(speed.sample(rng), speed.sample(rng));
        Self { pos, vel, radius }
    }
}

/// Wrap one coordinate to the opposite edge
///
/// Leaving past the far edge teleports to 0, leaving below 0 teleports to
/// `extent`. Velocity is never touched.
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    // `>=` rather than "exceeds": reaching the far edge already wraps, so only the
    // below-zero teleport can leave a value equal to `extent`
    if value >= extent {
        0.0
    } else if value < 0.0 {
        extent
    } else {
        value
    }
}

/// Advance one Euler step, then wrap each axis independently
pub fn update_particle(particle: &mut Particle, width: f32, height: f32) {
    particle.pos += particle.vel;
    particle.pos.x = wrap_axis(particle.pos.x, width);
    particle.pos.y = wrap_axis(particle.pos.y, height);
}

/// Draw the particle as a filled dot
pub fn draw_particle<S: Surface + ?Sized>(particle: &Particle, surface: &mut S, color: Color) {
    surface.fill_circle(particle.pos, particle.radius, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_update_moves_by_velocity() {
        let mut p = Particle::new(Vec2::new(10.0, 20.0), Vec2::new(0.25, -0.5), 2.0);
        update_particle(&mut p, 100.0, 100.0);
        assert_eq!(p.pos, Vec2::new(10.25, 19.5));
        assert_eq!(p.vel, Vec2::new(0.25, -0.5));
    }

    #[test]
    fn test_wrap_left_edge_goes_to_width() {
        let mut p = Particle::new(Vec2::new(0.0, 400.0), Vec2::new(-0.4, 0.0), 1.0);
        update_particle(&mut p, 1200.0, 800.0);
        assert_eq!(p.pos.x, 1200.0);
        assert_eq!(p.pos.y, 400.0);
        // Velocity survives the teleport
        assert_eq!(p.vel, Vec2::new(-0.4, 0.0));

        // Next step moves back inside
        update_particle(&mut p, 1200.0, 800.0);
        assert!((p.pos.x - 1199.6).abs() < 1e-3);
    }

    #[test]
    fn test_wrap_right_edge_goes_to_zero() {
        let mut p = Particle::new(Vec2::new(99.9, 50.0), Vec2::new(0.3, 0.0), 1.0);
        update_particle(&mut p, 100.0, 100.0);
        assert_eq!(p.pos.x, 0.0);
    }

    #[test]
    fn test_landing_on_far_edge_wraps() {
        let mut p = Particle::new(Vec2::new(99.5, 49.5), Vec2::new(0.5, 0.5), 1.0);
        update_particle(&mut p, 100.0, 50.0);
        assert_eq!(p.pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_wrap_both_axes_same_step() {
        let mut p = Particle::new(Vec2::new(99.9, 0.1), Vec2::new(0.3, -0.3), 1.0);
        update_particle(&mut p, 100.0, 50.0);
        assert_eq!(p.pos, Vec2::new(0.0, 50.0));
    }

    #[test]
    fn test_random_within_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let radius = SpawnRange::new(1.0, 3.0);
        let speed = SpawnRange::new(-0.4, 0.4);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 640.0, 480.0, radius, speed);
            assert!((0.0..640.0).contains(&p.pos.x));
            assert!((0.0..480.0).contains(&p.pos.y));
            assert!((1.0..3.0).contains(&p.radius));
            assert!((-0.4..0.4).contains(&p.vel.x));
            assert!((-0.4..0.4).contains(&p.vel.y));
        }
    }

    #[test]
    fn test_empty_range_yields_min() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(SpawnRange::new(2.0, 2.0).sample(&mut rng), 2.0);
        assert_eq!(SpawnRange::new(0.0, 0.0).sample(&mut rng), 0.0);
    }

    #[test]
    fn test_draw_particle_emits_circle() {
        let p = Particle::new(Vec2::new(5.0, 6.0), Vec2::ZERO, 2.5);
        let mut surface = RecordingSurface::new();
        let color = Color::rgb(0, 242, 255);
        draw_particle(&p, &mut surface, color);
        assert_eq!(
            surface.commands,
            vec![DrawCommand::Circle {
                center: Vec2::new(5.0, 6.0),
                radius: 2.5,
                color,
            }]
        );
    }
}
