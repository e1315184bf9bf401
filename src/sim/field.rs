//! The particle field: particle set plus its temporal evolution

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particle::{Particle, SpawnRange, draw_particle, update_particle};
use crate::color::Color;
use crate::consts::*;
use crate::particle_count;
use crate::surface::Surface;

/// Parameters that shape a freshly generated field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Viewport area per particle
    pub density_divisor: f32,
    pub radius: SpawnRange,
    pub speed: SpawnRange,
    pub color: Color,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            density_divisor: DENSITY_DIVISOR,
            radius: SpawnRange::new(RADIUS_MIN, RADIUS_MAX),
            speed: SpawnRange::new(SPEED_MIN, SPEED_MAX),
            color: PARTICLE_COLOR,
        }
    }
}

/// Ordered particle collection sized to the viewport area
///
/// Holds no reference to the surface; dimensions come in with every call.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    rng: Pcg32,
}

impl ParticleField {
    /// Generate `floor(width * height / divisor)` independent particles
    pub fn new(width: f32, height: f32, params: FieldParams, seed: u64) -> Self {
        let mut field = Self {
            particles: Vec::new(),
            params,
            rng: Pcg32::seed_from_u64(seed),
        };
        field.regenerate(width, height);
        field
    }

    /// Replace every particle with a fresh batch for the new dimensions
    ///
    /// The new set is built in full before it replaces the old one, so a
    /// reader never observes a partially regenerated field.
    pub fn regenerate(&mut self, width: f32, height: f32) {
        let count = particle_count(width, height, self.params.density_divisor);
        let FieldParams { radius, speed, .. } = self.params;

        let mut fresh = Vec::with_capacity(count);
        for _ in 0..count {
            fresh.push(Particle::random(&mut self.rng, width, height, radius, speed));
        }
        self.particles = fresh;

        log::debug!(
            "Regenerated particle field: {} particles for {}x{}",
            count,
            width,
            height
        );
    }

    /// Advance every particle one frame
    pub fn update(&mut self, width: f32, height: f32) {
        for particle in &mut self.particles {
            update_particle(particle, width, height);
        }
    }

    /// Draw every particle as a dot in the field color
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            draw_particle(particle, surface, self.params.color);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replace the particle set wholesale (fixtures, restored snapshots)
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
