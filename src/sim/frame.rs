//! One frame of the background: clear, update, draw, connect

use super::connect::{ConnectionRenderer, RenderStats};
use super::field::ParticleField;
use super::pointer::PointerState;
use crate::settings::Settings;
use crate::surface::Surface;

/// Complete simulation state with a single owner (the frame loop)
#[derive(Debug, Clone)]
pub struct Simulation {
    pub field: ParticleField,
    pub pointer: PointerState,
    pub renderer: ConnectionRenderer,
    width: f32,
    height: f32,
    /// Ticks completed since creation
    pub frame: u64,
}

impl Simulation {
    /// Build a simulation for the given viewport
    pub fn new(settings: &Settings, width: u32, height: u32, seed: u64) -> Self {
        let (w, h) = (width as f32, height as f32);
        let field = ParticleField::new(w, h, settings.field_params(), seed);
        log::info!(
            "Particle field created: {} particles for {}x{}",
            field.len(),
            width,
            height
        );

        Self {
            field,
            pointer: PointerState::absent(settings.pointer_radius),
            renderer: ConnectionRenderer::new(settings.connection_style()),
            width: w,
            height: h,
            frame: 0,
        }
    }

    /// Viewport size changed: adopt it and regenerate the whole field
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
        self.field.regenerate(self.width, self.height);
        log::info!(
            "Viewport resized to {}x{}, {} particles",
            width,
            height,
            self.field.len()
        );
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Run one full tick against the surface
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> RenderStats {
        surface.clear_rect(0.0, 0.0, self.width, self.height);
        self.field.update(self.width, self.height);
        self.field.draw(surface);
        let stats = self
            .renderer
            .render(self.field.particles(), &self.pointer, surface);
        self.frame += 1;
        stats
    }
}
