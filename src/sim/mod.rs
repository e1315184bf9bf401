//! Deterministic simulation module
//!
//! Everything that moves or gets drawn lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (by particle index)
//! - No platform dependencies; drawing goes through `Surface`

pub mod connect;
pub mod field;
pub mod frame;
pub mod particle;
pub mod pointer;

pub use connect::{
    Connection, ConnectionRenderer, ConnectionStyle, Endpoint, RenderStats, falloff_opacity,
};
pub use field::{FieldParams, ParticleField};
pub use frame::Simulation;
pub use particle::{Particle, SpawnRange, draw_particle, update_particle};
pub use pointer::PointerState;
