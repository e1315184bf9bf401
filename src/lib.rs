//! Spider Web - an animated particle web background
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particle field, pointer, connections)
//! - `surface`: Abstract 2D drawing surface and a recording implementation
//! - `frame_loop`: Explicit per-frame scheduling loop with host events
//! - `settings`: Tunable configuration with JSON persistence
//! - `color`: RGBA colors and CSS formatting

pub mod color;
pub mod error;
pub mod frame_loop;
pub mod settings;
pub mod sim;
pub mod surface;

pub use color::Color;
pub use error::SettingsError;
pub use frame_loop::{FrameClock, FrameLoop, HostEvent, IntervalClock, LoopHandle, ManualClock};
pub use settings::{QualityPreset, Settings};
pub use surface::{DrawCommand, RecordingSurface, Surface};

/// Field configuration constants
pub mod consts {
    use crate::color::Color;

    /// Viewport area (square units) per particle
    pub const DENSITY_DIVISOR: f32 = 12000.0;

    /// Particle radius range [min, max)
    pub const RADIUS_MIN: f32 = 1.0;
    pub const RADIUS_MAX: f32 = 3.0;

    /// Per-axis velocity range [min, max), units per frame
    pub const SPEED_MIN: f32 = -0.4;
    pub const SPEED_MAX: f32 = 0.4;

    /// Particle-particle connection distance (strict <)
    pub const CONNECT_THRESHOLD: f32 = 150.0;
    /// Pointer influence radius (strict <)
    pub const POINTER_RADIUS: f32 = 180.0;

    /// Peak opacity of particle-particle lines
    pub const LINE_ALPHA: f32 = 0.2;
    /// Peak opacity of particle-pointer lines (stronger than LINE_ALPHA)
    pub const POINTER_LINE_ALPHA: f32 = 0.5;

    pub const LINE_WIDTH: f32 = 1.0;
    pub const POINTER_LINE_WIDTH: f32 = 1.5;

    /// Cyan, #00f2ff
    pub const PARTICLE_COLOR: Color = Color::rgb(0, 242, 255);

    /// Target frame interval for the native loop (~60 Hz)
    pub const FRAME_INTERVAL_MS: u64 = 16;
}

/// Number of particles for a viewport: floor(width * height / divisor)
///
/// Zero-area viewports (and non-positive divisors) yield zero particles.
#[inline]
pub fn particle_count(width: f32, height: f32, divisor: f32) -> usize {
    if width <= 0.0 || height <= 0.0 || divisor <= 0.0 {
        return 0;
    }
    // f64 keeps the division exact for realistic viewport sizes
    ((width as f64 * height as f64) / divisor as f64).floor() as usize
}
