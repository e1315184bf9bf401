//! Background settings and preferences
//!
//! Persisted in LocalStorage on the web, as a JSON file on native.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::{ConnectionStyle, FieldParams, SpawnRange};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Viewport area per particle for this preset
    ///
    /// Connection cost grows with the square of the count, so Low halves
    /// the density.
    pub fn density_divisor(&self) -> f32 {
        match self {
            QualityPreset::Low => DENSITY_DIVISOR * 2.0,
            QualityPreset::Medium => DENSITY_DIVISOR,
            QualityPreset::High => DENSITY_DIVISOR * 0.75,
        }
    }
}

/// Background settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Quality preset (last applied)
    pub quality: QualityPreset,

    // === Field ===
    /// Viewport area per particle; `None` follows `quality`
    pub density_divisor: Option<f32>,
    pub radius_range: SpawnRange,
    /// Per-axis velocity range, units per frame
    pub speed_range: SpawnRange,
    /// `#rrggbb` used for dots and lines
    pub particle_color: String,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === Connections ===
    pub connect_threshold: f32,
    pub pointer_radius: f32,
    pub line_alpha: f32,
    pub pointer_line_alpha: f32,
    pub line_width: f32,
    pub pointer_line_width: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            density_divisor: None,
            radius_range: SpawnRange::new(RADIUS_MIN, RADIUS_MAX),
            speed_range: SpawnRange::new(SPEED_MIN, SPEED_MAX),
            particle_color: PARTICLE_COLOR.to_hex(),
            seed: None,

            connect_threshold: CONNECT_THRESHOLD,
            pointer_radius: POINTER_RADIUS,
            line_alpha: LINE_ALPHA,
            pointer_line_alpha: POINTER_LINE_ALPHA,
            line_width: LINE_WIDTH,
            pointer_line_width: POINTER_LINE_WIDTH,
        }
    }
}

fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
    if ok {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue { field, reason })
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (drops any density override)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        self.density_divisor = None;
    }

    /// Density in effect: the explicit override, else the preset's
    pub fn effective_density_divisor(&self) -> f32 {
        self.density_divisor
            .unwrap_or_else(|| self.quality.density_divisor())
    }

    /// Parsed particle color
    pub fn color(&self) -> Result<Color, SettingsError> {
        Color::from_hex(&self.particle_color)
    }

    /// Reject values the simulation cannot use
    pub fn validate(&self) -> Result<(), SettingsError> {
        let divisor = self.effective_density_divisor();
        check(
            divisor.is_finite() && divisor > 0.0,
            "density_divisor",
            "must be a positive number",
        )?;
        for (field, range) in [
            ("radius_range", self.radius_range),
            ("speed_range", self.speed_range),
        ] {
            check(
                range.min.is_finite() && range.max.is_finite() && range.min <= range.max,
                field,
                "min must not exceed max",
            )?;
        }
        check(self.radius_range.min >= 0.0, "radius_range", "radius must be >= 0")?;
        for (field, value) in [
            ("connect_threshold", self.connect_threshold),
            ("pointer_radius", self.pointer_radius),
            ("line_width", self.line_width),
            ("pointer_line_width", self.pointer_line_width),
        ] {
            check(value.is_finite() && value > 0.0, field, "must be a positive number")?;
        }
        for (field, value) in [
            ("line_alpha", self.line_alpha),
            ("pointer_line_alpha", self.pointer_line_alpha),
        ] {
            check((0.0..=1.0).contains(&value), field, "must be within 0..=1")?;
        }
        self.color()?;
        Ok(())
    }

    /// Particle generation parameters
    ///
    /// Falls back to the default color if `particle_color` does not parse;
    /// call [`Settings::validate`] first to surface that as an error.
    pub fn field_params(&self) -> FieldParams {
        FieldParams {
            density_divisor: self.effective_density_divisor(),
            radius: self.radius_range,
            speed: self.speed_range,
            color: self.color().unwrap_or(PARTICLE_COLOR),
        }
    }

    /// Connection thresholds and line styling
    pub fn connection_style(&self) -> ConnectionStyle {
        ConnectionStyle {
            connect_threshold: self.connect_threshold,
            line_alpha: self.line_alpha,
            line_width: self.line_width,
            pointer_line_alpha: self.pointer_line_alpha,
            pointer_line_width: self.pointer_line_width,
            color: self.color().unwrap_or(PARTICLE_COLOR),
        }
    }

    /// Parse and validate settings JSON (missing fields take defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "spider_web_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings to a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.density_divisor, None);
        assert_eq!(s.effective_density_divisor(), 12000.0);
        assert_eq!(s.connect_threshold, 150.0);
        assert_eq!(s.pointer_radius, 180.0);
        assert_eq!(s.line_alpha, 0.2);
        assert_eq!(s.pointer_line_alpha, 0.5);
        assert_eq!(s.color().unwrap(), Color::rgb(0, 242, 255));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{ "connect_threshold": 90.0, "seed": 7 }"#).unwrap();
        assert_eq!(s.connect_threshold, 90.0);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.pointer_radius, 180.0);
        assert_eq!(s.connection_style().connect_threshold, 90.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Settings::from_preset(QualityPreset::High);
        s.particle_color = "#ff00aa".into();
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Settings::from_json(r#"{ "density_divisor": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidValue {
                field: "density_divisor",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "line_alpha": 1.5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { field: "line_alpha", .. }));

        let err =
            Settings::from_json(r#"{ "speed_range": { "min": 1.0, "max": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { field: "speed_range", .. }));

        let err = Settings::from_json(r#"{ "particle_color": "cyan" }"#).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidColor(_)));

        assert!(matches!(
            Settings::from_json("{ not json").unwrap_err(),
            SettingsError::Json(_)
        ));
    }

    #[test]
    fn test_presets_scale_density() {
        assert_eq!(
            Settings::from_preset(QualityPreset::Low).effective_density_divisor(),
            24000.0
        );
        assert_eq!(
            Settings::from_preset(QualityPreset::Medium).effective_density_divisor(),
            12000.0
        );
        assert_eq!(QualityPreset::from_str("MED"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
        assert_eq!(QualityPreset::High.as_str(), "High");
    }

    #[test]
    fn test_loaded_quality_sets_density() {
        use crate::sim::Simulation;

        let low = Settings::from_json(r#"{ "quality": "Low" }"#).unwrap();
        assert_eq!(low.effective_density_divisor(), 24000.0);
        assert_eq!(Simulation::new(&low, 1200, 800, 1).field.len(), 40);

        // An explicit density wins over the preset
        let pinned =
            Settings::from_json(r#"{ "quality": "Low", "density_divisor": 6000.0 }"#).unwrap();
        assert_eq!(Simulation::new(&pinned, 1200, 800, 1).field.len(), 160);

        let mut reset = pinned.clone();
        reset.apply_preset(QualityPreset::High);
        assert_eq!(reset.density_divisor, None);
        assert_eq!(reset.effective_density_divisor(), 9000.0);
    }

    #[test]
    fn test_file_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "spider_web_settings_{}.json",
            std::process::id()
        ));
        let mut s = Settings::default();
        s.seed = Some(1234);
        s.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, s);

        assert!(matches!(
            Settings::load_from(path.with_extension("missing")).unwrap_err(),
            SettingsError::Io(_)
        ));
    }
}
