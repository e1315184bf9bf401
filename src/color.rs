//! RGBA colors for dots and connection lines

use std::fmt;

use crate::error::SettingsError;

/// An sRGB color with a straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 0.0 (transparent) - 1.0 (opaque)
    pub a: f32,
}

impl Color {
    /// Fully opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same hue with a new alpha, clamped to [0, 1]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self, SettingsError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || SettingsError::InvalidColor(hex.to_string());

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS color string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#00f2ff").unwrap(), Color::rgb(0, 242, 255));
        assert_eq!(Color::from_hex("FF0080").unwrap(), Color::rgb(255, 0, 128));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Color::from_hex("#00f2f").is_err());
        assert!(Color::from_hex("#00g2ff").is_err());
        assert!(Color::from_hex("").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_hex_roundtrip_and_css() {
        let c = Color::rgb(0, 242, 255);
        assert_eq!(c.to_hex(), "#00f2ff");
        assert_eq!(c.with_alpha(0.5).to_css(), "rgba(0, 242, 255, 0.5)");
    }

    #[test]
    fn test_with_alpha_clamps() {
        let c = Color::rgb(1, 2, 3);
        assert_eq!(c.with_alpha(1.7).a, 1.0);
        assert_eq!(c.with_alpha(-0.2).a, 0.0);
    }
}
