//! Color type used by the card palette.

use serde::{Deserialize, Serialize};

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Opaque color from a packed `0xRRGGBB` value
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xFF) as f64 / 255.0,
            g: ((rgb >> 8) & 0xFF) as f64 / 255.0,
            b: (rgb & 0xFF) as f64 / 255.0,
            a: 1.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Apply to Cairo context
    #[cfg(feature = "gtk")]
    pub fn apply_to_cairo(&self, cr: &cairo::Context) {
        cr.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Dark palette shared by every card
pub mod palette {
    use super::Color;

    pub const WINDOW_BACKGROUND: Color = Color::from_hex(0x121212);
    pub const CARD_BACKGROUND: Color = Color::from_hex(0x1E1E1E);
    pub const CARD_BORDER: Color = Color::from_hex(0x333333);
    pub const INSET_BACKGROUND: Color = Color::from_hex(0x2C2C2C);
    pub const TRACK: Color = Color::from_hex(0x333333);
    pub const ICON_OUTLINE: Color = Color::from_hex(0x555555);

    pub const TITLE: Color = Color::from_hex(0xE0E0E0);
    pub const TEXT: Color = Color::from_hex(0xFFFFFF);
    pub const LABEL: Color = Color::from_hex(0x9E9E9E);
    pub const SECONDARY: Color = Color::from_hex(0xBBBBBB);
    pub const LOADING: Color = Color::from_hex(0x888888);

    pub const GREEN: Color = Color::from_hex(0x4CAF50);
    pub const AMBER: Color = Color::from_hex(0xFFC107);
    pub const RED: Color = Color::from_hex(0xFF5252);
    pub const GREY: Color = Color::from_hex(0x757575);
    pub const BLUE: Color = Color::from_hex(0x2196F3);
    pub const ORANGE: Color = Color::from_hex(0xFF9800);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x4CAF50);
        assert_eq!(c.to_rgba8(), (0x4C, 0xAF, 0x50, 0xFF));
    }

    #[test]
    fn test_with_alpha_keeps_channels() {
        let c = palette::GREEN.with_alpha(0.2);
        assert_eq!(c.r, palette::GREEN.r);
        assert_eq!(c.a, 0.2);
    }
}
