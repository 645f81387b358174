//! Foundational color types used by the display sinks.
//!
//! Colors are stored as normalized RGBA floats. The severity palette lives
//! here so every sink paints the same tier with the same color.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
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

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// 24-bit ANSI foreground escape for terminal sinks
    pub fn ansi_fg(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("\x1b[38;2;{};{};{}m", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

/// Colors used by the monitor panel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Palette {
    /// Panel title
    pub accent: Color,
    pub normal: Color,
    pub warning: Color,
    pub danger: Color,
    pub neutral: Color,
}

impl Palette {
    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Neutral => self.neutral,
            Severity::Normal => self.normal,
            Severity::Warning => self.warning,
            Severity::Danger => self.danger,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            accent: Color::from_rgba8(0x00, 0xd9, 0xff, 255),
            normal: Color::from_rgba8(0x00, 0xff, 0x41, 255),
            warning: Color::from_rgba8(0xff, 0xaa, 0x00, 255),
            danger: Color::from_rgba8(0xff, 0x33, 0x66, 255),
            neutral: Color::from_rgba8(0x88, 0x92, 0xb0, 255),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_round_trip() {
        let color = Color::from_rgba8(0x00, 0xff, 0x41, 0xff);
        assert_eq!(color.to_rgba8(), (0x00, 0xff, 0x41, 0xff));
        assert_eq!(Color::default().to_rgba8(), (0, 0, 0, 255));
    }

    #[test]
    fn test_palette_tiers() {
        let palette = Palette::default();
        assert_eq!(palette.severity(Severity::Normal).to_rgba8(), (0x00, 0xff, 0x41, 0xff));
        assert_eq!(palette.severity(Severity::Warning).to_rgba8(), (0xff, 0xaa, 0x00, 0xff));
        assert_eq!(palette.severity(Severity::Danger).to_rgba8(), (0xff, 0x33, 0x66, 0xff));
        assert_eq!(palette.severity(Severity::Neutral).to_rgba8(), (0x88, 0x92, 0xb0, 0xff));
    }

    #[test]
    fn test_ansi_escape() {
        let color = Color::from_rgba8(255, 170, 0, 255);
        assert_eq!(color.ansi_fg(), "\x1b[38;2;255;170;0m");
    }
}
