//! RGBA colors
//!
//! Colors are stored as linear `f32` channels in `0.0..=1.0`. In configuration
//! files they are written as `"#RRGGBB"` or `"#RRGGBBAA"` strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a hex color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must start with '#'")]
    MissingHash(String),

    #[error("color `{0}` must have 6 or 8 hex digits")]
    InvalidLength(String),

    #[error("color `{0}` contains a non-hex digit")]
    InvalidDigit(String),
}

/// An RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GRAY: Color = Color::rgb(0.5, 0.5, 0.5);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from `0xRRGGBB`
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Linear interpolation between two colors
    pub fn lerp(a: &Color, b: &Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: a.r + (b.r - a.r) * t,
            g: a.g + (b.g - a.g) * t,
            b: a.b + (b.b - a.b) * t,
            a: a.a + (b.a - a.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

fn channel_to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}",
            channel_to_byte(self.r),
            channel_to_byte(self.g),
            channel_to_byte(self.b)
        )?;
        if self.a < 1.0 {
            write!(f, "{:02X}", channel_to_byte(self.a))?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }

        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;

        if digits.len() == 6 {
            Ok(Color::from_hex(value))
        } else {
            let alpha = (value & 0xFF) as f32 / 255.0;
            Ok(Color::from_hex(value >> 8).with_alpha(alpha))
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        let color: Color = "#007AFF".parse().unwrap();
        assert_eq!(channel_to_byte(color.r), 0x00);
        assert_eq!(channel_to_byte(color.g), 0x7A);
        assert_eq!(channel_to_byte(color.b), 0xFF);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_parse_rgba() {
        let color: Color = "#FFFFFF80".parse().unwrap();
        assert_eq!(color.r, 1.0);
        assert_eq!(channel_to_byte(color.a), 0x80);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "007AFF".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#07F".parse::<Color>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "#GG0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigit(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Color::from_hex(0x999999).to_string(), "#999999");
        assert_eq!(Color::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn test_serde_string_form() {
        #[derive(Deserialize)]
        struct Theme {
            tint: Color,
        }

        let theme: Theme = toml::from_str("tint = \"#0000FF\"").unwrap();
        assert_eq!(theme.tint, Color::BLUE);

        let bad = toml::from_str::<Theme>("tint = \"blue\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_lerp_clamps() {
        let mid = Color::lerp(&Color::BLACK, &Color::WHITE, 0.5);
        assert_eq!(mid.r, 0.5);
        let over = Color::lerp(&Color::BLACK, &Color::WHITE, 2.0);
        assert_eq!(over, Color::WHITE);
    }
}
