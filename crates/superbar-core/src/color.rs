//! Bar colors: serializable color values and color formatters.

use std::fmt;

use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Serializable color, written as `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let invalid = || ConfigError::InvalidColor(text.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(text: String) -> ConfigResult<Self> {
        Self::parse(&text)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl From<Color> for HexColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::new(rgba.r, rgba.g, rgba.b, rgba.a)
    }
}

impl From<HexColor> for Color {
    fn from(color: HexColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Derives a display color from the current state of a bar.
pub trait ColorFormatter {
    /// Return the color for `value` on a bar spanning `min..=max`.
    fn color(&self, value: f64, max: f64, min: f64) -> Color;
}

/// A formatter that always returns the same color.
#[derive(Debug, Clone, Copy)]
pub struct Solid(pub Color);

impl ColorFormatter for Solid {
    fn color(&self, _value: f64, _max: f64, _min: f64) -> Color {
        self.0
    }
}

impl<F> ColorFormatter for F
where
    F: Fn(f64, f64, f64) -> Color,
{
    fn color(&self, value: f64, max: f64, min: f64) -> Color {
        self(value, max, min)
    }
}
