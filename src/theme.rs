//! Theming for the titlebar
//!
//! Holds the theme colors and the lighten/darken helper used to derive
//! hover and active states.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{TitlebarError, TitlebarResult};

/// Shift applied to derive the hover state of a background
pub const HOVER_SHIFT: f64 = -0.1;
/// Shift applied to derive the active (pressed) state of a background
pub const ACTIVE_SHIFT: f64 = 0.1;

/// Opaque RGB color
///
/// Only the six-digit hex form is accepted. Shorthand (`#fff`) and alpha
/// (`#rrggbbaa`) forms are rejected instead of being mis-parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a new color from RGB values
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create color from a hex string (`#RRGGBB` or `RRGGBB`)
    pub fn from_hex(hex: &str) -> TitlebarResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(TitlebarError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| TitlebarError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to a lowercase `#rrggbb` string
    pub fn hex(&self) -> String {
        self.to_string()
    }

    /// Lighten (positive) or darken (negative) every channel by the same
    /// amount, `round(2.55 * percent * 100)`, clamped to `[0, 255]`.
    ///
    /// `percent` is expected in `[-1, 1]`; values outside that range simply
    /// saturate. Use [`lighten`] for the checked string form.
    pub fn lighten(&self, percent: f64) -> Color {
        let amount = round_half_up(2.55 * percent * 100.0) as i32;
        let shift = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
        Color::rgb(shift(self.r), shift(self.g), shift(self.b))
    }

    /// Hover variant of this color
    pub fn hover(&self) -> Color {
        self.lighten(HOVER_SHIFT)
    }

    /// Active (pressed) variant of this color
    pub fn active(&self) -> Color {
        self.lighten(ACTIVE_SHIFT)
    }
}

// Half-way cases round toward positive infinity, so -25.5 becomes -25.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = TitlebarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s.trim())
    }
}

impl TryFrom<String> for Color {
    type Error = TitlebarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.hex()
    }
}

/// Lighten / darken a six-digit hex color code.
///
/// Returns the adjusted color as `#rrggbb`. Fails on anything but six hex
/// digits, and on a `percent` outside `[-1, 1]`.
pub fn lighten(color: &str, percent: f64) -> TitlebarResult<String> {
    if !percent.is_finite() || !(-1.0..=1.0).contains(&percent) {
        return Err(TitlebarError::InvalidPercent(percent));
    }
    Ok(Color::from_hex(color)?.lighten(percent).hex())
}

/// Colors driving the generated style sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Bar background
    pub bg_primary: Color,
    /// Dropdown background
    pub bg_secondary: Color,
    /// Bar text
    pub font_primary: Color,
    /// Dropdown text
    pub font_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_primary: Color::WHITE,
            bg_secondary: Color::WHITE,
            font_primary: Color::BLACK,
            font_secondary: Color::BLACK,
        }
    }
}

impl Theme {
    /// Theme built from a single background/foreground pair, used for both
    /// the bar and its dropdowns
    pub fn from_pair(background: Color, color: Color) -> Self {
        Self {
            bg_primary: background,
            bg_secondary: background,
            font_primary: color,
            font_secondary: color,
        }
    }
}
