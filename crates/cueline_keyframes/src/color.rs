// SPDX-License-Identifier: MIT OR Apache-2.0
//! `#rrggbb` colors and channel blending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors from parsing a hex color
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// Missing leading `#`
    #[error("Color must start with '#': {0:?}")]
    MissingHash(String),
    /// Not exactly six hex digits
    #[error("Color must have six hex digits: {0:?}")]
    BadLength(String),
    /// Non-hex character
    #[error("Invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Black, the last-resort fallback
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    /// White
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Create from channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `hex`, or return `default` when it is malformed
    pub fn parse_or(hex: &str, default: Rgb) -> Rgb {
        hex.parse().unwrap_or(default)
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Blend each channel by `t`, rounding and clamping to `0..=255`.
    ///
    /// `t` is used as given; callers pass a linear or an eased ratio.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t } else { 0.0 };
        let mut out = [0u8; 3];
        for (i, channel) in out.iter_mut().enumerate() {
            let a = f64::from(self.0[i]);
            let b = f64::from(other.0[i]);
            *channel = (a + (b - a) * t).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_string()));
        };
        if digits.len() != 6 {
            return Err(ColorParseError::BadLength(s.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Two-stop gradient with a straight linear ratio; `t` is clamped to `[0, 1]`.
pub fn gradient(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    from.lerp(to, t)
}

/// [`gradient`] over hex strings; malformed stops use `default`.
pub fn gradient_hex(from: &str, to: &str, t: f64, default: Rgb) -> String {
    gradient(Rgb::parse_or(from, default), Rgb::parse_or(to, default), t).to_hex()
}
