//! Colour type, parsing and display formats.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{PipetteError, Result};

/// An opaque RGB colour read from a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent, all rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HslColour {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl Colour {
    /// Create a new colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build from the first three channels of an RGBA pixel; alpha is ignored.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::rgb(rgba[0], rgba[1], rgba[2])
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// `#RRGGBB`, uppercase and zero-padded.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// CSS functional notation, e.g. `rgb(255, 0, 0)`.
    pub fn to_css_rgb(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Convert to HSL, rounded to whole degrees and percent.
    ///
    /// Hue is taken as a fraction of a turn, then scaled by 360 and rounded
    /// half up. A hue just below a full turn rounds to 360.
    pub fn to_hsl(self) -> HslColour {
        let [r, g, b] = [self.r, self.g, self.b].map(|c| c as f64 / 255.0);

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let lightness = (max + min) / 2.0;

        let (hue, saturation) = if max == min {
            (0.0, 0.0)
        } else {
            let d = max - min;
            let saturation = if lightness > 0.5 {
                d / (2.0 - max - min)
            } else {
                d / (max + min)
            };
            let turn = if max == r {
                ((g - b) / d + if g < b { 6.0 } else { 0.0 }) / 6.0
            } else if max == g {
                ((b - r) / d + 2.0) / 6.0
            } else {
                ((r - g) / d + 4.0) / 6.0
            };
            (turn, saturation)
        };

        HslColour {
            hue: round_half_up(hue * 360.0) as u16,
            saturation: round_half_up(saturation * 100.0) as u8,
            lightness: round_half_up(lightness * 100.0) as u8,
        }
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    ///
    /// The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse `r,g,b` or `rgb(r, g, b)` with decimal channels.
    pub fn from_channels(s: &str) -> Result<Self> {
        let s = s.trim();
        let inner = s
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(s);

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(PipetteError::Parse {
                message: format!("Invalid RGB colour: {}", s),
                help: Some("Use r,g,b with each channel in 0-255, e.g. 255,0,0".to_string()),
            });
        }

        let channel = |part: &str| {
            part.parse::<u8>().map_err(|_| PipetteError::Parse {
                message: format!("Invalid channel '{}' in {}", part, s),
                help: Some("Channels must be integers in 0-255".to_string()),
            })
        };

        Ok(Self::rgb(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

impl FromStr for Colour {
    type Err = PipetteError;

    fn from_str(s: &str) -> Result<Self> {
        if s.contains(',') {
            Self::from_channels(s)
        } else {
            Self::from_hex(s)
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for HslColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }
}

fn invalid_hex(s: &str) -> PipetteError {
    PipetteError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PipetteError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PipetteError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
