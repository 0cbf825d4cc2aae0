//! Sizes, points and rectangles shared by the mapping and rendering code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PipetteError, Result};

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are non-zero.
    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Centre of the grid, in the same coordinate space.
    pub fn centre(self) -> Point {
        Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parse a "WxH" dimension string.
impl FromStr for Size {
    type Err = PipetteError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
        if parts.len() != 2 {
            return Err(PipetteError::Parse {
                message: format!("Invalid dimensions '{}': expected WxH (e.g. 1280x800)", s),
                help: Some("Use the format WxH, for example: 1920x1080".to_string()),
            });
        }

        let w: u32 = parts[0].trim().parse().map_err(|_| PipetteError::Parse {
            message: format!("Invalid width '{}' in dimensions '{}'", parts[0], s),
            help: Some("Width must be a positive integer".to_string()),
        })?;

        let h: u32 = parts[1].trim().parse().map_err(|_| PipetteError::Parse {
            message: format!("Invalid height '{}' in dimensions '{}'", parts[1], s),
            help: Some("Height must be a positive integer".to_string()),
        })?;

        let size = Size::new(w, h);
        if !size.is_positive() {
            return Err(PipetteError::Parse {
                message: format!("Dimensions must be non-zero, got {}", size),
                help: Some("Both width and height must be at least 1".to_string()),
            });
        }

        Ok(size)
    }
}

/// A pointer position. Fractional so that scaled coordinates keep precision.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Parse an "X,Y" position.
impl FromStr for Point {
    type Err = PipetteError;

    fn from_str(s: &str) -> Result<Self> {
        let (x, y) = s.split_once(',').ok_or_else(|| PipetteError::Parse {
            message: format!("Invalid position '{}': expected X,Y", s),
            help: Some("Use the format X,Y, for example: 120,48".to_string()),
        })?;

        let axis = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| PipetteError::Parse {
                    message: format!("Invalid coordinate '{}' in position '{}'", v, s),
                    help: None,
                })
        };

        Ok(Point::new(axis(x)?, axis(y)?))
    }
}

/// An integer pixel position inside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PixelPos {
    pub x: u32,
    pub y: u32,
}

impl PixelPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PixelPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Axis-aligned rectangle with fractional origin and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}
