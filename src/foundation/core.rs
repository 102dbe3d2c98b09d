use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{QuoteError, QuoteResult};

pub use kurbo::{Point, Size};

/// Straight (opaque) RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Vertical gradient endpoints: `top` at row 0, `bottom` at the last row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub top: Rgb8,
    pub bottom: Rgb8,
}

impl ColorPair {
    pub const fn new(top: Rgb8, bottom: Rgb8) -> Self {
        Self { top, bottom }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub const CARD: Self = Self {
        width: 1200,
        height: 675,
    };

    pub fn new(width: u32, height: u32) -> QuoteResult<Self> {
        if width == 0 || height == 0 {
            return Err(QuoteError::validation("canvas dimensions must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(QuoteError::validation(
                "canvas dimensions must fit in 16 bits",
            ));
        }
        Ok(Self { width, height })
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::CARD
    }
}

/// Where the text block sits between the top and bottom edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VAlign {
    pub const ALL: [Self; 3] = [Self::Top, Self::Center, Self::Bottom];

    pub fn label(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Center => "Center",
            Self::Bottom => "Bottom",
        }
    }
}

impl FromStr for VAlign {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Self::Top),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "bottom" => Ok(Self::Bottom),
            other => Err(QuoteError::validation(format!(
                "vertical alignment must be top, center or bottom (got '{other}')"
            ))),
        }
    }
}

/// Per-line horizontal alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl HAlign {
    pub const ALL: [Self; 3] = [Self::Left, Self::Center, Self::Right];

    pub fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
        }
    }
}

impl FromStr for HAlign {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "center" | "centre" | "middle" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(QuoteError::validation(format!(
                "horizontal alignment must be left, center or right (got '{other}')"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
