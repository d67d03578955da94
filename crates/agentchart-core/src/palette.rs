// File: crates/agentchart-core/src/palette.rs
// Summary: RGB colors and per-metric palette selection for stacked layers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `#rgb` (leading `#` optional).
    pub fn parse_hex(s: &str) -> Result<Self, LayoutError> {
        let bad = || LayoutError::InvalidColor(s.to_string());
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            3 => {
                let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|_| bad());
                Ok(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            _ => Err(bad()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

pub const MEMORY_PALETTE: [Color; 5] = [
    Color::rgb(0x71, 0xd5, 0xc3),
    Color::rgb(0x00, 0x9d, 0xb2),
    Color::rgb(0x21, 0xd5, 0xc3),
    Color::rgb(0x98, 0xe1, 0xd4),
    Color::rgb(0xf0, 0xe0, 0xa0),
];

pub const LOAD_PALETTE: [Color; 3] = [
    Color::rgb(0xf3, 0x73, 0x72),
    Color::rgb(0xfa, 0x94, 0x69),
    Color::rgb(0xfd, 0xbb, 0x5d),
];

/// The 20-color categorical fallback (four shades of five hues).
pub const CATEGORY20C: [Color; 20] = [
    Color::rgb(0x31, 0x82, 0xbd),
    Color::rgb(0x6b, 0xae, 0xd6),
    Color::rgb(0x9e, 0xca, 0xe1),
    Color::rgb(0xc6, 0xdb, 0xef),
    Color::rgb(0xe6, 0x55, 0x0d),
    Color::rgb(0xfd, 0x8d, 0x3c),
    Color::rgb(0xfd, 0xae, 0x6b),
    Color::rgb(0xfd, 0xd0, 0xa2),
    Color::rgb(0x31, 0xa3, 0x54),
    Color::rgb(0x74, 0xc4, 0x76),
    Color::rgb(0xa1, 0xd9, 0x9b),
    Color::rgb(0xc7, 0xe9, 0xc0),
    Color::rgb(0x75, 0x6b, 0xb1),
    Color::rgb(0x9e, 0x9a, 0xc8),
    Color::rgb(0xbc, 0xbd, 0xdc),
    Color::rgb(0xda, 0xda, 0xeb),
    Color::rgb(0x63, 0x63, 0x63),
    Color::rgb(0x96, 0x96, 0x96),
    Color::rgb(0xbd, 0xbd, 0xbd),
    Color::rgb(0xd9, 0xd9, 0xd9),
];

/// What to do when there are more layers than colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Overflow {
    #[default]
    Cycle,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    overflow: Overflow,
}

impl Palette {
    /// An empty color list falls back to `CATEGORY20C`.
    pub fn new(colors: Vec<Color>, overflow: Overflow) -> Self {
        let colors = if colors.is_empty() { CATEGORY20C.to_vec() } else { colors };
        Self { colors, overflow }
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn colors(&self) -> &[Color] { &self.colors }

    /// Colors for `n` layers, in layer order.
    pub fn assign(&self, n: usize) -> Result<Vec<Color>, LayoutError> {
        let len = self.colors.len();
        if n > len && self.overflow == Overflow::Error {
            return Err(LayoutError::PaletteExhausted { needed: n, available: len });
        }
        Ok((0..n).map(|i| self.colors[i % len]).collect())
    }
}

/// Palette for a metric: fixed palettes for `memory` and `load`, otherwise
/// the caller's colors (category20c when none are given).
pub fn palette_for(datapoint: &str, caller: Option<Vec<Color>>) -> Palette {
    let colors = match datapoint {
        "memory" => MEMORY_PALETTE.to_vec(),
        "load" => LOAD_PALETTE.to_vec(),
        _ => caller.unwrap_or_default(),
    };
    Palette::new(colors, Overflow::default())
}
