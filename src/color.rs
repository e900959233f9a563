//! Colors and named palettes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Fill used for features with no joined value.
pub const NO_DATA: Rgb = Rgb { r: 0xcc, g: 0xcc, b: 0xcc };

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form for SVG/CSS, e.g. `#deebf7`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Rough saturation proxy: distance from white. Monotone in shade depth
    /// for the sequential palettes below.
    #[cfg(test)]
    pub(crate) fn depth(self) -> u32 {
        (255 - self.r as u32) + (255 - self.g as u32) + (255 - self.b as u32)
    }
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
}

const BLUES: [Rgb; 3] = [
    Rgb::new(0xde, 0xeb, 0xf7),
    Rgb::new(0x6b, 0xae, 0xd6),
    Rgb::new(0x08, 0x51, 0x9c),
];
const GREENS: [Rgb; 3] = [
    Rgb::new(0xe5, 0xf5, 0xe0),
    Rgb::new(0x74, 0xc4, 0x76),
    Rgb::new(0x00, 0x44, 0x1b),
];
const ORANGES: [Rgb; 3] = [
    Rgb::new(0xfe, 0xe6, 0xce),
    Rgb::new(0xfd, 0x8d, 0x3c),
    Rgb::new(0x7f, 0x27, 0x04),
];
const PURPLES: [Rgb; 3] = [
    Rgb::new(0xef, 0xed, 0xf5),
    Rgb::new(0x9e, 0x9a, 0xc8),
    Rgb::new(0x3f, 0x00, 0x7d),
];
const REDS: [Rgb; 3] = [
    Rgb::new(0xfe, 0xe0, 0xd2),
    Rgb::new(0xfb, 0x6a, 0x4a),
    Rgb::new(0x67, 0x00, 0x0d),
];
const VIRIDIS: [Rgb; 4] = [
    Rgb::new(0x44, 0x01, 0x54),
    Rgb::new(0x31, 0x68, 0x8e),
    Rgb::new(0x35, 0xb7, 0x79),
    Rgb::new(0xfd, 0xe7, 0x25),
];

/// A named sequential palette: anchor stops interpolated linearly in RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Blues,
    Greens,
    Oranges,
    Purples,
    Reds,
    Viridis,
}

impl Palette {
    fn stops(self) -> &'static [Rgb] {
        match self {
            Palette::Blues => &BLUES,
            Palette::Greens => &GREENS,
            Palette::Oranges => &ORANGES,
            Palette::Purples => &PURPLES,
            Palette::Reds => &REDS,
            Palette::Viridis => &VIRIDIS,
        }
    }

    /// Interpolate the palette at `t` in [0, 1] (clamped).
    pub fn interpolate(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = t.clamp(0.0, 1.0);

        let segments = (stops.len() - 1) as f64;
        let scaled = t * segments;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        let frac = scaled - i as f64;

        let (a, b) = (stops[i], stops[i + 1]);
        Rgb::new(lerp(a.r, b.r, frac), lerp(a.g, b.g, frac), lerp(a.b, b.b, frac))
    }

    /// The t = 0 color, used for empty-domain fallbacks.
    pub fn min_intensity(self) -> Rgb {
        self.stops()[0]
    }
}

impl FromStr for Palette {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "blues" => Ok(Palette::Blues),
            "greens" => Ok(Palette::Greens),
            "oranges" => Ok(Palette::Oranges),
            "purples" => Ok(Palette::Purples),
            "reds" => Ok(Palette::Reds),
            "viridis" => Ok(Palette::Viridis),
            other => Err(Error::config(format!("[color] unsupported palette {other:?}"))),
        }
    }
}
