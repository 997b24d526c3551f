//! Inferno colormap and its indexed palette.

use serde::{Deserialize, Serialize};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

/// Inferno sampled at t = 0.0, 0.1, ..., 1.0.
const INFERNO_ANCHORS: [(u8, u8, u8); 11] = [
    (0, 0, 4),
    (22, 11, 57),
    (66, 10, 104),
    (106, 23, 110),
    (147, 38, 103),
    (188, 55, 84),
    (221, 81, 58),
    (243, 120, 25),
    (252, 165, 10),
    (246, 215, 70),
    (252, 255, 164),
];

/// Number of opaque shades in the palette.
pub const SHADES: usize = 255;

/// Palette index reserved for missing cells.
pub const TRANSPARENT_INDEX: u8 = SHADES as u8;

/// Inferno color for `t` in [0, 1]; values outside are clamped.
pub fn inferno(t: f32) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (INFERNO_ANCHORS.len() - 1) as f32;
    let lower = (scaled.floor() as usize).min(INFERNO_ANCHORS.len() - 2);
    let (r0, g0, b0) = INFERNO_ANCHORS[lower];
    let (r1, g1, b1) = INFERNO_ANCHORS[lower + 1];
    interpolate_color(
        Color::new(r0, g0, b0, 255),
        Color::new(r1, g1, b1, 255),
        scaled - lower as f32,
    )
}

/// Linear color interpolation
fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;
    let mix = |a: u8, b: u8| ((a as f32 * t_inv) + (b as f32 * t)).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Palette of [`SHADES`] inferno colors followed by one transparent entry.
pub fn inferno_palette() -> Vec<(u8, u8, u8, u8)> {
    let mut palette: Vec<(u8, u8, u8, u8)> = (0..SHADES)
        .map(|i| inferno(i as f32 / (SHADES - 1) as f32).to_tuple())
        .collect();
    palette.push(Color::transparent().to_tuple());
    palette
}

/// Palette index for a normalized value; NaN maps to [`TRANSPARENT_INDEX`].
#[inline]
pub fn palette_index(norm: f32) -> u8 {
    if norm.is_nan() {
        return TRANSPARENT_INDEX;
    }
    (norm.clamp(0.0, 1.0) * (SHADES - 1) as f32).round() as u8
}
