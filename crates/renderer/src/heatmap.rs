//! Global heatmap rendering.
//!
//! Input grids are row-major with row 0 at the north pole and column 0 at
//! -180°. The image is flipped vertically and rolled half a width to the
//! right before padding, normalization and colormapping.
//!
//! When every finite cell has the same value the range is degenerate:
//! finite cells take the lowest shade and NaN cells stay transparent,
//! rather than every cell, NaN included, being painted as zero.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colormap::{inferno_palette, palette_index};
use crate::error::{RenderError, Result};
use crate::png::create_png_indexed;

/// Layout and scaling knobs for [`render_heatmap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapOptions {
    /// NaN rows added above the image.
    pub pad_top: usize,
    /// NaN rows added below the image.
    pub pad_bottom: usize,
    /// Percentile mapped to the bottom of the colormap.
    pub low_percentile: f64,
    /// Percentile mapped to the top of the colormap.
    pub high_percentile: f64,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            pad_top: 0,
            pad_bottom: 120,
            low_percentile: 2.0,
            high_percentile: 98.0,
        }
    }
}

/// Flip rows, then roll columns right by `width / 2`.
pub fn orient(data: &[f32], width: usize, height: usize) -> Vec<f32> {
    let shift = width / 2;
    let mut out = Vec::with_capacity(width * height);
    for row in (0..height).rev() {
        let src = &data[row * width..(row + 1) * width];
        for col in 0..width {
            out.push(src[(col + width - shift) % width]);
        }
    }
    out
}

/// Add NaN rows above and below. Returns the new height.
pub fn pad_rows(
    data: Vec<f32>,
    width: usize,
    height: usize,
    top: usize,
    bottom: usize,
) -> (Vec<f32>, usize) {
    if top == 0 && bottom == 0 {
        return (data, height);
    }
    let mut out = Vec::with_capacity(width * (height + top + bottom));
    out.resize(width * top, f32::NAN);
    out.extend_from_slice(&data);
    out.resize(width * (top + height + bottom), f32::NAN);
    (out, top + height + bottom)
}

/// Percentile `q` (0-100) of sorted values, linearly interpolated between
/// order statistics.
pub fn percentile(sorted: &[f32], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let a = f64::from(sorted[lo]);
    let b = f64::from(sorted[hi]);
    a + (b - a) * (pos - lo as f64)
}

/// Color range from the finite values; `(0, 1)` if there are none.
pub fn robust_range(data: &[f32], low: f64, high: f64) -> (f64, f64) {
    let mut finite: Vec<f32> = data.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return (0.0, 1.0);
    }
    finite.par_sort_unstable_by(|a, b| a.total_cmp(b));
    (percentile(&finite, low), percentile(&finite, high))
}

/// Scale into [0, 1]. A degenerate range gives zeros; NaN stays NaN.
pub fn normalize(data: &[f32], vmin: f64, vmax: f64) -> Vec<f32> {
    let span = vmax - vmin;
    data.par_iter()
        .map(|&v| {
            if v.is_nan() {
                f32::NAN
            } else if span > 0.0 {
                ((f64::from(v) - vmin) / span).clamp(0.0, 1.0) as f32
            } else {
                0.0
            }
        })
        .collect()
}

/// Render a global field to an indexed PNG.
pub fn render_heatmap(
    data: &[f32],
    width: usize,
    height: usize,
    options: &HeatmapOptions,
) -> Result<Vec<u8>> {
    if data.len() != width * height {
        return Err(RenderError::SizeMismatch {
            expected: width * height,
            found: data.len(),
        });
    }

    let oriented = orient(data, width, height);
    let (padded, out_height) =
        pad_rows(oriented, width, height, options.pad_top, options.pad_bottom);

    let (vmin, vmax) = robust_range(&padded, options.low_percentile, options.high_percentile);
    let norm = normalize(&padded, vmin, vmax);
    let indices: Vec<u8> = norm.par_iter().map(|&v| palette_index(v)).collect();

    debug!(
        width = width,
        height = out_height,
        vmin = vmin,
        vmax = vmax,
        "Rendering heatmap"
    );

    create_png_indexed(width, out_height, &inferno_palette(), &indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orient_flips_and_rolls() {
        // 4x2:
        // 0 1 2 3
        // 4 5 6 7
        let data: Vec<f32> = (0..8).map(|v| v as f32).collect();
        let out = orient(&data, 4, 2);
        assert_eq!(out, vec![6.0, 7.0, 4.0, 5.0, 2.0, 3.0, 0.0, 1.0]);
    }

    #[test]
    fn test_orient_odd_width() {
        // Roll by 1 for width 3: [a b c] -> [c a b]
        let out = orient(&[1.0, 2.0, 3.0], 3, 1);
        assert_eq!(out, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_pad_rows() {
        let (out, h) = pad_rows(vec![1.0, 2.0], 2, 1, 1, 2);
        assert_eq!(h, 4);
        assert_eq!(out.len(), 8);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..4], &[1.0, 2.0]);
        assert!(out[4..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_percentile_linear() {
        let sorted: Vec<f32> = (1..=5).map(|v| v as f32).collect();
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert!((percentile(&sorted, 2.0) - 1.08).abs() < 1e-9);
        assert!((percentile(&sorted, 98.0) - 4.92).abs() < 1e-9);
    }

    #[test]
    fn test_robust_range_ignores_non_finite() {
        let data = [f32::NAN, 1.0, f32::INFINITY, 3.0, f32::NEG_INFINITY];
        let (lo, hi) = robust_range(&data, 0.0, 100.0);
        assert_eq!((lo, hi), (1.0, 3.0));
        assert_eq!(robust_range(&[f32::NAN; 3], 2.0, 98.0), (0.0, 1.0));
    }

    #[test]
    fn test_normalize() {
        let out = normalize(&[0.0, 5.0, 10.0, 20.0, f32::NAN], 0.0, 10.0);
        assert_eq!(&out[..4], &[0.0, 0.5, 1.0, 1.0]);
        assert!(out[4].is_nan());

        let flat = normalize(&[4.0, 4.0, f32::NAN], 4.0, 4.0);
        assert_eq!(&flat[..2], &[0.0, 0.0]);
        assert!(flat[2].is_nan());
    }

    #[test]
    fn test_render_size_mismatch() {
        let err = render_heatmap(&[1.0; 3], 2, 2, &HeatmapOptions::default()).unwrap_err();
        assert!(matches!(err, RenderError::SizeMismatch { .. }));
    }
}
