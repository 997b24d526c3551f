//! Downsampling used to serve coarser quality levels.
//!
//! Each quality step halves both grid dimensions, rounding down for odd
//! sizes.

use serde::{Deserialize, Serialize};

use crate::types::GridField;

/// Method used to downsample grid data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMethod {
    /// Average of the valid cells in a 2x2 block
    #[default]
    Mean,
    /// Top-left value of 2x2 block
    Nearest,
}

impl DownsampleMethod {
    /// Parse from string (case-insensitive), defaulting to Mean.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "nearest" => Self::Nearest,
            _ => Self::Mean,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Nearest => "nearest",
        }
    }
}

/// Downsample a grid by a factor of 2.
///
/// Returns an empty grid when either dimension is below 2.
pub fn downsample_2x(grid: &GridField, method: DownsampleMethod) -> GridField {
    let width = grid.width();
    let new_width = width / 2;
    let new_height = grid.height() / 2;

    if new_width == 0 || new_height == 0 {
        return GridField::filled(0, 0, f32::NAN);
    }

    let data = grid.data();
    let mut output = vec![f32::NAN; new_width * new_height];

    for out_y in 0..new_height {
        for out_x in 0..new_width {
            let in_x = out_x * 2;
            let in_y = out_y * 2;

            let v00 = data[in_y * width + in_x];
            let v10 = data[in_y * width + in_x + 1];
            let v01 = data[(in_y + 1) * width + in_x];
            let v11 = data[(in_y + 1) * width + in_x + 1];

            output[out_y * new_width + out_x] = match method {
                DownsampleMethod::Mean => mean_of_block(v00, v10, v01, v11),
                DownsampleMethod::Nearest => v00,
            };
        }
    }

    GridField::from_parts(output, new_width, new_height)
}

/// Apply `levels` successive 2x reductions.
pub fn downsample_levels(grid: GridField, levels: u32, method: DownsampleMethod) -> GridField {
    let mut current = grid;
    for _ in 0..levels {
        if current.is_empty() {
            break;
        }
        current = downsample_2x(&current, method);
    }
    current
}

/// Mean of the non-NaN values in a 2x2 block; NaN if none are valid.
#[inline]
fn mean_of_block(v00: f32, v10: f32, v01: f32, v11: f32) -> f32 {
    let mut sum = 0.0f32;
    let mut count = 0;

    for v in [v00, v10, v01, v11] {
        if !v.is_nan() {
            sum += v;
            count += 1;
        }
    }

    if count == 0 {
        f32::NAN
    } else {
        sum / count as f32
    }
}
