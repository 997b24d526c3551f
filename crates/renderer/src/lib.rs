//! Image rendering for climate fields.
//!
//! Implements the global heatmap:
//! - Orientation and padding of equirectangular grids
//! - Percentile-based normalization
//! - Inferno colormap with transparent missing data
//! - Indexed PNG encoding

pub mod colormap;
pub mod error;
pub mod heatmap;
pub mod png;

pub use colormap::{inferno, inferno_palette, palette_index, Color, TRANSPARENT_INDEX};
pub use error::{RenderError, Result};
pub use heatmap::{render_heatmap, HeatmapOptions};
pub use png::create_png_indexed;
