//! Mean of a change field over a country's grid cells.

use boundaries::CountryPolygon;
use geo::coordinate_position::{CoordPos, CoordinatePosition};
use geo::Coord;
use grid_processor::DeltaField;

/// Mean change over the cells whose centre lies inside or on the boundary
/// of `country`.
///
/// NaN cells are skipped. A selection with no cells, or only NaN cells,
/// yields exactly `0.0`.
pub fn mean_change(delta: &DeltaField, country: &CountryPolygon) -> f64 {
    let Some(bounds) = country.bounds() else {
        return 0.0;
    };
    let (rows, cols) = candidate_window(delta, bounds.min(), bounds.max());

    let mut sum = 0.0f64;
    let mut count = 0usize;

    for row in rows {
        let lat = delta.row_latitude(row);
        if lat < bounds.min().y || lat > bounds.max().y {
            continue;
        }
        for col in cols.clone() {
            let lon = delta.col_longitude(col);
            if lon < bounds.min().x || lon > bounds.max().x {
                continue;
            }
            let position = country.geometry.coordinate_position(&Coord { x: lon, y: lat });
            if !matches!(position, CoordPos::Inside | CoordPos::OnBoundary) {
                continue;
            }
            match delta.get(row, col) {
                Some(value) if !value.is_nan() => {
                    sum += value;
                    count += 1;
                }
                _ => {}
            }
        }
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Row and column ranges that can hold cells within the bounding box,
/// padded by one cell on each side. Callers still test each cell exactly.
fn candidate_window(
    delta: &DeltaField,
    min: Coord<f64>,
    max: Coord<f64>,
) -> (std::ops::Range<usize>, std::ops::Range<usize>) {
    let (height, width) = delta.shape();
    if height == 0 || width == 0 {
        return (0..0, 0..0);
    }

    let lat_step = if height > 1 {
        180.0 / (height - 1) as f64
    } else {
        180.0
    };
    let lon_step = if width > 1 {
        360.0 / (width - 1) as f64
    } else {
        360.0
    };

    let index_range = |lo: f64, hi: f64, len: usize| {
        let start = (lo.floor() as i64 - 1).clamp(0, len as i64) as usize;
        let end = (hi.ceil() as i64 + 2).clamp(0, len as i64) as usize;
        start..end.max(start)
    };

    // Rows run north to south.
    let rows = index_range((90.0 - max.y) / lat_step, (90.0 - min.y) / lat_step, height);
    let cols = index_range((min.x + 180.0) / lon_step, (max.x + 180.0) / lon_step, width);
    (rows, cols)
}
