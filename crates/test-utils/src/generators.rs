//! Test data generators for creating synthetic climate-like grids.
//!
//! Grids are full-globe, row-major, top row first, matching the layout the
//! grid store serves.

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50); // 10 * 5
/// assert_eq!(grid[0], 0.0);   // col=0, row=0 -> 0*1000 + 0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0 -> 1*1000 + 0
/// assert_eq!(grid[10], 1.0);  // col=0, row=1 -> 0*1000 + 1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f32);
        }
    }
    data
}

/// Creates a near-surface air temperature grid in Kelvin.
///
/// Warm at the equator (about 300K), cold at the poles (about 240K), with
/// `offset` added everywhere so successive years can be made to warm.
pub fn create_temperature_grid(width: usize, height: usize, offset: f32) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat_factor = latitude_factor(row, height);
        for _col in 0..width {
            data.push(240.0 + 60.0 * lat_factor + offset);
        }
    }
    data
}

/// Creates a relative humidity grid in percent.
///
/// Humid at the equator (90%) and dry at the poles (30%).
pub fn create_humidity_grid(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        let lat_factor = latitude_factor(row, height);
        for _col in 0..width {
            data.push(30.0 + 60.0 * lat_factor);
        }
    }
    data
}

/// Creates a grid filled with a single value.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<f32> {
    vec![value; width * height]
}

/// Creates a grid with NaN values at specified positions.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `value` - Value of every other cell
/// * `nan_positions` - List of (col, row) positions that should be NaN
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    value: f32,
    nan_positions: &[(usize, usize)],
) -> Vec<f32> {
    let mut data = vec![value; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f32::NAN;
        }
    }
    data
}

/// 1 at the equator, 0 at either pole.
fn latitude_factor(row: usize, height: usize) -> f32 {
    if height < 2 {
        return 1.0;
    }
    let lat = 90.0 - row as f32 * 180.0 / (height - 1) as f32;
    1.0 - lat.abs() / 90.0
}
