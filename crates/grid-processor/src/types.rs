//! Core grid types.

use climate_common::ClimateError;

/// A full-globe equirectangular raster.
///
/// Values are stored row-major, top row first. Row `r` sits at latitude
/// `90 - r * 180 / (H - 1)` and column `c` at longitude
/// `-180 + c * 360 / (W - 1)`, so the first and last rows/columns lie on
/// the poles and the antimeridian. Missing cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct GridField<T = f32> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

/// Accumulated change over a date range.
pub type DeltaField = GridField<f64>;

impl<T: Copy> GridField<T> {
    /// Wrap row-major data.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> Result<Self, ClimateError> {
        if data.len() != width * height {
            return Err(ClimateError::Internal(format!(
                "grid data has {} values, expected {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Callers guarantee `data.len() == width * height`.
    pub(crate) fn from_parts(data: Vec<T>, width: usize, height: usize) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// A grid with every cell set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (height, width)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row >= self.height || col >= self.width {
            return None;
        }
        self.data.get(row * self.width + col).copied()
    }

    /// Fail unless both grids have the same (H, W).
    pub fn ensure_same_shape<U: Copy>(&self, other: &GridField<U>) -> Result<(), ClimateError> {
        if self.shape() != other.shape() {
            return Err(ClimateError::ShapeMismatch {
                expected: self.shape(),
                found: other.shape(),
            });
        }
        Ok(())
    }

    /// Combine two co-registered grids cell by cell.
    pub fn zip_with<U: Copy, V: Copy>(
        &self,
        other: &GridField<U>,
        f: impl Fn(T, U) -> V,
    ) -> Result<GridField<V>, ClimateError> {
        self.ensure_same_shape(other)?;
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(GridField {
            data,
            width: self.width,
            height: self.height,
        })
    }

    /// Latitude of a row centre, in degrees.
    pub fn row_latitude(&self, row: usize) -> f64 {
        if self.height < 2 {
            return 90.0;
        }
        90.0 - row as f64 * (180.0 / (self.height - 1) as f64)
    }

    /// Longitude of a column centre, in degrees.
    pub fn col_longitude(&self, col: usize) -> f64 {
        if self.width < 2 {
            return -180.0;
        }
        -180.0 + col as f64 * (360.0 / (self.width - 1) as f64)
    }
}

impl GridField<f32> {
    /// A zero-filled accumulation grid with this grid's shape.
    pub fn zeros_delta(&self) -> DeltaField {
        GridField::filled(self.width, self.height, 0.0)
    }
}

impl GridField<f64> {
    /// Add `later - earlier` into this accumulator.
    ///
    /// The difference is taken in single precision, as the source grids are
    /// stored, and widened before it is added.
    pub fn accumulate_difference(
        &mut self,
        earlier: &GridField<f32>,
        later: &GridField<f32>,
    ) -> Result<(), ClimateError> {
        self.ensure_same_shape(earlier)?;
        earlier.ensure_same_shape(later)?;
        for ((sum, &a), &b) in self
            .data
            .iter_mut()
            .zip(earlier.data.iter())
            .zip(later.data.iter())
        {
            *sum += f64::from(b - a);
        }
        Ok(())
    }
}
