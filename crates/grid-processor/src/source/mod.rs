//! Grid store backends.

mod memory;
mod zarr;

pub use memory::MemoryGridSource;
pub use zarr::ZarrGridSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::GridField;

/// A store of daily 2D fields addressed by field identifier, time index and
/// quality level.
#[async_trait]
pub trait GridSource: Send + Sync {
    /// Read one full-globe field.
    ///
    /// # Arguments
    /// * `field` - Store field identifier, e.g. `tas_day_ACCESS-CM2_historical_r1i1p1f1_gn`
    /// * `time` - Time index of the day
    /// * `quality` - Resolution level, 0 = finest
    ///
    /// # Errors
    /// Unknown field, out-of-range time index, or a failed store read.
    async fn read(&self, field: &str, time: i64, quality: u32) -> Result<GridField>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}
