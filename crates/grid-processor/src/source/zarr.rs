//! Zarr V3 grid store on the local filesystem.
//!
//! Layout: one array per field and quality level at `/{field}/{quality}`,
//! shaped `[time, rows, cols]` of `f32`, with an integer `time_origin`
//! attribute giving the time index of the first slice.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};
use zarrs::array::Array;
use zarrs::array_subset::ArraySubset;
use zarrs_filesystem::FilesystemStore;

use crate::config::GridSourceConfig;
use crate::downsample::{downsample_levels, DownsampleMethod};
use crate::error::{GridProcessorError, Result};
use crate::source::GridSource;
use crate::types::GridField;

/// Attribute holding the time index of slice 0.
pub const TIME_ORIGIN_ATTR: &str = "time_origin";

/// Reads daily fields from a Zarr store.
#[derive(Clone)]
pub struct ZarrGridSource {
    store: Arc<FilesystemStore>,
    fallback_downsample: DownsampleMethod,
}

impl ZarrGridSource {
    /// Open the store rooted at `config.store_path`.
    pub fn open(config: &GridSourceConfig) -> Result<Self> {
        let store = FilesystemStore::new(&config.store_path)
            .map_err(|e| GridProcessorError::open_failed(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            fallback_downsample: config.fallback_downsample,
        })
    }

    fn array_path(field: &str, quality: u32) -> String {
        format!("/{}/{}", field, quality)
    }

    /// Blocking read of one slice.
    fn read_sync(
        store: Arc<FilesystemStore>,
        field: &str,
        time: i64,
        quality: u32,
        method: DownsampleMethod,
    ) -> Result<GridField> {
        match Array::open(store.clone(), &Self::array_path(field, quality)) {
            Ok(array) => read_slice(&array, field, time),
            Err(e) if quality > 0 => {
                // No stored level; build it from the finest one.
                debug!(
                    field = %field,
                    quality = quality,
                    error = %e,
                    "Quality level missing, downsampling level 0"
                );
                let array = Array::open(store, &Self::array_path(field, 0))
                    .map_err(|_| GridProcessorError::NotFound(field.to_string()))?;
                let grid = downsample_levels(read_slice(&array, field, time)?, quality, method);
                if grid.is_empty() {
                    return Err(GridProcessorError::read_failed(format!(
                        "quality {} is too coarse for {}",
                        quality, field
                    )));
                }
                Ok(grid)
            }
            Err(_) => Err(GridProcessorError::NotFound(field.to_string())),
        }
    }
}

/// Read the `[rows, cols]` slice for `time` from a `[time, rows, cols]` array.
fn read_slice(array: &Array<FilesystemStore>, field: &str, time: i64) -> Result<GridField> {
    let shape = array.shape();
    if shape.len() != 3 {
        return Err(GridProcessorError::invalid_metadata(format!(
            "{} has {} dimensions, expected 3",
            field,
            shape.len()
        )));
    }
    let (steps, height, width) = (shape[0], shape[1], shape[2]);

    let origin = array
        .attributes()
        .get(TIME_ORIGIN_ATTR)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| {
            GridProcessorError::invalid_metadata(format!(
                "{} is missing integer attribute {}",
                field, TIME_ORIGIN_ATTR
            ))
        })?;

    let end = origin + steps as i64;
    if time < origin || time >= end {
        return Err(GridProcessorError::TimeOutOfRange {
            field: field.to_string(),
            time,
            start: origin,
            end,
        });
    }
    let index = (time - origin) as u64;

    let subset = ArraySubset::new_with_start_shape(vec![index, 0, 0], vec![1, height, width])
        .map_err(|e| GridProcessorError::read_failed(e.to_string()))?;

    let data: Vec<f32> = array
        .retrieve_array_subset_elements(&subset)
        .map_err(|e| GridProcessorError::read_failed(e.to_string()))?;

    GridField::new(data, width as usize, height as usize)
        .map_err(|e| GridProcessorError::read_failed(e.to_string()))
}

#[async_trait]
impl GridSource for ZarrGridSource {
    #[instrument(skip(self), fields(backend = "zarr"))]
    async fn read(&self, field: &str, time: i64, quality: u32) -> Result<GridField> {
        let store = self.store.clone();
        let field_owned = field.to_string();
        let method = self.fallback_downsample;

        tokio::task::spawn_blocking(move || {
            Self::read_sync(store, &field_owned, time, quality, method)
        })
        .await
        .map_err(|e| GridProcessorError::read_failed(format!("read task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "zarr"
    }
}
