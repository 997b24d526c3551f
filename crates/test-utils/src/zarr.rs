//! Writer for small Zarr V3 grid stores used in tests.
//!
//! Produces the layout the grid store reader expects: one `[time, rows,
//! cols]` float32 array per field and quality level at `/{field}/{quality}`
//! with a `time_origin` attribute.

use std::path::Path;
use std::sync::Arc;

use zarrs::array::{ArrayBuilder, DataType, FillValue};
use zarrs::array_subset::ArraySubset;
use zarrs_filesystem::FilesystemStore;

/// Write one field at one quality level.
///
/// `slices[i]` is the row-major `width x height` grid for time index
/// `time_origin + i`.
pub fn write_zarr_field(
    root: &Path,
    field: &str,
    quality: u32,
    time_origin: i64,
    slices: &[Vec<f32>],
    width: usize,
    height: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(root)?;
    let store = Arc::new(FilesystemStore::new(root)?);
    let path = format!("/{}/{}", field, quality);

    // One chunk per day, no compression
    let array = ArrayBuilder::new(
        vec![slices.len() as u64, height as u64, width as u64],
        DataType::Float32,
        vec![1, height as u64, width as u64].try_into()?,
        FillValue::from(f32::NAN),
    )
    .attributes({
        let mut attrs = serde_json::Map::new();
        attrs.insert("time_origin".to_string(), serde_json::json!(time_origin));
        attrs.insert("field".to_string(), serde_json::json!(field));
        attrs
    })
    .build(store.clone(), &path)?;

    array.store_metadata()?;

    for (i, slice) in slices.iter().enumerate() {
        let subset = ArraySubset::new_with_start_shape(
            vec![i as u64, 0, 0],
            vec![1, height as u64, width as u64],
        )?;
        array.store_array_subset_elements(&subset, slice.as_slice())?;
    }

    Ok(())
}
