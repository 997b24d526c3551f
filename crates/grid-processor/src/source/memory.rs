//! In-process grid store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::downsample::{downsample_levels, DownsampleMethod};
use crate::error::{GridProcessorError, Result};
use crate::source::GridSource;
use crate::types::GridField;

/// Fields held in memory at full resolution, keyed by (field, time).
///
/// Coarser quality levels are produced on request by 2x downsampling.
#[derive(Debug, Default)]
pub struct MemoryGridSource {
    fields: RwLock<HashMap<(String, i64), GridField>>,
    method: DownsampleMethod,
    reads: AtomicUsize,
}

impl MemoryGridSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: DownsampleMethod) -> Self {
        self.method = method;
        self
    }

    /// Builder-style insert.
    pub fn with_field(mut self, field: impl Into<String>, time: i64, grid: GridField) -> Self {
        self.fields.get_mut().insert((field.into(), time), grid);
        self
    }

    pub async fn insert(&self, field: impl Into<String>, time: i64, grid: GridField) {
        self.fields.write().await.insert((field.into(), time), grid);
    }

    /// Number of successful and failed reads served so far.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GridSource for MemoryGridSource {
    async fn read(&self, field: &str, time: i64, quality: u32) -> Result<GridField> {
        self.reads.fetch_add(1, Ordering::Relaxed);

        let grid = {
            let fields = self.fields.read().await;
            fields
                .get(&(field.to_string(), time))
                .cloned()
                .ok_or_else(|| GridProcessorError::NotFound(format!("{} @ {}", field, time)))?
        };

        let grid = downsample_levels(grid, quality, self.method);
        if grid.is_empty() {
            return Err(GridProcessorError::read_failed(format!(
                "quality {} is too coarse for {}",
                quality, field
            )));
        }
        Ok(grid)
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_hit_and_miss() {
        let source =
            MemoryGridSource::new().with_field("tas", 10, GridField::filled(4, 4, 280.0f32));

        let grid = source.read("tas", 10, 0).await.unwrap();
        assert_eq!(grid.shape(), (4, 4));

        let err = source.read("tas", 11, 0).await.unwrap_err();
        assert!(matches!(err, GridProcessorError::NotFound(_)));
        assert_eq!(source.read_count(), 2);
    }

    #[tokio::test]
    async fn test_quality_levels_downsample() {
        let source = MemoryGridSource::new();
        source.insert("tas", 0, GridField::filled(8, 4, 1.0f32)).await;

        assert_eq!(source.read("tas", 0, 1).await.unwrap().shape(), (2, 4));
        assert_eq!(source.read("tas", 0, 2).await.unwrap().shape(), (1, 2));
        assert!(source.read("tas", 0, 3).await.is_err());
    }

    #[tokio::test]
    async fn test_downsample_method_applies_to_reads() {
        // 2x2 block: 1 2 / 3 4
        let grid = GridField::new(vec![1.0f32, 2.0, 3.0, 4.0], 2, 2).unwrap();

        let mean = MemoryGridSource::new().with_field("tas", 0, grid.clone());
        assert_eq!(mean.read("tas", 0, 1).await.unwrap().data(), &[2.5]);

        let nearest = MemoryGridSource::new()
            .with_method(DownsampleMethod::Nearest)
            .with_field("tas", 0, grid);
        assert_eq!(nearest.read("tas", 0, 1).await.unwrap().data(), &[1.0]);
    }
}
