//! Grid access and temporal processing for daily climate fields.
//!
//! This crate reads full-globe daily fields from a grid store and turns
//! them into the inputs of the impact ranking:
//!
//! - **Stores**: [`GridSource`] backends for Zarr V3 on disk and in memory
//! - **Derived metrics**: wet-bulb temperature from `tas` and `hurs`
//! - **Temporal change**: year-over-year differences summed over a range
//!
//! # Architecture
//!
//! ```text
//! MetricSpec + date range
//!      │
//!      ▼
//! TemporalDeltaAccumulator::accumulate
//!      │
//!      ├─► for each year y: MetricReader::read(y), MetricReader::read(y + 1)
//!      │         │
//!      │         ├─► raw metric: one GridSource::read
//!      │         │
//!      │         └─► wetbulb: tas + hurs reads ─► compute_wet_bulb
//!      │
//!      └─► sum of (later - earlier) in f64
//!               │
//!               ▼
//!          DeltaField
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{GridSourceConfig, MetricReader, TemporalDeltaAccumulator, ZarrGridSource};
//!
//! let source = ZarrGridSource::open(&GridSourceConfig::from_env())?;
//! let accumulator = TemporalDeltaAccumulator::new(MetricReader::new(Arc::new(source)));
//! let delta = accumulator.accumulate(&spec, start, end).await?;
//! ```

pub mod accumulate;
pub mod config;
pub mod downsample;
pub mod error;
pub mod reader;
pub mod source;
pub mod types;
pub mod wetbulb;

// Re-export commonly used types at crate root
pub use accumulate::TemporalDeltaAccumulator;
pub use config::GridSourceConfig;
pub use downsample::{downsample_2x, downsample_levels, DownsampleMethod};
pub use error::{GridProcessorError, Result};
pub use reader::MetricReader;
pub use source::{GridSource, MemoryGridSource, ZarrGridSource};
pub use types::{DeltaField, GridField};
pub use wetbulb::{compute_wet_bulb, wet_bulb};
