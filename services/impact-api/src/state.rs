//! Application state for the impact API.

use std::sync::Arc;

use anyhow::{Context, Result};
use boundaries::BoundaryStore;
use grid_processor::{GridSource, MetricReader, TemporalDeltaAccumulator, ZarrGridSource};
use impact_engine::{ImpactPipeline, ParallelReducer};
use metrics_exporter_prometheus::PrometheusHandle;
use renderer::HeatmapOptions;
use tracing::{info, warn};

use crate::config::{Args, CatalogConfig};
use crate::metrics::MetricsCollector;

/// Shared application state.
pub struct AppState {
    /// Accumulate, reduce and rank.
    pub pipeline: ImpactPipeline,

    /// Single-date metric reads for the heatmap.
    pub reader: MetricReader,

    /// Country boundaries, filled in by the background loader.
    pub boundaries: Arc<BoundaryStore>,

    pub catalog: CatalogConfig,

    pub heatmap: HeatmapOptions,

    pub metrics: MetricsCollector,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from command line configuration.
    ///
    /// The boundary store starts empty; the caller spawns the loader.
    pub fn new(args: &Args, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let grid_config = args.grid_source_config();
        if let Err(e) = grid_config.validate() {
            warn!(error = %e, "Grid store not usable yet, reads will fail until it is");
        }
        let source = ZarrGridSource::open(&grid_config).context("Failed to open grid store")?;

        let reducer = match args.reducer_threads {
            Some(n) => ParallelReducer::new(n),
            None => ParallelReducer::with_available_parallelism(),
        }
        .context("Failed to build reducer pool")?;

        let catalog = CatalogConfig::load(&args.catalog)?;

        info!(
            store = %grid_config.store_path.display(),
            reducer_threads = reducer.num_threads(),
            "Application state initialized"
        );

        Ok(Self::from_parts(
            Arc::new(source),
            Arc::new(BoundaryStore::new()),
            reducer,
            catalog,
            prometheus,
        ))
    }

    /// Assemble state around an existing grid source and boundary store.
    pub fn from_parts(
        source: Arc<dyn GridSource>,
        boundaries: Arc<BoundaryStore>,
        reducer: ParallelReducer,
        catalog: CatalogConfig,
        prometheus: Option<PrometheusHandle>,
    ) -> Self {
        let reader = MetricReader::new(source);
        let pipeline = ImpactPipeline::new(
            TemporalDeltaAccumulator::new(reader.clone()),
            boundaries.clone(),
            Arc::new(reducer),
        );

        Self {
            pipeline,
            reader,
            boundaries,
            catalog,
            heatmap: HeatmapOptions::default(),
            metrics: MetricsCollector::new(),
            prometheus,
        }
    }
}
