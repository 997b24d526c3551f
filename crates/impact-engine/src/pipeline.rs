//! Request-level ranking pipeline.

use std::sync::Arc;
use std::time::Instant;

use boundaries::BoundaryStore;
use chrono::NaiveDate;
use climate_common::{ClimateError, ClimateResult, MetricSpec};
use grid_processor::TemporalDeltaAccumulator;
use tracing::{info, instrument};

use crate::ranking::rank;
use crate::reducer::ParallelReducer;
use crate::result::CountryResult;

/// One ranking request.
#[derive(Debug, Clone)]
pub struct RankingRequest {
    pub spec: MetricSpec,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub top_n: usize,
}

/// Accumulate, reduce per country, rank.
pub struct ImpactPipeline {
    accumulator: TemporalDeltaAccumulator,
    boundaries: Arc<BoundaryStore>,
    reducer: Arc<ParallelReducer>,
}

impl ImpactPipeline {
    pub fn new(
        accumulator: TemporalDeltaAccumulator,
        boundaries: Arc<BoundaryStore>,
        reducer: Arc<ParallelReducer>,
    ) -> Self {
        Self {
            accumulator,
            boundaries,
            reducer,
        }
    }

    /// Top countries by cumulative change.
    ///
    /// Fails with `BoundaryNotReady` before any grid read if boundaries are
    /// still loading, and with `DataUnavailable` if any read fails. The
    /// per-country work runs off the async runtime.
    #[instrument(skip(self, request), fields(
        metric = %request.spec.metric,
        model = %request.spec.model,
        start = %request.start,
        end = %request.end,
    ))]
    pub async fn top_changes(&self, request: &RankingRequest) -> ClimateResult<Vec<CountryResult>> {
        let countries = self.boundaries.require()?;

        let started = Instant::now();
        let delta = self
            .accumulator
            .accumulate(&request.spec, request.start, request.end)
            .await?;
        let accumulate_ms = started.elapsed().as_millis() as u64;

        let reducer = self.reducer.clone();
        let top_n = request.top_n;
        let ranked = tokio::task::spawn_blocking(move || {
            let results = reducer.reduce(&delta, &countries);
            rank(results, top_n)
        })
        .await
        .map_err(|e| ClimateError::Internal(format!("reduce task failed: {}", e)))?;

        info!(
            results = ranked.len(),
            accumulate_ms = accumulate_ms,
            total_ms = started.elapsed().as_millis() as u64,
            "Ranked countries"
        );
        Ok(ranked)
    }
}
