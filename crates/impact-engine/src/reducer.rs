//! Parallel per-country reduction on a bounded worker pool.

use boundaries::CountrySet;
use climate_common::{ClimateError, ClimateResult};
use grid_processor::DeltaField;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::aggregate::mean_change;
use crate::result::CountryResult;

/// Runs aggregation and damage for every non-excluded country.
///
/// Work runs on a dedicated rayon pool with a fixed thread count; the call
/// returns once every country is done.
pub struct ParallelReducer {
    pool: ThreadPool,
}

impl ParallelReducer {
    pub fn new(num_threads: usize) -> ClimateResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads.max(1))
            .thread_name(|i| format!("reducer-{}", i))
            .build()
            .map_err(|e| ClimateError::Internal(format!("failed to build reducer pool: {}", e)))?;
        Ok(Self { pool })
    }

    /// One thread per available core.
    pub fn with_available_parallelism() -> ClimateResult<Self> {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::new(threads)
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// One result per non-excluded country, in no particular order.
    pub fn reduce(&self, delta: &DeltaField, countries: &CountrySet) -> Vec<CountryResult> {
        let results: Vec<CountryResult> = self.pool.install(|| {
            countries
                .countries()
                .par_iter()
                .filter(|country| !country.excluded)
                .map(|country| CountryResult::new(country.name.clone(), mean_change(delta, country)))
                .collect()
        });
        debug!(
            countries = results.len(),
            threads = self.num_threads(),
            "Reduced change field per country"
        );
        results
    }
}
