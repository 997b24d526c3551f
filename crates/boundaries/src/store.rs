//! Process-wide boundary latch.
//!
//! Starts unready, is published exactly once by the loader, and is then
//! read concurrently by request handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use climate_common::{ClimateError, ClimateResult};
use tracing::info;

use crate::country::CountrySet;
use crate::error::{BoundaryError, Result};

#[derive(Debug, Default)]
pub struct BoundaryStore {
    ready: AtomicBool,
    set: OnceLock<Arc<CountrySet>>,
}

impl BoundaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the loaded set. Fails if a set was already published.
    pub fn publish(&self, set: CountrySet) -> Result<()> {
        let count = set.len();
        self.set
            .set(Arc::new(set))
            .map_err(|_| BoundaryError::AlreadyPublished)?;
        self.ready.store(true, Ordering::Release);
        info!(countries = count, "Country boundaries ready");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// The published set, if any.
    pub fn get(&self) -> Option<Arc<CountrySet>> {
        if !self.is_ready() {
            return None;
        }
        self.set.get().cloned()
    }

    /// The published set, or `BoundaryNotReady`.
    pub fn require(&self) -> ClimateResult<Arc<CountrySet>> {
        self.get().ok_or(ClimateError::BoundaryNotReady)
    }
}
