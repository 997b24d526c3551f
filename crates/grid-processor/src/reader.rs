//! Metric reads by calendar date.

use std::sync::Arc;

use chrono::NaiveDate;
use climate_common::{
    time_index, ClimateResult, Metric, MetricSpec, HUMIDITY_VARIABLE, TEMPERATURE_VARIABLE,
};
use tracing::{debug, instrument};

use crate::source::GridSource;
use crate::types::GridField;
use crate::wetbulb::compute_wet_bulb;

/// Resolves a [`MetricSpec`] and date to store reads.
///
/// Raw metrics are a single read. The wet-bulb metric reads temperature and
/// humidity concurrently and combines them; a failure in either read fails
/// the whole read.
#[derive(Clone)]
pub struct MetricReader {
    source: Arc<dyn GridSource>,
}

impl MetricReader {
    pub fn new(source: Arc<dyn GridSource>) -> Self {
        Self { source }
    }

    /// Read the metric on `date`.
    #[instrument(skip(self, spec), fields(metric = %spec.metric, model = %spec.model))]
    pub async fn read(&self, spec: &MetricSpec, date: NaiveDate) -> ClimateResult<GridField> {
        match &spec.metric {
            Metric::Raw(variable) => self.read_variable(spec, variable, date).await,
            Metric::WetBulb => {
                let (temperature, humidity) = tokio::try_join!(
                    self.read_variable(spec, TEMPERATURE_VARIABLE, date),
                    self.read_variable(spec, HUMIDITY_VARIABLE, date),
                )?;
                compute_wet_bulb(&temperature, &humidity)
            }
        }
    }

    async fn read_variable(
        &self,
        spec: &MetricSpec,
        variable: &str,
        date: NaiveDate,
    ) -> ClimateResult<GridField> {
        let field = spec.field_for(variable, date);
        let time = time_index(date);
        debug!(field = %field, time = time, quality = spec.quality, "Reading field");
        Ok(self.source.read(&field, time, spec.quality).await?)
    }
}
