//! Cumulative year-over-year change of a metric.

use chrono::{Datelike, NaiveDate};
use climate_common::{with_year, ClimateError, ClimateResult, MetricSpec};
use tracing::{debug, instrument};

use crate::reader::MetricReader;
use crate::types::DeltaField;

/// Sums the annual differences of a metric over a date range.
#[derive(Clone)]
pub struct TemporalDeltaAccumulator {
    reader: MetricReader,
}

impl TemporalDeltaAccumulator {
    pub fn new(reader: MetricReader) -> Self {
        Self { reader }
    }

    /// Cumulative change between the years of `start` and `end`.
    ///
    /// For every year `y` in `[start.year, end.year)` the metric is read on
    /// the start date's month and day in `y` and in `y + 1`, and the
    /// difference is added to a double-precision sum. Each read resolves its
    /// own scenario, so a range crossing the projection cutoff is handled per
    /// step. An empty year range returns zeros shaped like a read on `start`.
    #[instrument(skip(self, spec), fields(metric = %spec.metric, model = %spec.model, scenario = %spec.scenario))]
    pub async fn accumulate(
        &self,
        spec: &MetricSpec,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ClimateResult<DeltaField> {
        let (y0, y1) = (start.year(), end.year());

        if y0 >= y1 {
            let grid = self.reader.read(spec, start).await?;
            return Ok(grid.zeros_delta());
        }

        let mut sum: Option<DeltaField> = None;
        for year in y0..y1 {
            let earlier_date = with_year(start, year)?;
            let later_date = with_year(start, year + 1)?;

            let (earlier, later) = tokio::try_join!(
                self.reader.read(spec, earlier_date),
                self.reader.read(spec, later_date),
            )?;

            let acc = sum.get_or_insert_with(|| earlier.zeros_delta());
            acc.accumulate_difference(&earlier, &later)?;
            debug!(year = year, "Accumulated annual step");
        }

        // y0 < y1 guarantees at least one step ran.
        sum.ok_or_else(|| ClimateError::Internal("empty year range".to_string()))
    }
}
