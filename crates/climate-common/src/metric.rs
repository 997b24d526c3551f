//! Metric selection and CMIP6 field addressing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scenario identifier for the observed period.
pub const HISTORICAL_SCENARIO: &str = "historical";

/// First year served by the projection scenarios. Earlier dates always
/// resolve to [`HISTORICAL_SCENARIO`].
pub const PROJECTION_START_YEAR: i32 = 2015;

/// Identifier of the derived wet-bulb metric.
pub const WET_BULB: &str = "wetbulb";

/// Raw variables feeding the wet-bulb computation.
pub const TEMPERATURE_VARIABLE: &str = "tas";
pub const HUMIDITY_VARIABLE: &str = "hurs";

/// The one model whose archive uses a different ensemble member.
const ALTERNATE_ENSEMBLE_MODEL: &str = "CESM2";
const ALTERNATE_ENSEMBLE_RUN: &str = "r4i1p1f1";
const DEFAULT_ENSEMBLE_RUN: &str = "r1i1p1f1";

/// A metric is either a variable read straight from the store or a
/// quantity derived from several of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Metric {
    Raw(String),
    WetBulb,
}

impl Metric {
    pub fn parse(name: &str) -> Self {
        if name == WET_BULB {
            Metric::WetBulb
        } else {
            Metric::Raw(name.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Metric::Raw(name) => name,
            Metric::WetBulb => WET_BULB,
        }
    }

    pub fn is_derived(&self) -> bool {
        matches!(self, Metric::WetBulb)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Metric {
    fn from(s: String) -> Self {
        Metric::parse(&s)
    }
}

impl From<Metric> for String {
    fn from(m: Metric) -> Self {
        m.name().to_string()
    }
}

/// What to read: metric, model, requested scenario and quality level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub metric: Metric,
    pub model: String,
    /// Requested scenario. Only honoured from [`PROJECTION_START_YEAR`] on.
    pub scenario: String,
    /// Resolution level, 0 = finest.
    pub quality: u32,
}

impl MetricSpec {
    pub fn new(
        metric: Metric,
        model: impl Into<String>,
        scenario: impl Into<String>,
        quality: u32,
    ) -> Self {
        Self {
            metric,
            model: model.into(),
            scenario: scenario.into(),
            quality,
        }
    }

    /// Scenario actually served for `date`.
    pub fn scenario_for(&self, date: NaiveDate) -> &str {
        if date.year() < PROJECTION_START_YEAR {
            HISTORICAL_SCENARIO
        } else {
            &self.scenario
        }
    }

    /// Store field identifier for one raw variable on `date`.
    pub fn field_for(&self, variable: &str, date: NaiveDate) -> String {
        field_name(variable, &self.model, self.scenario_for(date))
    }
}

/// Build the store field identifier, e.g. `tas_day_ACCESS-CM2_ssp585_r1i1p1f1_gn`.
pub fn field_name(variable: &str, model: &str, scenario: &str) -> String {
    let run = if model == ALTERNATE_ENSEMBLE_MODEL {
        ALTERNATE_ENSEMBLE_RUN
    } else {
        DEFAULT_ENSEMBLE_RUN
    };
    format!("{}_day_{}_{}_{}_gn", variable, model, scenario, run)
}
