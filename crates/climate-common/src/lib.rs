//! Common types and utilities shared across the climate impact crates.

pub mod error;
pub mod metric;
pub mod time;

pub use error::{ClimateError, ClimateResult};
pub use metric::{
    field_name, Metric, MetricSpec, HISTORICAL_SCENARIO, HUMIDITY_VARIABLE, PROJECTION_START_YEAR,
    TEMPERATURE_VARIABLE, WET_BULB,
};
pub use time::{days_in_year, is_leap_year, parse_date, time_index, with_year};
