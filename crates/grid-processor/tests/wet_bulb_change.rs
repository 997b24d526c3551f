//! Integration test: wet-bulb change accumulated from synthetic temperature
//! and humidity fields.

use std::sync::Arc;

use chrono::NaiveDate;
use climate_common::{field_name, time_index, Metric, MetricSpec};
use grid_processor::{wet_bulb, GridField, MemoryGridSource, MetricReader, TemporalDeltaAccumulator};
use test_utils::{create_grid_with_nans, create_humidity_grid, create_temperature_grid};

const WIDTH: usize = 4;
const HEIGHT: usize = 3;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn grid(data: Vec<f32>) -> GridField {
    GridField::new(data, WIDTH, HEIGHT).unwrap()
}

/// Two years of `tas` (one degree warmer in the second) and constant `hurs`
/// with one missing cell at (col 2, row 1).
fn source(model: &str) -> Arc<MemoryGridSource> {
    let humidity = {
        let mut data = create_humidity_grid(WIDTH, HEIGHT);
        let mask = create_grid_with_nans(WIDTH, HEIGHT, 0.0, &[(2, 1)]);
        for (value, m) in data.iter_mut().zip(mask) {
            *value += m;
        }
        data
    };

    let mut source = MemoryGridSource::new();
    for (year, offset) in [(1980, 0.0), (1981, 1.0)] {
        let time = time_index(ymd(year, 6, 1));
        source = source
            .with_field(
                field_name("tas", model, "historical"),
                time,
                grid(create_temperature_grid(WIDTH, HEIGHT, offset)),
            )
            .with_field(
                field_name("hurs", model, "historical"),
                time,
                grid(humidity.clone()),
            );
    }
    Arc::new(source)
}

#[tokio::test]
async fn test_wet_bulb_change_follows_temperature() {
    let source = source("MIROC6");
    let accumulator = TemporalDeltaAccumulator::new(MetricReader::new(source.clone()));
    let spec = MetricSpec::new(Metric::WetBulb, "MIROC6", "ssp585", 0);

    let delta = accumulator
        .accumulate(&spec, ymd(1980, 6, 1), ymd(1981, 6, 1))
        .await
        .unwrap();

    assert_eq!(delta.shape(), (HEIGHT, WIDTH));
    // Two dates, two variables each.
    assert_eq!(source.read_count(), 4);

    // Equator: 300K, 90%. Poles: 240K, 30%.
    let equator = f64::from(wet_bulb(301.0, 90.0) - wet_bulb(300.0, 90.0));
    let pole = f64::from(wet_bulb(241.0, 30.0) - wet_bulb(240.0, 30.0));
    assert!(equator > 0.5 && equator < 1.5);
    assert!((delta.get(1, 0).unwrap() - equator).abs() < 1e-5);
    assert!((delta.get(0, 3).unwrap() - pole).abs() < 1e-5);
    assert!((delta.get(2, 1).unwrap() - pole).abs() < 1e-5);
}

#[tokio::test]
async fn test_missing_humidity_cell_stays_missing() {
    let source = source("CESM2");
    let accumulator = TemporalDeltaAccumulator::new(MetricReader::new(source));
    let spec = MetricSpec::new(Metric::WetBulb, "CESM2", "historical", 0);

    let delta = accumulator
        .accumulate(&spec, ymd(1980, 6, 1), ymd(1981, 6, 1))
        .await
        .unwrap();

    assert!(delta.get(1, 2).unwrap().is_nan());
    let finite = delta.data().iter().filter(|v| v.is_finite()).count();
    assert_eq!(finite, WIDTH * HEIGHT - 1);
}
