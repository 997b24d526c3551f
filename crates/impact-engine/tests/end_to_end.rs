//! End-to-end ranking over synthetic grids and boundaries.

use std::sync::Arc;

use boundaries::{BoundaryStore, CountrySet};
use bytes::Bytes;
use chrono::NaiveDate;
use climate_common::{field_name, time_index, ClimateError, Metric, MetricSpec};
use grid_processor::{GridField, MemoryGridSource, MetricReader, TemporalDeltaAccumulator};
use impact_engine::{rank, ImpactPipeline, ParallelReducer, RankingRequest};
use test_utils::{
    assert_approx_eq, create_constant_grid, feature_collection, polygon_feature, square_around,
    two_country_collection,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn country_set(doc: serde_json::Value) -> CountrySet {
    CountrySet::from_geojson(Bytes::from(doc.to_string())).unwrap()
}

fn ready_store(set: CountrySet) -> Arc<BoundaryStore> {
    let store = Arc::new(BoundaryStore::new());
    store.publish(set).unwrap();
    store
}

fn pipeline(source: Arc<MemoryGridSource>, store: Arc<BoundaryStore>) -> ImpactPipeline {
    let accumulator = TemporalDeltaAccumulator::new(MetricReader::new(source));
    ImpactPipeline::new(
        accumulator,
        store,
        Arc::new(ParallelReducer::new(2).unwrap()),
    )
}

#[test]
fn test_two_unit_squares_on_uniform_grid() {
    let delta = GridField::filled(4, 4, 1.0f64);
    let set = country_set(two_country_collection());

    let results = ParallelReducer::new(4).unwrap().reduce(&delta, &set);
    let ranked = rank(results, 2);

    assert_eq!(ranked.len(), 2);
    // Equal changes fall back to name order.
    assert_eq!(ranked[0].country, "Eastland");
    assert_eq!(ranked[1].country, "Westland");
    for result in &ranked {
        assert_approx_eq!(result.change, 1.0, 1e-12);
        assert_approx_eq!(result.damage, 0.00236, 1e-12);
    }
}

#[tokio::test]
async fn test_pipeline_ranks_warming_countries() {
    let (w, h) = (4, 4);
    let field = field_name("tas", "ACCESS-CM2", "historical");
    let start = ymd(1950, 1, 1);

    // Westland's cell (row 1, col 1) warms by 2K per year, everything else by 1K.
    let year_grid = |year_offset: f32| {
        let mut data = create_constant_grid(w, h, 280.0 + year_offset);
        data[w + 1] += year_offset;
        GridField::new(data, w, h).unwrap()
    };
    let source = Arc::new(
        MemoryGridSource::new()
            .with_field(field.clone(), time_index(ymd(1950, 1, 1)), year_grid(0.0))
            .with_field(field.clone(), time_index(ymd(1951, 1, 1)), year_grid(1.0))
            .with_field(field.clone(), time_index(ymd(1952, 1, 1)), year_grid(2.0)),
    );

    let set = country_set(feature_collection(vec![
        polygon_feature("Westland", square_around(-60.0, 30.0, 0.5)),
        polygon_feature("Eastland", square_around(60.0, -30.0, 0.5)),
        polygon_feature("Falkland Is.", square_around(60.0, 30.0, 0.5)),
        polygon_feature("Gapland", square_around(0.0, 0.0, 0.5)),
    ]));
    let pipeline = pipeline(source.clone(), ready_store(set));

    let request = RankingRequest {
        spec: MetricSpec::new(Metric::parse("tas"), "ACCESS-CM2", "ssp585", 0),
        start,
        end: ymd(1952, 6, 30),
        top_n: 5,
    };
    let ranked = pipeline.top_changes(&request).await.unwrap();

    let names: Vec<&str> = ranked.iter().map(|r| r.country.as_str()).collect();
    assert_eq!(names, vec!["Westland", "Eastland", "Gapland"]);
    assert_approx_eq!(ranked[0].change, 4.0, 1e-9);
    assert_approx_eq!(ranked[1].change, 2.0, 1e-9);
    // No cell centre falls inside Gapland.
    assert_eq!(ranked[2].change, 0.0);
    assert_eq!(ranked[2].damage, 0.0);
    assert_eq!(source.read_count(), 4);
}

#[tokio::test]
async fn test_pipeline_refuses_before_boundaries_ready() {
    let source = Arc::new(MemoryGridSource::new());
    let pipeline = pipeline(source.clone(), Arc::new(BoundaryStore::new()));

    let request = RankingRequest {
        spec: MetricSpec::new(Metric::WetBulb, "ACCESS-CM2", "historical", 0),
        start: ymd(1950, 1, 1),
        end: ymd(1951, 1, 1),
        top_n: 5,
    };
    let err = pipeline.top_changes(&request).await.unwrap_err();

    assert!(matches!(err, ClimateError::BoundaryNotReady));
    assert_eq!(source.read_count(), 0);
}

#[tokio::test]
async fn test_pipeline_aborts_on_missing_data() {
    let source = Arc::new(MemoryGridSource::new().with_field(
        field_name("tas", "ACCESS-CM2", "historical"),
        time_index(ymd(1950, 1, 1)),
        GridField::filled(4, 4, 280.0f32),
    ));
    let pipeline = pipeline(source, ready_store(country_set(two_country_collection())));

    let request = RankingRequest {
        spec: MetricSpec::new(Metric::parse("tas"), "ACCESS-CM2", "historical", 0),
        start: ymd(1950, 1, 1),
        end: ymd(1952, 1, 1),
        top_n: 5,
    };
    let err = pipeline.top_changes(&request).await.unwrap_err();
    assert!(matches!(err, ClimateError::DataUnavailable(_)));
}

#[tokio::test]
async fn test_pipeline_same_year_all_zero() {
    let source = Arc::new(MemoryGridSource::new().with_field(
        field_name("tas", "ACCESS-CM2", "historical"),
        time_index(ymd(1950, 3, 1)),
        GridField::filled(4, 4, 280.0f32),
    ));
    let pipeline = pipeline(source, ready_store(country_set(two_country_collection())));

    let request = RankingRequest {
        spec: MetricSpec::new(Metric::parse("tas"), "ACCESS-CM2", "historical", 0),
        start: ymd(1950, 3, 1),
        end: ymd(1950, 11, 1),
        top_n: 1,
    };
    let ranked = pipeline.top_changes(&request).await.unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].country, "Eastland");
    assert_eq!(ranked[0].change, 0.0);
}
