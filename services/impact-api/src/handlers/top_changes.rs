//! Country ranking handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    response::{IntoResponse, Response},
    Json,
};
use climate_common::{parse_date, ClimateResult, Metric, MetricSpec};
use impact_engine::RankingRequest;
use serde::Deserialize;
use tracing::info;

use crate::config::CatalogConfig;
use crate::handlers::common::{error_response, or_default, parse_number};
use crate::metrics::Endpoint;
use crate::state::AppState;

/// Query parameters for the ranking endpoint. Absent values take the
/// catalog defaults.
#[derive(Debug, Default, Deserialize)]
pub struct TopChangesParams {
    pub metric: Option<String>,
    pub model: Option<String>,
    pub scenario: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub quality: Option<String>,
    pub top_n: Option<String>,
}

impl TopChangesParams {
    /// Validate against the catalog and build the pipeline request.
    pub fn into_request(self, catalog: &CatalogConfig) -> ClimateResult<RankingRequest> {
        let defaults = &catalog.defaults;

        let metric = or_default(self.metric, &defaults.metric);
        let model = or_default(self.model, &defaults.model);
        let scenario = or_default(self.scenario, &defaults.scenario);
        catalog.check_metric(&metric)?;
        catalog.check_model(&model)?;
        catalog.check_scenario(&scenario)?;

        let start = parse_date(&or_default(self.start_date, &defaults.start_date))?;
        let end = parse_date(&or_default(self.end_date, &defaults.end_date))?;
        let quality = parse_number("quality", self.quality.as_deref(), defaults.quality)?;
        let top_n = parse_number("top_n", self.top_n.as_deref(), defaults.top_n)?;

        Ok(RankingRequest {
            spec: MetricSpec::new(Metric::parse(&metric), model, scenario, quality),
            start,
            end,
            top_n,
        })
    }
}

/// GET /api/top_changes - Countries ranked by cumulative change
pub async fn top_changes_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<TopChangesParams>,
) -> Response {
    state.metrics.record_request(Endpoint::TopChanges);

    let started = Instant::now();
    // Boundary readiness is reported before parameter problems.
    let result = match state
        .boundaries
        .require()
        .and_then(|_| params.into_request(&state.catalog))
    {
        Ok(request) => state.pipeline.top_changes(&request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(ranked) => {
            let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
            state.metrics.record_ranking(duration_ms, ranked.len());
            info!(
                results = ranked.len(),
                duration_ms = duration_ms,
                "Served top changes"
            );
            Json(ranked).into_response()
        }
        Err(e) => {
            state
                .metrics
                .record_error(Endpoint::TopChanges, e.http_status_code());
            error_response(&e)
        }
    }
}
