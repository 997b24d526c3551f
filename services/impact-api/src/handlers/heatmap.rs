//! Global heatmap handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    http::header,
    response::{IntoResponse, Response},
};
use climate_common::{parse_date, ClimateError, ClimateResult, Metric, MetricSpec};
use renderer::render_heatmap;
use serde::Deserialize;
use tracing::debug;

use crate::handlers::common::{error_response, or_default, parse_number};
use crate::metrics::Endpoint;
use crate::state::AppState;

/// Query parameters for the heatmap endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HeatmapParams {
    pub date: Option<String>,
    pub variable: Option<String>,
    pub model: Option<String>,
    pub scenario: Option<String>,
    pub quality: Option<String>,
}

/// GET /api/global_heatmap.png - One day of a metric as an inferno PNG
pub async fn heatmap_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<HeatmapParams>,
) -> Response {
    state.metrics.record_request(Endpoint::Heatmap);

    match render(&state, params).await {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => {
            state
                .metrics
                .record_error(Endpoint::Heatmap, e.http_status_code());
            error_response(&e)
        }
    }
}

async fn render(state: &AppState, params: HeatmapParams) -> ClimateResult<Vec<u8>> {
    let catalog = &state.catalog;
    let defaults = &catalog.defaults;

    let variable = or_default(params.variable, &defaults.metric);
    let model = or_default(params.model, &defaults.model);
    let scenario = or_default(params.scenario, &defaults.scenario);
    catalog.check_metric(&variable)?;
    catalog.check_model(&model)?;
    catalog.check_scenario(&scenario)?;
    let date = parse_date(&or_default(params.date, &defaults.heatmap_date))?;
    let quality = parse_number("quality", params.quality.as_deref(), defaults.quality)?;

    let spec = MetricSpec::new(Metric::parse(&variable), model, scenario, quality);
    let grid = state.reader.read(&spec, date).await?;

    let started = Instant::now();
    let options = state.heatmap.clone();
    let png = tokio::task::spawn_blocking(move || {
        render_heatmap(grid.data(), grid.width(), grid.height(), &options)
    })
    .await
    .map_err(|e| ClimateError::Internal(format!("render task failed: {}", e)))?
    .map_err(|e| ClimateError::Internal(format!("render failed: {}", e)))?;

    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    state.metrics.record_render(duration_ms);
    debug!(
        metric = %spec.metric,
        date = %date,
        bytes = png.len(),
        duration_ms = duration_ms,
        "Rendered heatmap"
    );
    Ok(png)
}
