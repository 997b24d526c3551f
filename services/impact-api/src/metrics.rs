//! Application metrics collection.

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::{counter, histogram};
use serde::Serialize;

/// Endpoints with their own request counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TopChanges,
    Countries,
    Heatmap,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::TopChanges => "top_changes",
            Endpoint::Countries => "countries",
            Endpoint::Heatmap => "global_heatmap",
        }
    }
}

/// Metrics collector for the impact API.
///
/// Every record call updates both the local counters and the global
/// `metrics` recorder exported on `/metrics`.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    top_changes_requests: AtomicU64,
    countries_requests: AtomicU64,
    heatmap_requests: AtomicU64,
    errors: AtomicU64,
    countries_ranked: AtomicU64,
}

/// Point-in-time copy of the local counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub top_changes_requests: u64,
    pub countries_requests: u64,
    pub heatmap_requests: u64,
    pub errors: u64,
    pub countries_ranked: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self, endpoint: Endpoint) {
        let local = match endpoint {
            Endpoint::TopChanges => &self.top_changes_requests,
            Endpoint::Countries => &self.countries_requests,
            Endpoint::Heatmap => &self.heatmap_requests,
        };
        local.fetch_add(1, Ordering::Relaxed);
        counter!("impact_requests_total", "endpoint" => endpoint.as_str()).increment(1);
    }

    pub fn record_error(&self, endpoint: Endpoint, status: u16) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!(
            "impact_request_errors_total",
            "endpoint" => endpoint.as_str(),
            "status" => status.to_string()
        )
        .increment(1);
    }

    /// Record one ranking computation.
    pub fn record_ranking(&self, duration_ms: f64, countries: usize) {
        self.countries_ranked
            .fetch_add(countries as u64, Ordering::Relaxed);
        counter!("countries_ranked_total").increment(countries as u64);
        histogram!("pipeline_duration_ms").record(duration_ms);
    }

    pub fn record_render(&self, duration_ms: f64) {
        histogram!("heatmap_render_duration_ms").record(duration_ms);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            top_changes_requests: self.top_changes_requests.load(Ordering::Relaxed),
            countries_requests: self.countries_requests.load(Ordering::Relaxed),
            heatmap_requests: self.heatmap_requests.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            countries_ranked: self.countries_ranked.load(Ordering::Relaxed),
        }
    }
}
