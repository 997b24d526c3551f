//! Impact API Service Library
//!
//! HTTP surface over the country ranking pipeline, the boundary set and
//! the global heatmap renderer.

pub mod config;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;
