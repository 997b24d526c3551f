//! HTTP request handlers for the impact API.

pub mod common;
pub mod countries;
pub mod health;
pub mod heatmap;
pub mod top_changes;
