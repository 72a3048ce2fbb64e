//! # api-adapters
//!
//! HTTP surface of the cookbook. The request models and the metrics
//! registry are framework independent; the axum router lives in [`web`]
//! behind the `web-axum` feature.

pub mod metrics;
pub mod requests;

#[cfg(feature = "web-axum")]
pub mod web;

pub use metrics::HttpMetrics;
