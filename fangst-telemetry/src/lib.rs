//! # fangst-telemetry
//!
//! Observability layer for the packet recorder: structured logging setup
//! and a Prometheus metrics recorder shared across workers.

pub mod logging;
pub mod metrics;

pub use metrics::MetricsRecorder;
