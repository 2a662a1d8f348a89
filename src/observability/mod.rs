//! Observability for the directory service.
//!
//! This module provides search counters and operation timing, reported through
//! structured `tracing` events.

pub mod metrics;

pub use metrics::{SearchMetrics, Timer};
