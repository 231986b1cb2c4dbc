//! Observability subsystem for shopsearch
//!
//! This module provides:
//! - Log subscriber setup on top of `tracing`
//! - Typed event names carried by every log line
//! - Operational counters
//!
//! # Principles
//!
//! 1. Observability is read-only
//! 2. No side effects on planning or execution
//! 3. One log line per event, with the event name in the `event` field
//!
//! # Usage
//!
//! ```ignore
//! use shopsearch::observability::{Event, SearchMetrics};
//!
//! tracing::info!(event = %Event::SearchExecuted, mode = "products_only");
//!
//! let metrics = SearchMetrics::new();
//! metrics.record_rejected();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{init_logging, LogFormat, DEFAULT_LOG_DIRECTIVE};
pub use metrics::{MetricsSnapshot, SearchMetrics};
