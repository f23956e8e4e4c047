//! Metrics for the college arena
//!
//! Counters and histograms are kept in a Prometheus registry owned by the
//! collector; the CLI can print them in the text exposition format.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, ReviewMetrics, VoteMetrics};
