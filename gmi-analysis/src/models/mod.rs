//! Shared data model for the analysis core
//!
//! Everything here is constructed once per analysis run and never mutated.

pub mod metrics_snapshot;
pub mod signal;
pub mod validation_error;

pub use metrics_snapshot::{
    AudienceMode, DerivedMetrics, FigureSource, MetricsSnapshot, Monetization, NormalizedInputs,
};
pub use signal::{Signal, SignalReading, SignalSet};
pub use validation_error::{IssueKind, Severity, ValidationError};
