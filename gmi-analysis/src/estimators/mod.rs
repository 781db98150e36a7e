//! Ownership and revenue estimation from heterogeneous signals

pub mod adjustment_factors;
pub mod confidence;
pub mod multi_signal_estimator;

pub use adjustment_factors::{FactorAudit, SignalRole};
pub use confidence::ConfidenceTier;
pub use multi_signal_estimator::{estimate, EstimationResult};
