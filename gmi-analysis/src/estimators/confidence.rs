//! Confidence tiers
//!
//! A tier grades how many independent signals backed an estimate. Tiers are
//! keyed on the count of present signals that actually contributed; the
//! thresholds come from `ConfidenceThresholds`.

use crate::config::ConfidenceThresholds;
use serde::{Deserialize, Serialize};

/// Discrete confidence grade, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    Low,
    Medium,
    MediumHigh,
    High,
    VeryHigh,
}

impl ConfidenceTier {
    /// Map a contributing-signal count onto a tier
    ///
    /// Non-decreasing in `count` for any thresholds that pass
    /// `AnalysisConfig::check` (very_high >= high >= medium_high >= medium).
    pub fn from_signal_count(count: usize, thresholds: &ConfidenceThresholds) -> Self {
        if count >= thresholds.very_high {
            ConfidenceTier::VeryHigh
        } else if count >= thresholds.high {
            ConfidenceTier::High
        } else if count >= thresholds.medium_high {
            ConfidenceTier::MediumHigh
        } else if count >= thresholds.medium {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::Low => "low",
            ConfidenceTier::Medium => "medium",
            ConfidenceTier::MediumHigh => "medium-high",
            ConfidenceTier::High => "high",
            ConfidenceTier::VeryHigh => "very-high",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
