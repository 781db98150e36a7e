//! Non-blocking plausibility checks
//!
//! Run after derived fields exist. Every finding is a `DataQualityWarning`
//! that travels with the snapshot as a disclaimer; none of them affect
//! `is_valid`.

use crate::config::ValidationConfig;
use crate::models::{MetricsSnapshot, ValidationError};
use serde_json::json;

/// Plausibility checks over a constructed snapshot
pub fn quality_warnings(snapshot: &MetricsSnapshot, config: &ValidationConfig) -> Vec<ValidationError> {
    let mut warnings = Vec::new();
    let inputs = snapshot.inputs();
    let derived = snapshot.derived();

    // Review rate band
    if let Some(rate) = derived.review_rate {
        if rate < config.review_rate_min || rate > config.review_rate_max {
            warnings.push(ValidationError::warning(
                "review_rate",
                format!(
                    "review rate {:.4} is outside the plausible band; ownership or review figures may be unreliable",
                    rate
                ),
                json!({ "min": config.review_rate_min, "max": config.review_rate_max }),
                rate,
            ));
        }
    }

    // Thin sample behind a score
    let has_score = derived.review_positive_ratio.is_some() || inputs.review_score.is_some();
    if let Some(total) = inputs.review_count_total {
        if has_score && total >= 0 && total < config.min_review_sample {
            warnings.push(ValidationError::warning(
                "review_count_total",
                format!(
                    "only {} reviews back the review score; treat sentiment as anecdotal",
                    total
                ),
                format!(">= {}", config.min_review_sample),
                total,
            ));
        }
    }

    // Aggregate score vs observed ratio
    if let (Some(score), Some(ratio)) = (inputs.review_score, derived.review_positive_ratio) {
        let gap = (score - ratio).abs();
        if gap > config.score_ratio_tolerance {
            warnings.push(ValidationError::warning(
                "review_score",
                format!(
                    "review score {:.2} disagrees with positive review ratio {:.2}",
                    score, ratio
                ),
                ratio,
                score,
            ));
        }
    }

    warnings
}
