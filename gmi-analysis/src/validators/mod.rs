//! Consistency validation: raw metrics in, immutable snapshot out
//!
//! # Architecture
//! ```text
//! raw mapping ──► normalizer ──► ConsistencyValidator ──► MetricsSnapshot::new ──► quality checks
//!                 (typed inputs)  (critical + missing)     (derived fields)         (warnings)
//! ```
//!
//! `validate` never fails. Callers inspect `MetricsSnapshot::is_valid` and
//! treat an invalid snapshot as terminal for the run.

pub mod consistency_validator;
pub mod normalizer;
pub mod quality_checks;

pub use consistency_validator::{ConsistencyValidator, IntegrityReport};
pub use normalizer::{normalize, Normalized};
pub use quality_checks::quality_warnings;

use crate::config::ValidationConfig;
use crate::models::{FigureSource, MetricsSnapshot};
use serde_json::{Map, Value};
use tracing::debug;

/// Validate one raw metrics mapping
///
/// # Arguments
/// * `raw` - Flat provider mapping; values may be strings, numbers, or lists
/// * `config` - Validation thresholds and platform constants
///
/// # Returns
/// A snapshot whose `validation_errors` holds every critical failure in check
/// order and whose `validation_warnings` holds normalization, missing-field,
/// and quality warnings in that order.
pub fn validate(raw: &Map<String, Value>, config: &ValidationConfig) -> MetricsSnapshot {
    let normalized = normalize(raw);
    let integrity = ConsistencyValidator::new(config).check(&normalized.inputs);

    let mut warnings = normalized.warnings;
    warnings.extend(integrity.missing);

    let snapshot = MetricsSnapshot::new(
        normalized.item_id,
        normalized.name,
        normalized.inputs,
        integrity.errors,
        warnings,
        FigureSource::Direct,
        config.platform_revenue_share,
        config.days_per_month,
    );

    let quality = quality_warnings(&snapshot, config);
    let snapshot = snapshot.with_appended_warnings(quality);

    debug!(
        item_id = %snapshot.item_id(),
        is_valid = snapshot.is_valid(),
        errors = snapshot.validation_errors().len(),
        warnings = snapshot.validation_warnings().len(),
        "Validated metrics snapshot"
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IssueKind;
    use serde_json::json;

    fn raw(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_string_inputs_validate_like_numbers() {
        let config = ValidationConfig::default();
        let typed = validate(
            &raw(json!({"revenue_gross": 379, "days_since_launch": 7, "price": 14.99})),
            &config,
        );
        let stringly = validate(
            &raw(json!({"revenue": "$379", "days_since_launch": "7", "price": "$14.99"})),
            &config,
        );

        assert_eq!(typed.inputs(), stringly.inputs());
        assert_eq!(typed.derived(), stringly.derived());
    }

    #[test]
    fn test_huge_review_counts_never_panic() {
        let config = ValidationConfig::default();
        let snapshot = validate(
            &raw(json!({"review_count_positive": 9e18, "review_count_negative": 9e18})),
            &config,
        );

        assert!(snapshot.is_valid());
        assert!(snapshot.inputs().review_count_total.is_none());
        assert!(snapshot
            .validation_warnings()
            .iter()
            .any(|w| w.field == "review_count_positive" && w.message.contains("count")));
    }

    #[test]
    fn test_invalid_snapshot_suppresses_failed_derivations() {
        let config = ValidationConfig::default();
        let snapshot = validate(
            &raw(json!({
                "revenue_gross": 1000, "days_since_launch": 10,
                "review_count_total": 500, "unit_count_owned": 100
            })),
            &config,
        );

        assert!(!snapshot.is_valid());
        assert_eq!(snapshot.validation_errors()[0].error_type, IssueKind::DataIntegrityError);
        assert!(snapshot.derived().review_rate.is_none());
        assert_eq!(snapshot.derived().daily_revenue, Some(100.0));
    }

    #[test]
    fn test_warning_order() {
        let config = ValidationConfig::default();
        let snapshot = validate(
            &raw(json!({
                "release_date": "someday",
                "review_count_total": 3, "review_count_positive": 3,
                "unit_count_owned": 100
            })),
            &config,
        );

        let fields: Vec<&str> = snapshot
            .validation_warnings()
            .iter()
            .map(|w| w.field.as_str())
            .collect();
        assert_eq!(
            fields,
            vec![
                "release_date",
                "revenue_gross",
                "days_since_launch",
                "price",
                "review_count_total"
            ]
        );
        assert!(snapshot.is_valid());
    }
}
