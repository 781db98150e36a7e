//! Consistency Validator
//!
//! Enforces the hard invariants of a metrics snapshot on normalized inputs.
//!
//! # Integrity Checks (in order)
//! 1. **Revenue**: `revenue_gross >= 0`
//! 2. **Counts**: every review/unit count `>= 0`
//! 3. **Review math**: `positive + negative == total`
//! 4. **Review ceiling**: `review_count_total <= unit_count_owned`
//! 5. **Price range**: `0 <= price <= max_price`
//! 6. **Age**: `days_since_launch > 0`
//!
//! A check whose operands are absent is not evaluated; the absence is
//! reported as a `missing_field` warning instead. Failures are records, never
//! `Err`: the caller always gets a snapshot back.
//!
//! # Example
//! ```rust,ignore
//! use gmi_analysis::validators::ConsistencyValidator;
//!
//! let validator = ConsistencyValidator::new(&config.validation);
//! let report = validator.check(&inputs);
//! assert!(report.errors.is_empty());
//! ```

use crate::config::ValidationConfig;
use crate::models::{NormalizedInputs, ValidationError};
use serde_json::json;
use tracing::debug;

/// Fields whose absence is reported, with the consequence shown to the reader
const TRACKED_FIELDS: &[(&str, &str)] = &[
    ("revenue_gross", "revenue figures will be estimated"),
    ("days_since_launch", "daily and monthly revenue unavailable"),
    ("review_count_total", "review ratios unavailable"),
    ("unit_count_owned", "ownership figures will be estimated"),
    ("price", "price-based comparisons unavailable"),
];

/// Outcome of the integrity pass
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    /// Critical records, in check order
    pub errors: Vec<ValidationError>,
    /// `missing_field` warnings for invariants that could not be evaluated
    pub missing: Vec<ValidationError>,
}

/// Invariant checker for normalized inputs
pub struct ConsistencyValidator<'a> {
    config: &'a ValidationConfig,
}

impl<'a> ConsistencyValidator<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    /// Run every integrity check against `inputs`
    pub fn check(&self, inputs: &NormalizedInputs) -> IntegrityReport {
        let mut report = IntegrityReport::default();

        self.check_revenue(inputs, &mut report.errors);
        let counts_ok = self.check_counts(inputs, &mut report.errors);
        if counts_ok {
            self.check_review_math(inputs, &mut report.errors);
            self.check_review_ceiling(inputs, &mut report.errors);
        }
        self.check_price(inputs, &mut report.errors);
        self.check_age(inputs, &mut report.errors);

        report.missing = missing_field_warnings(inputs);

        debug!(
            critical = report.errors.len(),
            missing = report.missing.len(),
            "Integrity checks complete"
        );

        report
    }

    fn check_revenue(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) {
        if let Some(revenue) = inputs.revenue_gross {
            if revenue < 0.0 {
                errors.push(ValidationError::critical(
                    "revenue_gross",
                    "revenue cannot be negative",
                    ">= 0",
                    revenue,
                ));
            }
        }
    }

    /// Returns false when any count was negative
    fn check_counts(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) -> bool {
        let counts = [
            ("review_count_total", inputs.review_count_total),
            ("review_count_positive", inputs.review_count_positive),
            ("review_count_negative", inputs.review_count_negative),
            ("unit_count_owned", inputs.unit_count_owned),
        ];

        let mut all_ok = true;
        for (field, value) in counts {
            if let Some(count) = value {
                if count < 0 {
                    all_ok = false;
                    errors.push(ValidationError::critical(
                        field,
                        "count cannot be negative",
                        ">= 0",
                        count,
                    ));
                }
            }
        }
        all_ok
    }

    fn check_review_math(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) {
        let (Some(total), Some((positive, negative))) =
            (inputs.review_count_total, inputs.review_breakdown())
        else {
            return;
        };

        let sum = positive.checked_add(negative);
        if sum != Some(total) {
            errors.push(ValidationError::critical(
                "review_count_total",
                format!(
                    "review counts do not add up: {} positive + {} negative != {} total",
                    positive, negative, total
                ),
                sum,
                total,
            ));
        }
    }

    fn check_review_ceiling(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) {
        let (Some(reviews), Some(units)) = (inputs.review_count_total, inputs.unit_count_owned)
        else {
            return;
        };

        if reviews > units {
            errors.push(ValidationError::critical(
                "review_count_total",
                format!(
                    "review count exceeds unit count ({} reviews, {} units owned)",
                    reviews, units
                ),
                format!("<= {}", units),
                reviews,
            ));
        }
    }

    fn check_price(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) {
        if let Some(price) = inputs.price {
            if !(0.0..=self.config.max_price).contains(&price) {
                errors.push(ValidationError::critical(
                    "price",
                    "price outside the accepted range",
                    json!({ "min": 0.0, "max": self.config.max_price }),
                    price,
                ));
            }
        }
    }

    fn check_age(&self, inputs: &NormalizedInputs, errors: &mut Vec<ValidationError>) {
        if let Some(days) = inputs.days_since_launch {
            if days <= 0 {
                errors.push(ValidationError::critical(
                    "days_since_launch",
                    "days since launch must be positive",
                    "> 0",
                    days,
                ));
            }
        }
    }
}

fn missing_field_warnings(inputs: &NormalizedInputs) -> Vec<ValidationError> {
    TRACKED_FIELDS
        .iter()
        .filter(|(field, _)| is_absent(inputs, field))
        .map(|(field, consequence)| {
            ValidationError::warning(
                *field,
                format!("missing_field: {} not supplied; {}", field, consequence),
                "value",
                serde_json::Value::Null,
            )
        })
        .collect()
}

fn is_absent(inputs: &NormalizedInputs, field: &str) -> bool {
    match field {
        "revenue_gross" => inputs.revenue_gross.is_none(),
        "days_since_launch" => inputs.days_since_launch.is_none(),
        "review_count_total" => inputs.review_count_total.is_none(),
        "unit_count_owned" => inputs.unit_count_owned.is_none(),
        "price" => inputs.price.is_none(),
        _ => false,
    }
}
