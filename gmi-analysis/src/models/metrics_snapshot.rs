//! Validated metrics snapshot
//!
//! The single source of truth for an item's metrics within a run. Built only
//! by the validator (`validators::validate`); fields are private and exposed
//! through shared references, so a snapshot cannot change after construction.
//! Filling in estimated figures produces a new snapshot.

use crate::estimators::EstimationResult;
use crate::models::ValidationError;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;

/// Free vs paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Monetization {
    Free,
    Paid,
    Unknown,
}

impl Monetization {
    /// True when both sides are known and differ
    pub fn conflicts_with(&self, other: &Monetization) -> bool {
        matches!(
            (self, other),
            (Monetization::Free, Monetization::Paid) | (Monetization::Paid, Monetization::Free)
        )
    }
}

/// Single-user vs multi-user focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceMode {
    Single,
    Multi,
    /// Both single- and multi-user modes advertised
    Mixed,
    Unknown,
}

impl AudienceMode {
    /// True only for a strict single vs multi split; mixed items conflict with neither
    pub fn conflicts_with(&self, other: &AudienceMode) -> bool {
        matches!(
            (self, other),
            (AudienceMode::Single, AudienceMode::Multi) | (AudienceMode::Multi, AudienceMode::Single)
        )
    }
}

/// Where the ownership/revenue figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureSource {
    Direct,
    Estimated,
}

/// Raw inputs after boundary normalization
///
/// Every field is strictly typed. `None` means the input did not carry a
/// usable value; no consumer ever re-interprets the original raw value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedInputs {
    pub revenue_gross: Option<f64>,
    pub days_since_launch: Option<i64>,
    pub review_count_total: Option<i64>,
    pub review_count_positive: Option<i64>,
    pub review_count_negative: Option<i64>,
    pub unit_count_owned: Option<i64>,
    pub price: Option<f64>,
    pub release_date: Option<NaiveDate>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub developer: Option<String>,
    pub publisher: Option<String>,
    /// Aggregate review score as a fraction (0.0-1.0)
    pub review_score: Option<f64>,
    pub monetization: Monetization,
    pub audience_mode: AudienceMode,
}

impl NormalizedInputs {
    /// Positive/negative split, present when either side was supplied
    ///
    /// A missing side defaults to zero once the other side is present.
    pub fn review_breakdown(&self) -> Option<(i64, i64)> {
        if self.review_count_positive.is_none() && self.review_count_negative.is_none() {
            return None;
        }
        Some((
            self.review_count_positive.unwrap_or(0),
            self.review_count_negative.unwrap_or(0),
        ))
    }
}

/// Fields derived once at construction
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub revenue_after_platform_cut: Option<f64>,
    pub daily_revenue: Option<f64>,
    pub monthly_revenue: Option<f64>,
    pub review_positive_ratio: Option<f64>,
    pub review_rate: Option<f64>,
    pub revenue_per_unit: Option<f64>,
}

impl DerivedMetrics {
    /// Compute derived fields with guarded denominators
    ///
    /// `failed_fields` lists inputs that failed a critical check; anything
    /// derived from them stays absent.
    pub fn compute(
        inputs: &NormalizedInputs,
        failed_fields: &HashSet<String>,
        platform_revenue_share: f64,
        days_per_month: f64,
    ) -> Self {
        let usable = |field: &str| !failed_fields.contains(field);

        let revenue = inputs
            .revenue_gross
            .filter(|r| r.is_finite() && usable("revenue_gross"));
        let days = inputs
            .days_since_launch
            .filter(|d| *d > 0 && usable("days_since_launch"));
        let units = inputs
            .unit_count_owned
            .filter(|u| *u > 0 && usable("unit_count_owned"));
        let reviews = inputs
            .review_count_total
            .filter(|_| usable("review_count_total"));

        let daily_revenue = match (revenue, days) {
            (Some(r), Some(d)) => Some(r / d as f64),
            _ => None,
        };

        let review_positive_ratio = match (reviews, inputs.review_breakdown()) {
            (Some(total), Some((positive, _)))
                if total > 0 && usable("review_count_positive") && usable("review_count_negative") =>
            {
                Some(positive as f64 / total as f64)
            }
            _ => None,
        };

        Self {
            revenue_after_platform_cut: revenue.map(|r| r * platform_revenue_share),
            daily_revenue,
            monthly_revenue: daily_revenue.map(|d| d * days_per_month),
            review_positive_ratio,
            review_rate: match (reviews, units) {
                (Some(r), Some(u)) if r >= 0 => Some(r as f64 / u as f64),
                _ => None,
            },
            revenue_per_unit: match (revenue, units) {
                (Some(r), Some(u)) => Some(r / u as f64),
                _ => None,
            },
        }
    }
}

/// Validated, immutable metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    item_id: String,
    name: String,
    #[serde(flatten)]
    inputs: NormalizedInputs,
    #[serde(flatten)]
    derived: DerivedMetrics,
    figures_source: FigureSource,
    validation_errors: Vec<ValidationError>,
    validation_warnings: Vec<ValidationError>,
    is_valid: bool,
    /// Kept for recomputation; not part of the serialized snapshot
    #[serde(skip)]
    platform_revenue_share: f64,
    #[serde(skip)]
    days_per_month: f64,
}

impl MetricsSnapshot {
    /// Assemble a snapshot from validator output
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        item_id: String,
        name: String,
        inputs: NormalizedInputs,
        validation_errors: Vec<ValidationError>,
        validation_warnings: Vec<ValidationError>,
        figures_source: FigureSource,
        platform_revenue_share: f64,
        days_per_month: f64,
    ) -> Self {
        let failed = failed_fields(&validation_errors);
        let derived =
            DerivedMetrics::compute(&inputs, &failed, platform_revenue_share, days_per_month);
        let is_valid = validation_errors.is_empty();

        Self {
            item_id,
            name,
            inputs,
            derived,
            figures_source,
            validation_errors,
            validation_warnings,
            is_valid,
            platform_revenue_share,
            days_per_month,
        }
    }

    /// Append warnings found after construction (validator only)
    pub(crate) fn with_appended_warnings(mut self, warnings: Vec<ValidationError>) -> Self {
        self.validation_warnings.extend(warnings);
        self
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &NormalizedInputs {
        &self.inputs
    }

    pub fn derived(&self) -> &DerivedMetrics {
        &self.derived
    }

    pub fn figures_source(&self) -> FigureSource {
        self.figures_source
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        &self.validation_errors
    }

    pub fn validation_warnings(&self) -> &[ValidationError] {
        &self.validation_warnings
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// True when direct ownership or revenue figures are missing
    pub fn needs_estimate(&self) -> bool {
        self.inputs.unit_count_owned.is_none() || self.inputs.revenue_gross.is_none()
    }

    /// New snapshot with missing ownership/revenue filled from an estimate
    ///
    /// Direct figures are never overwritten, and a filled unit count is never
    /// below the review count. Derived fields are recomputed on the new
    /// instance; `self` is left untouched.
    pub fn with_estimated_figures(&self, estimate: &EstimationResult) -> MetricsSnapshot {
        let mut inputs = self.inputs.clone();
        let mut filled = false;

        if inputs.unit_count_owned.is_none() {
            let reviews = inputs.review_count_total.unwrap_or(0).max(0);
            let point = estimate.ownership_point.max(0.0).round() as i64;
            inputs.unit_count_owned = Some(point.max(reviews));
            filled = true;
        }
        if inputs.revenue_gross.is_none() {
            inputs.revenue_gross = Some(estimate.revenue_estimate);
            filled = true;
        }

        MetricsSnapshot::new(
            self.item_id.clone(),
            self.name.clone(),
            inputs,
            self.validation_errors.clone(),
            self.validation_warnings.clone(),
            if filled {
                FigureSource::Estimated
            } else {
                self.figures_source
            },
            self.platform_revenue_share,
            self.days_per_month,
        )
    }
}

fn failed_fields(errors: &[ValidationError]) -> HashSet<String> {
    errors
        .iter()
        .filter(|e| e.is_critical())
        .map(|e| e.field.clone())
        .collect()
}
