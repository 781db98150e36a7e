//! Multi-Signal Estimator
//!
//! Estimates ownership and revenue for an item whose snapshot lacks direct
//! figures.
//!
//! # Algorithm
//! 1. **Baseline**: genre baseline for the first recognized category
//!    (default baseline plus a warning otherwise), blended with any ownership
//!    anchors (third-party ownership estimates, peak-concurrency telemetry,
//!    review-count anchor) by reliability-weighted mean
//! 2. **Factors**: quality, age, price, engagement, rating volume and
//!    community buzz, each 1.0 when its data is absent
//! 3. **Combine**: product of factors, clamped to
//!    `[min_multiplier, max_multiplier]`
//! 4. **Confidence**: tier from the number of present signals that contributed
//! 5. **Range**: `low = point * 0.4`, `high = point * 2.5`,
//!    `revenue = point * price`
//!
//! A direct unit count on the snapshot is the point (and the whole range);
//! only the missing revenue is derived from it. A modeled point never drops
//! below the snapshot's review count, since every review needs an owner.
//!
//! # Example
//! ```rust,ignore
//! use gmi_analysis::estimators::estimate;
//!
//! let result = estimate(&snapshot, &signals, &config.estimation);
//! println!("{} owners ({})", result.ownership_point, result.confidence_tier);
//! ```

use super::adjustment_factors::{compute_factors, FactorAudit, SignalRole};
use super::confidence::ConfidenceTier;
use crate::config::EstimationConfig;
use crate::models::{MetricsSnapshot, Signal, SignalSet, ValidationError};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

/// Confidence-graded ownership/revenue estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    pub ownership_low: f64,
    pub ownership_high: f64,
    pub ownership_point: f64,
    pub revenue_estimate: f64,
    pub confidence_tier: ConfidenceTier,
    /// Names of the present signals that contributed, in input order
    pub signals_used: Vec<String>,
    /// Product of all adjustment factors after clamping
    pub multiplier_applied: f64,
    /// Blended anchor value before adjustment
    pub baseline: f64,
    pub factors: Vec<FactorAudit>,
    pub warnings: Vec<ValidationError>,
}

/// One ownership anchor feeding the baseline blend
#[derive(Debug, Clone, Copy)]
struct Anchor {
    value: f64,
    weight: f64,
}

/// Estimate ownership and revenue from a snapshot and its signal set
///
/// # Arguments
/// * `snapshot` - Validated snapshot (categories, age, price, review count)
/// * `signals` - Provider signals; absent readings never contribute
/// * `config` - Genre baselines, factor tables, clamp and range factors
///
/// # Returns
/// A fully populated `EstimationResult`. A missing genre baseline is recorded
/// as a warning, never an error.
pub fn estimate(
    snapshot: &MetricsSnapshot,
    signals: &SignalSet,
    config: &EstimationConfig,
) -> EstimationResult {
    let mut warnings = Vec::new();

    let routed = route_signals(signals);

    // Baseline blend
    let genre_baseline = match config.baseline_for(&snapshot.inputs().categories) {
        Some((category, value)) => {
            debug!(category = %category, baseline = value, "Genre baseline matched");
            value
        }
        None => {
            warn!(
                item_id = %snapshot.item_id(),
                categories = ?snapshot.inputs().categories,
                "No genre baseline for categories; using default"
            );
            warnings.push(ValidationError::warning(
                "categories",
                format!(
                    "no genre baseline for the item's categories; default baseline {} used",
                    config.default_baseline
                ),
                json!(config.genre_baselines.keys().collect::<Vec<_>>()),
                json!(snapshot.inputs().categories),
            ));
            config.default_baseline
        }
    };

    let mut anchors = vec![Anchor {
        value: genre_baseline,
        weight: config.baseline_weight,
    }];
    for (signal, role) in &routed {
        if let Some(value) = anchor_value(signal, *role, config) {
            anchors.push(Anchor {
                value,
                weight: signal.reliability_weight,
            });
        }
    }
    if let Some(reviews) = snapshot.inputs().review_count_total.filter(|r| *r > 0) {
        anchors.push(Anchor {
            value: reviews as f64 * config.review_to_owner_multiplier,
            weight: config.review_anchor_weight,
        });
    }
    let baseline = blend(&anchors, genre_baseline);

    // Adjustment factors
    let factor_signals: Vec<(&Signal, SignalRole)> = routed
        .iter()
        .filter(|(_, role)| !role.is_anchor())
        .copied()
        .collect();
    let factors = compute_factors(snapshot, &factor_signals, config);

    let signals_used: Vec<String> = routed
        .iter()
        .filter(|(signal, role)| !role.is_anchor() || anchor_value(signal, *role, config).is_some())
        .map(|(signal, _)| signal.name.clone())
        .collect();

    let raw_multiplier: f64 = factors.iter().map(|f| f.multiplier).product();
    let multiplier_applied = raw_multiplier.clamp(config.min_multiplier, config.max_multiplier);
    if multiplier_applied != raw_multiplier {
        debug!(
            raw = raw_multiplier,
            clamped = multiplier_applied,
            "Combined multiplier clamped"
        );
        warnings.push(ValidationError::warning(
            "multiplier_applied",
            format!(
                "combined adjustment {:.3} clamped to {:.3}",
                raw_multiplier, multiplier_applied
            ),
            json!({ "min": config.min_multiplier, "max": config.max_multiplier }),
            raw_multiplier,
        ));
    }

    let modeled_point = (baseline * multiplier_applied).round();
    let direct_units = snapshot.inputs().unit_count_owned.filter(|u| *u >= 0);
    let review_floor = snapshot
        .inputs()
        .review_count_total
        .filter(|r| *r > 0)
        .map(|r| r as f64);

    let (ownership_point, ownership_low, ownership_high) = match (direct_units, review_floor) {
        (Some(units), _) => {
            debug!(units = units, modeled = modeled_point, "Direct unit count anchors the estimate");
            let units = units as f64;
            (units, units, units)
        }
        (None, Some(floor)) if floor > modeled_point => {
            warnings.push(ValidationError::warning(
                "ownership_point",
                format!(
                    "modeled ownership {} is below the review count; raised to {}",
                    modeled_point, floor
                ),
                format!(">= {}", floor),
                modeled_point,
            ));
            (
                floor,
                (floor * config.low_range_factor).max(floor),
                floor * config.high_range_factor,
            )
        }
        _ => (
            modeled_point,
            modeled_point * config.low_range_factor,
            modeled_point * config.high_range_factor,
        ),
    };

    let price = snapshot.inputs().price.filter(|p| *p > 0.0).unwrap_or(0.0);
    let confidence_tier =
        ConfidenceTier::from_signal_count(signals_used.len(), &config.confidence_thresholds);

    debug!(
        item_id = %snapshot.item_id(),
        baseline = baseline,
        multiplier = multiplier_applied,
        point = ownership_point,
        signals = signals_used.len(),
        tier = %confidence_tier,
        "Ownership estimate computed"
    );

    EstimationResult {
        ownership_low,
        ownership_high,
        ownership_point,
        revenue_estimate: ownership_point * price,
        confidence_tier,
        signals_used,
        multiplier_applied,
        baseline,
        factors,
        warnings,
    }
}

/// Present signals with a known role, in input order
///
/// Unknown names are skipped; duplicates of the same name all count.
fn route_signals(signals: &SignalSet) -> Vec<(&Signal, SignalRole)> {
    signals
        .present()
        .filter_map(|signal| match SignalRole::for_signal(&signal.name) {
            Some(role) => Some((signal, role)),
            None => {
                debug!(
                    signal = %signal.name,
                    source = %signal.source_id,
                    "Ignoring signal with no estimator role"
                );
                None
            }
        })
        .collect()
}

/// Owner count implied by an anchor signal; `None` for non-anchors
fn anchor_value(signal: &Signal, role: SignalRole, config: &EstimationConfig) -> Option<f64> {
    let value = signal.value()?;
    let owners = match role {
        SignalRole::OwnershipAnchor => value,
        SignalRole::TelemetryAnchor => value * config.ccu_to_owner_multiplier,
        _ => return None,
    };
    (owners >= 0.0).then_some(owners)
}

/// Reliability-weighted mean of anchors; `fallback` when no weight remains
fn blend(anchors: &[Anchor], fallback: f64) -> f64 {
    let weight_total: f64 = anchors.iter().map(|a| a.weight).sum();
    if weight_total <= 0.0 {
        return fallback;
    }
    anchors.iter().map(|a| a.value * a.weight).sum::<f64>() / weight_total
}
