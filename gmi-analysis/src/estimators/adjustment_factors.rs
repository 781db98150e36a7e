//! Adjustment factors for the ownership baseline
//!
//! Each factor turns one family of evidence into a multiplier around 1.0.
//! Signal-backed factors average the per-signal multipliers weighted by
//! provider reliability; snapshot-backed factors (age, price) read the
//! validated snapshot. A factor with no backing data is exactly 1.0.
//!
//! # Signal routing
//! | Role              | Signal names |
//! |-------------------|--------------|
//! | ownership anchor  | `ownership_estimate`, `owner_estimate`, `owners_estimate` |
//! | telemetry anchor  | `peak_concurrent_players`, `peak_ccu` |
//! | quality           | `review_score`, `critic_score`, `user_score`, `metacritic_score` |
//! | engagement        | `median_playtime_hours`, `average_playtime_hours`, `completion_hours` |
//! | rating volume     | `rating_count`, `critic_reviews`, `critic_review_count`, `user_review_count` |
//! | buzz              | `search_interest`, `video_views`, `follower_count` |

use crate::config::{EstimationConfig, TierTable};
use crate::models::{MetricsSnapshot, Monetization, Signal};
use serde::Serialize;

/// What an estimator signal is evidence of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalRole {
    OwnershipAnchor,
    TelemetryAnchor,
    Quality,
    Engagement,
    RatingVolume,
    SearchInterest,
    VideoViews,
    Followers,
}

impl SignalRole {
    /// Role for a signal name; `None` for names the estimator does not use
    pub fn for_signal(name: &str) -> Option<Self> {
        let role = match name.trim().to_lowercase().as_str() {
            "ownership_estimate" | "owner_estimate" | "owners_estimate" => Self::OwnershipAnchor,
            "peak_concurrent_players" | "peak_ccu" => Self::TelemetryAnchor,
            "review_score" | "critic_score" | "user_score" | "metacritic_score" => Self::Quality,
            "median_playtime_hours" | "average_playtime_hours" | "completion_hours" => {
                Self::Engagement
            }
            "rating_count" | "critic_reviews" | "critic_review_count" | "user_review_count" => {
                Self::RatingVolume
            }
            "search_interest" => Self::SearchInterest,
            "video_views" => Self::VideoViews,
            "follower_count" => Self::Followers,
            _ => return None,
        };
        Some(role)
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::OwnershipAnchor | Self::TelemetryAnchor)
    }
}

/// Audit record for one applied factor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorAudit {
    pub name: String,
    pub multiplier: f64,
    /// Signal names or snapshot field that backed the factor
    pub source: String,
}

/// Factor names in application order
pub const FACTOR_NAMES: [&str; 6] = [
    "quality",
    "age",
    "price",
    "engagement",
    "rating_volume",
    "community_buzz",
];

/// Compute every adjustment factor, in `FACTOR_NAMES` order
///
/// `signals` must already be filtered to present signals with a known role.
pub fn compute_factors(
    snapshot: &MetricsSnapshot,
    signals: &[(&Signal, SignalRole)],
    config: &EstimationConfig,
) -> Vec<FactorAudit> {
    vec![
        signal_factor("quality", signals, |role, value| match role {
            SignalRole::Quality => Some(config.quality_tiers.multiplier_for(as_fraction(value))),
            _ => None,
        }),
        age_factor(snapshot, &config.age_bands),
        price_factor(snapshot, config),
        signal_factor("engagement", signals, |role, value| match role {
            SignalRole::Engagement => Some(config.playtime_tiers.multiplier_for(value)),
            _ => None,
        }),
        signal_factor("rating_volume", signals, |role, value| match role {
            SignalRole::RatingVolume => Some(config.rating_volume_tiers.multiplier_for(value)),
            _ => None,
        }),
        signal_factor("community_buzz", signals, |role, value| match role {
            SignalRole::SearchInterest => Some(config.search_interest_tiers.multiplier_for(value)),
            SignalRole::VideoViews => Some(config.video_view_tiers.multiplier_for(value)),
            SignalRole::Followers => Some(config.follower_tiers.multiplier_for(value)),
            _ => None,
        }),
    ]
}

/// Reliability-weighted mean of per-signal multipliers for one factor
fn signal_factor<F>(name: &str, signals: &[(&Signal, SignalRole)], tier: F) -> FactorAudit
where
    F: Fn(SignalRole, f64) -> Option<f64>,
{
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut plain_sum = 0.0;
    let mut used = Vec::new();

    for (signal, role) in signals {
        let Some(value) = signal.value() else {
            continue;
        };
        if let Some(multiplier) = tier(*role, value) {
            weighted_sum += multiplier * signal.reliability_weight;
            weight_total += signal.reliability_weight;
            plain_sum += multiplier;
            used.push(signal.name.as_str());
        }
    }

    let multiplier = if used.is_empty() {
        1.0
    } else if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        // Every provider carried zero weight: fall back to an unweighted mean
        plain_sum / used.len() as f64
    };

    FactorAudit {
        name: name.to_string(),
        multiplier,
        source: if used.is_empty() {
            "absent".to_string()
        } else {
            format!("signals: {}", used.join(", "))
        },
    }
}

fn age_factor(snapshot: &MetricsSnapshot, bands: &TierTable) -> FactorAudit {
    let days = snapshot.inputs().days_since_launch.filter(|d| *d > 0);
    FactorAudit {
        name: "age".to_string(),
        multiplier: days.map(|d| bands.multiplier_for(d as f64)).unwrap_or(1.0),
        source: match days {
            Some(_) => "snapshot: days_since_launch".to_string(),
            None => "absent".to_string(),
        },
    }
}

fn price_factor(snapshot: &MetricsSnapshot, config: &EstimationConfig) -> FactorAudit {
    let inputs = snapshot.inputs();
    let (multiplier, source) = match (inputs.monetization, inputs.price) {
        (Monetization::Free, _) => (config.free_multiplier, "snapshot: monetization"),
        (_, Some(price)) if price >= 0.0 => {
            (config.price_bands.multiplier_for(price), "snapshot: price")
        }
        _ => (1.0, "absent"),
    };

    FactorAudit {
        name: "price".to_string(),
        multiplier,
        source: source.to_string(),
    }
}

/// Scores arrive as fractions or on a 0-100 scale
fn as_fraction(value: f64) -> f64 {
    if value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::validate;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> MetricsSnapshot {
        let raw = value.as_object().cloned().unwrap();
        validate(&raw, &crate::config::ValidationConfig::default())
    }

    fn factor<'a>(factors: &'a [FactorAudit], name: &str) -> &'a FactorAudit {
        factors.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn test_signal_routing() {
        assert_eq!(SignalRole::for_signal("Critic_Score"), Some(SignalRole::Quality));
        assert_eq!(SignalRole::for_signal("peak_ccu"), Some(SignalRole::TelemetryAnchor));
        assert!(SignalRole::for_signal("ownership_estimate").unwrap().is_anchor());
        assert_eq!(SignalRole::for_signal("weather"), None);
    }

    #[test]
    fn test_no_data_means_unit_factors() {
        let config = EstimationConfig::default();
        let snap = snapshot(json!({"name": "Bare"}));
        let factors = compute_factors(&snap, &[], &config);

        assert_eq!(factors.len(), FACTOR_NAMES.len());
        assert!(factors.iter().all(|f| f.multiplier == 1.0));
        assert!(factors.iter().all(|f| f.source == "absent"));
    }

    #[test]
    fn test_quality_weighted_mean() {
        let config = EstimationConfig::default();
        let snap = snapshot(json!({}));
        let strong = Signal::present("critic_score", 92.0, "critic", 3.0);
        let weak = Signal::present("user_score", 0.5, "users", 1.0);
        let signals = vec![(&strong, SignalRole::Quality), (&weak, SignalRole::Quality)];

        let factors = compute_factors(&snap, &signals, &config);
        let quality = factor(&factors, "quality");

        // (1.25 * 3 + 0.8 * 1) / 4
        assert!((quality.multiplier - 1.1375).abs() < 1e-9);
        assert_eq!(quality.source, "signals: critic_score, user_score");
    }

    #[test]
    fn test_zero_weight_signals_use_plain_mean() {
        let config = EstimationConfig::default();
        let snap = snapshot(json!({}));
        let views = Signal::present("video_views", 2_000_000.0, "video", 0.0);
        let signals = vec![(&views, SignalRole::VideoViews)];

        let factors = compute_factors(&snap, &signals, &config);
        assert_eq!(factor(&factors, "community_buzz").multiplier, 1.2);
    }

    #[test]
    fn test_snapshot_factors() {
        let config = EstimationConfig::default();

        let paid = snapshot(json!({"days_since_launch": 400, "price": 19.99}));
        let factors = compute_factors(&paid, &[], &config);
        assert_eq!(factor(&factors, "age").multiplier, 1.0);
        assert_eq!(factor(&factors, "price").multiplier, 1.0);

        let free = snapshot(json!({"days_since_launch": 10, "price": 0}));
        let factors = compute_factors(&free, &[], &config);
        assert_eq!(factor(&factors, "age").multiplier, 0.5);
        assert_eq!(factor(&factors, "price").multiplier, config.free_multiplier);
    }
}
