//! Market context derived from a matched comparable set
//!
//! "Higher performers" are comparables in a strictly higher owner tier than
//! the subject. When the subject's own tier is unknown there are none.

use super::comparable_matcher::ComparableCandidate;
use super::owner_tier::OwnerTier;
use crate::models::MetricsSnapshot;
use serde::Serialize;

/// Summary of the comparable set used by the ROI engine and report
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarketContext {
    pub comparable_count: usize,
    pub subject_owner_tier: Option<OwnerTier>,
    /// Mean price of comparables that carry one
    pub average_price: Option<f64>,
    pub higher_performer_count: usize,
    pub higher_performer_avg_price: Option<f64>,
    pub higher_performer_avg_positive_ratio: Option<f64>,
}

impl MarketContext {
    pub fn from_comparables(subject: &MetricsSnapshot, comparables: &[ComparableCandidate]) -> Self {
        let subject_tier = subject.inputs().unit_count_owned.map(OwnerTier::from_units);

        let higher: Vec<&ComparableCandidate> = match subject_tier {
            Some(tier) => comparables
                .iter()
                .filter(|c| c.owner_tier.is_some_and(|t| t > tier))
                .collect(),
            None => Vec::new(),
        };

        Self {
            comparable_count: comparables.len(),
            subject_owner_tier: subject_tier,
            average_price: mean(comparables.iter().filter_map(|c| c.price)),
            higher_performer_count: higher.len(),
            higher_performer_avg_price: mean(higher.iter().filter_map(|c| c.price)),
            higher_performer_avg_positive_ratio: mean(
                higher.iter().filter_map(|c| c.review_positive_ratio),
            ),
        }
    }
}

/// Mean of the values, absent when there are none
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
