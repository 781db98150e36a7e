//! Comparable-Item Matcher
//!
//! Scores every candidate against the subject with additive points, drops
//! anything below the threshold, and returns the strongest matches.
//!
//! # Scoring (defaults)
//! | Criterion                                   | Points |
//! |---------------------------------------------|--------|
//! | Shared category (each)                      | +40    |
//! | Shared tag (each)                           | +5     |
//! | Price within ±20% of the subject            | +20    |
//! | Release within ±6 months                    | +10    |
//! | Same developer or publisher                 | +15    |
//! | Monetization mismatch (free vs paid)        | -50    |
//! | Audience mismatch (single vs multi)         | -30    |
//!
//! Candidates below `min_score` are excluded entirely. An empty result is a
//! normal outcome.

use super::owner_tier::OwnerTier;
use crate::config::MatchingConfig;
use crate::models::MetricsSnapshot;
use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// One named contribution to a similarity score
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreComponent {
    pub criterion: String,
    pub points: i32,
}

/// A scored comparable item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparableCandidate {
    pub item_id: String,
    pub name: String,
    pub similarity_score: i32,
    /// Non-zero contributions, in scoring order
    pub score_breakdown: Vec<ScoreComponent>,
    /// Bucket from the candidate's own unit count; absent without one
    pub owner_tier: Option<OwnerTier>,
    pub price: Option<f64>,
    pub unit_count_owned: Option<i64>,
    pub review_positive_ratio: Option<f64>,
}

/// Find comparable items for `subject` in `pool`
///
/// # Arguments
/// * `subject` - The item being analyzed
/// * `pool` - Candidate snapshots; the subject itself and invalid snapshots are skipped
/// * `min_score` - Inclusive score threshold
/// * `max_results` - Maximum number of candidates returned
///
/// # Returns
/// Candidates sorted by score (highest first, ties by item id)
pub fn find_comparables(
    subject: &MetricsSnapshot,
    pool: &[MetricsSnapshot],
    min_score: i32,
    max_results: usize,
    config: &MatchingConfig,
) -> Vec<ComparableCandidate> {
    let mut candidates: Vec<ComparableCandidate> = pool
        .iter()
        .filter(|c| c.is_valid() && c.item_id() != subject.item_id())
        .map(|c| score_candidate(subject, c, config))
        .filter(|c| c.similarity_score >= min_score)
        .collect();

    // Sort by score (highest first), item id for stable ties
    candidates.sort_by(|a, b| {
        b.similarity_score
            .cmp(&a.similarity_score)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    candidates.truncate(max_results);

    debug!(
        subject = %subject.item_id(),
        pool = pool.len(),
        matched = candidates.len(),
        min_score = min_score,
        "Comparable matching complete"
    );

    candidates
}

/// Score one candidate against the subject
pub fn score_candidate(
    subject: &MetricsSnapshot,
    candidate: &MetricsSnapshot,
    config: &MatchingConfig,
) -> ComparableCandidate {
    let s = subject.inputs();
    let c = candidate.inputs();
    let mut breakdown = Vec::new();

    let shared_categories = shared_count(&s.categories, &c.categories);
    push(
        &mut breakdown,
        "shared_categories",
        shared_categories * config.category_match_points,
    );

    let shared_tags = shared_count(&s.tags, &c.tags);
    push(&mut breakdown, "shared_tags", shared_tags * config.shared_tag_points);

    if let (Some(sp), Some(cp)) = (s.price, c.price) {
        if within_price_band(sp, cp, config.price_tolerance) {
            push(&mut breakdown, "price_band", config.price_band_points);
        }
    }

    if let (Some(sd), Some(cd)) = (s.release_date, c.release_date) {
        if within_months(sd, cd, config.release_window_months) {
            push(&mut breakdown, "release_window", config.release_window_points);
        }
    }

    if same_studio(s.developer.as_deref(), c.developer.as_deref())
        || same_studio(s.publisher.as_deref(), c.publisher.as_deref())
    {
        push(&mut breakdown, "same_studio", config.same_studio_points);
    }

    if s.monetization.conflicts_with(&c.monetization) {
        push(
            &mut breakdown,
            "monetization_mismatch",
            config.monetization_mismatch_points,
        );
    }

    if s.audience_mode.conflicts_with(&c.audience_mode) {
        push(
            &mut breakdown,
            "audience_mismatch",
            config.audience_mismatch_points,
        );
    }

    ComparableCandidate {
        item_id: candidate.item_id().to_string(),
        name: candidate.name().to_string(),
        similarity_score: breakdown.iter().map(|b| b.points).sum(),
        score_breakdown: breakdown,
        owner_tier: c.unit_count_owned.map(OwnerTier::from_units),
        price: c.price,
        unit_count_owned: c.unit_count_owned,
        review_positive_ratio: candidate.derived().review_positive_ratio,
    }
}

fn push(breakdown: &mut Vec<ScoreComponent>, criterion: &str, points: i32) {
    if points != 0 {
        breakdown.push(ScoreComponent {
            criterion: criterion.to_string(),
            points,
        });
    }
}

/// Case-insensitive count of shared labels
fn shared_count(a: &[String], b: &[String]) -> i32 {
    let left: HashSet<String> = a.iter().map(|x| x.to_lowercase()).collect();
    let right: HashSet<String> = b.iter().map(|x| x.to_lowercase()).collect();
    left.intersection(&right).count() as i32
}

/// Candidate price within `tolerance` of the subject price
///
/// A free subject only matches free candidates.
fn within_price_band(subject: f64, candidate: f64, tolerance: f64) -> bool {
    if subject == 0.0 {
        return candidate == 0.0;
    }
    (candidate - subject).abs() <= subject.abs() * tolerance
}

fn within_months(a: NaiveDate, b: NaiveDate, months: u32) -> bool {
    let (earlier, later) = if a <= b { (a, b) } else { (b, a) };
    match earlier.checked_add_months(Months::new(months)) {
        Some(limit) => later <= limit,
        None => false,
    }
}

fn same_studio(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        _ => false,
    }
}
