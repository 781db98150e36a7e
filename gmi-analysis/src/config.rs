//! Analysis configuration
//!
//! Every business constant used by the core lives in `AnalysisConfig` and is
//! passed explicitly into each component call. There are no module-level
//! tunables, so two computation paths can never disagree on a default.
//!
//! # TOML layout
//! ```toml
//! [validation]
//! max_price = 500.0
//!
//! [estimation]
//! default_baseline = 5000.0
//!
//! [estimation.genre_baselines]
//! action = 25000.0
//!
//! [matching]
//! default_min_score = 30
//!
//! [roi]
//! hourly_rate = 50.0
//! ```
//!
//! Every field has a default; a file only needs the values it overrides.

use gmi_common::config::read_toml_file;
use gmi_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Root configuration value object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub validation: ValidationConfig,
    #[serde(default)]
    pub estimation: EstimationConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub roi: RoiConfig,
}

impl AnalysisConfig {
    /// Load from a TOML file, or built-in defaults when `path` is `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: AnalysisConfig = match path {
            Some(p) => {
                info!("Loading analysis config from {}", p.display());
                read_toml_file(p)?
            }
            None => {
                info!("No analysis config file, using built-in defaults");
                AnalysisConfig::default()
            }
        };
        config.check()?;
        Ok(config)
    }

    /// Reject configurations that would make the core misbehave
    pub fn check(&self) -> Result<()> {
        let v = &self.validation;
        if !is_non_negative(v.max_price) {
            return Err(Error::Config(format!("validation.max_price must be >= 0, got {}", v.max_price)));
        }
        if !(0.0..=1.0).contains(&v.platform_revenue_share) {
            return Err(Error::Config(format!(
                "validation.platform_revenue_share must be within 0.0-1.0, got {}",
                v.platform_revenue_share
            )));
        }
        if v.review_rate_min > v.review_rate_max {
            return Err(Error::Config(format!(
                "validation.review_rate_min ({}) exceeds review_rate_max ({})",
                v.review_rate_min, v.review_rate_max
            )));
        }

        let e = &self.estimation;
        if !is_positive(e.min_multiplier) || e.min_multiplier > e.max_multiplier {
            return Err(Error::Config(format!(
                "estimation multiplier clamp is invalid: [{}, {}]",
                e.min_multiplier, e.max_multiplier
            )));
        }
        if !is_positive(e.default_baseline) {
            return Err(Error::Config(format!(
                "estimation.default_baseline must be > 0, got {}",
                e.default_baseline
            )));
        }
        if let Some((genre, value)) = e.genre_baselines.iter().find(|(_, v)| !is_positive(**v)) {
            return Err(Error::Config(format!(
                "estimation.genre_baselines.{} must be > 0, got {}",
                genre, value
            )));
        }
        let t = &e.confidence_thresholds;
        if !(t.very_high >= t.high && t.high >= t.medium_high && t.medium_high >= t.medium) {
            return Err(Error::Config(
                "estimation.confidence_thresholds must be non-increasing from very_high to medium"
                    .to_string(),
            ));
        }

        if self.matching.default_max_results == 0 {
            return Err(Error::Config("matching.default_max_results must be > 0".to_string()));
        }

        let r = &self.roi;
        if !is_non_negative(r.hourly_rate) {
            return Err(Error::Config(format!("roi.hourly_rate must be >= 0, got {}", r.hourly_rate)));
        }
        if !is_positive(r.time_factor_hours) {
            return Err(Error::Config(format!(
                "roi.time_factor_hours must be > 0, got {}",
                r.time_factor_hours
            )));
        }

        Ok(())
    }
}

/// False for NaN as well as negatives
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

fn is_positive(value: f64) -> bool {
    value > 0.0
}

// ============================================================================
// Validation
// ============================================================================

/// Consistency validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Upper bound for a plausible list price
    pub max_price: f64,
    /// Share of gross revenue kept after the platform cut
    pub platform_revenue_share: f64,
    /// Days used to scale daily revenue to monthly revenue
    pub days_per_month: f64,
    /// Plausible band for reviews per owned unit
    pub review_rate_min: f64,
    pub review_rate_max: f64,
    /// Reviews needed before a positive ratio or score is trusted
    pub min_review_sample: i64,
    /// Allowed gap between the aggregate review score and the positive ratio
    pub score_ratio_tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_price: 500.0,
            platform_revenue_share: 0.7,
            days_per_month: 30.0,
            review_rate_min: 0.005,
            review_rate_max: 0.25,
            min_review_sample: 10,
            score_ratio_tolerance: 0.15,
        }
    }
}

// ============================================================================
// Estimation
// ============================================================================

/// One step of a threshold table: values `>= at_least` get `multiplier`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierStep {
    pub at_least: f64,
    pub multiplier: f64,
}

/// Step function from a measured value to an adjustment multiplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierTable(pub Vec<TierStep>);

impl TierTable {
    fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        TierTable(
            pairs
                .iter()
                .map(|&(at_least, multiplier)| TierStep { at_least, multiplier })
                .collect(),
        )
    }

    /// Multiplier of the highest step at or below `value`; 1.0 below every step
    pub fn multiplier_for(&self, value: f64) -> f64 {
        self.0
            .iter()
            .filter(|step| value >= step.at_least)
            .max_by(|a, b| a.at_least.total_cmp(&b.at_least))
            .map(|step| step.multiplier)
            .unwrap_or(1.0)
    }
}

/// Signal-count thresholds for confidence tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceThresholds {
    pub very_high: usize,
    pub high: usize,
    pub medium_high: usize,
    pub medium: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            very_high: 8,
            high: 6,
            medium_high: 4,
            medium: 3,
        }
    }
}

/// Multi-signal estimator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Ownership baseline per category (matched case-insensitively)
    pub genre_baselines: BTreeMap<String, f64>,
    /// Baseline for categories with no entry
    pub default_baseline: f64,
    /// Weight of the genre baseline when blended with other anchors
    pub baseline_weight: f64,
    /// Owners per review for the review-count anchor
    pub review_to_owner_multiplier: f64,
    pub review_anchor_weight: f64,
    /// Owners per peak concurrent player for the telemetry anchor
    pub ccu_to_owner_multiplier: f64,
    /// Clamp for the combined adjustment multiplier
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Range around the point estimate
    pub low_range_factor: f64,
    pub high_range_factor: f64,
    pub confidence_thresholds: ConfidenceThresholds,
    /// Aggregate quality score (fraction)
    pub quality_tiers: TierTable,
    /// Days since launch
    pub age_bands: TierTable,
    /// List price (paid items)
    pub price_bands: TierTable,
    /// Multiplier for free items in place of `price_bands`
    pub free_multiplier: f64,
    /// Median/average playtime hours
    pub playtime_tiers: TierTable,
    /// External rating count
    pub rating_volume_tiers: TierTable,
    /// Search interest index (0-100)
    pub search_interest_tiers: TierTable,
    pub video_view_tiers: TierTable,
    pub follower_tiers: TierTable,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        let genre_baselines = [
            ("action", 25_000.0),
            ("adventure", 15_000.0),
            ("casual", 8_000.0),
            ("early access", 6_000.0),
            ("free to play", 50_000.0),
            ("horror", 10_000.0),
            ("indie", 5_000.0),
            ("massively multiplayer", 40_000.0),
            ("platformer", 6_000.0),
            ("puzzle", 4_000.0),
            ("racing", 10_000.0),
            ("rpg", 30_000.0),
            ("shooter", 30_000.0),
            ("simulation", 20_000.0),
            ("sports", 12_000.0),
            ("strategy", 20_000.0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            genre_baselines,
            default_baseline: 5_000.0,
            baseline_weight: 1.0,
            review_to_owner_multiplier: 30.0,
            review_anchor_weight: 1.5,
            ccu_to_owner_multiplier: 40.0,
            min_multiplier: 0.25,
            max_multiplier: 4.0,
            low_range_factor: 0.4,
            high_range_factor: 2.5,
            confidence_thresholds: ConfidenceThresholds::default(),
            quality_tiers: TierTable::from_pairs(&[
                (0.0, 0.6),
                (0.4, 0.8),
                (0.7, 1.0),
                (0.8, 1.1),
                (0.9, 1.25),
                (0.95, 1.35),
            ]),
            age_bands: TierTable::from_pairs(&[
                (0.0, 0.5),
                (30.0, 0.75),
                (90.0, 0.9),
                (365.0, 1.0),
                (730.0, 1.15),
                (1095.0, 1.25),
            ]),
            price_bands: TierTable::from_pairs(&[
                (0.0, 1.3),
                (5.0, 1.15),
                (15.0, 1.0),
                (30.0, 0.85),
                (60.0, 0.7),
            ]),
            free_multiplier: 2.0,
            playtime_tiers: TierTable::from_pairs(&[
                (0.0, 0.9),
                (2.0, 1.0),
                (10.0, 1.1),
                (25.0, 1.2),
                (60.0, 1.3),
            ]),
            rating_volume_tiers: TierTable::from_pairs(&[
                (10.0, 1.05),
                (100.0, 1.15),
                (1000.0, 1.3),
            ]),
            search_interest_tiers: TierTable::from_pairs(&[
                (25.0, 1.05),
                (50.0, 1.15),
                (75.0, 1.25),
            ]),
            video_view_tiers: TierTable::from_pairs(&[
                (10_000.0, 1.05),
                (100_000.0, 1.1),
                (1_000_000.0, 1.2),
            ]),
            follower_tiers: TierTable::from_pairs(&[
                (1_000.0, 1.05),
                (10_000.0, 1.1),
                (100_000.0, 1.2),
            ]),
        }
    }
}

impl EstimationConfig {
    /// Baseline for the first category with an entry, case-insensitive
    pub fn baseline_for<'a>(&self, categories: &'a [String]) -> Option<(&'a str, f64)> {
        categories.iter().find_map(|category| {
            let wanted = category.trim().to_lowercase();
            self.genre_baselines
                .iter()
                .find(|(genre, _)| genre.to_lowercase() == wanted)
                .map(|(_, value)| (category.as_str(), *value))
        })
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Comparable-item matcher point weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub category_match_points: i32,
    pub shared_tag_points: i32,
    pub price_band_points: i32,
    /// Relative price tolerance for the price band (0.2 = ±20%)
    pub price_tolerance: f64,
    pub release_window_points: i32,
    pub release_window_months: u32,
    pub same_studio_points: i32,
    pub monetization_mismatch_points: i32,
    pub audience_mismatch_points: i32,
    pub default_min_score: i32,
    pub default_max_results: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            category_match_points: 40,
            shared_tag_points: 5,
            price_band_points: 20,
            price_tolerance: 0.2,
            release_window_points: 10,
            release_window_months: 6,
            same_studio_points: 15,
            monetization_mismatch_points: -50,
            audience_mismatch_points: -30,
            default_min_score: 30,
            default_max_results: 10,
        }
    }
}

// ============================================================================
// ROI
// ============================================================================

/// Action ROI/priority engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    /// Hourly rate for time investment; passed explicitly into every evaluation
    pub hourly_rate: f64,
    pub high_confidence_multiplier: f64,
    pub medium_confidence_multiplier: f64,
    pub low_confidence_multiplier: f64,
    /// Priority reduction per listed risk factor
    pub risk_penalty_per_factor: f64,
    /// Lowest risk factor regardless of how many risks are listed
    pub risk_floor: f64,
    /// Hours that add 1.0 to the time factor
    pub time_factor_hours: f64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            hourly_rate: 50.0,
            high_confidence_multiplier: 1.0,
            medium_confidence_multiplier: 0.7,
            low_confidence_multiplier: 0.4,
            risk_penalty_per_factor: 0.1,
            risk_floor: 0.5,
            time_factor_hours: 40.0,
        }
    }
}
