//! Action ROI/Priority Engine
//!
//! # Formulas
//! - `total_investment = total_hours * hourly_rate + total_cost`
//! - `roi_ratio = (impact - total_investment) / total_investment` per scenario
//! - `payback_weeks = total_investment / (likely / timeline_weeks)`
//! - `priority_score = roi_likely * confidence_multiplier * risk_factor / time_factor`
//!   for a non-negative `roi_likely`; a loss is scaled the other way
//!   (`roi_likely * time_factor / (confidence_multiplier * risk_factor)`) so
//!   slower, riskier losing actions still rank below faster ones
//!   - `confidence_multiplier`: high 1.0, medium 0.7, low 0.4
//!   - `risk_factor = max(risk_floor, 1 - risk_penalty_per_factor * risks)`
//!   - `time_factor = 1 + total_hours / time_factor_hours`
//!
//! Every ratio with a zero or absent denominator is `None`, as is the likely
//! ROI when the likely impact is zero. Evaluation never
//! fails, so one degenerate template cannot abort a batch.

use super::action_template::{ActionCategory, ActionTemplate, ConfidenceLevel, ImpactModel};
use crate::config::RoiConfig;
use crate::matching::{ComparableCandidate, MarketContext};
use crate::models::MetricsSnapshot;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeInvestment {
    pub research_hours: f64,
    pub implementation_hours: f64,
    pub testing_hours: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialInvestment {
    pub tools_cost: f64,
    pub services_cost: f64,
    pub marketing_cost: f64,
    pub total_cost: f64,
}

/// Revenue impact per scenario, in currency
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueImpact {
    pub conservative: f64,
    pub likely: f64,
    pub optimistic: f64,
}

/// ROI per scenario; `None` when not computable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiRatios {
    pub conservative: Option<f64>,
    pub likely: Option<f64>,
    pub optimistic: Option<f64>,
}

/// Investment/return projection for one action
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionROI {
    pub action_name: String,
    pub category: ActionCategory,
    pub time_investment: TimeInvestment,
    pub financial_investment: FinancialInvestment,
    pub total_investment: f64,
    pub revenue_impact: RevenueImpact,
    pub roi_ratio: RoiRatios,
    pub payback_weeks: Option<f64>,
    pub confidence_level: ConfidenceLevel,
    pub timeline_weeks: Option<f64>,
    pub priority_score: Option<f64>,
    pub risk_factors: Vec<String>,
    pub success_metrics: Vec<String>,
}

/// Evaluate one action template for a snapshot
///
/// # Arguments
/// * `template` - Action to evaluate
/// * `snapshot` - Subject snapshot (monthly revenue feeds uplift impacts)
/// * `comparables` - Matched comparables for pricing context (may be empty)
/// * `hourly_rate` - Caller-supplied rate applied to every hour of effort
/// * `config` - Confidence mapping, risk and time factors
pub fn evaluate(
    template: &ActionTemplate,
    snapshot: &MetricsSnapshot,
    comparables: &[ComparableCandidate],
    hourly_rate: f64,
    config: &RoiConfig,
) -> ActionROI {
    let rate = if hourly_rate.is_finite() && hourly_rate >= 0.0 {
        hourly_rate
    } else {
        warn!(
            action = %template.name,
            hourly_rate = hourly_rate,
            "Invalid hourly rate; time investment valued at zero"
        );
        0.0
    };

    let total_hours = template.effort.total_hours();
    let total_cost = template.costs.total_cost();
    let total_investment = total_hours * rate + total_cost;

    let revenue_impact = scenario_impacts(&template.impact, snapshot);

    let roi_ratio = RoiRatios {
        conservative: roi(revenue_impact.conservative, total_investment),
        likely: roi(revenue_impact.likely, total_investment)
            .filter(|_| revenue_impact.likely != 0.0),
        optimistic: roi(revenue_impact.optimistic, total_investment),
    };

    let payback_weeks = match template.timeline_weeks {
        Some(weeks) if weeks > 0.0 && revenue_impact.likely > 0.0 => {
            finite(total_investment / (revenue_impact.likely / weeks))
        }
        _ => None,
    };

    let priority_score = roi_ratio.likely.and_then(|roi_likely| {
        let confidence = confidence_multiplier(template.confidence, config);
        let risk = risk_factor(template.risk_factors.len(), config);
        let time = 1.0 + total_hours / config.time_factor_hours;
        priority(roi_likely, confidence * risk, time)
    });

    let mut success_metrics = template.success_metrics.clone();
    if template.category == ActionCategory::Pricing {
        let context = MarketContext::from_comparables(snapshot, comparables);
        if let Some(price) = context.higher_performer_avg_price {
            success_metrics.push(format!(
                "Price positioning against higher performers (average price {:.2})",
                price
            ));
        }
    }

    debug!(
        action = %template.name,
        total_investment = total_investment,
        roi_likely = ?roi_ratio.likely,
        priority = ?priority_score,
        "Action evaluated"
    );

    ActionROI {
        action_name: template.name.clone(),
        category: template.category,
        time_investment: TimeInvestment {
            research_hours: template.effort.research_hours,
            implementation_hours: template.effort.implementation_hours,
            testing_hours: template.effort.testing_hours,
            total_hours,
        },
        financial_investment: FinancialInvestment {
            tools_cost: template.costs.tools_cost,
            services_cost: template.costs.services_cost,
            marketing_cost: template.costs.marketing_cost,
            total_cost,
        },
        total_investment,
        revenue_impact,
        roi_ratio,
        payback_weeks,
        confidence_level: template.confidence,
        timeline_weeks: template.timeline_weeks,
        priority_score,
        risk_factors: template.risk_factors.clone(),
        success_metrics,
    }
}

/// Order actions by priority (highest first)
///
/// Absent priorities sort last; ties go to fewer total hours, then name.
pub fn rank(mut actions: Vec<ActionROI>) -> Vec<ActionROI> {
    actions.sort_by(|a, b| {
        compare_priority(a.priority_score, b.priority_score)
            .then_with(|| {
                a.time_investment
                    .total_hours
                    .total_cmp(&b.time_investment.total_hours)
            })
            .then_with(|| a.action_name.cmp(&b.action_name))
    });
    actions
}

fn compare_priority(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn scenario_impacts(model: &ImpactModel, snapshot: &MetricsSnapshot) -> RevenueImpact {
    match *model {
        ImpactModel::Absolute {
            conservative,
            likely,
            optimistic,
        } => RevenueImpact {
            conservative,
            likely,
            optimistic,
        },
        ImpactModel::Uplift {
            conservative,
            likely,
            optimistic,
            horizon_months,
        } => {
            let monthly = snapshot.derived().monthly_revenue.unwrap_or(0.0);
            let scale = monthly * horizon_months.max(0.0);
            RevenueImpact {
                conservative: conservative * scale,
                likely: likely * scale,
                optimistic: optimistic * scale,
            }
        }
    }
}

fn roi(impact: f64, investment: f64) -> Option<f64> {
    if investment == 0.0 {
        return None;
    }
    finite((impact - investment) / investment)
}

/// Discounted priority; a loss grows with time and shrinks with trust
fn priority(roi_likely: f64, trust: f64, time: f64) -> Option<f64> {
    if roi_likely >= 0.0 {
        finite(roi_likely * trust / time)
    } else {
        finite(roi_likely * time / trust)
    }
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn confidence_multiplier(level: ConfidenceLevel, config: &RoiConfig) -> f64 {
    match level {
        ConfidenceLevel::High => config.high_confidence_multiplier,
        ConfidenceLevel::Medium => config.medium_confidence_multiplier,
        ConfidenceLevel::Low => config.low_confidence_multiplier,
    }
}

fn risk_factor(risks: usize, config: &RoiConfig) -> f64 {
    (1.0 - config.risk_penalty_per_factor * risks as f64).max(config.risk_floor)
}
