//! Action templates
//!
//! A template describes one recommended action: the effort and money it
//! takes, the revenue it is expected to move, and the risks involved. It
//! carries no hourly rate; the rate is always supplied at evaluation time.
//!
//! # JSON form
//! ```json
//! {
//!   "name": "Run a launch-window discount",
//!   "category": "pricing",
//!   "effort": {"research_hours": 2, "implementation_hours": 2, "testing_hours": 1},
//!   "costs": {"tools_cost": 0, "services_cost": 0, "marketing_cost": 0},
//!   "impact": {"model": "uplift", "conservative": 0.05, "likely": 0.12, "optimistic": 0.25, "horizon_months": 1},
//!   "confidence": "high",
//!   "timeline_weeks": 1,
//!   "risk_factors": ["Discount anchoring"],
//!   "success_metrics": ["Conversion rate during discount"]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Broad action family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    Pricing,
    StorePage,
    Marketing,
    Content,
    Community,
    Localization,
    Other,
}

/// How confident the template author is in the impact numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Hours of work by phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffortEstimate {
    pub research_hours: f64,
    pub implementation_hours: f64,
    pub testing_hours: f64,
}

impl EffortEstimate {
    pub fn total_hours(&self) -> f64 {
        self.research_hours + self.implementation_hours + self.testing_hours
    }
}

/// Out-of-pocket costs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostEstimate {
    pub tools_cost: f64,
    pub services_cost: f64,
    pub marketing_cost: f64,
}

impl CostEstimate {
    pub fn total_cost(&self) -> f64 {
        self.tools_cost + self.services_cost + self.marketing_cost
    }
}

/// Expected revenue impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ImpactModel {
    /// Currency amounts per scenario
    Absolute {
        conservative: f64,
        likely: f64,
        optimistic: f64,
    },
    /// Fractions of current monthly revenue, sustained over `horizon_months`
    Uplift {
        conservative: f64,
        likely: f64,
        optimistic: f64,
        horizon_months: f64,
    },
}

/// One candidate action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub name: String,
    #[serde(default = "default_category")]
    pub category: ActionCategory,
    #[serde(default)]
    pub effort: EffortEstimate,
    #[serde(default)]
    pub costs: CostEstimate,
    pub impact: ImpactModel,
    #[serde(default = "default_confidence")]
    pub confidence: ConfidenceLevel,
    #[serde(default)]
    pub timeline_weeks: Option<f64>,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
}

fn default_category() -> ActionCategory {
    ActionCategory::Other
}

fn default_confidence() -> ConfidenceLevel {
    ConfidenceLevel::Medium
}

/// Built-in action library used when a run supplies no templates
pub fn default_action_templates() -> Vec<ActionTemplate> {
    vec![
        ActionTemplate {
            name: "Optimize store page capsule and trailer".to_string(),
            category: ActionCategory::StorePage,
            effort: effort(4.0, 10.0, 2.0),
            costs: costs(0.0, 150.0, 0.0),
            impact: uplift(0.03, 0.08, 0.15, 3.0),
            confidence: ConfidenceLevel::Medium,
            timeline_weeks: Some(2.0),
            risk_factors: strings(&["New capsule may test worse than the current one"]),
            success_metrics: strings(&[
                "Store page visit-to-wishlist conversion",
                "Trailer completion rate",
            ]),
        },
        ActionTemplate {
            name: "Run a launch-window discount".to_string(),
            category: ActionCategory::Pricing,
            effort: effort(2.0, 2.0, 1.0),
            costs: costs(0.0, 0.0, 0.0),
            impact: uplift(0.05, 0.12, 0.25, 1.0),
            confidence: ConfidenceLevel::High,
            timeline_weeks: Some(1.0),
            risk_factors: strings(&["Trains buyers to wait for discounts"]),
            success_metrics: strings(&["Units sold during the discount window"]),
        },
        ActionTemplate {
            name: "Localize into top three languages".to_string(),
            category: ActionCategory::Localization,
            effort: effort(6.0, 20.0, 10.0),
            costs: costs(0.0, 1500.0, 0.0),
            impact: uplift(0.05, 0.15, 0.30, 6.0),
            confidence: ConfidenceLevel::Medium,
            timeline_weeks: Some(6.0),
            risk_factors: strings(&[
                "Translation quality issues",
                "Ongoing cost for future updates",
            ]),
            success_metrics: strings(&["Share of sales from newly localized regions"]),
        },
        ActionTemplate {
            name: "Ship a content update".to_string(),
            category: ActionCategory::Content,
            effort: effort(10.0, 60.0, 20.0),
            costs: costs(100.0, 0.0, 0.0),
            impact: uplift(0.10, 0.25, 0.50, 3.0),
            confidence: ConfidenceLevel::Medium,
            timeline_weeks: Some(8.0),
            risk_factors: strings(&["Scope creep", "Regression bugs in existing content"]),
            success_metrics: strings(&[
                "Returning player count after the update",
                "Review volume in the update window",
            ]),
        },
        ActionTemplate {
            name: "Creator outreach campaign".to_string(),
            category: ActionCategory::Marketing,
            effort: effort(8.0, 12.0, 0.0),
            costs: costs(0.0, 0.0, 500.0),
            impact: uplift(0.02, 0.10, 0.30, 2.0),
            confidence: ConfidenceLevel::Low,
            timeline_weeks: Some(4.0),
            risk_factors: strings(&["Low creator response rate", "Coverage timing is uncontrolled"]),
            success_metrics: strings(&["Video views attributed to outreach", "Wishlist spikes after coverage"]),
        },
        ActionTemplate {
            name: "Community events and devlogs".to_string(),
            category: ActionCategory::Community,
            effort: effort(4.0, 16.0, 0.0),
            costs: costs(0.0, 0.0, 0.0),
            impact: uplift(0.01, 0.04, 0.08, 3.0),
            confidence: ConfidenceLevel::Medium,
            timeline_weeks: Some(4.0),
            risk_factors: Vec::new(),
            success_metrics: strings(&["Follower growth", "Event participation"]),
        },
    ]
}

fn effort(research: f64, implementation: f64, testing: f64) -> EffortEstimate {
    EffortEstimate {
        research_hours: research,
        implementation_hours: implementation,
        testing_hours: testing,
    }
}

fn costs(tools: f64, services: f64, marketing: f64) -> CostEstimate {
    CostEstimate {
        tools_cost: tools,
        services_cost: services,
        marketing_cost: marketing,
    }
}

fn uplift(conservative: f64, likely: f64, optimistic: f64, horizon_months: f64) -> ImpactModel {
    ImpactModel::Uplift {
        conservative,
        likely,
        optimistic,
        horizon_months,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
