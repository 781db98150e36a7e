//! Action ROI projection and prioritization

pub mod action_template;
pub mod roi_engine;

pub use action_template::{
    default_action_templates, ActionCategory, ActionTemplate, ConfidenceLevel, CostEstimate,
    EffortEstimate, ImpactModel,
};
pub use roi_engine::{
    evaluate, rank, ActionROI, FinancialInvestment, RevenueImpact, RoiRatios, TimeInvestment,
};
