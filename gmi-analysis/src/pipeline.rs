//! Analysis run orchestration
//!
//! # Architecture
//! ```text
//! raw metrics ─► validate ─┬─ invalid ─► Rejected { snapshot }
//!                          │
//!                          └─ valid ─► estimate (when figures missing)
//!                                      ─► find_comparables (validated pool)
//!                                      ─► evaluate each template ─► rank
//!                                      ─► Completed(AnalysisReport)
//! ```
//!
//! Every stage is a pure function of the request and the config, so batches
//! run in parallel with no coordination beyond collecting results in order.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};
use crate::estimators::{estimate, EstimationResult};
use crate::matching::{find_comparables, ComparableCandidate, MarketContext};
use crate::models::{MetricsSnapshot, SignalSet, ValidationError};
use crate::roi::{default_action_templates, evaluate, rank, ActionROI, ActionTemplate};
use crate::validators::validate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything one analysis run needs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Flat provider mapping for the subject item
    pub raw_metrics: Map<String, Value>,
    #[serde(default)]
    pub signals: SignalSet,
    /// Raw metrics for candidate comparable items
    #[serde(default)]
    pub candidates: Vec<Map<String, Value>>,
    /// Templates to evaluate; the built-in library when absent
    #[serde(default)]
    pub action_templates: Option<Vec<ActionTemplate>>,
    /// Overrides `roi.hourly_rate`
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    /// Overrides `matching.default_min_score`
    #[serde(default)]
    pub min_score: Option<i32>,
    /// Overrides `matching.default_max_results`
    #[serde(default)]
    pub max_results: Option<usize>,
}

/// Artifacts of a completed run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Subject snapshot, with estimated figures filled in when needed
    pub snapshot: MetricsSnapshot,
    pub estimation: Option<EstimationResult>,
    pub comparables: Vec<ComparableCandidate>,
    pub market_context: MarketContext,
    /// Ranked, highest priority first
    pub actions: Vec<ActionROI>,
    /// Validation, estimation and run-parameter warnings, in that order
    pub disclaimers: Vec<ValidationError>,
    /// Rate actually applied to every action
    pub hourly_rate: f64,
}

/// Result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// Subject failed a critical check; nothing downstream ran
    Rejected { snapshot: MetricsSnapshot },
    Completed(AnalysisReport),
}

impl AnalysisOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed(_))
    }

    pub fn snapshot(&self) -> &MetricsSnapshot {
        match self {
            AnalysisOutcome::Rejected { snapshot } => snapshot,
            AnalysisOutcome::Completed(report) => &report.snapshot,
        }
    }
}

/// Run one analysis
pub fn analyze(request: &AnalysisRequest, config: &AnalysisConfig) -> AnalysisOutcome {
    let subject = validate(&request.raw_metrics, &config.validation);
    if !subject.is_valid() {
        info!(
            item_id = %subject.item_id(),
            errors = subject.validation_errors().len(),
            "Subject rejected by validation"
        );
        return AnalysisOutcome::Rejected { snapshot: subject };
    }

    let pool: Vec<MetricsSnapshot> = request
        .candidates
        .iter()
        .map(|raw| validate(raw, &config.validation))
        .collect();

    let (subject, estimation) = if subject.needs_estimate() {
        let result = estimate(&subject, &request.signals, &config.estimation);
        (subject.with_estimated_figures(&result), Some(result))
    } else {
        (subject, None)
    };

    let min_score = request
        .min_score
        .unwrap_or(config.matching.default_min_score);
    let max_results = request
        .max_results
        .unwrap_or(config.matching.default_max_results);
    let comparables = find_comparables(&subject, &pool, min_score, max_results, &config.matching);
    let market_context = MarketContext::from_comparables(&subject, &comparables);

    let (hourly_rate, rate_warning) = resolve_hourly_rate(request.hourly_rate, config.roi.hourly_rate);
    let library;
    let templates: &[ActionTemplate] = match &request.action_templates {
        Some(templates) => templates,
        None => {
            library = default_action_templates();
            &library
        }
    };
    let actions = rank(
        templates
            .iter()
            .map(|t| evaluate(t, &subject, &comparables, hourly_rate, &config.roi))
            .collect(),
    );

    let mut disclaimers = subject.validation_warnings().to_vec();
    if let Some(result) = &estimation {
        disclaimers.extend(result.warnings.iter().cloned());
    }
    disclaimers.extend(rate_warning);

    info!(
        item_id = %subject.item_id(),
        estimated = estimation.is_some(),
        comparables = comparables.len(),
        actions = actions.len(),
        disclaimers = disclaimers.len(),
        "Analysis complete"
    );

    AnalysisOutcome::Completed(AnalysisReport {
        snapshot: subject,
        estimation,
        comparables,
        market_context,
        actions,
        disclaimers,
        hourly_rate,
    })
}

/// Rate to apply: the request override when usable, else the configured rate
///
/// An unusable override (negative or non-finite) is replaced by the
/// configured rate and reported as a warning.
fn resolve_hourly_rate(requested: Option<f64>, configured: f64) -> (f64, Option<ValidationError>) {
    match requested {
        None => (configured, None),
        Some(rate) if rate.is_finite() && rate >= 0.0 => (rate, None),
        Some(rate) => {
            warn!(requested = rate, applied = configured, "Unusable hourly rate override");
            let warning = ValidationError::warning(
                "hourly_rate",
                format!(
                    "requested hourly rate {} is not a finite non-negative number; configured rate {} applied",
                    rate, configured
                ),
                ">= 0",
                rate.to_string(),
            );
            (configured, Some(warning))
        }
    }
}

/// Run many analyses in parallel; results keep input order
pub fn analyze_batch(requests: &[AnalysisRequest], config: &AnalysisConfig) -> Vec<AnalysisOutcome> {
    debug!(requests = requests.len(), "Starting batch analysis");
    requests
        .par_iter()
        .map(|request| analyze(request, config))
        .collect()
}

/// Parse run input: one request object or an array of them
pub fn parse_requests(value: Value) -> AnalysisResult<Vec<AnalysisRequest>> {
    let requests: Vec<AnalysisRequest> = match value {
        Value::Array(_) => serde_json::from_value(value)?,
        Value::Object(_) => vec![serde_json::from_value(value)?],
        other => {
            return Err(AnalysisError::InvalidRequest(format!(
                "expected an object or array, found {}",
                json_kind(&other)
            )))
        }
    };

    if requests.is_empty() {
        return Err(AnalysisError::InvalidRequest(
            "input contains no requests".to_string(),
        ));
    }
    Ok(requests)
}

/// Read and parse a run input file
pub fn load_requests(path: &Path) -> AnalysisResult<Vec<AnalysisRequest>> {
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    parse_requests(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
