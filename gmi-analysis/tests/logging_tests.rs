// Log output tests
//
// The core never depends on a subscriber, but degraded inputs must be visible
// to operators when one is installed.

mod helpers;

use gmi_analysis::models::{Signal, SignalSet};
use gmi_analysis::{analyze, estimate, AnalysisConfig, AnalysisRequest};
use helpers::log_capture::capture_logs;
use helpers::snapshot;
use serde_json::json;
use tracing::Level;

#[test]
fn missing_genre_baseline_logs_warning() {
    let config = AnalysisConfig::default();
    let subject = snapshot(json!({"item_id": "odd-one", "categories": ["Knitting Sim"]}));

    let (result, logs) = capture_logs(|| estimate(&subject, &SignalSet::default(), &config.estimation));

    assert_eq!(result.baseline, config.estimation.default_baseline);
    logs.assert_contains(Level::WARN, "No genre baseline");
    let record = &logs.matching(Level::WARN, "No genre baseline")[0];
    assert!(record
        .fields
        .iter()
        .any(|(name, value)| name == "item_id" && value.contains("odd-one")));
}

#[test]
fn unknown_signal_logged_at_debug() {
    let config = AnalysisConfig::default();
    let subject = snapshot(json!({"categories": ["Action"]}));
    let signals = SignalSet::new(vec![Signal::present("moon_phase", 0.5, "almanac", 1.0)]);

    let (result, logs) = capture_logs(|| estimate(&subject, &signals, &config.estimation));

    assert!(result.signals_used.is_empty());
    logs.assert_contains(Level::DEBUG, "no estimator role");
    assert!(logs.matching(Level::WARN, "").is_empty());
}

#[test]
fn rejected_run_logged_at_info() {
    let config = AnalysisConfig::default();
    let request: AnalysisRequest = serde_json::from_value(json!({
        "raw_metrics": {"item_id": "bad", "revenue_gross": -5}
    }))
    .unwrap();

    let (outcome, logs) = capture_logs(|| analyze(&request, &config));

    assert!(!outcome.is_completed());
    logs.assert_contains(Level::INFO, "rejected by validation");
}
