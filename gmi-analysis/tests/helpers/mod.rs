//! Shared fixtures for gmi-analysis integration tests

#![allow(dead_code)]

pub mod log_capture;

use gmi_analysis::models::Signal;
use gmi_analysis::{validate, AnalysisConfig, MetricsSnapshot};
use serde_json::{json, Map, Value};

/// Unwrap a `json!` object literal into a raw metrics mapping
pub fn raw(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture must be a JSON object, got {}", other),
    }
}

/// Validate with default configuration
pub fn snapshot(value: Value) -> MetricsSnapshot {
    validate(&raw(value), &AnalysisConfig::default().validation)
}

/// Scenario A input
pub fn scenario_a() -> Map<String, Value> {
    raw(json!({
        "item_id": "scenario-a",
        "name": "Scenario A",
        "revenue_gross": 379,
        "days_since_launch": 7,
        "review_count_total": 5,
        "review_count_positive": 4,
        "review_count_negative": 1,
        "unit_count_owned": 100,
        "price": 14.99
    }))
}

/// A paid single-player strategy game with direct figures
pub fn paid_subject() -> Value {
    json!({
        "item_id": "subject",
        "name": "Hexfall Tactics",
        "revenue_gross": "$42,000",
        "days_since_launch": 120,
        "review_count_total": 420,
        "review_count_positive": 370,
        "review_count_negative": 50,
        "unit_count_owned": 4200,
        "price": "$19.99",
        "release_date": "Jun 3, 2024",
        "genres": "Strategy, Indie",
        "tags": ["Turn-Based", "Tactical", "Single-player"],
        "developer": "Northlight Forge"
    })
}

/// Candidate snapshot builder
pub fn candidate(id: &str, price: Value, categories: Value, extra: Value) -> Value {
    let mut fields = raw(json!({
        "item_id": id,
        "name": format!("Game {}", id),
        "price": price,
        "categories": categories,
    }));
    if let Value::Object(extra) = extra {
        fields.extend(extra);
    }
    Value::Object(fields)
}

/// Present signal with default reliability
pub fn signal(name: &str, value: f64) -> Signal {
    Signal::present(name, value, "fixture", 1.0)
}

/// A pool of distinct, individually routable present signals
pub fn known_signals() -> Vec<Signal> {
    vec![
        signal("ownership_estimate", 12_000.0),
        signal("critic_score", 84.0),
        signal("user_score", 0.78),
        signal("median_playtime_hours", 14.0),
        signal("rating_count", 350.0),
        signal("search_interest", 40.0),
        signal("video_views", 250_000.0),
        signal("follower_count", 6_500.0),
        signal("peak_concurrent_players", 300.0),
        signal("completion_hours", 22.0),
    ]
}
