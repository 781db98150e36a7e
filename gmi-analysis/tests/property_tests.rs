// Property tests for the analysis core
//
// Sweeps small input grids rather than single examples:
// - integrity invariants hold for every valid snapshot
// - validation is deterministic
// - confidence tier never drops when a present signal is added
// - estimated figures never break the review invariants
// - ranking and evaluation degrade gracefully

mod helpers;

use gmi_analysis::models::{IssueKind, Signal, SignalSet};
use gmi_analysis::roi::{ConfidenceLevel, CostEstimate, EffortEstimate, ImpactModel};
use gmi_analysis::{
    analyze, default_action_templates, estimate, evaluate, rank, validate, ActionTemplate,
    AnalysisConfig, AnalysisOutcome, AnalysisRequest,
};
use helpers::{known_signals, paid_subject, raw, scenario_a, snapshot};
use serde_json::json;

#[test]
fn review_math_holds_for_every_valid_snapshot() {
    let config = AnalysisConfig::default();

    for total in 0..12i64 {
        for positive in 0..12i64 {
            for negative in 0..12i64 {
                let snapshot = validate(
                    &raw(json!({
                        "review_count_total": total,
                        "review_count_positive": positive,
                        "review_count_negative": negative,
                        "unit_count_owned": 1000
                    })),
                    &config.validation,
                );

                if positive + negative == total {
                    assert!(snapshot.is_valid(), "{}+{}=={}", positive, negative, total);
                } else {
                    assert!(!snapshot.is_valid());
                    assert!(snapshot
                        .validation_errors()
                        .iter()
                        .any(|e| e.error_type == IssueKind::DataIntegrityError
                            && e.field == "review_count_total"));
                }
            }
        }
    }
}

#[test]
fn review_total_never_exceeds_units_when_valid() {
    let config = AnalysisConfig::default();

    for units in [0i64, 1, 10, 100] {
        for total in [0i64, 1, 10, 100, 101] {
            let snapshot = validate(
                &raw(json!({"review_count_total": total, "unit_count_owned": units})),
                &config.validation,
            );
            assert_eq!(snapshot.is_valid(), total <= units, "{} reviews / {} units", total, units);
        }
    }
}

#[test]
fn validation_is_deterministic() {
    let config = AnalysisConfig::default();
    let input = raw(paid_subject());

    let first = validate(&input, &config.validation);
    let second = validate(&input, &config.validation);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );

    let a1 = validate(&scenario_a(), &config.validation);
    let a2 = validate(&scenario_a(), &config.validation);
    assert_eq!(a1, a2);
}

#[test]
fn confidence_tier_monotonic_in_present_signals() {
    let config = AnalysisConfig::default();
    let subject = snapshot(json!({"categories": ["Strategy"], "days_since_launch": 200, "price": 15}));

    let mut signals = SignalSet::default();
    let mut previous = estimate(&subject, &signals, &config.estimation).confidence_tier;

    for next in known_signals() {
        signals.push(next);
        let tier = estimate(&subject, &signals, &config.estimation).confidence_tier;
        assert!(tier >= previous, "{} dropped to {}", previous, tier);
        previous = tier;
    }

    // Absent and unrecognized signals never move the tier
    let before = estimate(&subject, &signals, &config.estimation).confidence_tier;
    signals.push(Signal::absent("critic_score", "critic", Some("timeout".to_string())));
    signals.push(Signal::present("weather_index", 3.0, "sky", 1.0));
    let after = estimate(&subject, &signals, &config.estimation).confidence_tier;
    assert_eq!(before, after);
}

#[test]
fn ten_signals_reach_very_high() {
    let config = AnalysisConfig::default();
    let subject = snapshot(json!({"categories": ["Strategy"]}));
    let signals = SignalSet::new(known_signals());

    let result = estimate(&subject, &signals, &config.estimation);
    assert_eq!(result.signals_used.len(), 10);
    assert_eq!(result.confidence_tier.to_string(), "very-high");
    assert!(result.ownership_low <= result.ownership_point);
    assert!(result.ownership_point <= result.ownership_high);
}

fn absolute_template(name: &str, likely: f64) -> ActionTemplate {
    ActionTemplate {
        name: name.to_string(),
        category: gmi_analysis::roi::ActionCategory::Marketing,
        effort: EffortEstimate {
            research_hours: 5.0,
            implementation_hours: 5.0,
            testing_hours: 0.0,
        },
        costs: CostEstimate {
            tools_cost: 0.0,
            services_cost: 0.0,
            marketing_cost: 100.0,
        },
        impact: ImpactModel::Absolute {
            conservative: likely / 2.0,
            likely,
            optimistic: likely * 2.0,
        },
        confidence: ConfidenceLevel::Medium,
        timeline_weeks: Some(2.0),
        risk_factors: vec!["Audience fatigue".to_string()],
        success_metrics: vec![],
    }
}

#[test]
fn completed_reports_keep_review_invariants_after_estimation() {
    let config = AnalysisConfig::default();

    for reviews in [0i64, 1, 40, 1_000, 250_000] {
        for owner_estimate in [0.0, 50.0, 5_000.0] {
            for weight in [0.0, 1.0, 500.0] {
                for direct in [json!({}), json!({"unit_count_owned": 300_000}), json!({"revenue_gross": 9000})] {
                    let mut metrics = raw(json!({
                        "item_id": "sweep",
                        "review_count_total": reviews,
                        "review_count_positive": reviews / 2,
                        "review_count_negative": reviews - reviews / 2,
                        "price": 12.5,
                        "days_since_launch": 90,
                        "categories": ["Puzzle"]
                    }));
                    metrics.extend(raw(direct.clone()));
                    let request: AnalysisRequest = serde_json::from_value(json!({
                        "raw_metrics": metrics,
                        "signals": [{"name": "ownership_estimate", "value": owner_estimate,
                                     "source_id": "owners", "reliability_weight": weight}]
                    }))
                    .unwrap();

                    let outcome = analyze(&request, &config);
                    let AnalysisOutcome::Completed(report) = outcome else {
                        continue;
                    };
                    let inputs = report.snapshot.inputs();
                    let units = inputs.unit_count_owned.expect("units filled");
                    let total = inputs.review_count_total.expect("total supplied");
                    assert!(total <= units, "reviews {} > units {}", total, units);
                    let (positive, negative) = inputs.review_breakdown().expect("breakdown supplied");
                    assert_eq!(positive + negative, total);

                    if direct.get("unit_count_owned").is_some() {
                        assert_eq!(inputs.revenue_gross, Some(units as f64 * 12.5));
                    }
                }
            }
        }
    }
}

#[test]
fn higher_roi_ranks_first_at_equal_confidence_and_time() {
    let config = AnalysisConfig::default();
    let subject = validate(&scenario_a(), &config.validation);

    for (low, high) in [(700.0, 800.0), (1_000.0, 5_000.0), (601.0, 602.0)] {
        let weaker = evaluate(&absolute_template("Weaker", low), &subject, &[], 50.0, &config.roi);
        let stronger = evaluate(&absolute_template("Stronger", high), &subject, &[], 50.0, &config.roi);
        assert!(stronger.roi_ratio.likely > weaker.roi_ratio.likely);

        let ranked = rank(vec![weaker, stronger]);
        assert_eq!(ranked[0].action_name, "Stronger");
    }
}

#[test]
fn losing_actions_rank_lower_when_slower_or_riskier() {
    let config = AnalysisConfig::default();
    let subject = validate(&scenario_a(), &config.validation);

    for likely in [10.0, 50.0, 90.0] {
        let mut quick = absolute_template("Quick loss", likely);
        quick.effort.research_hours = 1.0;
        quick.effort.implementation_hours = 0.0;
        let mut slow = quick.clone();
        slow.name = "Slow loss".to_string();
        slow.effort.research_hours = 80.0;
        let mut risky = quick.clone();
        risky.name = "Risky loss".to_string();
        risky.risk_factors = vec!["a".into(), "b".into(), "c".into()];

        // Zero rate keeps investment equal, so every variant has the same ROI
        let evaluated: Vec<_> = [&quick, &slow, &risky]
            .iter()
            .map(|t| evaluate(t, &subject, &[], 0.0, &config.roi))
            .collect();
        assert!(evaluated.iter().all(|a| a.roi_ratio.likely == evaluated[0].roi_ratio.likely));
        assert!(evaluated[0].roi_ratio.likely.unwrap() < 0.0);

        let quick_priority = evaluated[0].priority_score.unwrap();
        assert!(evaluated[1].priority_score.unwrap() < quick_priority);
        assert!(evaluated[2].priority_score.unwrap() < quick_priority);

        let ranked = rank(evaluated);
        assert_eq!(ranked[0].action_name, "Quick loss");
    }
}

#[test]
fn evaluate_never_fails_on_degenerate_templates() {
    let config = AnalysisConfig::default();
    let subject = validate(&scenario_a(), &config.validation);

    let mut no_timeline = absolute_template("No timeline", 900.0);
    no_timeline.timeline_weeks = None;
    let mut zero_timeline = absolute_template("Zero timeline", 900.0);
    zero_timeline.timeline_weeks = Some(0.0);
    let zero_likely = absolute_template("Zero likely", 0.0);

    let a = evaluate(&no_timeline, &subject, &[], 50.0, &config.roi);
    assert!(a.payback_weeks.is_none());
    assert!(a.roi_ratio.likely.is_some());

    let b = evaluate(&zero_timeline, &subject, &[], 50.0, &config.roi);
    assert!(b.payback_weeks.is_none());

    let c = evaluate(&zero_likely, &subject, &[], 50.0, &config.roi);
    assert!(c.payback_weeks.is_none());
    assert!(c.roi_ratio.likely.is_none());
    assert_eq!(c.roi_ratio.conservative, Some(-1.0));
    assert_eq!(c.roi_ratio.optimistic, Some(-1.0));
    assert!(c.priority_score.is_none());
    assert_eq!(c.total_investment, 600.0);

    let ranked = rank(vec![c, b, a]);
    assert!(ranked.last().unwrap().priority_score.is_none());
}

#[test]
fn default_library_evaluates_without_revenue() {
    let config = AnalysisConfig::default();
    let subject = snapshot(json!({"item_id": "no-revenue", "price": 10}));

    let actions: Vec<_> = default_action_templates()
        .iter()
        .map(|t| evaluate(t, &subject, &[], config.roi.hourly_rate, &config.roi))
        .collect();

    assert_eq!(actions.len(), 6);
    for action in rank(actions) {
        assert!(action.total_investment >= 0.0);
        assert!(action.roi_ratio.likely.is_none());
        assert!(action.priority_score.is_none());
    }
}
