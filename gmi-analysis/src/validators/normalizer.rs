//! Boundary normalization of raw metrics
//!
//! Provider data arrives duck-typed: prices as `"$14.99"`, scores as `"85%"`,
//! counts as `"1,234"`, categories as either `"Action, Indie"` or
//! `["Action", "Indie"]`, dates in several storefront formats. This module
//! turns one flat raw mapping into strictly typed `NormalizedInputs` before any
//! invariant check runs. Nothing downstream ever sees a raw value.
//!
//! Values that cannot be coerced become absent and produce a
//! `DataQualityWarning`; normalization itself never fails.

use crate::models::{AudienceMode, Monetization, NormalizedInputs, ValidationError};
use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Canonical field names and the aliases providers use for them
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("item_id", &["appid", "app_id", "id"]),
    ("name", &["title"]),
    ("revenue_gross", &["revenue", "gross_revenue"]),
    ("days_since_launch", &["days_since_release", "age_days"]),
    ("review_count_total", &["reviews_total", "total_reviews"]),
    ("review_count_positive", &["positive_reviews", "positive"]),
    ("review_count_negative", &["negative_reviews", "negative"]),
    ("unit_count_owned", &["owners", "units_owned"]),
    ("price", &["list_price"]),
    ("release_date", &["released", "launch_date"]),
    ("categories", &["genres", "category", "genre"]),
    ("tags", &["user_tags"]),
    ("developer", &["developers"]),
    ("publisher", &["publishers"]),
    ("review_score", &["score", "rating"]),
    ("is_free", &["free"]),
];

/// Largest count magnitude accepted from a provider (one quadrillion)
///
/// Keeps every sum of two counts well inside `i64`.
pub const MAX_COUNT: f64 = 1e15;

const FREE_MARKERS: &[&str] = &["free to play", "free-to-play", "f2p"];
const SINGLE_MARKERS: &[&str] = &["single-player", "singleplayer", "single player"];
const MULTI_MARKERS: &[&str] = &[
    "multi-player",
    "multiplayer",
    "multi player",
    "mmo",
    "massively multiplayer",
    "online pvp",
    "pvp",
    "co-op",
    "online co-op",
];

/// Result of a single-value coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced<T> {
    Value(T),
    Missing,
    Unparseable(String),
}

/// Normalized identity, inputs, and the warnings produced along the way
#[derive(Debug, Clone)]
pub struct Normalized {
    pub item_id: String,
    pub name: String,
    pub inputs: NormalizedInputs,
    pub warnings: Vec<ValidationError>,
}

/// Normalize one raw metrics mapping
pub fn normalize(raw: &Map<String, Value>) -> Normalized {
    let fields = canonicalize_keys(raw);
    let mut warnings = Vec::new();

    let get = |name: &str| fields.iter().find(|(k, _)| k == name).map(|(_, v)| *v);

    let item_id = get("item_id").and_then(coerce_text).unwrap_or_default();
    let name = get("name").and_then(coerce_text).unwrap_or_default();

    let w = &mut warnings;
    let revenue_gross = read(get("revenue_gross"), coerce_number, "revenue_gross", "number", w);
    let days_since_launch = read(get("days_since_launch"), coerce_count, "days_since_launch", "count", w);
    let mut review_count_total =
        read(get("review_count_total"), coerce_count, "review_count_total", "count", w);
    let review_count_positive =
        read(get("review_count_positive"), coerce_count, "review_count_positive", "count", w);
    let review_count_negative =
        read(get("review_count_negative"), coerce_count, "review_count_negative", "count", w);
    let unit_count_owned = read(get("unit_count_owned"), coerce_count, "unit_count_owned", "count", w);
    let price = read(get("price"), coerce_number, "price", "number", w);

    if review_count_total.is_none() {
        if let (Some(pos), Some(neg)) = (review_count_positive, review_count_negative) {
            review_count_total = pos.checked_add(neg);
        }
    }

    let review_score = read(
        get("review_score"),
        coerce_fraction,
        "review_score",
        "percentage or fraction",
        w,
    );
    let release_date = read(get("release_date"), coerce_date, "release_date", "date", w);

    let categories = get("categories").map(coerce_string_list).unwrap_or_default();
    let tags = get("tags").map(coerce_string_list).unwrap_or_default();
    let developer = get("developer").and_then(first_text);
    let publisher = get("publisher").and_then(first_text);
    let is_free = get("is_free").and_then(coerce_bool);

    let monetization = derive_monetization(price, is_free, &categories, &tags);
    let audience_mode = derive_audience_mode(&categories, &tags);

    Normalized {
        item_id,
        name,
        inputs: NormalizedInputs {
            revenue_gross,
            days_since_launch,
            review_count_total,
            review_count_positive,
            review_count_negative,
            unit_count_owned,
            price,
            release_date,
            categories,
            tags,
            developer,
            publisher,
            review_score,
            monetization,
            audience_mode,
        },
        warnings,
    }
}

/// Map raw keys onto canonical names; an exact canonical key beats an alias
fn canonicalize_keys(raw: &Map<String, Value>) -> Vec<(String, &Value)> {
    let mut resolved: Vec<(String, &Value)> = Vec::new();

    for (canonical, _) in FIELD_ALIASES {
        if let Some((_, value)) = raw.iter().find(|(k, _)| k.trim().eq_ignore_ascii_case(canonical)) {
            resolved.push((canonical.to_string(), value));
        }
    }

    for (canonical, aliases) in FIELD_ALIASES {
        if resolved.iter().any(|(k, _)| k == canonical) {
            continue;
        }
        let hit = aliases.iter().find_map(|alias| {
            raw.iter()
                .find(|(k, _)| k.trim().eq_ignore_ascii_case(alias))
                .map(|(_, v)| v)
        });
        if let Some(value) = hit {
            resolved.push((canonical.to_string(), value));
        }
    }

    resolved
}

fn unparseable(field: &str, expected: &str, actual: &str) -> ValidationError {
    ValidationError::warning(
        field,
        format!("could not interpret value as {}; treated as missing", expected),
        expected,
        actual,
    )
}

/// Coerce an optional raw value, recording a warning when it cannot be used
fn read<T>(
    value: Option<&Value>,
    coerce: fn(&Value) -> Coerced<T>,
    field: &str,
    expected: &str,
    warnings: &mut Vec<ValidationError>,
) -> Option<T> {
    match value.map(coerce).unwrap_or(Coerced::Missing) {
        Coerced::Value(v) => Some(v),
        Coerced::Missing => None,
        Coerced::Unparseable(actual) => {
            warnings.push(unparseable(field, expected, &actual));
            None
        }
    }
}

/// Parse a whole count; magnitudes beyond `MAX_COUNT` are unparseable
pub fn coerce_count(value: &Value) -> Coerced<i64> {
    match coerce_number(value) {
        Coerced::Value(v) if v.abs() <= MAX_COUNT => Coerced::Value(v.round() as i64),
        Coerced::Value(_) => Coerced::Unparseable(value.to_string()),
        Coerced::Missing => Coerced::Missing,
        Coerced::Unparseable(actual) => Coerced::Unparseable(actual),
    }
}

/// Parse a number from a JSON value, tolerating storefront string formats
pub fn coerce_number(value: &Value) -> Coerced<f64> {
    match value {
        Value::Null => Coerced::Missing,
        Value::Number(n) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .map(Coerced::Value)
            .unwrap_or_else(|| Coerced::Unparseable(n.to_string())),
        Value::String(s) => match parse_numeric_str(s) {
            Some((v, true)) => Coerced::Value(v / 100.0),
            Some((v, false)) => Coerced::Value(v),
            None if s.trim().is_empty() => Coerced::Missing,
            None => Coerced::Unparseable(s.clone()),
        },
        other => Coerced::Unparseable(other.to_string()),
    }
}

/// Parse a fraction (0.0-1.0); `"85%"`, `85`, and `0.85` all mean 0.85
pub fn coerce_fraction(value: &Value) -> Coerced<f64> {
    let (number, percent) = match value {
        Value::Null => return Coerced::Missing,
        Value::Number(n) => match n.as_f64().filter(|v| v.is_finite()) {
            Some(v) => (v, false),
            None => return Coerced::Unparseable(n.to_string()),
        },
        Value::String(s) => match parse_numeric_str(s) {
            Some(parsed) => parsed,
            None if s.trim().is_empty() => return Coerced::Missing,
            None => return Coerced::Unparseable(s.clone()),
        },
        other => return Coerced::Unparseable(other.to_string()),
    };

    let fraction = if percent || number > 1.0 {
        number / 100.0
    } else {
        number
    };

    if (0.0..=1.0).contains(&fraction) {
        Coerced::Value(fraction)
    } else {
        Coerced::Unparseable(value.to_string())
    }
}

/// Strip currency symbols, separators, and a trailing percent sign
///
/// Returns the number and whether it carried a `%`.
fn parse_numeric_str(s: &str) -> Option<(f64, bool)> {
    let trimmed = s.trim();
    let (body, percent) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim(), true),
        None => (trimmed, false),
    };

    let cleaned: String = body
        .chars()
        .filter(|c| !matches!(c, '$' | '€' | '£' | ',' | '_' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| (v, percent))
}

/// Single string (comma-separated) or array of strings → ordered, de-duplicated list
pub fn coerce_string_list(value: &Value) -> Vec<String> {
    let raw_items: Vec<String> = match value {
        Value::String(s) => s.split(',').map(str::to_string).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("description")
                    .or_else(|| obj.get("name"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut seen = HashSet::new();
    raw_items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Parse the storefront date formats we see in practice
pub fn coerce_date(value: &Value) -> Coerced<NaiveDate> {
    let s = match value {
        Value::Null => return Coerced::Missing,
        Value::String(s) => s.trim(),
        other => return Coerced::Unparseable(other.to_string()),
    };

    if s.is_empty() {
        return Coerced::Missing;
    }

    const FORMATS: &[&str] = &["%Y-%m-%d", "%b %d, %Y", "%d %b, %Y", "%B %d, %Y", "%d %B, %Y", "%Y/%m/%d"];

    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Coerced::Value(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(s) {
        return Coerced::Value(timestamp.date_naive());
    }

    Coerced::Unparseable(s.to_string())
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First entry of a string-or-list value (developer/publisher lists)
fn first_text(value: &Value) -> Option<String> {
    coerce_string_list(value).into_iter().next()
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|v| v != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn has_marker(labels: &[String], markers: &[&str]) -> bool {
    labels
        .iter()
        .any(|label| markers.contains(&label.to_lowercase().as_str()))
}

fn derive_monetization(
    price: Option<f64>,
    is_free: Option<bool>,
    categories: &[String],
    tags: &[String],
) -> Monetization {
    if is_free == Some(true)
        || has_marker(categories, FREE_MARKERS)
        || has_marker(tags, FREE_MARKERS)
    {
        return Monetization::Free;
    }
    match (is_free, price) {
        (_, Some(p)) if p == 0.0 => Monetization::Free,
        (_, Some(p)) if p > 0.0 => Monetization::Paid,
        (Some(false), _) => Monetization::Paid,
        _ => Monetization::Unknown,
    }
}

fn derive_audience_mode(categories: &[String], tags: &[String]) -> AudienceMode {
    let single = has_marker(categories, SINGLE_MARKERS) || has_marker(tags, SINGLE_MARKERS);
    let multi = has_marker(categories, MULTI_MARKERS) || has_marker(tags, MULTI_MARKERS);

    match (single, multi) {
        (true, true) => AudienceMode::Mixed,
        (true, false) => AudienceMode::Single,
        (false, true) => AudienceMode::Multi,
        (false, false) => AudienceMode::Unknown,
    }
}
