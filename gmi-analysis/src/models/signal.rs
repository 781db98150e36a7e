//! Provider signals
//!
//! A signal is one named, possibly-absent data point from one external
//! provider. Absence is a value (`SignalReading::Absent`), never an error and
//! never zero: collectors that time out or get no data still hand the core an
//! explicit absent reading.
//!
//! # Wire format
//! ```json
//! {"name": "median_playtime_hours", "value": 12.5, "source_id": "hltb", "reliability_weight": 0.8}
//! {"name": "video_views", "value": null, "source_id": "video", "absent_reason": "timeout"}
//! ```

use serde::{Deserialize, Serialize};

/// Present value or explicit absence
#[derive(Debug, Clone, PartialEq)]
pub enum SignalReading {
    Present(f64),
    Absent { reason: Option<String> },
}

/// One named data point from one provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SignalRecord", into = "SignalRecord")]
pub struct Signal {
    pub name: String,
    pub reading: SignalReading,
    pub source_id: String,
    /// Relative trust in this provider (>= 0.0, default 1.0)
    pub reliability_weight: f64,
}

impl Signal {
    pub fn present(
        name: impl Into<String>,
        value: f64,
        source_id: impl Into<String>,
        reliability_weight: f64,
    ) -> Self {
        Self {
            name: name.into(),
            reading: SignalReading::Present(value),
            source_id: source_id.into(),
            reliability_weight: sanitize_weight(reliability_weight),
        }
    }

    pub fn absent(
        name: impl Into<String>,
        source_id: impl Into<String>,
        reason: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            reading: SignalReading::Absent { reason },
            source_id: source_id.into(),
            reliability_weight: 1.0,
        }
    }

    /// Usable value: present and finite
    pub fn value(&self) -> Option<f64> {
        match self.reading {
            SignalReading::Present(v) if v.is_finite() => Some(v),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value().is_some()
    }
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        1.0
    }
}

/// Serialized form of a signal
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SignalRecord {
    name: String,
    #[serde(default)]
    value: Option<f64>,
    #[serde(default)]
    source_id: String,
    #[serde(default = "default_reliability")]
    reliability_weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    absent_reason: Option<String>,
}

fn default_reliability() -> f64 {
    1.0
}

impl From<SignalRecord> for Signal {
    fn from(record: SignalRecord) -> Self {
        let reading = match record.value {
            Some(v) => SignalReading::Present(v),
            None => SignalReading::Absent {
                reason: record.absent_reason,
            },
        };
        Signal {
            name: record.name,
            reading,
            source_id: record.source_id,
            reliability_weight: sanitize_weight(record.reliability_weight),
        }
    }
}

impl From<Signal> for SignalRecord {
    fn from(signal: Signal) -> Self {
        let (value, absent_reason) = match signal.reading {
            SignalReading::Present(v) => (Some(v), None),
            SignalReading::Absent { reason } => (None, reason),
        };
        SignalRecord {
            name: signal.name,
            value,
            source_id: signal.source_id,
            reliability_weight: signal.reliability_weight,
            absent_reason,
        }
    }
}

/// Ordered collection of signals for one item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalSet {
    signals: Vec<Signal>,
}

impl SignalSet {
    pub fn new(signals: Vec<Signal>) -> Self {
        Self { signals }
    }

    pub fn push(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter()
    }

    /// Signals carrying a usable value, in input order
    pub fn present(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(|s| s.is_present())
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

impl FromIterator<Signal> for SignalSet {
    fn from_iter<I: IntoIterator<Item = Signal>>(iter: I) -> Self {
        Self {
            signals: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_value_is_absent_not_zero() {
        let signal: Signal = serde_json::from_value(json!({
            "name": "video_views",
            "value": null,
            "source_id": "video",
            "absent_reason": "timeout"
        }))
        .unwrap();

        assert!(!signal.is_present());
        assert_eq!(
            signal.reading,
            SignalReading::Absent {
                reason: Some("timeout".to_string())
            }
        );
    }

    #[test]
    fn test_zero_value_is_present() {
        let signal: Signal =
            serde_json::from_value(json!({"name": "search_interest", "value": 0.0})).unwrap();
        assert_eq!(signal.value(), Some(0.0));
        assert_eq!(signal.reliability_weight, 1.0);
    }

    #[test]
    fn test_non_finite_value_not_usable() {
        let signal = Signal::present("rating_count", f64::NAN, "critic", 1.0);
        assert!(signal.value().is_none());
    }

    #[test]
    fn test_negative_weight_sanitized() {
        let signal = Signal::present("rating_count", 10.0, "critic", -3.0);
        assert_eq!(signal.reliability_weight, 1.0);
    }

    #[test]
    fn test_signal_set_present_filter() {
        let set: SignalSet = vec![
            Signal::present("review_score", 0.9, "store", 1.0),
            Signal::absent("video_views", "video", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.present().count(), 1);
    }
}
