//! gmi-analysis: game market intelligence analysis core
//!
//! Turns unreliable, partially available provider data about one game into
//! decision-support artifacts.
//!
//! # Architecture
//! Components in dependency order (leaves first):
//! 1. **validators** - raw mapping to immutable `MetricsSnapshot`
//! 2. **estimators** - ownership/revenue estimate from signals when direct figures are missing
//! 3. **matching** - scored comparable items and market context
//! 4. **roi** - per-action investment/return projection and ranking
//!
//! `pipeline` chains them for one run (or a parallel batch). Every component
//! is a pure function of its inputs and an explicitly passed config section.
//!
//! # Example
//! ```rust,ignore
//! use gmi_analysis::{analyze, AnalysisConfig, AnalysisRequest};
//!
//! let config = AnalysisConfig::default();
//! let request: AnalysisRequest = serde_json::from_str(&input)?;
//! match analyze(&request, &config) {
//!     AnalysisOutcome::Completed(report) => println!("{} actions", report.actions.len()),
//!     AnalysisOutcome::Rejected { snapshot } => eprintln!("{:?}", snapshot.validation_errors()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod estimators;
pub mod matching;
pub mod models;
pub mod pipeline;
pub mod roi;
pub mod validators;

pub use crate::config::AnalysisConfig;
pub use crate::error::{AnalysisError, AnalysisResult};
pub use crate::estimators::{estimate, ConfidenceTier, EstimationResult};
pub use crate::matching::{find_comparables, ComparableCandidate, MarketContext, OwnerTier};
pub use crate::models::{MetricsSnapshot, Signal, SignalSet, ValidationError};
pub use crate::pipeline::{analyze, analyze_batch, AnalysisOutcome, AnalysisReport, AnalysisRequest};
pub use crate::roi::{default_action_templates, evaluate, rank, ActionROI, ActionTemplate};
pub use crate::validators::validate;
