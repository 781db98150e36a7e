//! Comparable-item matching and market context

pub mod comparable_matcher;
pub mod market_context;
pub mod owner_tier;

pub use comparable_matcher::{find_comparables, score_candidate, ComparableCandidate, ScoreComponent};
pub use market_context::MarketContext;
pub use owner_tier::OwnerTier;
