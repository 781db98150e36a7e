//! Owner tiers: eight fixed order-of-magnitude buckets for unit ownership

use serde::{Deserialize, Serialize};

/// Ownership bucket, ordered smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OwnerTier {
    #[serde(rename = "<1K")]
    UnderOneThousand,
    #[serde(rename = "1K-5K")]
    OneToFiveThousand,
    #[serde(rename = "5K-10K")]
    FiveToTenThousand,
    #[serde(rename = "10K-50K")]
    TenToFiftyThousand,
    #[serde(rename = "50K-100K")]
    FiftyToHundredThousand,
    #[serde(rename = "100K-500K")]
    HundredToFiveHundredThousand,
    #[serde(rename = "500K-1M")]
    FiveHundredThousandToMillion,
    #[serde(rename = "1M+")]
    MillionPlus,
}

impl OwnerTier {
    /// Bucket for a unit count; lower bounds are inclusive
    pub fn from_units(units: i64) -> Self {
        match units {
            i64::MIN..=999 => OwnerTier::UnderOneThousand,
            1_000..=4_999 => OwnerTier::OneToFiveThousand,
            5_000..=9_999 => OwnerTier::FiveToTenThousand,
            10_000..=49_999 => OwnerTier::TenToFiftyThousand,
            50_000..=99_999 => OwnerTier::FiftyToHundredThousand,
            100_000..=499_999 => OwnerTier::HundredToFiveHundredThousand,
            500_000..=999_999 => OwnerTier::FiveHundredThousandToMillion,
            _ => OwnerTier::MillionPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OwnerTier::UnderOneThousand => "<1K",
            OwnerTier::OneToFiveThousand => "1K-5K",
            OwnerTier::FiveToTenThousand => "5K-10K",
            OwnerTier::TenToFiftyThousand => "10K-50K",
            OwnerTier::FiftyToHundredThousand => "50K-100K",
            OwnerTier::HundredToFiveHundredThousand => "100K-500K",
            OwnerTier::FiveHundredThousandToMillion => "500K-1M",
            OwnerTier::MillionPlus => "1M+",
        }
    }
}

impl std::fmt::Display for OwnerTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
