//! Severity tiers shared by every hazard collection

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hazard severity tier. `High` is the innermost, most dangerous ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Life-threatening exposure
    High,
    /// Injury likely
    Medium,
    /// Precautionary perimeter
    Low,
}

impl Severity {
    /// All tiers, innermost first
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Lowercase tier name as used in serialized output
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per severity tier, serialized as `{"high": .., "medium": .., "low": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeverityMap<T> {
    /// Value for [`Severity::High`]
    pub high: T,
    /// Value for [`Severity::Medium`]
    pub medium: T,
    /// Value for [`Severity::Low`]
    pub low: T,
}

impl<T> SeverityMap<T> {
    /// Build a map from explicit per-tier values
    pub const fn new(high: T, medium: T, low: T) -> Self {
        Self { high, medium, low }
    }

    /// Build a map by evaluating `f` for each tier
    pub fn from_fn(mut f: impl FnMut(Severity) -> T) -> Self {
        Self {
            high: f(Severity::High),
            medium: f(Severity::Medium),
            low: f(Severity::Low),
        }
    }

    /// Value for a tier
    pub fn get(&self, severity: Severity) -> &T {
        match severity {
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
            Severity::Low => &self.low,
        }
    }

    /// Apply `f` to every tier
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> SeverityMap<U> {
        SeverityMap {
            high: f(self.high),
            medium: f(self.medium),
            low: f(self.low),
        }
    }

    /// Iterate `(tier, value)` pairs, innermost tier first
    pub fn iter(&self) -> impl Iterator<Item = (Severity, &T)> {
        Severity::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
