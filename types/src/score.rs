//! Capability score and its display tiers.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("capability score must be finite (got {0})")]
    NotFinite(f64),
    #[error("capability score must not be negative (got {0})")]
    Negative(f64),
}

/// A module's capability score on the `0..=8` display scale.
///
/// Only used for proportional display. Values above [`CapabilityScore::MAX`]
/// are accepted and render as a full bar.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CapabilityScore(f64);

impl CapabilityScore {
    pub const MAX: f64 = 8.0;

    pub fn new(value: f64) -> Result<Self, ScoreError> {
        if !value.is_finite() {
            return Err(ScoreError::NotFinite(value));
        }
        if value < 0.0 {
            return Err(ScoreError::Negative(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Share of the full bar this score fills, clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction(self) -> f64 {
        (self.0 / Self::MAX).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn tier(self) -> ScoreTier {
        ScoreTier::for_score(self.0)
    }
}

impl TryFrom<f64> for CapabilityScore {
    type Error = ScoreError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CapabilityScore> for f64 {
    fn from(value: CapabilityScore) -> Self {
        value.0
    }
}

/// Renders as `"<score>/8"`.
impl fmt::Display for CapabilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// Color band of the score indicator, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    /// Above 6.
    High,
    /// Above 4.
    Good,
    /// Above 2.
    Fair,
    Low,
}

impl ScoreTier {
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score > 6.0 {
            Self::High
        } else if score > 4.0 {
            Self::Good
        } else if score > 2.0 {
            Self::Fair
        } else {
            Self::Low
        }
    }
}
