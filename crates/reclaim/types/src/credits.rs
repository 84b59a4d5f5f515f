//! Credit amounts and funding arithmetic
//!
//! Credits mirror the host's currency: fractional under the hood because cost
//! scaling multiplies by team size and an arbitrary scale factor, but always
//! presented to players as whole numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance applied when deciding whether a ledger total reaches its target
/// cost. Absorbs the fractional drift that cost scaling introduces.
pub const FUNDING_EPSILON: f32 = 0.1;

/// An amount of host-currency credits.
///
/// Comparisons against a target cost go through [`Credits::meets`] so the
/// funding tolerance is applied in exactly one place. The [`fmt::Display`]
/// form is the player-facing one: rounded half-up to a whole number.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Credits(f32);

impl Credits {
    /// Zero credits
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Create from a raw credit value
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw credit value
    pub const fn value(&self) -> f32 {
        self.0
    }

    /// Check if the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Whether this total, allowing [`FUNDING_EPSILON`], reaches `target`
    pub fn meets(&self, target: Credits) -> bool {
        self.0 + FUNDING_EPSILON >= target.0
    }

    /// Subtraction floored at zero
    pub fn saturating_sub(&self, other: Credits) -> Credits {
        Self((self.0 - other.0).max(0.0))
    }

    /// The smaller of two amounts
    pub fn min(self, other: Credits) -> Credits {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Player-facing whole-number form: rounded half-up, then truncated
    pub fn rounded(&self) -> i64 {
        (self.0 + 0.5) as i64
    }
}

impl std::ops::Add for Credits {
    type Output = Credits;

    fn add(self, other: Credits) -> Credits {
        Credits(self.0 + other.0)
    }
}

impl std::ops::Sub for Credits {
    type Output = Credits;

    fn sub(self, other: Credits) -> Credits {
        Credits(self.0 - other.0)
    }
}

impl fmt::Display for Credits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

impl From<f32> for Credits {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}
