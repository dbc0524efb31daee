use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::constants::{MAX_SCORE, MIN_SCORE};

/// Vitality score clamped to [0.0, 100.0].
/// Out-of-range values are clamped on construction, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VitalityScore(f64);

impl VitalityScore {
    /// Create a new score, clamping to [0.0, 100.0].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(MIN_SCORE);
        }
        Self(value.clamp(MIN_SCORE, MAX_SCORE))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for VitalityScore {
    fn default() -> Self {
        Self(crate::constants::INITIAL_SCORE)
    }
}

impl fmt::Display for VitalityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for VitalityScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<VitalityScore> for f64 {
    fn from(s: VitalityScore) -> Self {
        s.0
    }
}

impl Add<f64> for VitalityScore {
    type Output = Self;
    fn add(self, rhs: f64) -> Self {
        Self::new(self.0 + rhs)
    }
}

impl Sub<f64> for VitalityScore {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.0 - rhs)
    }
}

/// Per-relationship decay dampener clamped to [0.8, 1.5].
/// Values above 1.0 slow decay, values below speed it up.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Resilience(f64);

impl Resilience {
    pub const MIN: f64 = 0.8;
    pub const MAX: f64 = 1.5;

    /// Create a new resilience, clamping to [0.8, 1.5].
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Shift by `delta`, re-clamping.
    pub fn nudged(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }
}

impl Default for Resilience {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f64> for Resilience {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_clamps_instead_of_rejecting() {
        assert_eq!(VitalityScore::new(140.0).value(), 100.0);
        assert_eq!(VitalityScore::new(-3.0).value(), 0.0);
        assert_eq!(VitalityScore::new(f64::NAN).value(), 0.0);
        assert_eq!((VitalityScore::new(95.0) + 20.0).value(), 100.0);
        assert_eq!((VitalityScore::new(5.0) - 20.0).value(), 0.0);
    }

    #[test]
    fn resilience_clamps_to_band() {
        assert_eq!(Resilience::new(3.0).value(), Resilience::MAX);
        assert_eq!(Resilience::new(0.1).value(), Resilience::MIN);
        assert_eq!(Resilience::new(1.498).nudged(0.008).value(), Resilience::MAX);
    }
}
