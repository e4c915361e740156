//! Similarity score value type

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Thematic similarity between two talks, always within `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Score(f64);

impl Score {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;

    /// Score recorded when a pair could not be scored
    pub const ZERO: Score = Score(0.0);

    /// Create a score from a value already known to be in range
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if Self::in_range(value) {
            Ok(Self(value))
        } else {
            Err(DomainError::validation(format!(
                "Score {} is outside [{}, {}]",
                value,
                Self::MIN,
                Self::MAX
            )))
        }
    }

    /// Create a score from a raw oracle value, rounded to one decimal place.
    ///
    /// Rounds the exact binary value with ties to even, so `0.85` (stored as
    /// `0.84999...`) becomes `0.8`.
    pub fn rounded(value: f64) -> Result<Self, DomainError> {
        let score = Self::new(value)?;
        let rounded = format!("{:.1}", score.0)
            .parse::<f64>()
            .map_err(|e| DomainError::validation(format!("Cannot round {}: {}", value, e)))?;
        Ok(Self(rounded))
    }

    /// Whether a raw value is an acceptable score. NaN never is.
    pub fn in_range(value: f64) -> bool {
        (Self::MIN..=Self::MAX).contains(&value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds_are_inclusive() {
        assert_eq!(Score::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Score::new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        assert!(Score::new(1.5).is_err());
        assert!(Score::new(-0.1).is_err());
        assert!(Score::new(f64::NAN).is_err());
        assert!(Score::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_score_rounded_to_one_decimal() {
        assert_eq!(Score::rounded(0.73).unwrap().value(), 0.7);
        assert_eq!(Score::rounded(0.26).unwrap().value(), 0.3);
        assert_eq!(Score::rounded(0.7).unwrap().value(), 0.7);
    }

    #[test]
    fn test_score_rounding_follows_decimal_value() {
        assert_eq!(Score::rounded(0.85).unwrap().value(), 0.8);
        assert_eq!(Score::rounded(0.15).unwrap().value(), 0.1);
        assert_eq!(Score::rounded(0.25).unwrap().value(), 0.2);
        assert_eq!(Score::rounded(0.35).unwrap().value(), 0.3);
        assert_eq!(Score::rounded(0.95).unwrap().value(), 0.9);
        assert_eq!(Score::rounded(1.0).unwrap().value(), 1.0);
        assert_eq!(Score::rounded(0.0).unwrap().value(), 0.0);
    }

    #[test]
    fn test_score_serializes_as_number() {
        let json = serde_json::to_string(&Score::new(0.4).unwrap()).unwrap();
        assert_eq!(json, "0.4");

        let parsed: Score = serde_json::from_str("0.9").unwrap();
        assert_eq!(parsed.value(), 0.9);

        assert!(serde_json::from_str::<Score>("2.0").is_err());
    }

    #[test]
    fn test_score_display() {
        assert_eq!(Score::ZERO.to_string(), "0.0");
        assert_eq!(Score::new(1.0).unwrap().to_string(), "1.0");
    }
}
