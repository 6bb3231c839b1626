use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignalError};

/// How many of the most recent digits are kept from one image.
pub const HISTORY_WINDOW: usize = 10;

/// Digits required before any prediction is attempted.
pub const MIN_DIGITS: usize = 5;

/// Binary outcome class of a single digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Small,
    Big,
}

impl Label {
    /// Small for 0..=4, Big for 5..=9.
    pub fn of(digit: u8) -> Self {
        if digit <= 4 {
            Label::Small
        } else {
            Label::Big
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Small => "Small",
            Label::Big => "Big",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered digits read from one image, most recent last.
///
/// Every element is in `0..=9` and at most [`HISTORY_WINDOW`] are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DigitSequence(Vec<u8>);

impl DigitSequence {
    /// Validate `digits` and keep the most recent [`HISTORY_WINDOW`] of them.
    pub fn new(digits: Vec<u8>) -> Result<Self> {
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(SignalError::InvalidDigit(bad));
        }
        let skip = digits.len().saturating_sub(HISTORY_WINDOW);
        Ok(Self(digits.into_iter().skip(skip).collect()))
    }

    pub fn digits(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Label of every digit, in order.
    pub fn labels(&self) -> Vec<Label> {
        self.0.iter().map(|&d| Label::of(d)).collect()
    }

    /// Render as `"1, 2, 3"`.
    pub fn joined(&self, separator: &str) -> String {
        self.0
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Fails with `InsufficientEvidence` below `required` digits.
    pub fn require(&self, required: usize) -> Result<()> {
        if self.len() < required {
            return Err(SignalError::InsufficientEvidence {
                found: self.len(),
                required,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for DigitSequence {
    type Error = SignalError;

    fn try_from(digits: Vec<u8>) -> Result<Self> {
        Self::new(digits)
    }
}

impl From<DigitSequence> for Vec<u8> {
    fn from(seq: DigitSequence) -> Self {
        seq.0
    }
}

/// Output of the local heuristic. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub predicted_label: Label,
    /// The larger of the two probabilities after damping.
    pub confidence: f64,
    pub prob_small: f64,
    pub prob_big: f64,
    /// Parallel to the input digits.
    pub labels: Vec<Label>,
}

impl PredictionResult {
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}

/// Outcome of asking the remote advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Advice {
    Signal(Label),
    /// No label word found, or the endpoint failed.
    Unknown,
}

/// What a prediction strategy produced for one digit sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum Forecast {
    Heuristic(PredictionResult),
    Remote { advice: Advice },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_boundaries() {
        for d in 0..=4 {
            assert_eq!(Label::of(d), Label::Small, "digit {d}");
        }
        for d in 5..=9 {
            assert_eq!(Label::of(d), Label::Big, "digit {d}");
        }
    }

    #[test]
    fn test_sequence_rejects_out_of_range() {
        let err = DigitSequence::new(vec![1, 2, 10]).unwrap_err();
        assert!(matches!(err, SignalError::InvalidDigit(10)));
    }

    #[test]
    fn test_sequence_keeps_most_recent_window() {
        let seq = DigitSequence::new((0..=9).chain(0..=4).collect()).unwrap();
        assert_eq!(seq.len(), HISTORY_WINDOW);
        assert_eq!(seq.digits(), &[5, 6, 7, 8, 9, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_labels_parallel_to_digits() {
        let seq = DigitSequence::new(vec![4, 5, 0]).unwrap();
        assert_eq!(seq.labels(), vec![Label::Small, Label::Big, Label::Small]);
        assert_eq!(seq.joined(", "), "4, 5, 0");
    }

    #[test]
    fn test_require_minimum() {
        let seq = DigitSequence::new(vec![1, 2, 3]).unwrap();
        match seq.require(MIN_DIGITS) {
            Err(SignalError::InsufficientEvidence { found, required }) => {
                assert_eq!(found, 3);
                assert_eq!(required, 5);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(seq.require(3).is_ok());
    }

    #[test]
    fn test_sequence_deserialize_validates() {
        let ok: DigitSequence = serde_json::from_str("[1,9]").unwrap();
        assert_eq!(ok.digits(), &[1, 9]);
        assert!(serde_json::from_str::<DigitSequence>("[12]").is_err());
    }
}
