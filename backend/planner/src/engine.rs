use async_trait::async_trait;
use tracing::debug;

use signalbot_core::{
    DigitSequence, Forecast, Label, PredictionResult, PredictionStrategy, Result,
};

/// Multiplier applied to a label's probability when it closed the sequence
/// twice in a row.
pub const DAMPING_FACTOR: f64 = 0.8;

/// Frequency heuristic with anti-streak damping.
///
/// 1. Label every digit (0-4 Small, 5-9 Big).
/// 2. `prob_small` and `prob_big` are the label frequencies.
/// 3. If the last two labels are equal, that label's probability is
///    multiplied by the damping factor.
/// 4. Small wins only when strictly more probable; ties go to Big.
/// 5. Confidence is the larger probability after damping.
#[derive(Debug, Clone, Copy)]
pub struct PredictionEngine {
    damping_factor: f64,
}

impl PredictionEngine {
    pub fn new() -> Self {
        Self {
            damping_factor: DAMPING_FACTOR,
        }
    }

    pub fn with_damping(mut self, factor: f64) -> Self {
        self.damping_factor = factor;
        self
    }

    /// Requires at least one digit.
    pub fn predict(&self, digits: &DigitSequence) -> Result<PredictionResult> {
        digits.require(1)?;

        let labels = digits.labels();
        let n = labels.len() as f64;
        let small = labels.iter().filter(|&&l| l == Label::Small).count() as f64;

        let mut prob_small = small / n;
        let mut prob_big = (n - small) / n;

        if let [.., prev, last] = labels.as_slice() {
            if prev == last {
                match last {
                    Label::Small => prob_small *= self.damping_factor,
                    Label::Big => prob_big *= self.damping_factor,
                }
            }
        }

        let predicted_label = if prob_small > prob_big {
            Label::Small
        } else {
            Label::Big
        };
        let confidence = prob_small.max(prob_big);

        debug!(
            digits = %digits.joined(","),
            prob_small,
            prob_big,
            label = %predicted_label,
            "Heuristic prediction"
        );

        Ok(PredictionResult {
            predicted_label,
            confidence,
            prob_small,
            prob_big,
            labels,
        })
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionStrategy for PredictionEngine {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn forecast(&self, digits: &DigitSequence) -> Result<Forecast> {
        self.predict(digits).map(Forecast::Heuristic)
    }
}
