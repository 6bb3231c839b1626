//! Reply texts. All output is Telegram HTML.

use signalbot_core::{Advice, DigitSequence, Forecast, PredictionResult};

pub const USAGE_TEXT: &str =
    "👋 Send a screenshot of last game numbers, I'll predict the next signal (Small/Big).";

pub const PROCESSING_ERROR_TEXT: &str = "❌ Error processing the screenshot.";

pub const INSUFFICIENT_EVIDENCE_TEXT: &str =
    "⚠️ Couldn't read enough numbers. Please send a clearer screenshot.";

pub const HEURISTIC_NOTE: &str =
    "ℹ️ Based on Small/Big frequency with a streak penalty. This is a guess, not a guarantee.";

pub const UNKNOWN_SIGNAL_TEXT: &str = "❌ Could not determine signal";

pub fn format_forecast(digits: &DigitSequence, forecast: &Forecast) -> String {
    match forecast {
        Forecast::Heuristic(result) => format_prediction(digits, result),
        Forecast::Remote { advice } => format_advice(advice),
    }
}

pub fn format_prediction(digits: &DigitSequence, result: &PredictionResult) -> String {
    format!(
        "📊 Numbers: {}\n🔮 Prediction: <b>{}</b>\n📈 Confidence: {:.1}%\n\n{}",
        digits.joined(", "),
        result.predicted_label,
        result.confidence_percent(),
        HEURISTIC_NOTE
    )
}

pub fn format_advice(advice: &Advice) -> String {
    match advice {
        Advice::Signal(label) => format!("🔮 Signal → <b>{label}</b>"),
        Advice::Unknown => format!("🔮 Signal → <b>{UNKNOWN_SIGNAL_TEXT}</b>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signalbot_core::Label;

    #[test]
    fn prediction_reply_lists_digits_label_and_confidence() {
        let digits = DigitSequence::new(vec![1, 2, 3, 4, 6, 7, 8, 9, 0, 1]).unwrap();
        let result = PredictionResult {
            predicted_label: Label::Small,
            confidence: 0.48,
            prob_small: 0.48,
            prob_big: 0.4,
            labels: digits.labels(),
        };
        let text = format_prediction(&digits, &result);
        assert!(text.contains("1, 2, 3, 4, 6, 7, 8, 9, 0, 1"));
        assert!(text.contains("<b>Small</b>"));
        assert!(text.contains("48.0%"));
        assert!(text.ends_with(HEURISTIC_NOTE));
    }

    #[test]
    fn advice_reply_formats() {
        assert_eq!(
            format_advice(&Advice::Signal(Label::Big)),
            "🔮 Signal → <b>Big</b>"
        );
        assert!(format_advice(&Advice::Unknown).contains(UNKNOWN_SIGNAL_TEXT));
    }
}
