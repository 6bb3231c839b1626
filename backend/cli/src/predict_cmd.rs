//! CLI Predict Command
//!
//! Runs the local heuristic on digits typed at the terminal.

use anyhow::{Context, Result};
use signalbot_core::{DigitSequence, PredictionResult};
use signalbot_planner::PredictionEngine;

use crate::terminal_output::{note_success, render_table, Column};

pub fn run(digits: Vec<u8>, json: bool) -> Result<()> {
    let digits = DigitSequence::new(digits)?;
    let result = PredictionEngine::new().predict(&digits)?;

    if json {
        let out = serde_json::to_string_pretty(&result).context("Failed to encode result")?;
        println!("{out}");
    } else {
        print!("{}", render(&digits, &result));
        note_success(&format!(
            "Prediction: {} ({:.1}% confidence)",
            result.predicted_label,
            result.confidence_percent()
        ));
    }
    Ok(())
}

fn render(digits: &DigitSequence, result: &PredictionResult) -> String {
    let columns = [Column::right("#"), Column::left("Digit"), Column::left("Label")];
    let rows: Vec<Vec<String>> = digits
        .digits()
        .iter()
        .zip(&result.labels)
        .enumerate()
        .map(|(i, (d, label))| vec![(i + 1).to_string(), d.to_string(), label.to_string()])
        .collect();

    let mut out = render_table(&columns, &rows);
    out.push_str(&format!(
        "\n  P(Small) {:.1}%   P(Big) {:.1}%\n",
        result.prob_small * 100.0,
        result.prob_big * 100.0
    ));
    out
}
