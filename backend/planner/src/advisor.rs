//! Remote advisor: asks a text-generation endpoint for the next label.
//!
//! The response is free text. [`parse_label`] is a best-effort scan for the
//! first whole word `Small` or `Big` in any letter case; anything else is
//! [`Advice::Unknown`], never a guess.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{info, warn};

use signalbot_core::{
    Advice, DigitSequence, Forecast, Label, PredictionStrategy, Result, TextGenerator,
};

static LABEL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?-u:\b)(small|big)(?-u:\b)").unwrap());

/// Build the prompt for a digit history.
pub fn build_prompt(digits: &DigitSequence) -> String {
    format!(
        "Last 10 game numbers: {}.\n\
         Predict the next signal.\n\
         Reply ONLY with \"Small\" or \"Big\". No explanation, no extra text.",
        digits.joined(", ")
    )
}

/// First whole-word label in `text`, if any.
pub fn parse_label(text: &str) -> Advice {
    match LABEL_RE.find(text) {
        Some(m) if m.as_str().eq_ignore_ascii_case("small") => Advice::Signal(Label::Small),
        Some(_) => Advice::Signal(Label::Big),
        None => Advice::Unknown,
    }
}

pub struct RemoteAdvisor {
    generator: Arc<dyn TextGenerator>,
}

impl RemoteAdvisor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Endpoint failures are logged and reported as `Advice::Unknown`.
    pub async fn advise(&self, digits: &DigitSequence) -> Advice {
        let prompt = build_prompt(digits);
        match self.generator.generate(&prompt).await {
            Ok(text) => {
                let advice = parse_label(&text);
                if advice == Advice::Unknown {
                    warn!(
                        generator = self.generator.name(),
                        response = %text.chars().take(200).collect::<String>(),
                        "No label found in advisor response"
                    );
                } else {
                    info!(generator = self.generator.name(), advice = ?advice, "Advisor answered");
                }
                advice
            }
            Err(e) => {
                warn!(generator = self.generator.name(), error = %e, "Advisor request failed");
                Advice::Unknown
            }
        }
    }
}

#[async_trait]
impl PredictionStrategy for RemoteAdvisor {
    fn name(&self) -> &str {
        "remote"
    }

    async fn forecast(&self, digits: &DigitSequence) -> Result<Forecast> {
        Ok(Forecast::Remote {
            advice: self.advise(digits).await,
        })
    }
}
