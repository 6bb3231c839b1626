pub mod error;
pub mod message;
pub mod traits;
pub mod types;

pub use error::{Result, SignalError};
pub use message::{ChatReply, ChatRequest, ReplyKind};
pub use traits::{ImageSource, PredictionStrategy, TextGenerator, TextRecognizer};
pub use types::{
    Advice, DigitSequence, Forecast, Label, PredictionResult, HISTORY_WINDOW, MIN_DIGITS,
};
