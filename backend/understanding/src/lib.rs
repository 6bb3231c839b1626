pub mod digits;
pub mod ocr;

pub use digits::{scan_digits, DigitExtractor};
pub use ocr::TesseractCli;
