pub mod parser;
pub mod pipeline;
pub mod recognizer;
pub mod types;

pub use parser::ReceiptParser;
pub use pipeline::{ReceiptScanner, ScanError, ScanResult};
pub use recognizer::{MockRecognizer, OcrBackend, OcrError, PlainTextRecognizer};
pub use types::{ParseOutcome, NO_ITEMS_NOTICE};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
