use std::path::Path;
use thiserror::Error;

use crate::parser::ReceiptParser;
use crate::recognizer::{OcrBackend, OcrError};
use crate::types::ParseOutcome;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
}

/// The result of scanning one receipt.
#[derive(Debug)]
pub struct ScanResult {
    /// Raw OCR text output.
    pub ocr_text: String,
    /// Candidate items parsed from the text.
    pub outcome: ParseOutcome,
}

/// Orchestrates: read → recognize → parse.
///
/// Recognition errors are returned as-is; the parser only ever sees text.
pub struct ReceiptScanner<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> ReceiptScanner<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Scan a file on disk.
    pub async fn scan_file(&self, path: &Path) -> Result<ScanResult, ScanError> {
        let bytes = tokio::fs::read(path).await?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "scanning receipt");
        self.scan_bytes(&bytes)
    }

    /// Scan raw bytes (from an upload or camera capture).
    pub fn scan_bytes(&self, data: &[u8]) -> Result<ScanResult, ScanError> {
        let ocr_text = self.recognizer.recognize(data)?;
        let outcome = ReceiptParser::parse(&ocr_text);
        Ok(ScanResult { ocr_text, outcome })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
