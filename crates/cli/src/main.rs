use std::path::Path;

use anyhow::Context;
use clap::Parser;
use easesplit_core::{Bill, Item};
use easesplit_ocr::{OcrBackend, ParseOutcome, PlainTextRecognizer, ReceiptScanner, NO_ITEMS_NOTICE};
use tracing_subscriber::EnvFilter;

mod bill_file;
mod cli;
mod config;
mod output;

use bill_file::BillFile;
use cli::{Cli, Commands};
use config::{OcrBackendKind, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Split { bill: bill_path, receipts } => {
            let mut bill = BillFile::load(&bill_path)?
                .into_bill()
                .with_context(|| format!("Invalid bill description {}", bill_path.display()))?;

            if !receipts.is_empty() {
                let scanner = ReceiptScanner::new(build_recognizer(&settings)?);
                for receipt in &receipts {
                    let outcome = scan(&scanner, receipt).await?;
                    let items = outcome
                        .into_items()
                        .into_iter()
                        .map(|item| item.with_tax_percent(settings.default_tax_percent));
                    bill.append_items(items);
                }
            }

            print_split(&bill, cli.json)?;
        }
        Commands::Scan { receipts } => {
            let scanner = ReceiptScanner::new(build_recognizer(&settings)?);
            let mut results = Vec::with_capacity(receipts.len());
            for receipt in &receipts {
                let outcome = scan(&scanner, receipt).await?;
                results.push((receipt.display().to_string(), outcome));
            }

            if cli.json {
                let views: Vec<output::ScanView<'_>> = results
                    .iter()
                    .map(|(receipt, outcome)| output::ScanView {
                        receipt: receipt.clone(),
                        result: outcome,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for (receipt, outcome) in &results {
                    print!("{}", output::render_scan(receipt, outcome));
                }
            }
        }
    }

    Ok(())
}

fn build_recognizer(settings: &Settings) -> anyhow::Result<Box<dyn OcrBackend>> {
    match settings.ocr.backend {
        OcrBackendKind::Plain => Ok(Box::new(PlainTextRecognizer)),
        #[cfg(feature = "tesseract")]
        OcrBackendKind::Tesseract => Ok(Box::new(easesplit_ocr::TesseractRecognizer::new(
            settings.ocr.data_path.clone(),
            &settings.ocr.language,
        ))),
        #[cfg(not(feature = "tesseract"))]
        OcrBackendKind::Tesseract => Err(easesplit_ocr::OcrError::NotAvailable.into()),
    }
}

/// Scans one receipt; an empty result is reported to the user, not treated as failure.
async fn scan<R: OcrBackend>(
    scanner: &ReceiptScanner<R>,
    receipt: &Path,
) -> anyhow::Result<ParseOutcome> {
    let result = scanner
        .scan_file(receipt)
        .await
        .with_context(|| format!("Failed to scan {}", receipt.display()))?;

    if result.outcome.is_empty() {
        tracing::info!(receipt = %receipt.display(), "no items detected");
        eprintln!("{}: {NO_ITEMS_NOTICE}", receipt.display());
    }
    Ok(result.outcome)
}

fn print_split(bill: &Bill, json: bool) -> anyhow::Result<()> {
    let summary = bill.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&output::SummaryView::from(&summary))?);
        return Ok(());
    }

    let sharer_names = |item: &Item| -> Vec<String> {
        item.shared_by
            .iter()
            .filter_map(|pid| bill.person(*pid).map(|p| p.name.clone()))
            .collect()
    };
    println!("Items");
    print!("{}", output::render_items(&bill.items, sharer_names));
    print!("{}", output::render_summary(&summary));
    Ok(())
}
