use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "easesplit", version, about = "Split a shared bill, optionally from scanned receipts")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        env = "EASESPLIT_CONFIG",
        help = "Settings file (defaults to the platform config directory)"
    )]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute what each person owes for a bill description (TOML or JSON)
    Split {
        bill: PathBuf,
        #[arg(long = "receipt", help = "Receipt to scan and append to the bill's items")]
        receipts: Vec<PathBuf>,
    },
    /// Print the candidate items recognized on each receipt
    Scan {
        #[arg(required = true)]
        receipts: Vec<PathBuf>,
    },
}
