use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "evidence-checker")]
#[command(about = "Cross-checks a portfolio workbook against its evidence folders", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the status card grid for a project folder
    Check {
        folder: PathBuf,
        /// Print the inspections as JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Show the details and todo list for one identifier
    Inspect { folder: PathBuf, id: String },
    /// Write all inspections to a CSV file
    Export {
        folder: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Interactive session: refresh and inspect identifiers
    Watch { folder: PathBuf },
    /// Print configuration values
    PrintConfig,
}
