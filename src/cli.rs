use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "croprota", version, about = "Crop rotation advisor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print rotation advice for a plot export as JSON
    Advise {
        /// Plot export (.json or .yaml)
        input: PathBuf,

        /// Target year (defaults to the document, then the current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Candidate species to classify
        #[arg(short, long)]
        species: Option<String>,

        /// Botanical family of the candidate species
        #[arg(short, long, requires = "species")]
        family: Option<String>,

        /// Nitrogen need (0-5) of the candidate species
        #[arg(short, long, requires = "species")]
        nitrogen: Option<u8>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List the family catalogue of a plot export
    Families {
        input: PathBuf,
    },
    /// Validate config and, optionally, a plot export
    Check {
        input: Option<PathBuf>,
    },
    /// Write a configuration file interactively
    Init,
}
