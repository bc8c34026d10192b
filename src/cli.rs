//! CLI argument parsing for adsplit

use crate::encoding::Encoding;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output format for classified reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Delimited text, same delimiter as the input (default)
    Tsv,
    /// JSON document with per-ad detail and a summary
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "adsplit")]
#[command(version)]
#[command(
    about = "Classify ads as WINNER, LOSER or NO_RESULT by pairwise CTR significance",
    long_about = None
)]
pub struct Cli {
    /// Ad performance report to read [default: resources/Ad Performance Report.tsv]
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the classified report [default: resources/AdWinnerLoser.tsv]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// TOML configuration file; command-line flags take precedence
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Input encoding (detected when omitted)
    #[arg(long = "encoding", value_enum)]
    pub encoding: Option<Encoding>,

    /// Output encoding (defaults to the input encoding)
    #[arg(long = "output-encoding", value_enum)]
    pub output_encoding: Option<Encoding>,

    /// Field delimiter (default: tab)
    #[arg(short = 'd', long = "delimiter", value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// Output format
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Keep every input column in the output, not just key, Ad ID and Result
    #[arg(long = "passthrough")]
    pub passthrough: bool,

    /// Print a classification summary to stdout
    #[arg(short = 'c', long = "summary")]
    pub summary: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
