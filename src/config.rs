//! Run configuration
//!
//! Settings come from an optional TOML file, then command-line flags on top.
//!
//! # Example adsplit.toml
//!
//! ```toml
//! [input]
//! path = "resources/Ad Performance Report.tsv"
//! encoding = "utf16le"
//! delimiter = "\t"
//!
//! [output]
//! path = "resources/AdWinnerLoser.tsv"
//! format = "tsv"
//! passthrough = false
//! ```

use crate::cli::{Cli, OutputFormat};
use crate::encoding::Encoding;
use crate::error::ReportError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where and how to read the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,

    /// Input encoding; detected from the bytes when unset
    pub encoding: Option<Encoding>,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/Ad Performance Report.tsv"),
            encoding: None,
            delimiter: '\t',
        }
    }
}

/// Where and how to write the classified report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,

    /// Output encoding; same as the input when unset
    pub encoding: Option<Encoding>,

    pub format: OutputFormat,

    /// Keep every input column instead of just key, `Ad ID` and `Result`
    pub passthrough: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("resources/AdWinnerLoser.tsv"),
            encoding: None,
            format: OutputFormat::Tsv,
            passthrough: false,
        }
    }
}

/// Complete configuration for one pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
}

impl RunConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Build the effective configuration: file (if any), then CLI overrides
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay explicitly given command-line values
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(path) = &cli.input {
            self.input.path.clone_from(path);
        }
        if let Some(path) = &cli.output {
            self.output.path.clone_from(path);
        }
        if let Some(encoding) = cli.encoding {
            self.input.encoding = Some(encoding);
        }
        if let Some(encoding) = cli.output_encoding {
            self.output.encoding = Some(encoding);
        }
        if let Some(delimiter) = cli.delimiter {
            self.input.delimiter = delimiter;
        }
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if cli.passthrough {
            self.output.passthrough = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ReportError> {
        let delimiter = self.input.delimiter;
        if delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(ReportError::InvalidConfig(format!(
                "delimiter cannot be {:?}",
                delimiter
            )));
        }

        if same_file(&self.input.path, &self.output.path) {
            return Err(ReportError::InvalidConfig(format!(
                "input and output are the same file: {}",
                self.input.path.display()
            )));
        }

        Ok(())
    }
}

/// Whether two paths name the same file
///
/// Paths that both exist are compared after canonicalization, so `out.tsv`,
/// `./out.tsv` and symlinks to it all match.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
