//! End-to-end report processing
//!
//! load → decode → parse → group → classify → flatten → render → encode → write
//!
//! Everything up to and including rendering happens in memory, so a
//! structural failure anywhere leaves no output file behind.

use crate::cli::OutputFormat;
use crate::classify::classify;
use crate::config::RunConfig;
use crate::encoding::Encoding;
use crate::error::ReportError;
use crate::grouper::{flatten, group};
use crate::json_output::JsonOutput;
use crate::record::{AdGroup, Report, Schema};
use crate::summary::ClassificationSummary;
use crate::tsv_input::read_report;
use crate::tsv_output::TsvOutput;
use anyhow::{Context, Result};
use std::fs;

/// A report after classification, still grouped
#[derive(Debug, Clone)]
pub struct ClassifiedReport {
    pub schema: Schema,
    pub groups: Vec<AdGroup>,
}

impl ClassifiedReport {
    pub fn summary(&self) -> ClassificationSummary {
        ClassificationSummary::from_groups(&self.groups)
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat, delimiter: char, passthrough: bool) -> Result<String> {
        match format {
            OutputFormat::Tsv => {
                let mut output = TsvOutput::new(&self.schema, delimiter, passthrough);
                for record in flatten(self.groups.clone()) {
                    output.add_record(record);
                }
                Ok(output.to_tsv())
            }
            OutputFormat::Json => JsonOutput::new(self.schema.key_column(), &self.groups)
                .to_json()
                .context("Failed to serialize JSON output"),
        }
    }
}

/// Group and classify a parsed report
pub fn classify_report(report: Report) -> ClassifiedReport {
    let groups = classify(group(report.records));
    ClassifiedReport {
        schema: report.schema,
        groups,
    }
}

/// Parse and classify report text
pub fn classify_text(text: &str, delimiter: char) -> Result<ClassifiedReport, ReportError> {
    Ok(classify_report(read_report(text, delimiter)?))
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: ClassificationSummary,
    pub input_encoding: Encoding,
    pub output_encoding: Encoding,
    pub bytes_written: usize,
}

/// Run the whole pipeline for one configuration
pub fn run(config: &RunConfig) -> Result<RunOutcome> {
    let input_path = &config.input.path;
    let bytes = fs::read(input_path)
        .with_context(|| format!("Failed to read report {}", input_path.display()))?;

    let input_encoding = config
        .input
        .encoding
        .unwrap_or_else(|| Encoding::detect(&bytes));
    tracing::debug!(?input_encoding, "Decoding {} bytes", bytes.len());

    let text = input_encoding
        .decode(&bytes)
        .with_context(|| format!("Failed to decode {}", input_path.display()))?;

    let classified = classify_text(&text, config.input.delimiter)
        .with_context(|| format!("Failed to process {}", input_path.display()))?;
    let summary = classified.summary();

    let rendered = classified.render(
        config.output.format,
        config.input.delimiter,
        config.output.passthrough,
    )?;

    let output_encoding = config.output.encoding.unwrap_or(input_encoding);
    let encoded = output_encoding.encode(&rendered);

    let output_path = &config.output.path;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output_path, &encoded)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        groups = summary.groups,
        ads = summary.ads,
        winners = summary.winners,
        "Wrote {}",
        output_path.display()
    );

    Ok(RunOutcome {
        summary,
        input_encoding,
        output_encoding,
        bytes_written: encoded.len(),
    })
}
