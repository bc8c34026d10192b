//! Delimited-text report reader
//!
//! Parses tab- (or otherwise) delimited text with d3-dsv quoting rules: a
//! field that starts with `"` runs to the next unpaired `"`, may contain the
//! delimiter and newlines, and `""` inside it is a literal quote. LF and CRLF
//! both end a row; blank lines are skipped.

use crate::error::ReportError;
use crate::record::{Record, Report, Schema, AD_ID_FIELD, CLICKS_FIELD, IMPRESSIONS_FIELD};
use std::iter::Peekable;
use std::str::Chars;

/// One physical row of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line on which the row starts
    pub line: usize,
    pub fields: Vec<String>,
}

enum FieldEnd {
    Delimiter,
    EndOfRow,
    EndOfInput,
}

/// Split delimited text into rows of raw fields
pub fn parse_rows(text: &str, delimiter: char) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while chars.peek().is_some() {
        let start = line;
        let mut fields = Vec::new();
        loop {
            let (field, end) = next_field(&mut chars, delimiter, &mut line);
            fields.push(field);
            if !matches!(end, FieldEnd::Delimiter) {
                break;
            }
        }

        let blank = fields.len() == 1 && fields[0].is_empty();
        if !blank {
            rows.push(RawRow {
                line: start,
                fields,
            });
        }
    }

    rows
}

fn next_field(
    chars: &mut Peekable<Chars<'_>>,
    delimiter: char,
    line: &mut usize,
) -> (String, FieldEnd) {
    let mut field = String::new();

    if chars.peek() == Some(&'"') {
        chars.next();
        while let Some(c) = chars.next() {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => break,
                '\n' => {
                    *line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
        }
    }

    // Unquoted text, or stray text after a closing quote
    loop {
        match chars.peek().copied() {
            None => return (field, FieldEnd::EndOfInput),
            Some(c) if c == delimiter => {
                chars.next();
                return (field, FieldEnd::Delimiter);
            }
            Some('\n') => {
                chars.next();
                *line += 1;
                return (field, FieldEnd::EndOfRow);
            }
            Some('\r') => {
                chars.next();
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                *line += 1;
                return (field, FieldEnd::EndOfRow);
            }
            Some(c) => {
                chars.next();
                field.push(c);
            }
        }
    }
}

/// Parse a report: header row, then one record per data row
///
/// The header must name `Ad ID`, `Clicks` and `Impressions`; the first header
/// column is the ad-group key. A row too short to carry a required field is
/// rejected with its line number. Surplus values are ignored and short rows
/// get empty passthrough values.
pub fn read_report(text: &str, delimiter: char) -> Result<Report, ReportError> {
    let mut rows = parse_rows(text, delimiter).into_iter();
    let header = rows.next().ok_or(ReportError::MissingHeader)?;
    let schema = Schema::new(header.fields).ok_or(ReportError::MissingHeader)?;

    let column = |name: &str| {
        schema.position(name).ok_or_else(|| ReportError::MissingColumn {
            column: name.to_string(),
        })
    };
    let ad_id_at = column(AD_ID_FIELD)?;
    let clicks_at = column(CLICKS_FIELD)?;
    let impressions_at = column(IMPRESSIONS_FIELD)?;

    let extra_columns: Vec<(usize, &String)> = schema
        .extra_positions()
        .into_iter()
        .map(|at| (at, &schema.columns()[at]))
        .collect();

    let mut records = Vec::new();
    for row in rows {
        let required = |at: usize, name: &str| {
            row.fields
                .get(at)
                .cloned()
                .ok_or_else(|| ReportError::MissingField {
                    line: row.line,
                    field: name.to_string(),
                })
        };

        let mut record = Record::new(
            required(0, schema.key_column())?,
            required(ad_id_at, AD_ID_FIELD)?,
            required(clicks_at, CLICKS_FIELD)?,
            required(impressions_at, IMPRESSIONS_FIELD)?,
        );
        record.extra = extra_columns
            .iter()
            .map(|(at, name)| {
                let value = row.fields.get(*at).cloned().unwrap_or_default();
                ((*name).clone(), value)
            })
            .collect();
        records.push(record);
    }

    if records.is_empty() {
        return Err(ReportError::EmptyInput);
    }

    tracing::info!(
        "Read {} rows with {} columns (group key: '{}')",
        records.len(),
        schema.columns().len(),
        schema.key_column()
    );

    Ok(Report { schema, records })
}
