//! Delimited-text output for classified reports
//!
//! Writes the group key, `Ad ID` and `Result` for every ad, or with
//! passthrough enabled every input column followed by `Result`. Quoting
//! mirrors the reader so output can be fed straight back in.

use crate::record::{Record, Schema, AD_ID_FIELD, CLICKS_FIELD, IMPRESSIONS_FIELD, RESULT_FIELD};

/// Where an output column takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Key,
    AdId,
    Clicks,
    Impressions,
    /// Index into `Record::extra`
    Extra(usize),
    Result,
}

/// Delimited-text output formatter
#[derive(Debug)]
pub struct TsvOutput {
    columns: Vec<String>,
    layout: Vec<Cell>,
    delimiter: char,
    records: Vec<Record>,
}

impl TsvOutput {
    /// Create a formatter for reports laid out like `schema`
    pub fn new(schema: &Schema, delimiter: char, passthrough: bool) -> Self {
        let (mut columns, mut layout) = if passthrough {
            passthrough_layout(schema)
        } else {
            (
                vec![schema.key_column().to_string(), AD_ID_FIELD.to_string()],
                vec![Cell::Key, Cell::AdId],
            )
        };
        columns.push(RESULT_FIELD.to_string());
        layout.push(Cell::Result);

        Self {
            columns,
            layout,
            delimiter,
            records: Vec::new(),
        }
    }

    /// Add a classified record to the output
    pub fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Generate header row
    fn header(&self) -> String {
        self.join(self.columns.iter().map(String::as_str))
    }

    /// Escape a field (handle delimiter, quotes, newlines)
    fn escape_field(&self, field: &str) -> String {
        if field.contains(self.delimiter)
            || field.contains('"')
            || field.contains('\n')
            || field.contains('\r')
        {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn join<'a>(&self, fields: impl Iterator<Item = &'a str>) -> String {
        let escaped: Vec<String> = fields.map(|f| self.escape_field(f)).collect();
        escaped.join(&self.delimiter.to_string())
    }

    /// Format a record as one row
    fn format_record(&self, record: &Record) -> String {
        self.join(self.layout.iter().map(|cell| match cell {
            Cell::Key => record.group_key.as_str(),
            Cell::AdId => record.ad_id.as_str(),
            Cell::Clicks => record.clicks.as_str(),
            Cell::Impressions => record.impressions.as_str(),
            Cell::Extra(k) => record.extra.get(*k).map_or("", |(_, v)| v.as_str()),
            Cell::Result => record.result.map_or("", |r| r.as_str()),
        }))
    }

    /// Generate output as a string
    ///
    /// Rows are separated by `\n` with no newline after the last row.
    pub fn to_tsv(&self) -> String {
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        lines.push(self.header());
        for record in &self.records {
            lines.push(self.format_record(record));
        }
        lines.join("\n")
    }
}

/// Every input column by header position, minus any existing `Result`
fn passthrough_layout(schema: &Schema) -> (Vec<String>, Vec<Cell>) {
    let required = [
        (schema.position(AD_ID_FIELD), Cell::AdId),
        (schema.position(CLICKS_FIELD), Cell::Clicks),
        (schema.position(IMPRESSIONS_FIELD), Cell::Impressions),
    ];
    let mut columns = Vec::with_capacity(schema.columns().len());
    let mut layout = Vec::with_capacity(schema.columns().len());
    let mut extra = 0;

    for (at, name) in schema.columns().iter().enumerate() {
        let cell = if at == 0 {
            Cell::Key
        } else if let Some((_, cell)) = required.iter().find(|(pos, _)| *pos == Some(at)) {
            *cell
        } else {
            extra += 1;
            if name == RESULT_FIELD {
                continue;
            }
            Cell::Extra(extra - 1)
        };
        columns.push(name.clone());
        layout.push(cell);
    }
    (columns, layout)
}
