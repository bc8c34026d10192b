//! Typed report rows
//!
//! The source table is header-driven, but only four fields matter to the
//! classifier: the ad-group key (always the first column, name taken from the
//! header), `Ad ID`, `Clicks` and `Impressions`. Everything else rides along in
//! `extra` so the output adapter can reproduce it.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const AD_ID_FIELD: &str = "Ad ID";
pub const CLICKS_FIELD: &str = "Clicks";
pub const IMPRESSIONS_FIELD: &str = "Impressions";
pub const RESULT_FIELD: &str = "Result";

/// Classification outcome for one ad within its group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Differs significantly from every other ad in the group
    Winner,
    /// Fails to differ from at least one other ad, in a group that has a winner
    Loser,
    /// Single-ad group, or a group where no ad differed from all rivals
    NoResult,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Winner => "WINNER",
            Verdict::Loser => "LOSER",
            Verdict::NoResult => "NO_RESULT",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column layout of a report, as declared by its header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Build a schema from header columns. The first column is the group key.
    pub fn new(columns: Vec<String>) -> Option<Self> {
        if columns.is_empty() {
            return None;
        }
        Some(Self { columns })
    }

    /// Name of the ad-group key column
    pub fn key_column(&self) -> &str {
        &self.columns[0]
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Header positions of every column the classifier does not read
    ///
    /// The classifier reads column 0 and the first `Ad ID`, `Clicks` and
    /// `Impressions` columns. Everything else, repeated names included, is an
    /// extra column. `Record::extra` holds one value per position, in this order.
    pub fn extra_positions(&self) -> Vec<usize> {
        let required = [
            self.position(AD_ID_FIELD),
            self.position(CLICKS_FIELD),
            self.position(IMPRESSIONS_FIELD),
        ];
        (1..self.columns.len())
            .filter(|at| !required.contains(&Some(*at)))
            .collect()
    }
}

/// One report row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub group_key: String,
    pub ad_id: String,
    /// Raw text of the Clicks cell
    pub clicks: String,
    /// Raw text of the Impressions cell
    pub impressions: String,
    /// Populated once the row has been classified
    pub result: Option<Verdict>,
    /// Values of `Schema::extra_positions`, as (column name, value) pairs
    pub extra: Vec<(String, String)>,
}

impl Record {
    pub fn new(
        group_key: impl Into<String>,
        ad_id: impl Into<String>,
        clicks: impl Into<String>,
        impressions: impl Into<String>,
    ) -> Self {
        Self {
            group_key: group_key.into(),
            ad_id: ad_id.into(),
            clicks: clicks.into(),
            impressions: impressions.into(),
            result: None,
            extra: Vec::new(),
        }
    }
}

/// A parsed report: header layout plus rows in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub schema: Schema,
    pub records: Vec<Record>,
}

/// One ad, the unit the classifier compares
///
/// Counts are held as `f64` because malformed cells degrade to NaN rather
/// than failing the run.
#[derive(Debug, Clone, PartialEq)]
pub struct Ad {
    /// Source row, kept whole so passthrough columns survive
    pub row: Record,
    pub clicks: f64,
    pub impressions: f64,
    /// Rivals this ad differed from significantly, set by classification
    pub winner_count: Option<usize>,
}

impl Ad {
    /// Build an ad directly from counts
    pub fn new(id: impl Into<String>, clicks: u64, impressions: u64) -> Self {
        Self {
            row: Record::new("", id, clicks.to_string(), impressions.to_string()),
            clicks: clicks as f64,
            impressions: impressions as f64,
            winner_count: None,
        }
    }

    /// Build an ad from a report row, parsing its count cells
    pub fn from_record(row: Record) -> Self {
        let clicks = parse_count(&row.clicks);
        let impressions = parse_count(&row.impressions);
        if clicks.is_nan() {
            tracing::warn!(ad_id = %row.ad_id, value = %row.clicks, "Unparseable Clicks value");
        }
        if impressions.is_nan() {
            tracing::warn!(ad_id = %row.ad_id, value = %row.impressions, "Unparseable Impressions value");
        }
        Self {
            row,
            clicks,
            impressions,
            winner_count: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.row.ad_id
    }

    pub fn result(&self) -> Option<Verdict> {
        self.row.result
    }

    /// Click-through rate; NaN or infinite when impressions are zero
    pub fn ctr(&self) -> f64 {
        self.clicks / self.impressions
    }
}

/// Ads sharing one ad-group key, in first-seen order
///
/// Never empty when built by [`crate::grouper::group`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdGroup {
    pub key: String,
    pub ads: Vec<Ad>,
}

impl AdGroup {
    pub fn new(key: impl Into<String>, ads: Vec<Ad>) -> Self {
        Self {
            key: key.into(),
            ads,
        }
    }

    pub fn len(&self) -> usize {
        self.ads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ads.is_empty()
    }
}

/// Parse a count cell from the report
///
/// Reports exported from ad platforms may carry thousands separators
/// ("1,234"). Anything that does not parse as a non-negative number becomes
/// NaN, which the significance test absorbs as "not significant".
pub fn parse_count(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => v,
        _ => f64::NAN,
    }
}
