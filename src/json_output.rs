//! JSON output format for classified reports

use crate::record::AdGroup;
use crate::summary::ClassificationSummary;
use serde::{Deserialize, Serialize};

/// A single classified ad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAd {
    pub ad_id: String,
    /// Parsed click count (null when the cell was unparseable)
    pub clicks: Option<f64>,
    /// Parsed impression count (null when the cell was unparseable)
    pub impressions: Option<f64>,
    /// Click-through rate (null when not finite)
    pub ctr: Option<f64>,
    /// Rivals this ad differed from significantly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_count: Option<usize>,
    /// WINNER, LOSER or NO_RESULT
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// One ad group and its ads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAdGroup {
    pub key: String,
    pub ads: Vec<JsonAd>,
}

/// Root JSON output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Format version identifier
    pub version: String,
    /// Format name
    pub format: String,
    /// Name of the ad-group key column in the source report
    pub key_column: String,
    pub groups: Vec<JsonAdGroup>,
    pub summary: ClassificationSummary,
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

impl JsonOutput {
    /// Build the output document from classified groups
    pub fn new(key_column: &str, groups: &[AdGroup]) -> Self {
        let json_groups = groups
            .iter()
            .map(|group| JsonAdGroup {
                key: group.key.clone(),
                ads: group
                    .ads
                    .iter()
                    .map(|ad| JsonAd {
                        ad_id: ad.id().to_string(),
                        clicks: finite(ad.clicks),
                        impressions: finite(ad.impressions),
                        ctr: finite(ad.ctr()),
                        winner_count: ad.winner_count,
                        result: ad.result().map(|r| r.to_string()),
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "adsplit-json-v1".to_string(),
            key_column: key_column.to_string(),
            groups: json_groups,
            summary: ClassificationSummary::from_groups(groups),
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
