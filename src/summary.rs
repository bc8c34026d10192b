//! Run summary for classified reports

use crate::record::{AdGroup, Verdict};
use serde::{Deserialize, Serialize};

/// Totals over a classified report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    /// Number of ad groups
    pub groups: usize,

    /// Number of ads across all groups
    pub ads: usize,

    /// Groups with a single ad (always NO_RESULT)
    pub single_ad_groups: usize,

    pub winners: usize,
    pub losers: usize,
    pub no_result: usize,

    /// Groups where more than one ad came out WINNER
    pub multi_winner_groups: usize,
}

impl ClassificationSummary {
    /// Tally classified groups
    pub fn from_groups(groups: &[AdGroup]) -> Self {
        let mut summary = Self {
            groups: groups.len(),
            ..Self::default()
        };

        for group in groups {
            summary.ads += group.len();
            if group.len() == 1 {
                summary.single_ad_groups += 1;
            }

            let mut group_winners = 0;
            for ad in &group.ads {
                match ad.result() {
                    Some(Verdict::Winner) => {
                        summary.winners += 1;
                        group_winners += 1;
                    }
                    Some(Verdict::Loser) => summary.losers += 1,
                    Some(Verdict::NoResult) => summary.no_result += 1,
                    None => {}
                }
            }
            if group_winners > 1 {
                summary.multi_winner_groups += 1;
            }
        }

        summary
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str("=== A/B Classification Summary ===\n\n");
        report.push_str(&format!(
            "Ad groups: {} ({} with a single ad)\n",
            self.groups, self.single_ad_groups
        ));
        report.push_str(&format!("Ads: {}\n\n", self.ads));
        report.push_str(&format!("  WINNER     {:>8}\n", self.winners));
        report.push_str(&format!("  LOSER      {:>8}\n", self.losers));
        report.push_str(&format!("  NO_RESULT  {:>8}\n", self.no_result));

        if self.multi_winner_groups > 0 {
            report.push_str(&format!(
                "\nNote: {} group(s) have more than one WINNER \
                 (every ad differed significantly from every other)\n",
                self.multi_winner_groups
            ));
        }

        report
    }
}
