//! Winner/loser classification of ads within each group
//!
//! Per group of k ads, every ordered pair (i, j) with i != j is tested, so a
//! group costs k(k-1) significance tests. Classification runs in two passes:
//!
//! 1. `tentative_labels`: an ad that differs significantly from every rival
//!    is WINNER, any other ad is LOSER.
//! 2. `resolve`: a group with no WINNER is relabelled NO_RESULT throughout.
//!
//! Single-ad groups skip both passes and are NO_RESULT. More than one ad can
//! end up WINNER when every pair in the group differs significantly; that is
//! kept as is.

use crate::record::{Ad, AdGroup, Verdict};
use crate::significance::is_winner;

/// Outcome for one ad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    /// Rivals this ad differed from significantly
    pub winner_count: usize,
}

/// First pass: label each ad from its pairwise tests alone
pub fn tentative_labels(ads: &[Ad]) -> Vec<Decision> {
    let rivals = ads.len().saturating_sub(1);
    ads.iter()
        .enumerate()
        .map(|(first, control)| {
            let winner_count = ads
                .iter()
                .enumerate()
                .filter(|(experimental, _)| *experimental != first)
                .filter(|(_, other)| is_winner(control, other))
                .count();
            let verdict = if winner_count == rivals {
                Verdict::Winner
            } else {
                Verdict::Loser
            };
            Decision {
                verdict,
                winner_count,
            }
        })
        .collect()
}

/// Second pass: without a WINNER the whole group is inconclusive
pub fn resolve(tentative: &[Decision]) -> Vec<Decision> {
    let any_winner = tentative.iter().any(|d| d.verdict == Verdict::Winner);
    tentative
        .iter()
        .map(|d| Decision {
            verdict: if any_winner {
                d.verdict
            } else {
                Verdict::NoResult
            },
            winner_count: d.winner_count,
        })
        .collect()
}

/// Decide every ad in a group without touching it
pub fn decide(ads: &[Ad]) -> Vec<Decision> {
    debug_assert!(!ads.is_empty(), "ad groups are never empty");
    if ads.len() == 1 {
        return vec![Decision {
            verdict: Verdict::NoResult,
            winner_count: 0,
        }];
    }
    resolve(&tentative_labels(ads))
}

/// Classify one group in place, overwriting any earlier results
pub fn classify_group(group: &mut AdGroup) {
    let decisions = decide(&group.ads);
    for (ad, decision) in group.ads.iter_mut().zip(&decisions) {
        ad.row.result = Some(decision.verdict);
        ad.winner_count = Some(decision.winner_count);
    }
    tracing::debug!(
        group = %group.key,
        ads = group.ads.len(),
        winners = decisions.iter().filter(|d| d.verdict == Verdict::Winner).count(),
        "Classified ad group"
    );
}

/// Classify every group
pub fn classify(mut groups: Vec<AdGroup>) -> Vec<AdGroup> {
    for group in &mut groups {
        classify_group(group);
    }
    groups
}
