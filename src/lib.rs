//! adsplit - Pairwise CTR significance testing for ad performance reports
//!
//! Reads a tabular ad performance report, groups ads by ad-group key and
//! classifies every ad as WINNER, LOSER or NO_RESULT using a two-proportion
//! z-test between each pair of ads in its group.

pub mod classify;
pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod grouper;
pub mod json_output;
pub mod pipeline;
pub mod record;
pub mod significance;
pub mod summary;
pub mod tsv_input;
pub mod tsv_output;
