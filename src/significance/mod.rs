// Statistical significance testing for ad splits
//
// Two ads are compared with a two-proportion z-test over their click-through
// rates. The z-score is mapped through the standard normal CDF and a p-value
// in either 5% tail counts as a significant difference.
//
// Components:
// - normal: closed-form PDF and erfc-based CDF with a zero fallback for
//   invalid parameters
// - pairwise: CTR, standard error, z-score and the two-tailed verdict
//
// No third-party statistics crate is involved; the normal CDF is
// self-contained so the classifier has no numerical dependencies.

pub mod normal;
mod pairwise;

pub use pairwise::{compare, is_winner, standard_error, SignificanceTest, LOWER_TAIL, UPPER_TAIL};
