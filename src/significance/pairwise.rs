// Two-proportion z-test over click-through rate
//
// Two ads differ significantly when the normal CDF of their z-score lands in
// either 5% tail. The check is two one-sided tail comparisons rather than a
// folded |z| test, so it answers "does A differ from B", not "is A better".

use crate::record::Ad;
use crate::significance::normal;

/// p-values below this are significant (lower tail)
pub const LOWER_TAIL: f64 = 0.05;

/// p-values above this are significant (upper tail)
pub const UPPER_TAIL: f64 = 0.95;

/// Full result of comparing one ad against another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignificanceTest {
    /// Click-through rate of the first ad
    pub ctr_a: f64,

    /// Click-through rate of the second ad
    pub ctr_b: f64,

    /// Standard error of the first ad's CTR
    pub se_a: f64,

    /// Standard error of the second ad's CTR
    pub se_b: f64,

    /// (ctr_a - ctr_b) / sqrt(se_a² + se_b²)
    pub z_score: f64,

    /// Standard normal CDF at `z_score` (0 when the z-score is NaN)
    pub p_value: f64,

    /// Whether the p-value falls in either tail
    pub significant: bool,
}

/// Standard error of a CTR estimate: sqrt(ctr * (1 - ctr) / impressions)
pub fn standard_error(ctr: f64, impressions: f64) -> f64 {
    (ctr * (1.0 - ctr) / impressions).sqrt()
}

/// Compare two ads and keep every intermediate value
///
/// Zero or unparseable counts are not guarded: they turn into NaN or infinite
/// CTRs and flow through the arithmetic. A NaN z-score is never significant,
/// even though the normal CDF maps it to a p-value of 0.
///
/// # Example
/// ```
/// use adsplit::record::Ad;
/// use adsplit::significance::compare;
///
/// let test = compare(&Ad::new("a", 500, 1000), &Ad::new("b", 5, 1000));
/// assert!(test.z_score > 10.0);
/// assert!(test.significant);
/// ```
pub fn compare(a: &Ad, b: &Ad) -> SignificanceTest {
    let ctr_a = a.ctr();
    let ctr_b = b.ctr();

    let se_a = standard_error(ctr_a, a.impressions);
    let se_b = standard_error(ctr_b, b.impressions);

    let z_score = (ctr_a - ctr_b) / (se_a.powi(2) + se_b.powi(2)).sqrt();
    let p_value = normal::cdf(z_score, 0.0, 1.0);

    let significant = !z_score.is_nan() && (p_value < LOWER_TAIL || p_value > UPPER_TAIL);

    SignificanceTest {
        ctr_a,
        ctr_b,
        se_a,
        se_b,
        z_score,
        p_value,
        significant,
    }
}

/// Whether ad `a` differs significantly from ad `b`
pub fn is_winner(a: &Ad, b: &Ad) -> bool {
    compare(a, b).significant
}
