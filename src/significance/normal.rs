// Normal distribution evaluation
//
// Closed-form PDF and an erfc-based CDF. The complementary error function uses
// the Chebyshev expansion from Press et al., Numerical Recipes (3rd ed.) §6.2.2,
// accurate to about 1e-15 relative on [0, 26]. It is exact at 0, so the CDF
// is 0.5 at the mean and has no jump where erfc switches to its reflection.
//
// Invalid parameters (NaN anywhere, or sd <= 0) evaluate to 0 instead of
// failing. Callers rely on this to neutralize degenerate ad pairs.

use std::f64::consts::{PI, SQRT_2};

/// Cumulative distribution function of N(mean, sd²) at `x`
///
/// Returns 0 when any argument is NaN or `sd <= 0`.
///
/// # Example
/// ```
/// use adsplit::significance::normal::cdf;
///
/// assert!((cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-9);
/// assert!((cdf(1.96, 0.0, 1.0) - 0.975).abs() < 1e-4);
/// assert_eq!(cdf(1.0, 0.0, 0.0), 0.0);
/// ```
pub fn cdf(x: f64, mean: f64, sd: f64) -> f64 {
    if x.is_nan() || mean.is_nan() || sd.is_nan() || sd <= 0.0 {
        return 0.0;
    }
    let z = (x - mean) / sd;
    0.5 * erfc(-z / SQRT_2)
}

/// Probability density function of N(mean, sd²) at `x`
///
/// Returns 0 when any argument is NaN or `sd <= 0`.
pub fn pdf(x: f64, mean: f64, sd: f64) -> f64 {
    if x.is_nan() || mean.is_nan() || sd.is_nan() || sd <= 0.0 {
        return 0.0;
    }
    let z = (x - mean) / sd;
    (-0.5 * z * z).exp() / (sd * (2.0 * PI).sqrt())
}

/// Complementary error function, erfc(x) = 1 - erf(x)
pub fn erfc(x: f64) -> f64 {
    if x >= 0.0 {
        erfc_cheb(x)
    } else {
        2.0 - erfc_cheb(-x)
    }
}

const ERFC_COF: [f64; 28] = [
    -1.302_653_719_781_709_4,
    6.419_697_923_564_902_6e-1,
    1.947_647_320_418_583_6e-2,
    -9.561_514_786_808_631e-3,
    -9.465_953_444_820_36e-4,
    3.668_394_978_527_61e-4,
    4.252_332_480_690_7e-5,
    -2.027_857_811_253_4e-5,
    -1.624_290_004_647e-6,
    1.303_655_835_580e-6,
    1.562_644_172_2e-8,
    -8.523_809_591_5e-8,
    6.529_054_439e-9,
    5.059_343_495e-9,
    -9.913_641_56e-10,
    -2.273_651_22e-10,
    9.646_791_1e-11,
    2.394_038e-12,
    -6.886_027e-12,
    8.944_87e-13,
    3.130_92e-13,
    -1.127_08e-13,
    3.81e-16,
    7.106e-15,
    -1.523e-15,
    -9.4e-17,
    1.21e-16,
    -2.8e-17,
];

/// erfc for z >= 0, Clenshaw recurrence over `ERFC_COF`
fn erfc_cheb(z: f64) -> f64 {
    let t = 2.0 / (2.0 + z);
    let ty = 4.0 * t - 2.0;
    let mut d = 0.0;
    let mut dd = 0.0;
    for &c in ERFC_COF[1..].iter().rev() {
        let tmp = d;
        d = ty * d - dd + c;
        dd = tmp;
    }
    t * (-z * z + 0.5 * (ERFC_COF[0] + ty * d) - dd).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_err(actual: f64, expected: f64) -> f64 {
        ((actual - expected) / expected).abs()
    }

    #[test]
    fn test_cdf_at_mean_is_half() {
        assert!((cdf(0.0, 0.0, 1.0) - 0.5).abs() < 1e-9);
        assert!((cdf(3.0, 3.0, 2.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cdf_reference_values() {
        // Reference values from standard normal tables (double precision)
        let cases = [
            (-3.0, 0.001_349_898_031_630_095),
            (-1.96, 0.024_997_895_148_220_435),
            (-1.0, 0.158_655_253_931_457_05),
            (1.0, 0.841_344_746_068_542_9),
            (1.644_853_626_951_472_2, 0.95),
            (2.5, 0.993_790_334_674_223_8),
        ];
        for (x, expected) in cases {
            let actual = cdf(x, 0.0, 1.0);
            assert!(
                rel_err(actual, expected) < 1e-6,
                "cdf({}) = {}, expected {}",
                x,
                actual,
                expected
            );
        }
    }

    #[test]
    fn test_cdf_deep_lower_tail_keeps_relative_accuracy() {
        // Phi(-6) and Phi(-8)
        assert!(rel_err(cdf(-6.0, 0.0, 1.0), 9.865_876_450_376_946e-10) < 1e-6);
        assert!(rel_err(cdf(-8.0, 0.0, 1.0), 6.220_960_574_271_785e-16) < 1e-6);
    }

    #[test]
    fn test_cdf_is_monotone_and_bounded() {
        let mut prev = 0.0;
        let mut x = -8.0;
        while x <= 8.0 {
            let p = cdf(x, 0.0, 1.0);
            assert!((0.0..=1.0).contains(&p));
            assert!(p >= prev, "cdf decreased at x={}", x);
            prev = p;
            x += 0.25;
        }
    }

    #[test]
    fn test_cdf_symmetry() {
        for x in [0.1, 0.5, 1.3, 2.7, 4.0] {
            let sum = cdf(x, 0.0, 1.0) + cdf(-x, 0.0, 1.0);
            assert!((sum - 1.0).abs() < 1e-7, "asymmetric at {}", x);
        }
    }

    #[test]
    fn test_cdf_infinite_arguments() {
        assert_eq!(cdf(f64::NEG_INFINITY, 0.0, 1.0), 0.0);
        assert_eq!(cdf(f64::INFINITY, 0.0, 1.0), 1.0);
    }

    #[test]
    fn test_invalid_parameters_return_zero() {
        assert_eq!(cdf(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(cdf(0.0, f64::NAN, 1.0), 0.0);
        assert_eq!(cdf(0.0, 0.0, f64::NAN), 0.0);
        assert_eq!(cdf(0.0, 0.0, 0.0), 0.0);
        assert_eq!(cdf(0.0, 0.0, -1.0), 0.0);
        assert_eq!(pdf(f64::NAN, 0.0, 1.0), 0.0);
        assert_eq!(pdf(0.0, 0.0, -2.0), 0.0);
    }

    #[test]
    fn test_pdf_reference_values() {
        assert!(rel_err(pdf(0.0, 0.0, 1.0), 0.398_942_280_401_432_7) < 1e-12);
        assert!(rel_err(pdf(1.0, 0.0, 1.0), 0.241_970_724_519_143_37) < 1e-12);
        // Scaling by sd
        assert!(rel_err(pdf(2.0, 0.0, 2.0), 0.120_985_362_259_571_68) < 1e-12);
    }

    #[test]
    fn test_erfc_reference_values() {
        assert!((erfc(0.0) - 1.0).abs() < 1e-15);
        assert!(rel_err(erfc(0.5), 0.479_500_122_186_953_5) < 1e-12);
        assert!(rel_err(erfc(-1.0), 1.842_700_792_949_715) < 1e-12);
        assert!(rel_err(erfc(5.0), 1.537_459_794_428_034_8e-12) < 1e-12);
    }

    #[test]
    fn test_cdf_continuous_across_mean() {
        for eps in [1e-12, 1e-9, 1e-6, 1e-3] {
            let below = cdf(-eps, 0.0, 1.0);
            let above = cdf(eps, 0.0, 1.0);
            assert!(below <= above, "cdf(-{}) = {} > cdf({}) = {}", eps, below, eps, above);
            assert!((below - 0.5).abs() < 1e-3 && (above - 0.5).abs() < 1e-3);
        }
        assert_eq!(erfc(-0.0), erfc(0.0));
    }

    #[test]
    fn test_cdf_monotone_on_fine_grid() {
        let mut prev = 0.0;
        let mut x = -8.0;
        while x <= 8.0 {
            let p = cdf(x, 0.0, 1.0);
            assert!(p >= prev, "cdf decreased at x={}", x);
            prev = p;
            x += 1e-3;
        }
    }
}
