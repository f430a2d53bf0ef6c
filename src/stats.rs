//! Descriptive statistics over finite samples.
//!
//! Every function takes an immutable slice, validates it up front, and
//! returns a [`Result`]. Nothing is cached between calls.
//!
//! # Algorithms
//!
//! - **Sums**: Neumaier compensated summation ([`kahan_sum`]) for O(ε)
//!   error independent of n. Every mean in this module is built on it.
//! - **Covariance**: the population identity `E[XY] − E[X]E[Y]` evaluated
//!   on data shifted by its arithmetic mean, without Bessel's correction.
//! - **Standard deviation**: two-pass, deviations taken from either the
//!   sample mean or a mean known a priori, scaled by the largest deviation.
//!
//! A result that would not fit in an `f64` is a [`StatsError::Domain`]
//! error rather than ±∞ or NaN.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StatsError};

// ---------------------------------------------------------------------------
// Mean kinds
// ---------------------------------------------------------------------------

/// Selector for the central-tendency formula used by [`mean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MeanKind {
    /// Sum divided by count.
    #[default]
    Arithmetic,
    /// Distinct values weighted by their occurrence counts.
    Binned,
    /// n-th root of the product.
    Geometric,
    /// Count divided by the sum of reciprocals.
    Harmonic,
    /// Square root of the mean of squares.
    RootMeanSquare,
}

impl MeanKind {
    /// All mean kinds, in declaration order.
    pub const ALL: [MeanKind; 5] = [
        MeanKind::Arithmetic,
        MeanKind::Binned,
        MeanKind::Geometric,
        MeanKind::Harmonic,
        MeanKind::RootMeanSquare,
    ];

    /// Canonical selector string.
    pub fn as_str(self) -> &'static str {
        match self {
            MeanKind::Arithmetic => "arithmetic",
            MeanKind::Binned => "bins",
            MeanKind::Geometric => "geometric",
            MeanKind::Harmonic => "harmonic",
            MeanKind::RootMeanSquare => "rms",
        }
    }
}

impl fmt::Display for MeanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeanKind {
    type Err = StatsError;

    /// Parses a selector string, case-insensitively.
    ///
    /// Accepts `arithmetic`, `bins` (or `binned`), `geometric`,
    /// `harmonic` and `rms` (or `root_mean_square`).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arithmetic" => Ok(MeanKind::Arithmetic),
            "bins" | "binned" => Ok(MeanKind::Binned),
            "geometric" => Ok(MeanKind::Geometric),
            "harmonic" => Ok(MeanKind::Harmonic),
            "rms" | "root_mean_square" => Ok(MeanKind::RootMeanSquare),
            _ => Err(StatsError::UnknownMeanKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Mean
// ---------------------------------------------------------------------------

/// Computes the central-tendency statistic selected by `kind`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
/// - [`StatsError::NonFinite`] if `data` contains NaN or ±∞.
/// - [`StatsError::Domain`] for a geometric mean over negative values, or
///   a harmonic mean over a zero value (or reciprocals summing to zero),
///   or when the result overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::stats::{mean, MeanKind};
/// let x = [2.0, 8.0];
/// assert!((mean(&x, MeanKind::Arithmetic).unwrap() - 5.0).abs() < 1e-12);
/// assert!((mean(&x, MeanKind::Geometric).unwrap() - 4.0).abs() < 1e-12);
/// assert!((mean(&x, MeanKind::Harmonic).unwrap() - 3.2).abs() < 1e-12);
/// ```
pub fn mean(data: &[f64], kind: MeanKind) -> Result<f64> {
    validate_sample(data, "mean")?;
    let value = match kind {
        MeanKind::Arithmetic => arithmetic_mean(data),
        MeanKind::Binned => binned_mean(data),
        MeanKind::Geometric => geometric_mean(data)?,
        MeanKind::Harmonic => harmonic_mean(data)?,
        MeanKind::RootMeanSquare => root_mean_square(data),
    };
    ensure_representable(value, "mean")
}

fn arithmetic_mean(data: &[f64]) -> f64 {
    let n = data.len() as f64;
    let sum = kahan_sum(data);
    if sum.is_finite() {
        return sum / n;
    }
    // Every partial sum of x/n is bounded by max |x|.
    compensated_sum(data.iter().map(|x| x / n))
}

/// Groups equal values in order of first appearance.
fn binned_mean(data: &[f64]) -> f64 {
    let mut bins: Vec<(f64, usize)> = Vec::new();
    for &x in data {
        match bins.iter_mut().find(|(value, _)| *value == x) {
            Some((_, count)) => *count += 1,
            None => bins.push((x, 1)),
        }
    }
    let total: usize = bins.iter().map(|&(_, count)| count).sum();
    let total = total as f64;
    compensated_sum(bins.iter().map(|&(value, count)| value * (count as f64 / total)))
}

fn geometric_mean(data: &[f64]) -> Result<f64> {
    if data.iter().any(|&x| x < 0.0) {
        return Err(StatsError::Domain {
            context: "geometric mean",
            reason: "negative values have no real n-th root of their product".into(),
        });
    }
    if data.iter().any(|&x| x == 0.0) {
        return Ok(0.0);
    }
    // exp(mean(ln x)) keeps long products from overflowing.
    let log_mean = compensated_sum(data.iter().map(|x| x.ln())) / data.len() as f64;
    Ok(log_mean.exp())
}

fn harmonic_mean(data: &[f64]) -> Result<f64> {
    if data.iter().any(|&x| x == 0.0) {
        return Err(StatsError::Domain {
            context: "harmonic mean",
            reason: "reciprocal of zero is undefined".into(),
        });
    }
    // Scaling by the smallest magnitude keeps every term in [-1, 1], so
    // subnormal inputs do not overflow their reciprocals.
    let scale = data.iter().map(|x| x.abs()).fold(f64::INFINITY, f64::min);
    let scaled_sum = compensated_sum(data.iter().map(|x| scale / x));
    if scaled_sum == 0.0 {
        return Err(StatsError::Domain {
            context: "harmonic mean",
            reason: "reciprocals sum to zero".into(),
        });
    }
    Ok(scale * (data.len() as f64 / scaled_sum))
}

fn root_mean_square(data: &[f64]) -> f64 {
    let scale = max_abs(data.iter().copied());
    if scale == 0.0 {
        return 0.0;
    }
    let mean_square = compensated_sum(data.iter().map(|x| {
        let r = x / scale;
        r * r
    })) / data.len() as f64;
    scale * mean_square.sqrt()
}

fn max_abs<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    values.into_iter().map(f64::abs).fold(0.0, f64::max)
}

// ---------------------------------------------------------------------------
// Covariance
// ---------------------------------------------------------------------------

/// Symmetric 2×2 population covariance matrix of two samples.
///
/// Only one off-diagonal value is stored, so `xy() == yx()` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovarianceMatrix {
    xx: f64,
    xy: f64,
    yy: f64,
}

impl CovarianceMatrix {
    /// Variance of `x`.
    pub fn xx(&self) -> f64 {
        self.xx
    }

    /// Covariance of `x` with `y`.
    pub fn xy(&self) -> f64 {
        self.xy
    }

    /// Covariance of `y` with `x`; identical to [`xy`](Self::xy).
    pub fn yx(&self) -> f64 {
        self.xy
    }

    /// Variance of `y`.
    pub fn yy(&self) -> f64 {
        self.yy
    }

    /// Row-major `[[xx, xy], [yx, yy]]`.
    pub fn to_array(&self) -> [[f64; 2]; 2] {
        [[self.xx, self.xy], [self.xy, self.yy]]
    }
}

/// Computes the population covariance matrix of `x` and `y`.
///
/// # Formula
/// ```text
/// cov(a, b) = mean(a·b) − mean(a)·mean(b)
/// ```
/// evaluated for (x, x), (x, y) and (y, y). No Bessel correction.
///
/// Both samples are first shifted by their arithmetic means, so large
/// common offsets do not cancel the spread away. The shifted means are
/// close to zero and only correct for rounding in the shift.
///
/// # Errors
/// - [`StatsError::LengthMismatch`] if `x.len() != y.len()`.
/// - [`StatsError::EmptyInput`] if both are empty.
/// - [`StatsError::NonFinite`] if either contains NaN or ±∞.
/// - [`StatsError::Domain`] if an entry overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::stats::covariance_matrix;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let cov = covariance_matrix(&x, &y).unwrap();
/// assert!((cov.xx() - 2.0).abs() < 1e-12);
/// assert!((cov.xy() - 4.0).abs() < 1e-12);
/// assert!((cov.yy() - 8.0).abs() < 1e-12);
/// assert_eq!(cov.xy(), cov.yx());
/// ```
pub fn covariance_matrix(x: &[f64], y: &[f64]) -> Result<CovarianceMatrix> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            context: "covariance matrix",
            left: x.len(),
            right: y.len(),
        });
    }
    validate_sample(x, "covariance matrix")?;
    validate_sample(y, "covariance matrix")?;

    let dx = shifted(x);
    let dy = shifted(y);
    let covariance = |a: &[f64], b: &[f64]| {
        let n = a.len() as f64;
        let mean_of_products = compensated_sum(a.iter().zip(b).map(|(ai, bi)| ai * bi)) / n;
        mean_of_products - arithmetic_mean(a) * arithmetic_mean(b)
    };

    let context = "covariance matrix";
    Ok(CovarianceMatrix {
        xx: ensure_representable(covariance(&dx, &dx), context)?,
        xy: ensure_representable(covariance(&dx, &dy), context)?,
        yy: ensure_representable(covariance(&dy, &dy), context)?,
    })
}

/// `data` minus its arithmetic mean.
fn shifted(data: &[f64]) -> Vec<f64> {
    let center = arithmetic_mean(data);
    data.iter().map(|x| x - center).collect()
}

// ---------------------------------------------------------------------------
// Standard deviation
// ---------------------------------------------------------------------------

/// Population standard deviation (denominator `N`).
///
/// With `known_mean = None` deviations are taken from the sample's own
/// arithmetic mean; with `Some(mu)` they are taken from `mu`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
/// - [`StatsError::NonFinite`] if `data` or `known_mean` is NaN or ±∞.
/// - [`StatsError::Domain`] if a deviation overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::stats::standard_deviation;
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert!((standard_deviation(&x, None).unwrap() - 2.0_f64.sqrt()).abs() < 1e-12);
/// assert!((standard_deviation(&x, Some(0.0)).unwrap() - 11.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn standard_deviation(data: &[f64], known_mean: Option<f64>) -> Result<f64> {
    validate_sample(data, "standard deviation")?;
    let center = match known_mean {
        Some(mu) if !mu.is_finite() => {
            return Err(StatsError::NonFinite {
                context: "standard deviation",
            })
        }
        Some(mu) => mu,
        None => arithmetic_mean(data),
    };
    root_mean_squared_deviation(data, center, data.len() as f64, "standard deviation")
}

/// Bias-corrected standard deviation `s` (denominator `N − 1`).
///
/// Use when the true mean is unknown and estimated from the data.
///
/// # Errors
/// - [`StatsError::InsufficientData`] if `data.len() < 2`.
/// - [`StatsError::NonFinite`] if `data` contains NaN or ±∞.
/// - [`StatsError::Domain`] if a deviation overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::stats::sample_standard_deviation;
/// let s = sample_standard_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert!((s - 2.5_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn sample_standard_deviation(data: &[f64]) -> Result<f64> {
    let context = "sample standard deviation";
    require_len(data, 2, context)?;
    validate_sample(data, context)?;
    let center = arithmetic_mean(data);
    root_mean_squared_deviation(data, center, data.len() as f64 - 1.0, context)
}

/// `√(Σ(x − center)² / denominator)`, with deviations scaled by the
/// largest one so the squares cannot overflow.
fn root_mean_squared_deviation(
    data: &[f64],
    center: f64,
    denominator: f64,
    context: &'static str,
) -> Result<f64> {
    let scale = ensure_representable(max_abs(data.iter().map(|x| x - center)), context)?;
    if scale == 0.0 {
        return Ok(0.0);
    }
    let sum_of_squares = compensated_sum(data.iter().map(|x| {
        let d = (x - center) / scale;
        d * d
    }));
    Ok(scale * (sum_of_squares / denominator).sqrt())
}

// ---------------------------------------------------------------------------
// Standard errors
// ---------------------------------------------------------------------------

/// Standard error of the mean: `resolution / √N`.
///
/// Only the sample size is used.
///
/// # Errors
/// - [`StatsError::InvalidParameter`] if `resolution` is negative or not
///   finite.
/// - [`StatsError::EmptyInput`] if `data` is empty.
pub fn std_of_mean(resolution: f64, data: &[f64]) -> Result<f64> {
    let context = "std of mean";
    check_spread(resolution, "resolution", context)?;
    require_len(data, 1, context)?;
    Ok(resolution / (data.len() as f64).sqrt())
}

/// Standard error of a standard deviation estimate when the true mean is
/// known: `std / √(2N)`.
///
/// # Errors
/// - [`StatsError::InvalidParameter`] if `std` is negative or not finite.
/// - [`StatsError::EmptyInput`] if `data` is empty.
pub fn std_of_std_known_mean(std: f64, data: &[f64]) -> Result<f64> {
    let context = "std of std (known mean)";
    check_spread(std, "std", context)?;
    require_len(data, 1, context)?;
    Ok(std / (2.0 * data.len() as f64).sqrt())
}

/// Standard error of a standard deviation estimate when the true mean is
/// unknown: `std / √(2(N − 1))`.
///
/// # Errors
/// - [`StatsError::InvalidParameter`] if `std` is negative or not finite.
/// - [`StatsError::InsufficientData`] if `data.len() < 2`.
pub fn std_of_std_unknown_mean(std: f64, data: &[f64]) -> Result<f64> {
    let context = "std of std (unknown mean)";
    check_spread(std, "std", context)?;
    require_len(data, 2, context)?;
    Ok(std / (2.0 * (data.len() as f64 - 1.0)).sqrt())
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_sample(data: &[f64], context: &'static str) -> Result<()> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput { context });
    }
    if !data.iter().all(|x| x.is_finite()) {
        return Err(StatsError::NonFinite { context });
    }
    Ok(())
}

fn require_len(data: &[f64], needed: usize, context: &'static str) -> Result<()> {
    match data.len() {
        0 => Err(StatsError::EmptyInput { context }),
        got if got < needed => Err(StatsError::InsufficientData {
            context,
            needed,
            got,
        }),
        _ => Ok(()),
    }
}

fn check_spread(value: f64, name: &str, context: &'static str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(StatsError::InvalidParameter {
            context,
            reason: format!("{name} must be finite and ≥ 0, got {name}={value}"),
        });
    }
    Ok(())
}

fn ensure_representable(value: f64, context: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::Domain {
            context,
            reason: "result overflows f64".into(),
        })
    }
}

// ---------------------------------------------------------------------------
// Compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation for O(ε) error independent of `n`.
///
/// An improved variant of Kahan summation that also handles the case
/// where the addend is larger in magnitude than the running sum.
///
/// If the running sum overflows, the overflowed sum (±∞) is returned as
/// is, without applying the correction term.
///
/// Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
/// zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.
///
/// # Examples
/// ```
/// use u_stats::stats::kahan_sum;
/// assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    compensated_sum(data.iter().copied())
}

pub(crate) fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if !t.is_finite() {
            return t;
        }
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    // --- mean ---

    #[test]
    fn test_arithmetic_mean_basic() {
        let m = mean(&[1.0, 2.0, 3.0, 4.0, 5.0], MeanKind::Arithmetic).unwrap();
        assert_eq!(m, 3.0);
    }

    #[test]
    fn test_mean_default_kind_is_arithmetic() {
        assert_eq!(MeanKind::default(), MeanKind::Arithmetic);
    }

    #[test]
    fn test_mean_single() {
        for kind in MeanKind::ALL {
            let m = mean(&[42.0], kind).unwrap();
            assert!((m - 42.0).abs() < TOL, "{kind}: {m}");
        }
    }

    #[test]
    fn test_mean_empty() {
        for kind in MeanKind::ALL {
            assert_eq!(
                mean(&[], kind),
                Err(StatsError::EmptyInput { context: "mean" })
            );
        }
    }

    #[test]
    fn test_mean_nan() {
        assert_eq!(
            mean(&[1.0, f64::NAN, 3.0], MeanKind::Arithmetic),
            Err(StatsError::NonFinite { context: "mean" })
        );
    }

    #[test]
    fn test_mean_inf() {
        assert!(mean(&[1.0, f64::INFINITY], MeanKind::RootMeanSquare).is_err());
    }

    #[test]
    fn test_means_of_two_and_eight() {
        let x = [2.0, 8.0];
        let am = mean(&x, MeanKind::Arithmetic).unwrap();
        let gm = mean(&x, MeanKind::Geometric).unwrap();
        let hm = mean(&x, MeanKind::Harmonic).unwrap();
        let rms = mean(&x, MeanKind::RootMeanSquare).unwrap();
        assert!((am - 5.0).abs() < TOL);
        assert!((gm - 4.0).abs() < TOL);
        assert!((hm - 3.2).abs() < TOL);
        assert!((rms - 34.0_f64.sqrt()).abs() < TOL);
        assert!((rms - 5.831).abs() < 1e-3);
    }

    #[test]
    fn test_binned_mean_weights_by_count() {
        // 1 appears three times, 4 once: (3·1 + 4) / 4
        let m = mean(&[1.0, 4.0, 1.0, 1.0], MeanKind::Binned).unwrap();
        assert!((m - 1.75).abs() < TOL);
    }

    #[test]
    fn test_binned_mean_order_independent() {
        let a = mean(&[3.0, 3.0, 7.0, 5.0, 7.0], MeanKind::Binned).unwrap();
        let b = mean(&[7.0, 5.0, 3.0, 7.0, 3.0], MeanKind::Binned).unwrap();
        assert!((a - b).abs() < TOL);
        assert!((a - 5.0).abs() < TOL);
    }

    #[test]
    fn test_geometric_mean_negative_is_domain_error() {
        let err = mean(&[2.0, -8.0], MeanKind::Geometric).unwrap_err();
        assert!(matches!(err, StatsError::Domain { context: "geometric mean", .. }));
    }

    #[test]
    fn test_geometric_mean_with_zero() {
        assert_eq!(mean(&[0.0, 5.0, 9.0], MeanKind::Geometric).unwrap(), 0.0);
    }

    #[test]
    fn test_geometric_mean_large_product_does_not_overflow() {
        let data = vec![1e200; 10];
        let m = mean(&data, MeanKind::Geometric).unwrap();
        assert!((m / 1e200 - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_harmonic_mean_zero_is_domain_error() {
        let err = mean(&[1.0, 0.0, 2.0], MeanKind::Harmonic).unwrap_err();
        assert!(matches!(err, StatsError::Domain { context: "harmonic mean", .. }));
    }

    #[test]
    fn test_harmonic_mean_reciprocals_cancel() {
        assert!(mean(&[2.0, -2.0], MeanKind::Harmonic).is_err());
    }

    #[test]
    fn test_rms_of_symmetric_values() {
        let m = mean(&[-3.0, 3.0], MeanKind::RootMeanSquare).unwrap();
        assert!((m - 3.0).abs() < TOL);
    }

    #[test]
    fn test_mean_of_max_values_does_not_overflow() {
        let data = [f64::MAX, f64::MAX];
        for kind in [
            MeanKind::Arithmetic,
            MeanKind::Binned,
            MeanKind::Harmonic,
            MeanKind::RootMeanSquare,
        ] {
            let m = mean(&data, kind).unwrap();
            assert!((m / f64::MAX - 1.0).abs() < TOL, "{kind}: {m}");
        }
    }

    #[test]
    fn test_rms_of_large_values() {
        assert_eq!(mean(&[1e200], MeanKind::RootMeanSquare).unwrap(), 1e200);
        // √((9 + 16) / 2) · 1e200
        let m = mean(&[3e200, 4e200], MeanKind::RootMeanSquare).unwrap();
        assert!((m / (12.5_f64.sqrt() * 1e200) - 1.0).abs() < TOL);
    }

    #[test]
    fn test_harmonic_mean_subnormal_value() {
        // 1/1e-320 overflows, but the mean is ≈ 2·1e-320.
        let m = mean(&[1e-320, 1.0], MeanKind::Harmonic).unwrap();
        assert_eq!(m, 2.0 * 1e-320);
    }

    #[test]
    fn test_mean_overflowing_result_is_domain_error() {
        // Reciprocals nearly cancel, so n / Σ(1/x) is far beyond f64::MAX.
        let err = mean(&[1e300, -1.0000000000000002e300], MeanKind::Harmonic).unwrap_err();
        assert!(matches!(err, StatsError::Domain { context: "mean", .. }), "{err:?}");
    }

    // --- MeanKind parsing ---

    #[test]
    fn test_mean_kind_parse_selectors() {
        assert_eq!("arithmetic".parse::<MeanKind>().unwrap(), MeanKind::Arithmetic);
        assert_eq!("bins".parse::<MeanKind>().unwrap(), MeanKind::Binned);
        assert_eq!("Binned".parse::<MeanKind>().unwrap(), MeanKind::Binned);
        assert_eq!(" geometric ".parse::<MeanKind>().unwrap(), MeanKind::Geometric);
        assert_eq!("HARMONIC".parse::<MeanKind>().unwrap(), MeanKind::Harmonic);
        assert_eq!("rms".parse::<MeanKind>().unwrap(), MeanKind::RootMeanSquare);
    }

    #[test]
    fn test_mean_kind_parse_unknown() {
        assert_eq!(
            "median".parse::<MeanKind>(),
            Err(StatsError::UnknownMeanKind("median".into()))
        );
    }

    #[test]
    fn test_mean_kind_display_roundtrip() {
        for kind in MeanKind::ALL {
            assert_eq!(kind.to_string().parse::<MeanKind>().unwrap(), kind);
        }
    }

    // --- covariance matrix ---

    #[test]
    fn test_covariance_matrix_known_values() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [4.0, 3.0, 2.0, 1.0];
        let cov = covariance_matrix(&x, &y).unwrap();
        assert!((cov.xx() - 1.25).abs() < TOL);
        assert!((cov.yy() - 1.25).abs() < TOL);
        assert!((cov.xy() + 1.25).abs() < TOL);
        assert_eq!(cov.xy(), cov.yx());
    }

    #[test]
    fn test_covariance_matrix_self() {
        let x = [0.5, 1.5, -2.0, 7.25, 3.0];
        let cov = covariance_matrix(&x, &x).unwrap();
        assert_eq!(cov.xx(), cov.yy());
        assert_eq!(cov.xy(), cov.xx());
        assert_eq!(cov.yx(), cov.xx());
    }

    #[test]
    fn test_covariance_matrix_to_array() {
        let cov = covariance_matrix(&[1.0, 3.0], &[2.0, 6.0]).unwrap();
        let m = cov.to_array();
        assert_eq!(m[0][1], m[1][0]);
        assert!((m[0][0] - 1.0).abs() < TOL);
        assert!((m[0][1] - 2.0).abs() < TOL);
        assert!((m[1][1] - 4.0).abs() < TOL);
    }

    #[test]
    fn test_covariance_matrix_length_mismatch() {
        assert_eq!(
            covariance_matrix(&[1.0, 2.0, 3.0], &[1.0, 2.0]),
            Err(StatsError::LengthMismatch {
                context: "covariance matrix",
                left: 3,
                right: 2,
            })
        );
    }

    #[test]
    fn test_covariance_matrix_empty() {
        assert!(matches!(
            covariance_matrix(&[], &[]),
            Err(StatsError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_covariance_matrix_constant_is_zero() {
        let cov = covariance_matrix(&[2.0; 6], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert!(cov.xx().abs() < TOL);
        assert!(cov.xy().abs() < TOL);
    }

    #[test]
    fn test_covariance_matrix_large_offset() {
        let x = [1e8 + 1.0, 1e8 + 2.0, 1e8 + 3.0];
        let y = [5e8 + 3.0, 5e8 + 2.0, 5e8 + 1.0];
        let cov = covariance_matrix(&x, &y).unwrap();
        assert!((cov.xx() - 2.0 / 3.0).abs() < TOL, "{}", cov.xx());
        assert!((cov.yy() - 2.0 / 3.0).abs() < TOL, "{}", cov.yy());
        assert!((cov.xy() + 2.0 / 3.0).abs() < TOL, "{}", cov.xy());
    }

    #[test]
    fn test_covariance_matrix_large_constant() {
        let cov = covariance_matrix(&[1e200, 1e200], &[1.0, 2.0]).unwrap();
        assert_eq!(cov.xx(), 0.0);
        assert_eq!(cov.xy(), 0.0);
        assert!((cov.yy() - 0.25).abs() < TOL);
    }

    #[test]
    fn test_covariance_matrix_overflow_is_domain_error() {
        assert_eq!(
            covariance_matrix(&[1e300, -1e300], &[1.0, 2.0]),
            Err(StatsError::Domain {
                context: "covariance matrix",
                reason: "result overflows f64".into(),
            })
        );
    }

    // --- standard deviation ---

    #[test]
    fn test_standard_deviation_unknown_mean() {
        let sd = standard_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0], None).unwrap();
        assert!((sd - 2.0_f64.sqrt()).abs() < TOL);
        assert!((sd - 1.414).abs() < 1e-3);
    }

    #[test]
    fn test_standard_deviation_known_mean() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((standard_deviation(&v, Some(5.0)).unwrap() - 2.0).abs() < TOL);
        // Off-centre mean inflates spread: (32 + 8·1) / 8 = 5
        assert!((standard_deviation(&v, Some(4.0)).unwrap() - 5.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_standard_deviation_empty() {
        assert!(matches!(
            standard_deviation(&[], None),
            Err(StatsError::EmptyInput { .. })
        ));
        assert!(standard_deviation(&[], Some(1.0)).is_err());
    }

    #[test]
    fn test_standard_deviation_non_finite_known_mean() {
        assert!(matches!(
            standard_deviation(&[1.0, 2.0], Some(f64::NAN)),
            Err(StatsError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_standard_deviation_single() {
        assert_eq!(standard_deviation(&[7.0], None).unwrap(), 0.0);
    }

    #[test]
    fn test_standard_deviation_extreme_values() {
        let x = [f64::MAX, -f64::MAX];
        assert_eq!(standard_deviation(&x, None).unwrap(), f64::MAX);
        // MAX − (−MAX) is not representable.
        assert!(matches!(
            standard_deviation(&x, Some(f64::MAX)),
            Err(StatsError::Domain { .. })
        ));
    }

    #[test]
    fn test_standard_deviation_large_offset() {
        let x = [1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0, 1e9 + 4.0, 1e9 + 5.0];
        assert!((standard_deviation(&x, None).unwrap() - 2.0_f64.sqrt()).abs() < TOL);
    }

    #[test]
    fn test_sample_standard_deviation_basic() {
        let s = sample_standard_deviation(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((s - 2.5_f64.sqrt()).abs() < TOL);
        assert!((s - 1.581).abs() < 1e-3);
    }

    #[test]
    fn test_sample_standard_deviation_too_few() {
        assert_eq!(
            sample_standard_deviation(&[1.0]),
            Err(StatsError::InsufficientData {
                context: "sample standard deviation",
                needed: 2,
                got: 1,
            })
        );
        assert!(matches!(
            sample_standard_deviation(&[]),
            Err(StatsError::EmptyInput { .. })
        ));
    }

    #[test]
    fn test_corrected_exceeds_population() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let pop = standard_deviation(&x, None).unwrap();
        let s = sample_standard_deviation(&x).unwrap();
        assert!(pop < s);
    }

    // --- standard errors ---

    #[test]
    fn test_std_of_mean() {
        let data = [0.0; 16];
        assert!((std_of_mean(2.0, &data).unwrap() - 0.5).abs() < TOL);
        assert!(std_of_mean(2.0, &[]).is_err());
    }

    #[test]
    fn test_std_of_std_known_mean() {
        let data = [1.0; 8];
        assert!((std_of_std_known_mean(4.0, &data).unwrap() - 1.0).abs() < TOL);
        assert!(std_of_std_known_mean(4.0, &[]).is_err());
    }

    #[test]
    fn test_std_of_std_unknown_mean() {
        let data = [1.0; 9];
        assert!((std_of_std_unknown_mean(4.0, &data).unwrap() - 1.0).abs() < TOL);
        assert_eq!(
            std_of_std_unknown_mean(4.0, &[1.0]),
            Err(StatsError::InsufficientData {
                context: "std of std (unknown mean)",
                needed: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn test_unknown_mean_error_exceeds_known_mean_error() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let known = std_of_std_known_mean(1.0, &data).unwrap();
        let unknown = std_of_std_unknown_mean(1.0, &data).unwrap();
        assert!(unknown > known);
    }

    #[test]
    fn test_standard_errors_reject_bad_spread() {
        let data = [1.0, 2.0, 3.0];
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            assert!(matches!(
                std_of_mean(bad, &data),
                Err(StatsError::InvalidParameter { context: "std of mean", .. })
            ));
            assert!(matches!(
                std_of_std_known_mean(bad, &data),
                Err(StatsError::InvalidParameter { .. })
            ));
            assert!(matches!(
                std_of_std_unknown_mean(bad, &data),
                Err(StatsError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_standard_errors_accept_zero_spread() {
        let data = [1.0, 2.0];
        assert_eq!(std_of_mean(0.0, &data).unwrap(), 0.0);
        assert_eq!(std_of_std_known_mean(0.0, &data).unwrap(), 0.0);
        assert_eq!(std_of_std_unknown_mean(0.0, &data).unwrap(), 0.0);
    }

    // --- kahan_sum ---

    #[test]
    fn test_kahan_sum_cancellation() {
        assert_eq!(kahan_sum(&[1.0, 1e100, 1.0, -1e100]), 2.0);
    }

    #[test]
    fn test_kahan_sum_empty() {
        assert_eq!(kahan_sum(&[]), 0.0);
    }

    #[test]
    fn test_kahan_sum_many_small() {
        let data = vec![0.1; 10_000];
        assert!((kahan_sum(&data) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_kahan_sum_overflow_is_infinite() {
        assert_eq!(kahan_sum(&[f64::MAX, f64::MAX]), f64::INFINITY);
        assert_eq!(kahan_sum(&[-f64::MAX, -f64::MAX, 1.0]), f64::NEG_INFINITY);
    }
}
