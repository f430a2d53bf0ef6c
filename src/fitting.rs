//! Least-squares and chi-square helpers for straight-line fits.
//!
//! The model is a line through the origin, `y = a·x`, with a common
//! measurement uncertainty σ on every `y`.

use crate::error::{Result, StatsError};
use crate::stats::{compensated_sum, mean, MeanKind};

/// Least-squares slope of `y = a·x` through the origin.
///
/// # Formula
/// ```text
/// a = mean(x·y) / mean(x·x)
/// ```
///
/// # Errors
/// - [`StatsError::LengthMismatch`] if `x.len() != y.len()`.
/// - [`StatsError::EmptyInput`] / [`StatsError::NonFinite`] for bad samples.
/// - [`StatsError::Domain`] if every `x` is zero.
///
/// # Examples
/// ```
/// use u_stats::fitting::least_squares_slope;
/// let x = [1.0, 2.0, 3.0];
/// let y = [2.0, 4.0, 6.0];
/// assert!((least_squares_slope(&x, &y).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn least_squares_slope(x: &[f64], y: &[f64]) -> Result<f64> {
    check_paired(x, y, "least squares slope")?;
    let xy: Vec<f64> = x.iter().zip(y).map(|(xi, yi)| xi * yi).collect();
    let mean_xy = mean(&xy, MeanKind::Arithmetic)?;
    Ok(mean_xy / mean_square(x, "least squares slope")?)
}

/// Variance of the slope from [`least_squares_slope`] given the
/// measurement uncertainty `sigma`: `σ² / (N·mean(x·x))`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] / [`StatsError::NonFinite`] for bad `x`.
/// - [`StatsError::InvalidParameter`] if `sigma` is not finite.
/// - [`StatsError::Domain`] if every `x` is zero.
pub fn least_squares_slope_variance(x: &[f64], sigma: f64) -> Result<f64> {
    if !sigma.is_finite() {
        return Err(StatsError::InvalidParameter {
            context: "least squares slope variance",
            reason: format!("σ must be finite, got σ={sigma}"),
        });
    }
    let msq = mean_square(x, "least squares slope variance")?;
    Ok(sigma * sigma / (x.len() as f64 * msq))
}

/// Chi-square of observations `y` against model values `fx`:
/// `Σ((yᵢ − f(xᵢ)) / σ)²`.
///
/// # Errors
/// - [`StatsError::LengthMismatch`] if `y.len() != fx.len()`.
/// - [`StatsError::EmptyInput`] / [`StatsError::NonFinite`] for bad samples.
/// - [`StatsError::InvalidParameter`] if `sigma ≤ 0` or is not finite.
/// - [`StatsError::Domain`] if the sum overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::fitting::chi_squared;
/// let chi2 = chi_squared(&[1.0, 2.0, 3.0], &[1.5, 2.0, 2.0], 0.5).unwrap();
/// assert!((chi2 - 5.0).abs() < 1e-12);
/// ```
pub fn chi_squared(y: &[f64], fx: &[f64], sigma: f64) -> Result<f64> {
    check_paired(y, fx, "chi squared")?;
    check_sigma(sigma, "chi squared")?;
    let chi2 = compensated_sum(y.iter().zip(fx).map(|(yi, fi)| {
        let r = (yi - fi) / sigma;
        r * r
    }));
    if !chi2.is_finite() {
        return Err(StatsError::Domain {
            context: "chi squared",
            reason: "result overflows f64".into(),
        });
    }
    Ok(chi2)
}

/// Chi-square per degree of freedom, with `n_params` fitted parameters.
///
/// # Errors
/// As [`chi_squared`], plus [`StatsError::InsufficientData`] when there
/// are no degrees of freedom left (`N ≤ n_params`).
pub fn reduced_chi_squared(y: &[f64], fx: &[f64], sigma: f64, n_params: usize) -> Result<f64> {
    let chi2 = chi_squared(y, fx, sigma)?;
    if y.len() <= n_params {
        return Err(StatsError::InsufficientData {
            context: "reduced chi squared",
            needed: n_params + 1,
            got: y.len(),
        });
    }
    Ok(chi2 / (y.len() - n_params) as f64)
}

fn mean_square(x: &[f64], context: &'static str) -> Result<f64> {
    let xx: Vec<f64> = x.iter().map(|xi| xi * xi).collect();
    let msq = mean(&xx, MeanKind::Arithmetic)?;
    if msq == 0.0 {
        return Err(StatsError::Domain {
            context,
            reason: "all x values are zero".into(),
        });
    }
    Ok(msq)
}

fn check_paired(a: &[f64], b: &[f64], context: &'static str) -> Result<()> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            context,
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(StatsError::EmptyInput { context });
    }
    if !a.iter().chain(b).all(|v| v.is_finite()) {
        return Err(StatsError::NonFinite { context });
    }
    Ok(())
}

fn check_sigma(sigma: f64, context: &'static str) -> Result<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(StatsError::InvalidParameter {
            context,
            reason: format!("σ must be finite and > 0, got σ={sigma}"),
        });
    }
    Ok(())
}
