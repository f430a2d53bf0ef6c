//! Probability distribution formulas.
//!
//! The three distributions used in introductory statistics, each as a
//! validated parameter type plus a one-shot free function.
//!
//! | Distribution | Parameters | Mean | Variance |
//! |---|---|---|---|
//! | [`Binomial`] | n, p | np | np(1−p) |
//! | [`Poisson`] | λ | λ | λ |
//! | [`Gaussian`] | μ, σ | μ | σ² |
//!
//! Discrete masses are evaluated in log space via [`special::ln_binomial`]
//! and [`special::ln_factorial`], so large counts do not overflow.

use crate::error::{Result, StatsError};
use crate::special;
use crate::stats::{mean, standard_deviation, MeanKind};

// ============================================================================
// Binomial Distribution
// ============================================================================

/// Number of successes in `n` independent trials with success
/// probability `p`.
///
/// # Mathematical Definition
/// - PMF: P(r) = C(n, r) pʳ (1−p)ⁿ⁻ʳ for r ∈ {0, …, n}
/// - Mean: np
/// - Variance: np(1−p)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    /// Creates a binomial distribution B(n, p).
    ///
    /// # Errors
    /// Returns [`StatsError::InvalidParameter`] if `p` is not in `[0, 1]`.
    pub fn new(n: u64, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::InvalidParameter {
                context: "binomial",
                reason: format!("p must lie in [0, 1], got p={p}"),
            });
        }
        Ok(Self { n, p })
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    /// Probability of exactly `r` successes; 0 when `r > n`.
    pub fn pmf(&self, r: u64) -> f64 {
        if r > self.n {
            return 0.0;
        }
        // 0⁰ = 1 at the degenerate endpoints.
        if self.p == 0.0 {
            return if r == 0 { 1.0 } else { 0.0 };
        }
        if self.p == 1.0 {
            return if r == self.n { 1.0 } else { 0.0 };
        }
        let ln_pmf = special::ln_binomial(self.n, r)
            + r as f64 * self.p.ln()
            + (self.n - r) as f64 * (1.0 - self.p).ln();
        ln_pmf.exp()
    }
}

/// Binomial probability of `r` successes in `n` trials.
///
/// # Examples
/// ```
/// use u_stats::distributions::binomial_pmf;
/// // C(10, 3) / 2¹⁰
/// assert!((binomial_pmf(3, 0.5, 10).unwrap() - 0.1171875).abs() < 1e-12);
/// ```
pub fn binomial_pmf(r: u64, p: f64, n: u64) -> Result<f64> {
    Ok(Binomial::new(n, p)?.pmf(r))
}

// ============================================================================
// Poisson Distribution
// ============================================================================

/// Number of events in a fixed interval at average rate λ.
///
/// # Mathematical Definition
/// - PMF: P(r) = e^{−λ} λʳ / r!
/// - Mean: λ
/// - Variance: λ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Poisson {
    lambda: f64,
}

impl Poisson {
    /// Creates a Poisson distribution with rate `lambda`.
    ///
    /// # Errors
    /// Returns [`StatsError::InvalidParameter`] if `lambda` is negative or
    /// not finite.
    pub fn new(lambda: f64) -> Result<Self> {
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(StatsError::InvalidParameter {
                context: "poisson",
                reason: format!("λ must be finite and ≥ 0, got λ={lambda}"),
            });
        }
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn mean(&self) -> f64 {
        self.lambda
    }

    pub fn variance(&self) -> f64 {
        self.lambda
    }

    /// Probability of exactly `r` events.
    pub fn pmf(&self, r: u64) -> f64 {
        if self.lambda == 0.0 {
            return if r == 0 { 1.0 } else { 0.0 };
        }
        (-self.lambda + r as f64 * self.lambda.ln() - special::ln_factorial(r)).exp()
    }
}

/// Poisson probability of `r` events at rate `lambda`.
///
/// # Examples
/// ```
/// use u_stats::distributions::poisson_pmf;
/// // e⁻² · 2³ / 3!
/// assert!((poisson_pmf(3, 2.0).unwrap() - 0.1804470443154836).abs() < 1e-12);
/// ```
pub fn poisson_pmf(r: u64, lambda: f64) -> Result<f64> {
    Ok(Poisson::new(lambda)?.pmf(r))
}

// ============================================================================
// Gaussian Distribution
// ============================================================================

/// Normal distribution N(μ, σ²).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
}

impl Gaussian {
    /// Creates a Gaussian N(μ, σ²).
    ///
    /// # Errors
    /// Returns [`StatsError::InvalidParameter`] if `sigma ≤ 0` or either
    /// parameter is not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self> {
        if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
            return Err(StatsError::InvalidParameter {
                context: "gaussian",
                reason: format!("requires finite μ and σ > 0, got μ={mu}, σ={sigma}"),
            });
        }
        Ok(Self { mu, sigma })
    }

    /// Gaussian with the sample's arithmetic mean and population standard
    /// deviation.
    ///
    /// # Errors
    /// Propagates sample errors from [`mean`] and [`standard_deviation`];
    /// a constant sample has σ = 0 and is rejected by [`Gaussian::new`].
    pub fn fit(data: &[f64]) -> Result<Self> {
        let mu = mean(data, MeanKind::Arithmetic)?;
        let sigma = standard_deviation(data, Some(mu))?;
        Self::new(mu, sigma)
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn mean(&self) -> f64 {
        self.mu
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    /// PDF: (1/(σ√(2π))) exp(−(x−μ)²/(2σ²)).
    pub fn pdf(&self, x: f64) -> f64 {
        let z = (x - self.mu) / self.sigma;
        special::standard_normal_pdf(z) / self.sigma
    }
}

/// Gaussian density at `x` for mean `mu` and standard deviation `sigma`.
///
/// # Examples
/// ```
/// use u_stats::distributions::gaussian_pdf;
/// let peak = gaussian_pdf(0.0, 0.0, 1.0).unwrap();
/// assert!((peak - 0.3989422804014327).abs() < 1e-15);
/// ```
pub fn gaussian_pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    Ok(Gaussian::new(mu, sigma)?.pdf(x))
}
