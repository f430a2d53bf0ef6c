//! # u-stats
//!
//! Descriptive statistics, resampling, and distribution formulas for
//! teaching introductory statistics.
//!
//! Every operation is a pure function over an in-memory sample that
//! validates its input and returns a [`Result`]. The only external
//! resource is the random number generator used for resampling.
//!
//! ## Modules
//!
//! - [`stats`] — Mean variants, covariance matrix, standard deviations
//!   and standard errors
//! - [`random`] — Sampling without replacement and central-limit-theorem
//!   resampling
//! - [`distributions`] — Binomial, Poisson and Gaussian formulas
//! - [`fitting`] — Least-squares slope and chi-square helpers
//! - [`special`] — Log-gamma and log-factorial
//! - [`error`] — [`StatsError`] taxonomy
//!
//! ## Design Philosophy
//!
//! - **Fail fast**: empty samples, mismatched lengths and out-of-domain
//!   values are errors, never NaN results
//! - **Numerical stability**: Neumaier summation for every mean, log-space
//!   evaluation for factorials
//! - **Property-based testing**: Mathematical invariants verified via proptest

pub mod distributions;
pub mod error;
pub mod fitting;
pub mod random;
pub mod special;
pub mod stats;

pub use error::{Result, StatsError};
pub use stats::{
    covariance_matrix, mean, sample_standard_deviation, standard_deviation, std_of_mean,
    std_of_std_known_mean, std_of_std_unknown_mean, CovarianceMatrix, MeanKind,
};
pub use random::{clt_resample, clt_resample_with, resample, ResampleConfig, ResampleStatistic};
