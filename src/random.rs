//! Random sampling and central-limit-theorem resampling.
//!
//! Provides seeded RNG construction, sampling without replacement, and
//! the repeated-draw procedure used to illustrate the central limit
//! theorem empirically.
//!
//! # Reproducibility
//!
//! [`clt_resample`] draws from the thread-local RNG and is not
//! reproducible. Pass a seeded generator from [`create_rng`] to
//! [`clt_resample_with`], or set [`ResampleConfig::seed`], for
//! deterministic runs.

use log::{debug, warn};
use rand::Rng;

use crate::error::{Result, StatsError};
use crate::stats::compensated_sum;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` (Xoshiro256++). The sequence is deterministic for a
/// given seed on the same platform.
///
/// # Examples
/// ```
/// use u_stats::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws `k` elements of `source` uniformly at random without
/// replacement.
///
/// # Algorithm
/// Partial Fisher-Yates (Durstenfeld) over an index permutation: only
/// the first `k` positions are shuffled, so every `k`-subset is equally
/// likely and the cost is O(n) setup plus O(k) draws.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Errors
/// [`StatsError::OversizedSample`] if `k > source.len()`.
///
/// # Examples
/// ```
/// use u_stats::random::{create_rng, sample_without_replacement};
/// let mut rng = create_rng(7);
/// let mut drawn = sample_without_replacement(&[1, 2, 3, 4, 5], 3, &mut rng).unwrap();
/// drawn.sort();
/// drawn.dedup();
/// assert_eq!(drawn.len(), 3);
/// ```
pub fn sample_without_replacement<T: Clone, R: Rng>(
    source: &[T],
    k: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    check_draw_size(source.len(), k)?;
    let mut indices: Vec<usize> = (0..source.len()).collect();
    partial_shuffle(&mut indices, k, rng);
    Ok(indices[..k].iter().map(|&i| source[i].clone()).collect())
}

/// Shuffles the first `k` positions of `indices` into a uniform random
/// `k`-subset. Works on any starting permutation, so the buffer can be
/// reused across draws.
fn partial_shuffle<R: Rng>(indices: &mut [usize], k: usize, rng: &mut R) {
    let n = indices.len();
    for i in 0..k.min(n) {
        let j = rng.random_range(i..n);
        indices.swap(i, j);
    }
}

fn check_draw_size(available: usize, requested: usize) -> Result<()> {
    if requested > available {
        return Err(StatsError::OversizedSample {
            requested,
            available,
        });
    }
    Ok(())
}

// ============================================================================
// Central-limit-theorem resampling
// ============================================================================

/// Summary recorded for each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResampleStatistic {
    /// Sum of the drawn values.
    #[default]
    Sum,
    /// Arithmetic mean of the drawn values.
    Mean,
}

/// Parameters of a resampling run.
///
/// # Examples
/// ```
/// use u_stats::random::{resample, ResampleConfig, ResampleStatistic};
/// let config = ResampleConfig::new(2, 50)
///     .with_seed(11)
///     .with_statistic(ResampleStatistic::Mean);
/// let means = resample(&[1.0, 2.0, 3.0, 4.0], &config).unwrap();
/// assert_eq!(means.len(), 50);
/// assert!(means.iter().all(|&m| (1.5..=3.5).contains(&m)));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResampleConfig {
    /// Size of each draw.
    pub n_samples: usize,
    /// Number of independent draws.
    pub n_times: usize,
    /// Summary recorded per draw.
    #[cfg_attr(feature = "serde", serde(default))]
    pub statistic: ResampleStatistic,
    /// Seed for a reproducible run; `None` uses the thread-local RNG.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
}

impl ResampleConfig {
    /// Config recording the sum of each draw, unseeded.
    pub fn new(n_samples: usize, n_times: usize) -> Self {
        Self {
            n_samples,
            n_times,
            statistic: ResampleStatistic::Sum,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_statistic(mut self, statistic: ResampleStatistic) -> Self {
        self.statistic = statistic;
        self
    }
}

/// Draws `n_samples` values without replacement from `source`,
/// `n_times` independently, and returns the **sum** of each draw.
///
/// Sums (not means) are recorded; use [`resample`] with
/// [`ResampleStatistic::Mean`] for per-draw means.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `source` is empty.
/// - [`StatsError::NonFinite`] if `source` contains NaN or ±∞.
/// - [`StatsError::OversizedSample`] if `n_samples > source.len()`.
/// - [`StatsError::Domain`] if a draw's sum overflows `f64`.
///
/// # Examples
/// ```
/// use u_stats::random::clt_resample;
/// let sums = clt_resample(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, 100).unwrap();
/// assert_eq!(sums.len(), 100);
/// assert!(sums.iter().all(|&s| (6.0..=12.0).contains(&s)));
/// ```
pub fn clt_resample(source: &[f64], n_samples: usize, n_times: usize) -> Result<Vec<f64>> {
    clt_resample_with(source, n_samples, n_times, &mut rand::rng())
}

/// [`clt_resample`] with a caller-supplied random number generator.
pub fn clt_resample_with<R: Rng>(
    source: &[f64],
    n_samples: usize,
    n_times: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    draw_repeatedly(source, n_samples, n_times, ResampleStatistic::Sum, rng)
}

/// Config-driven resampling.
///
/// Seeds a `SmallRng` when [`ResampleConfig::seed`] is set, otherwise
/// draws from the thread-local RNG.
///
/// # Errors
/// As [`clt_resample`], plus [`StatsError::InvalidParameter`] when the
/// mean of an empty draw is requested.
pub fn resample(source: &[f64], config: &ResampleConfig) -> Result<Vec<f64>> {
    match config.seed {
        Some(seed) => draw_repeatedly(
            source,
            config.n_samples,
            config.n_times,
            config.statistic,
            &mut create_rng(seed),
        ),
        None => draw_repeatedly(
            source,
            config.n_samples,
            config.n_times,
            config.statistic,
            &mut rand::rng(),
        ),
    }
}

fn draw_repeatedly<R: Rng>(
    source: &[f64],
    n_samples: usize,
    n_times: usize,
    statistic: ResampleStatistic,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if source.is_empty() {
        return Err(StatsError::EmptyInput {
            context: "clt resample",
        });
    }
    if !source.iter().all(|x| x.is_finite()) {
        return Err(StatsError::NonFinite {
            context: "clt resample",
        });
    }
    check_draw_size(source.len(), n_samples)?;
    if n_samples == 0 && statistic == ResampleStatistic::Mean {
        return Err(StatsError::InvalidParameter {
            context: "clt resample",
            reason: "mean of an empty draw is undefined".into(),
        });
    }

    debug!(
        "resampling {} draws of {} from {} values ({:?})",
        n_times,
        n_samples,
        source.len(),
        statistic
    );
    if n_samples == 0 {
        warn!("clt resample with n_samples = 0; every draw sums to zero");
    } else if n_samples == source.len() {
        debug!("draw size equals population size; every draw has the same sum");
    }

    let mut indices: Vec<usize> = (0..source.len()).collect();
    let mut results = Vec::with_capacity(n_times);
    for _ in 0..n_times {
        partial_shuffle(&mut indices, n_samples, rng);
        let sum = compensated_sum(indices[..n_samples].iter().map(|&i| source[i]));
        if !sum.is_finite() {
            return Err(StatsError::Domain {
                context: "clt resample",
                reason: "draw sum overflows f64".into(),
            });
        }
        results.push(match statistic {
            ResampleStatistic::Sum => sum,
            ResampleStatistic::Mean => sum / n_samples as f64,
        });
    }
    Ok(results)
}

// ============================================================================
// Tests
// ============================================================================
