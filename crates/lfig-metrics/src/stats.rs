use lfig_core::errors::{codes, ErrorInfo, LfigError};
use lfig_core::BoundPolicy;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a non-empty series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Median, interpolated for even lengths.
    pub median: f64,
    /// Population standard deviation (divisor `n`).
    pub std_dev: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Count of values at or above the display floor, for annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierNote {
    /// Floor the values were compared against.
    pub threshold: f64,
    /// Values at or above the threshold.
    pub count: usize,
    /// Series maximum.
    pub max: f64,
}

/// Display range hint for a long-tailed series.
///
/// `upper` and `outliers` are independent outputs: the first only scales an
/// axis, the second only feeds annotation text. Neither drops data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobustBound {
    /// Upper percentile clamped to at least the floor.
    pub upper: f64,
    /// Whether the guard percentile fell below the floor, i.e. whether the
    /// axis should be narrowed to `[0, upper]`.
    pub clamp_axis: bool,
    /// Present only when `clamp_axis` holds.
    pub outliers: Option<OutlierNote>,
}

fn empty_series() -> LfigError {
    LfigError::Stats(ErrorInfo::new(
        codes::EMPTY_SERIES,
        "statistics requested over an empty series",
    ))
}

fn sorted(series: &[f64]) -> Vec<f64> {
    let mut values = series.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

// Linear interpolation between closest ranks, rank = q/100 * (n - 1).
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let rank = q / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn check_percentile(q: f64) -> Result<(), LfigError> {
    if !(0.0..=100.0).contains(&q) {
        return Err(LfigError::Stats(
            ErrorInfo::new(codes::INVALID_PERCENTILE, "percentile must lie in [0, 100]")
                .with_context("q", q.to_string()),
        ));
    }
    Ok(())
}

/// The `q`-th percentile of `series` using linear interpolation.
pub fn percentile(series: &[f64], q: f64) -> Result<f64, LfigError> {
    check_percentile(q)?;
    if series.is_empty() {
        return Err(empty_series());
    }
    Ok(percentile_sorted(&sorted(series), q))
}

/// Mean, median, population standard deviation, min and max.
pub fn summarize(series: &[f64]) -> Result<Summary, LfigError> {
    if series.is_empty() {
        return Err(empty_series());
    }
    let values = sorted(series);
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let variance = values
        .iter()
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / count as f64;
    Ok(Summary {
        count,
        mean,
        median: percentile_sorted(&values, 50.0),
        std_dev: variance.sqrt(),
        min: values[0],
        max: values[count - 1],
    })
}

/// Floor-clamped upper display bound with an optional outlier annotation.
pub fn robust_bound(series: &[f64], policy: &BoundPolicy) -> Result<RobustBound, LfigError> {
    check_percentile(policy.upper_percentile)?;
    check_percentile(policy.guard_percentile)?;
    if series.is_empty() {
        return Err(empty_series());
    }
    let values = sorted(series);
    let upper = percentile_sorted(&values, policy.upper_percentile).max(policy.floor);
    let clamp_axis = percentile_sorted(&values, policy.guard_percentile) < policy.floor;
    let outliers = clamp_axis.then(|| OutlierNote {
        threshold: policy.floor,
        count: values.iter().filter(|value| **value >= policy.floor).count(),
        max: values[values.len() - 1],
    });
    Ok(RobustBound {
        upper,
        clamp_axis,
        outliers,
    })
}
