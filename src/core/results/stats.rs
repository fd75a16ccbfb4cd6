//! Summary statistics over simulated totals
//!
//! Percentiles follow the inclusive linear-interpolation method (numpy's default
//! `linear` method), so `percentile(&[1, 2, 3, 4, 5], 50.0) == 3.0`.

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SimulationError};

/// Lower percentile of the 95% confidence interval
pub const CI_LOWER_PERCENTILE: f64 = 2.5;
/// Upper percentile of the 95% confidence interval
pub const CI_UPPER_PERCENTILE: f64 = 97.5;

/// A `[lower, upper]` percentile range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

impl std::fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.2}, {:.2}]", self.lower, self.upper)
    }
}

/// Arithmetic mean of `data`
pub fn mean(data: &[f64]) -> Result<f64> {
    if data.is_empty() {
        return Err(SimulationError::invalid("mean of an empty sample"));
    }
    Ok(data.iter().sum::<f64>() / data.len() as f64)
}

/// The `p`-th percentile of `data`, `p` in `[0, 100]`
pub fn percentile(data: &[f64], p: f64) -> Result<f64> {
    let values = percentiles(data, &[p])?;
    Ok(values[0])
}

/// Several percentiles of `data`, sorting it once
pub fn percentiles(data: &[f64], ps: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(SimulationError::invalid("percentile of an empty sample"));
    }
    if let Some(p) = ps.iter().find(|p| !(0.0..=100.0).contains(*p)) {
        return Err(SimulationError::invalid(format!(
            "percentile must be within [0, 100], got {}",
            p
        )));
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(ps.iter().map(|&p| interpolate(&sorted, p)).collect())
}

/// 95% confidence interval, the 2.5th to 97.5th percentile range
pub fn confidence_interval(data: &[f64]) -> Result<ConfidenceInterval> {
    let bounds = percentiles(data, &[CI_LOWER_PERCENTILE, CI_UPPER_PERCENTILE])?;
    Ok(ConfidenceInterval {
        lower: bounds[0],
        upper: bounds[1],
    })
}

fn interpolate(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = last as f64 * (p / 100.0);
    let below = (position.floor() as usize).min(last);
    let above = (below + 1).min(last);
    let t = position - below as f64;
    lerp(sorted[below], sorted[above], t)
}

// Interpolates from the nearer endpoint to keep results monotonic in t
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}
