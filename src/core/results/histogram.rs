use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, SimulationError};

/// Bin count used for cost and duration histograms
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Equal-width histogram spanning the observed range of a sample
///
/// Bins are half-open `[edge_i, edge_i+1)` except the last, which also holds the
/// maximum. A sample whose values are all equal to `v` spans `[v - 0.5, v + 0.5]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
}

impl Histogram {
    pub fn from_samples(data: &[f64], bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(SimulationError::invalid("histogram needs at least one bin"));
        }
        if data.is_empty() {
            return Err(SimulationError::invalid("histogram of an empty sample"));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::invalid("histogram sample contains non-finite values"));
        }

        let (mut low, mut high) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if low == high {
            low -= 0.5;
            high += 0.5;
        }

        if !(high - low).is_finite() {
            return Err(SimulationError::invalid("histogram sample range overflows"));
        }

        let width = (high - low) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { high } else { low + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &value in data {
            counts[bin_index(&edges, value)] += 1;
        }

        Ok(Self { edges, counts })
    }

    /// `bin_count() + 1` bin boundaries, ascending
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn bin_count(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterate over `(lower_edge, upper_edge, count)` triples
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

fn bin_index(edges: &[f64], value: f64) -> usize {
    let bins = edges.len() - 1;
    let low = edges[0];
    let high = edges[bins];
    let estimate = ((value - low) / (high - low) * bins as f64) as usize;
    let mut index = estimate.min(bins - 1);
    // Rounding in the estimate can land one bin off the edge comparison
    if index > 0 && value < edges[index] {
        index -= 1;
    } else if index + 1 < bins && value >= edges[index + 1] {
        index += 1;
    }
    index
}
