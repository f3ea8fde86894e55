//! Fitness summaries.

use crate::container::cmp_fitness_desc;
use serde::{Deserialize, Serialize};

/// Aggregate fitness of one generation.
///
/// `best` follows the same ranking as [`crate::Population::best`]: NaN only
/// wins when every value is NaN. `stdev` is the square root of the population
/// variance (divisor N, not N-1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub best: f64,
    pub average: f64,
    pub stdev: f64,
}

impl FitnessStats {
    /// Summarizes a slice of fitness values, or `None` when it is empty.
    ///
    /// Uses two passes (mean first, then squared deviations) which keeps the
    /// variance non-negative and accurate for values with a large common offset.
    pub fn from_fitnesses(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let best = values
            .iter()
            .copied()
            .min_by(|a, b| cmp_fitness_desc(*a, *b))?;
        let average = values.iter().sum::<f64>() / n;
        let variance = values
            .iter()
            .map(|v| {
                let d = v - average;
                d * d
            })
            .sum::<f64>()
            / n;
        Some(Self {
            best,
            average,
            stdev: variance.sqrt(),
        })
    }
}

/// What happened in one generation of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// 1-based index of the generation this report closes.
    pub generation: usize,
    pub stats: FitnessStats,
    /// Number of fitness evaluations spent since the previous report.
    pub evaluations: usize,
}
