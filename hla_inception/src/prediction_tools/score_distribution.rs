//! Empirical score-to-percentile tables and the lookups built on them.
//!
//! Both directions are step functions over the tabulated entries. Nothing is
//! interpolated, so the same calibration data always yields the same
//! thresholds and percentiles.

use crate::errors::{PredError, PredResult};

/// Entries per allele in the shipped calibration tables
pub const DISTRIBUTION_LEN: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreDistribution {
    scores: Vec<f64>,
    percentiles: Vec<f64>,
}

impl ScoreDistribution {
    /// Builds a distribution after checking its shape.
    ///
    /// # Errors
    ///
    /// * Columns of different lengths, or no entries at all
    /// * Scores or percentiles that decrease anywhere (NaN counts as a decrease)
    pub fn new(allele: &str, scores: Vec<f64>, percentiles: Vec<f64>) -> PredResult<Self> {
        if scores.is_empty() {
            return Err(PredError::malformed_reference(allele, "score distribution is empty"));
        }
        if scores.len() != percentiles.len() {
            return Err(PredError::malformed_reference(
                allele,
                format!(
                    "distribution has {} scores but {} percentiles",
                    scores.len(),
                    percentiles.len()
                ),
            ));
        }
        if let Some(i) = first_decrease(&scores) {
            return Err(PredError::malformed_reference(
                allele,
                format!("distribution scores are not ascending at entry {}", i + 1),
            ));
        }
        if let Some(i) = first_decrease(&percentiles) {
            return Err(PredError::malformed_reference(
                allele,
                format!("distribution percentiles decrease at entry {}", i + 1),
            ));
        }
        Ok(Self { scores, percentiles })
    }

    pub fn highest_score(&self) -> f64 {
        self.scores[self.scores.len() - 1]
    }

    /// Score cutoff for a requested percentile.
    ///
    /// The score of the first entry whose percentile reaches `percentile`; the
    /// highest tabulated score when no entry does.
    pub fn threshold_for(&self, percentile: f64) -> f64 {
        self.percentiles
            .iter()
            .position(|&p| p >= percentile)
            .map(|i| self.scores[i])
            .unwrap_or_else(|| self.highest_score())
    }

    /// Percentile rank of `score`: the percentile of the last entry whose score
    /// does not exceed it.
    ///
    /// A score past the top of the table gets the final percentile. A score
    /// below every entry ranks at 0.0.
    pub fn percentile_of(&self, score: f64) -> f64 {
        let idx = self.scores.partition_point(|&s| s <= score);
        if idx == 0 {
            0.0
        } else {
            self.percentiles[idx - 1]
        }
    }
}

fn first_decrease(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|w| !(w[0] <= w[1]))
        .map(|i| i + 1)
}
