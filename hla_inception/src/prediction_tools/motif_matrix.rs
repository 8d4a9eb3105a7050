use crate::prediction_tools::amino_acids::{classify, Residue, STANDARD_AMINO_ACIDS};

/// Number of positions in the binding-groove motif
pub const MOTIF_LEN: usize = 9;

pub const ALPHABET_LEN: usize = STANDARD_AMINO_ACIDS.len();

/// Log-odds weights for one allele, `weights[position][residue]`.
///
/// Residue order is [`STANDARD_AMINO_ACIDS`]. There is no slot for the
/// non-standard codes; [`PositionScoringMatrix::weight`] answers 0.0 for them.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionScoringMatrix {
    weights: [[f64; ALPHABET_LEN]; MOTIF_LEN],
}

impl PositionScoringMatrix {
    pub fn new(weights: [[f64; ALPHABET_LEN]; MOTIF_LEN]) -> Self {
        Self { weights }
    }

    #[cfg(test)]
    pub fn zeros() -> Self {
        Self::new([[0.0; ALPHABET_LEN]; MOTIF_LEN])
    }

    /// Contribution of residue `aa` at motif `position` (0-based).
    ///
    /// # Panics
    ///
    /// On a residue that is neither standard nor a known non-standard code.
    /// Sequences are validated on load, so reaching this is a bug upstream.
    pub fn weight(&self, position: usize, aa: u8) -> f64 {
        match classify(aa) {
            Some(Residue::Standard(idx)) => self.weights[position][idx],
            Some(Residue::NonStandard) => 0.0,
            None => panic!(
                "residue '{}' has no weight at motif position {}",
                aa as char,
                position + 1
            ),
        }
    }

    #[cfg(test)]
    pub fn position(&self, position: usize) -> &[f64; ALPHABET_LEN] {
        &self.weights[position]
    }

    #[cfg(test)]
    pub fn set_weight(&mut self, position: usize, residue_idx: usize, value: f64) {
        self.weights[position][residue_idx] = value;
    }
}
