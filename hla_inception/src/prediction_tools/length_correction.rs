use std::collections::HashMap;

/// Additive per-length offsets that put scores of different peptide lengths on
/// one scale. Lengths without an entry are left uncorrected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LengthCorrectionTable {
    offsets: HashMap<usize, f64>,
}

impl LengthCorrectionTable {
    pub fn new(offsets: HashMap<usize, f64>) -> Self {
        Self { offsets }
    }

    pub fn offset(&self, length: usize) -> f64 {
        self.offsets.get(&length).copied().unwrap_or(0.0)
    }

    pub fn apply(&self, raw_score: f64, length: usize) -> f64 {
        raw_score + self.offset(length)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl FromIterator<(usize, f64)> for LengthCorrectionTable {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lengths_default_to_zero() {
        let table: LengthCorrectionTable = [(8, -0.25), (10, 0.5)].into_iter().collect();
        assert_eq!(table.apply(1.0, 8), 0.75);
        assert_eq!(table.apply(1.0, 9), 1.0);
        assert_eq!(table.apply(1.0, 10), 1.5);
        assert_eq!(LengthCorrectionTable::default().apply(-3.0, 11), -3.0);
    }
}
