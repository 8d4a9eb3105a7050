use std::collections::HashMap;
use tracing::{info, warn};

use crate::errors::{PredError, PredResult};

/// Similarity under which a substituted reference allele is reported as a weak match
pub const POOR_MATCH_SIMILARITY: f64 = 0.5;

/// Best reference allele for one requested allele
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleMatch {
    pub reference: String,
    pub similarity: f64,
}

/// Maps a requested allele to the nearest allele of the calibrated reference panel.
///
/// Calibration data only exists for a finite panel, so every request is
/// served through this table, including alleles that map onto themselves.
#[derive(Debug, Clone, Default)]
pub struct AlleleSimilarityTable {
    entries: HashMap<String, AlleleMatch>,
}

impl AlleleSimilarityTable {
    /// Adds a row. The first row seen for an allele wins.
    pub fn insert(
        &mut self,
        allele: impl Into<String>,
        reference: impl Into<String>,
        similarity: f64,
    ) {
        self.entries.entry(allele.into()).or_insert(AlleleMatch {
            reference: reference.into(),
            similarity,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks up the reference allele to score `allele` with.
    ///
    /// A similarity below [`POOR_MATCH_SIMILARITY`] is logged as a warning and
    /// the match is used anyway.
    ///
    /// # Errors
    ///
    /// * [`PredError::AlleleNotSupported`] when `allele` has no row
    pub fn resolve(&self, allele: &str) -> PredResult<&AlleleMatch> {
        let found = self
            .entries
            .get(allele)
            .ok_or_else(|| PredError::AlleleNotSupported(allele.to_string()))?;

        info!(
            "Best match allele for {}: {} (similarity {:.3})",
            allele, found.reference, found.similarity
        );
        if found.similarity < POOR_MATCH_SIMILARITY {
            warn!(
                "Best match for {} has similarity {:.3} < {}, which can indicate a poor \
                 alignment; proceed with caution",
                allele, found.similarity, POOR_MATCH_SIMILARITY
            );
        }
        Ok(found)
    }
}

impl<A: Into<String>, R: Into<String>> FromIterator<(A, R, f64)> for AlleleSimilarityTable {
    fn from_iter<I: IntoIterator<Item = (A, R, f64)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (allele, reference, similarity) in iter {
            table.insert(allele, reference, similarity);
        }
        table
    }
}
