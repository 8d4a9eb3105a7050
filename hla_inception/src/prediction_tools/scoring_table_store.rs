use std::collections::HashMap;
use tracing::info;

use crate::errors::{PredError, PredResult};
use crate::prediction_tools::allele_resolver::AlleleSimilarityTable;
use crate::prediction_tools::motif_matrix::PositionScoringMatrix;
use crate::prediction_tools::score_distribution::ScoreDistribution;

/// Matrices and calibration distributions of the reference panel, keyed by
/// reference allele name.
#[derive(Debug, Clone, Default)]
pub struct ScoringTableStore {
    matrices: HashMap<String, PositionScoringMatrix>,
    distributions: HashMap<String, ScoreDistribution>,
}

/// Everything needed to score peptides for one requested allele.
///
/// Built once before scoring starts and only read afterwards, so one value is
/// shared by reference across all worker threads for that allele.
#[derive(Debug, Clone)]
pub struct ResolvedAlleleContext {
    /// Allele as requested; this is what gets reported
    pub allele: String,
    /// Panel allele whose data is used
    pub reference: String,
    pub matrix: PositionScoringMatrix,
    pub distribution: ScoreDistribution,
    /// Length-corrected score a window needs to be reported in protein-scan mode
    pub threshold: f64,
}

impl ScoringTableStore {
    pub fn insert_matrix(&mut self, allele: impl Into<String>, matrix: PositionScoringMatrix) {
        self.matrices.insert(allele.into(), matrix);
    }

    pub fn insert_distribution(
        &mut self,
        allele: impl Into<String>,
        distribution: ScoreDistribution,
    ) {
        self.distributions.insert(allele.into(), distribution);
    }

    pub fn has_matrix(&self, allele: &str) -> bool {
        self.matrices.contains_key(allele)
    }

    pub fn has_distribution(&self, allele: &str) -> bool {
        self.distributions.contains_key(allele)
    }

    pub fn matrix(&self, requested: &str, reference: &str) -> PredResult<&PositionScoringMatrix> {
        self.matrices
            .get(reference)
            .ok_or_else(|| PredError::MissingReferenceData {
                allele: requested.to_string(),
                reference: reference.to_string(),
                table: "position scoring matrix",
            })
    }

    pub fn distribution(&self, requested: &str, reference: &str) -> PredResult<&ScoreDistribution> {
        self.distributions
            .get(reference)
            .ok_or_else(|| PredError::MissingReferenceData {
                allele: requested.to_string(),
                reference: reference.to_string(),
                table: "score distribution",
            })
    }

    /// Resolves `allele` through `similarity` and gathers its scoring data.
    ///
    /// # Arguments
    ///
    /// * `allele` - Allele name as requested by the user
    /// * `similarity` - Requested allele to reference panel allele
    /// * `percentile` - Requested percentile threshold, turned into a score cutoff
    pub fn resolve_context(
        &self,
        allele: &str,
        similarity: &AlleleSimilarityTable,
        percentile: f64,
    ) -> PredResult<ResolvedAlleleContext> {
        let reference = similarity.resolve(allele)?.reference.clone();
        let matrix = self.matrix(allele, &reference)?.clone();
        let distribution = self.distribution(allele, &reference)?.clone();
        let threshold = distribution.threshold_for(percentile);

        Ok(ResolvedAlleleContext {
            allele: allele.to_string(),
            reference,
            matrix,
            distribution,
            threshold,
        })
    }
}

/// Resolves every requested allele up front.
///
/// Fails on the first allele that cannot be served, before any scoring work
/// or output happens.
pub fn resolve_alleles(
    alleles: &[String],
    store: &ScoringTableStore,
    similarity: &AlleleSimilarityTable,
    percentile: f64,
) -> PredResult<Vec<ResolvedAlleleContext>> {
    alleles
        .iter()
        .map(|allele| {
            let ctx = store.resolve_context(allele, similarity, percentile)?;
            info!(
                "Resolved {} to {} (percentile {} gives score cutoff {:.6})",
                ctx.allele, ctx.reference, percentile, ctx.threshold
            );
            Ok(ctx)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ScoringTableStore {
        let mut store = ScoringTableStore::default();
        store.insert_matrix("HLA-A*02:01", PositionScoringMatrix::zeros());
        store.insert_distribution(
            "HLA-A*02:01",
            ScoreDistribution::new(
                "HLA-A*02:01",
                vec![0.0, 1.0, 2.0, 3.0],
                vec![25.0, 50.0, 99.0, 99.9],
            )
            .unwrap(),
        );
        store.insert_matrix("HLA-B*07:02", PositionScoringMatrix::zeros());
        store
    }

    fn similarity() -> AlleleSimilarityTable {
        [
            ("HLA-A*02:01", "HLA-A*02:01", 1.0),
            ("HLA-A*02:07", "HLA-A*02:01", 0.97),
            ("HLA-B*07:02", "HLA-B*07:02", 1.0),
            ("HLA-C*99:01", "HLA-C*99:01", 1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn context_carries_requested_name_and_cutoff() {
        let ctx = store()
            .resolve_context("HLA-A*02:07", &similarity(), 99.0)
            .unwrap();
        assert_eq!(ctx.allele, "HLA-A*02:07");
        assert_eq!(ctx.reference, "HLA-A*02:01");
        assert_eq!(ctx.threshold, 2.0);
    }

    #[test]
    fn missing_tables_are_reported_per_table() {
        match store().resolve_context("HLA-B*07:02", &similarity(), 99.0) {
            Err(PredError::MissingReferenceData { table, reference, .. }) => {
                assert_eq!(table, "score distribution");
                assert_eq!(reference, "HLA-B*07:02");
            }
            other => panic!("unexpected {:?}", other),
        }
        match store().resolve_context("HLA-C*99:01", &similarity(), 99.0) {
            Err(PredError::MissingReferenceData { table, .. }) => {
                assert_eq!(table, "position scoring matrix")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn resolution_stops_at_first_unsupported_allele() {
        let alleles = vec!["HLA-A*02:01".to_string(), "X*01:01".to_string()];
        let err = resolve_alleles(&alleles, &store(), &similarity(), 99.5).unwrap_err();
        assert!(matches!(err, PredError::AlleleNotSupported(ref a) if a == "X*01:01"));

        let ok = resolve_alleles(&alleles[..1], &store(), &similarity(), 99.5).unwrap();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].threshold, 3.0);
    }
}
