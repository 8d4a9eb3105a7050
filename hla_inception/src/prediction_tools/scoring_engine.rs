//! Peptide scoring against a 9-position groove motif.
//!
//! Peptides that are not 9 residues long are folded onto the nine positions
//! with a fixed anchor policy instead of an alignment search:
//!
//! | length | positions scored directly | position 9 (C-terminal anchor) |
//! |--------|---------------------------|--------------------------------|
//! | < 9    | 1-7                       | last residue                   |
//! | 9      | 1-9                       | residue 9                      |
//! | > 9    | 1-8                       | last residue                   |
//!
//! For short peptides position 8 is an empty groove slot and never
//! contributes. For long peptides the residues between 8 and the last one
//! bulge out of the groove and are not scored. This is the fast variant and
//! does not reproduce the published per-length method.

use crate::prediction_tools::length_correction::LengthCorrectionTable;
use crate::prediction_tools::motif_matrix::{PositionScoringMatrix, MOTIF_LEN};
use crate::prediction_tools::score_distribution::ScoreDistribution;
use crate::prediction_tools::scoring_table_store::ResolvedAlleleContext;

const ANCHOR_POSITION: usize = MOTIF_LEN - 1;

/// Raw score of `peptide` (upper-case, validated residues) against `matrix`.
pub fn score_peptide(peptide: &[u8], matrix: &PositionScoringMatrix) -> f64 {
    let Some(&last) = peptide.last() else {
        return 0.0;
    };

    let leading = if peptide.len() < MOTIF_LEN {
        MOTIF_LEN - 2
    } else {
        MOTIF_LEN - 1
    };

    let groove: f64 = peptide
        .iter()
        .take(leading)
        .enumerate()
        .map(|(pos, &aa)| matrix.weight(pos, aa))
        .sum();

    groove + matrix.weight(ANCHOR_POSITION, last)
}

/// Raw and length-corrected scores of one peptide, with their percentile ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeptideScore {
    pub raw: f64,
    pub raw_percentile: f64,
    pub corrected: f64,
    pub corrected_percentile: f64,
}

impl PeptideScore {
    pub fn ranked(raw: f64, corrected: f64, distribution: &ScoreDistribution) -> Self {
        Self {
            raw,
            raw_percentile: distribution.percentile_of(raw),
            corrected,
            corrected_percentile: distribution.percentile_of(corrected),
        }
    }
}

/// Scores `peptide` for one resolved allele and ranks both scores against
/// that allele's distribution.
pub fn evaluate_peptide(
    peptide: &str,
    context: &ResolvedAlleleContext,
    corrections: &LengthCorrectionTable,
) -> PeptideScore {
    let raw = score_peptide(peptide.as_bytes(), &context.matrix);
    let corrected = corrections.apply(raw, peptide.len());
    PeptideScore::ranked(raw, corrected, &context.distribution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction_tools::amino_acids::residue_index;
    use crate::prediction_tools::motif_matrix::ALPHABET_LEN;

    /// Every weight distinct: position p, residue r maps to (p + 1) * 100 + r
    fn indexed_matrix() -> PositionScoringMatrix {
        let mut weights = [[0.0; ALPHABET_LEN]; MOTIF_LEN];
        for (p, row) in weights.iter_mut().enumerate() {
            for (r, w) in row.iter_mut().enumerate() {
                *w = ((p + 1) * 100 + r) as f64;
            }
        }
        PositionScoringMatrix::new(weights)
    }

    fn expected(matrix: &PositionScoringMatrix, picks: &[(usize, u8)]) -> f64 {
        picks
            .iter()
            .map(|&(pos, aa)| matrix.position(pos)[residue_index(aa).unwrap()])
            .sum()
    }

    #[test]
    fn nonamer_sums_all_nine_positions() {
        let m = indexed_matrix();
        let pep = b"SIINFEKLV";
        let picks: Vec<(usize, u8)> = pep.iter().copied().enumerate().collect();
        assert_eq!(score_peptide(pep, &m), expected(&m, &picks));
    }

    #[test]
    fn short_peptide_skips_position_eight() {
        let m = indexed_matrix();
        let pep = b"SIINFEKL";
        let mut picks: Vec<(usize, u8)> = pep[..7].iter().copied().enumerate().collect();
        picks.push((8, b'L'));
        assert_eq!(score_peptide(pep, &m), expected(&m, &picks));
    }

    #[test]
    fn long_peptide_scores_eight_then_last() {
        let m = indexed_matrix();
        let pep = b"SIINFEKLAGW";
        let mut picks: Vec<(usize, u8)> = pep[..8].iter().copied().enumerate().collect();
        picks.push((8, b'W'));
        assert_eq!(score_peptide(pep, &m), expected(&m, &picks));
    }

    #[test]
    fn position_eight_only_matters_from_nine_residues() {
        let base = indexed_matrix();
        let mut perturbed = base.clone();
        for r in 0..ALPHABET_LEN {
            perturbed.set_weight(7, r, 1000.0);
        }
        for pep in ["SIINFEKL", "AAAAAAAA", "GILGFVF"] {
            let pep = pep.as_bytes();
            assert_eq!(score_peptide(pep, &base), score_peptide(pep, &perturbed));
        }
        for pep in ["GILGFVFTL", "SIINFEKLAGW", "NLVPMVATVQ"] {
            let pep = pep.as_bytes();
            assert_ne!(score_peptide(pep, &base), score_peptide(pep, &perturbed));
        }
    }

    #[test]
    fn non_standard_residues_are_interchangeable() {
        let m = indexed_matrix();
        for template in ["SIINFEKL", "GILGFVFTL", "NLVPMVATVQ"] {
            let scored: Vec<usize> = match template.len() {
                8 => vec![0, 3, 6, 7],
                9 => vec![0, 4, 7, 8],
                _ => vec![0, 5, 7, 9],
            };
            for idx in scored {
                let scores: Vec<f64> = b"XJOBZU"
                    .iter()
                    .map(|&code| {
                        let mut pep = template.as_bytes().to_vec();
                        pep[idx] = code;
                        score_peptide(&pep, &m)
                    })
                    .collect();
                assert!(scores.windows(2).all(|w| w[0] == w[1]), "{} @ {}", template, idx);
            }
        }
    }

    #[test]
    fn non_standard_residue_contributes_nothing() {
        let m = indexed_matrix();
        let with_x = score_peptide(b"XIINFEKLV", &m);
        let full = score_peptide(b"SIINFEKLV", &m);
        assert_eq!(full - with_x, m.position(0)[residue_index(b'S').unwrap()]);
    }

    #[test]
    fn evaluation_applies_length_offset() {
        let context = ResolvedAlleleContext {
            allele: "HLA-A*02:01".to_string(),
            reference: "HLA-A*02:01".to_string(),
            matrix: PositionScoringMatrix::zeros(),
            distribution: ScoreDistribution::new(
                "HLA-A*02:01",
                vec![-1.0, 0.0, 1.0],
                vec![5.0, 50.0, 95.0],
            )
            .unwrap(),
            threshold: 1.0,
        };
        let corrections: LengthCorrectionTable = [(10, 1.0)].into_iter().collect();

        let nine = evaluate_peptide("GILGFVFTL", &context, &corrections);
        assert_eq!((nine.raw, nine.corrected), (0.0, 0.0));
        assert_eq!(nine.raw_percentile, 50.0);

        let ten = evaluate_peptide("NLVPMVATVQ", &context, &corrections);
        assert_eq!((ten.raw, ten.corrected), (0.0, 1.0));
        assert_eq!(ten.corrected_percentile, 95.0);
    }
}
