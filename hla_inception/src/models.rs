use crate::errors::PredResult;
use crate::prediction_tools::scoring_engine::PeptideScore;
use crate::prediction_tools::window_generator::CandidateWindow;

/// Protein id written for every record in peptide mode
pub const PEPTIDE_PROTEIN_PLACEHOLDER: &str = "PEPTIDE";

/// A source of reference or input data read from disk.
pub trait Dataset {
    type Output;

    fn load(&self) -> PredResult<Self::Output>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Scan every window of each protein, keep those above the allele cutoff
    Fasta,
    /// Score each listed peptide as is, report all of them
    Peptide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinSequence {
    pub name: String,
    pub sequence: String,
}

/// Where a reported peptide sits in its protein (protein-scan mode only)
#[derive(Debug, Clone, PartialEq)]
pub struct WindowLocation {
    pub start: usize,
    pub end: usize,
    /// Percentile the run was asked to report above
    pub selected_threshold: f64,
    pub upstream: String,
    pub downstream: String,
}

/// One output line.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRecord {
    pub peptide: String,
    pub length: usize,
    pub allele: String,
    pub protein: String,
    pub location: Option<WindowLocation>,
    pub score: PeptideScore,
}

impl PredictionRecord {
    pub fn from_window(
        window: &CandidateWindow<'_>,
        allele: &str,
        selected_threshold: f64,
        score: PeptideScore,
    ) -> Self {
        Self {
            peptide: window.peptide.to_string(),
            length: window.length,
            allele: allele.to_string(),
            protein: window.protein_id.to_string(),
            location: Some(WindowLocation {
                start: window.start,
                end: window.end,
                selected_threshold,
                upstream: window.upstream.clone(),
                downstream: window.downstream.clone(),
            }),
            score,
        }
    }

    pub fn from_peptide(peptide: &str, allele: &str, score: PeptideScore) -> Self {
        Self {
            peptide: peptide.to_string(),
            length: peptide.len(),
            allele: allele.to_string(),
            protein: PEPTIDE_PROTEIN_PLACEHOLDER.to_string(),
            location: None,
            score,
        }
    }

    /// Output columns in order; reals use six decimals.
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.peptide.clone(),
            self.length.to_string(),
            self.allele.clone(),
            self.protein.clone(),
        ];
        if let Some(loc) = &self.location {
            fields.extend([
                loc.start.to_string(),
                loc.end.to_string(),
                format!("{:.6}", loc.selected_threshold),
                loc.upstream.clone(),
                loc.downstream.clone(),
            ]);
        }
        fields.extend([
            format!("{:.6}", self.score.raw),
            format!("{:.6}", self.score.raw_percentile),
            format!("{:.6}", self.score.corrected),
            format!("{:.6}", self.score.corrected_percentile),
        ]);
        fields
    }
}
