//! Query inputs: protein FASTA files and flat peptide lists.

use std::io::BufRead;
use std::path::PathBuf;

use tracing::info;

use crate::errors::{PredError, PredResult};
use crate::helper_functions::open_input;
use crate::models::{Dataset, ProteinSequence};
use crate::prediction_tools::amino_acids::validate_sequence;

pub struct FastaFile {
    pub path: PathBuf,
}

/// One peptide per line
pub struct PeptideList {
    pub path: PathBuf,
}

impl Dataset for FastaFile {
    type Output = Vec<ProteinSequence>;

    fn load(&self) -> PredResult<Vec<ProteinSequence>> {
        info!("Reading proteins from {}", self.path.display());
        let reader = open_input(&self.path, "fasta")?;
        let mut proteins: Vec<ProteinSequence> = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PredError::io(&self.path, e))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(header) = line.strip_prefix('>') {
                proteins.push(ProteinSequence {
                    name: header.trim().to_string(),
                    sequence: String::new(),
                });
                continue;
            }
            let current = proteins.last_mut().ok_or_else(|| PredError::MalformedTable {
                path: self.path.clone(),
                line: idx as u64 + 1,
                message: "sequence data before the first '>' header".to_string(),
            })?;
            current
                .sequence
                .extend(
                    line.chars()
                        .filter(|c| !c.is_whitespace())
                        .map(|c| c.to_ascii_uppercase()),
                );
        }

        for protein in &proteins {
            validate_sequence(&protein.name, &protein.sequence)?;
        }

        info!("Loaded {} proteins", proteins.len());
        Ok(proteins)
    }
}

impl Dataset for PeptideList {
    type Output = Vec<String>;

    fn load(&self) -> PredResult<Vec<String>> {
        info!("Reading peptides from {}", self.path.display());
        let reader = open_input(&self.path, "peptide")?;
        let mut peptides = Vec::new();

        for line in reader.lines() {
            let line = line.map_err(|e| PredError::io(&self.path, e))?;
            let peptide = line.trim().to_ascii_uppercase();
            if peptide.is_empty() {
                continue;
            }
            validate_sequence(&peptide, &peptide)?;
            peptides.push(peptide);
        }

        info!("Loaded {} peptides", peptides.len());
        Ok(peptides)
    }
}
