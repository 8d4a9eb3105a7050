//! Tab-separated reference tables: allele alignments and length weights.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::errors::{PredError, PredResult};
use crate::helper_functions::{read_tsv, record_line};
use crate::models::Dataset;
use crate::prediction_tools::allele_resolver::AlleleSimilarityTable;
use crate::prediction_tools::length_correction::LengthCorrectionTable;

/// `AlleleAlignments.txt`: allele, best reference allele, similarity
pub struct AlleleAlignments {
    pub path: PathBuf,
}

/// Length-correction weights: peptide length, additive offset
pub struct LengthWeights {
    pub path: PathBuf,
}

impl Dataset for AlleleAlignments {
    type Output = AlleleSimilarityTable;

    fn load(&self) -> PredResult<AlleleSimilarityTable> {
        info!("Reading allele alignments from {}", self.path.display());
        let mut reader = read_tsv(&self.path, "allele alignment")?;
        let mut table = AlleleSimilarityTable::default();

        for row in reader.records() {
            let row = row.map_err(|e| csv_error(&self.path, e))?;
            let line = record_line(&row);
            if row.len() < 3 {
                return Err(malformed(
                    &self.path,
                    line,
                    format!("expected 3 columns, found {}", row.len()),
                ));
            }
            let similarity = parse_f64(&self.path, line, &row[2])?;
            table.insert(&row[0], &row[1], similarity);
        }

        info!("Loaded {} allele alignments", table.len());
        Ok(table)
    }
}

impl Dataset for LengthWeights {
    type Output = LengthCorrectionTable;

    fn load(&self) -> PredResult<LengthCorrectionTable> {
        info!("Reading length weights from {}", self.path.display());
        let mut reader = read_tsv(&self.path, "length weight")?;
        let mut offsets = HashMap::new();

        for row in reader.records() {
            let row = row.map_err(|e| csv_error(&self.path, e))?;
            let line = record_line(&row);
            if row.len() < 2 {
                return Err(malformed(
                    &self.path,
                    line,
                    format!("expected 2 columns, found {}", row.len()),
                ));
            }
            let length: usize = row[0].parse().map_err(|_| {
                malformed(&self.path, line, format!("'{}' is not a peptide length", &row[0]))
            })?;
            offsets.insert(length, parse_f64(&self.path, line, &row[1])?);
        }

        let table = LengthCorrectionTable::new(offsets);
        info!("Loaded {} length weights", table.len());
        Ok(table)
    }
}

fn parse_f64(path: &Path, line: u64, field: &str) -> PredResult<f64> {
    field.parse().map_err(|_| {
        error!("Unparsable number '{}' in {} line {}", field, path.display(), line);
        malformed(path, line, format!("'{}' is not a number", field))
    })
}

fn malformed(path: &Path, line: u64, message: String) -> PredError {
    PredError::MalformedTable {
        path: path.to_path_buf(),
        line,
        message,
    }
}

fn csv_error(path: &Path, e: csv::Error) -> PredError {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    malformed(path, line, e.to_string())
}
