use std::path::PathBuf;

use tracing::{info, warn};

use crate::cli::Args;
use crate::errors::{PredError, PredResult};
use crate::helper_functions::default_data_dir;
use crate::models::InputMode;

pub const MIN_PEPTIDE_LEN: usize = 8;
pub const MAX_PEPTIDE_LEN: usize = 15;

pub const MATRICES_FILE: &str = "LO.json";
pub const DISTRIBUTIONS_FILE: &str = "Dist.json";
pub const ALIGNMENTS_FILE: &str = "AlleleAlignments.txt";
pub const DEFAULT_WEIGHTS_FILE: &str = "DefaultLengthWeights.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePaths {
    pub matrices: PathBuf,
    pub distributions: PathBuf,
    pub alignments: PathBuf,
    /// `None` scores every length uncorrected
    pub length_weights: Option<PathBuf>,
}

impl ReferencePaths {
    /// Standard file names under `data_dir`. An explicit weights file always
    /// wins; otherwise the default one is used when it exists.
    pub fn in_dir(data_dir: &std::path::Path, weights: Option<PathBuf>) -> Self {
        let length_weights = weights.or_else(|| {
            let default = data_dir.join(DEFAULT_WEIGHTS_FILE);
            if default.exists() {
                Some(default)
            } else {
                warn!(
                    "No length weights given and {} not found; scores are not length corrected",
                    default.display()
                );
                None
            }
        });
        Self {
            matrices: data_dir.join(MATRICES_FILE),
            distributions: data_dir.join(DISTRIBUTIONS_FILE),
            alignments: data_dir.join(ALIGNMENTS_FILE),
            length_weights,
        }
    }
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub alleles: Vec<String>,
    /// Requested percentile, 0-100
    pub threshold: f64,
    /// Window lengths for protein-scan mode, deduplicated, request order kept
    pub lengths: Vec<usize>,
    pub mode: InputMode,
    pub input: PathBuf,
    pub output: PathBuf,
    pub references: ReferencePaths,
}

impl RunConfig {
    pub fn from_args(args: &Args) -> PredResult<Self> {
        let mode = if args.peptide_mode == 1 {
            InputMode::Peptide
        } else {
            InputMode::Fasta
        };
        let lengths = match mode {
            InputMode::Fasta => parse_lengths(&args.lengths)?,
            InputMode::Peptide => Vec::new(),
        };
        if !(0.0..=100.0).contains(&args.threshold) {
            return Err(PredError::config(format!(
                "threshold must be a percentile between 0 and 100, got {}",
                args.threshold
            )));
        }
        let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
        info!("Using reference data in {}", data_dir.display());

        Ok(Self {
            alleles: parse_alleles(&args.alleles)?,
            threshold: args.threshold,
            lengths,
            mode,
            input: args.input.clone(),
            output: args.output.clone(),
            references: ReferencePaths::in_dir(&data_dir, args.weights.clone()),
        })
    }
}

/// Splits a comma-separated allele list, dropping blanks.
pub fn parse_alleles(raw: &str) -> PredResult<Vec<String>> {
    let alleles: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect();
    if alleles.is_empty() {
        return Err(PredError::config("no allele given"));
    }
    Ok(alleles)
}

/// Parses `"9"` or `"8,9,10"`; every length must lie in 8..=15.
pub fn parse_lengths(raw: &str) -> PredResult<Vec<usize>> {
    let mut lengths: Vec<usize> = Vec::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let len: usize = item
            .parse()
            .map_err(|_| PredError::config(format!("'{}' is not a peptide length", item)))?;
        if !(MIN_PEPTIDE_LEN..=MAX_PEPTIDE_LEN).contains(&len) {
            return Err(PredError::config(format!(
                "peptide length {} outside {}-{}",
                len, MIN_PEPTIDE_LEN, MAX_PEPTIDE_LEN
            )));
        }
        if !lengths.contains(&len) {
            lengths.push(len);
        }
    }
    if lengths.is_empty() {
        return Err(PredError::config("no peptide length given"));
    }
    Ok(lengths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn lengths_are_validated_and_deduplicated() {
        assert_eq!(parse_lengths("9").unwrap(), [9]);
        assert_eq!(parse_lengths("10, 8,10,9").unwrap(), [10, 8, 9]);
        assert!(parse_lengths("7").is_err());
        assert!(parse_lengths("16").is_err());
        assert!(parse_lengths("nine").is_err());
        assert!(parse_lengths(" , ").is_err());
    }

    #[test]
    fn alleles_split_on_commas() {
        assert_eq!(
            parse_alleles("HLA-A*02:01, HLA-B*07:02,,").unwrap(),
            ["HLA-A*02:01", "HLA-B*07:02"]
        );
        assert!(parse_alleles(" ").is_err());
    }

    #[test]
    fn flags_map_onto_run_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "hla_inception", "-i", "prot.fa", "-l", "9,10", "--threshold", "98", "-a",
            "HLA-A*02:01", "-o", "out.txt", "-d", data,
        ])
        .unwrap();
        let config = RunConfig::from_args(&args).unwrap();
        assert_eq!(config.mode, InputMode::Fasta);
        assert_eq!(config.lengths, [9, 10]);
        assert_eq!(config.threshold, 98.0);
        assert_eq!(config.references.matrices, dir.path().join(MATRICES_FILE));
        assert_eq!(config.references.length_weights, None);

        std::fs::write(dir.path().join(DEFAULT_WEIGHTS_FILE), "9\t0\n").unwrap();
        let args =
            Args::try_parse_from(["hla_inception", "-P", "1", "-l", "99", "-d", data]).unwrap();
        let config = RunConfig::from_args(&args).unwrap();
        // lengths are not used for peptide lists
        assert_eq!(config.mode, InputMode::Peptide);
        assert!(config.lengths.is_empty());
        assert_eq!(
            config.references.length_weights,
            Some(dir.path().join(DEFAULT_WEIGHTS_FILE))
        );
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let args =
            Args::try_parse_from(["hla_inception", "--threshold", "101", "-d", "."]).unwrap();
        assert!(RunConfig::from_args(&args).is_err());
        assert!(Args::try_parse_from(["hla_inception", "-P", "2"]).is_err());
    }
}
