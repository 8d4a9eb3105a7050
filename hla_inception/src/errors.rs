//! Error types for the predictor.
//!
//! Everything in here is fatal: the run aborts and the binary exits non-zero.
//! The one degraded condition (a weak allele substitution) is a log warning,
//! not an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredError {
    /// A required input or reference file does not exist
    #[error("{kind} file not found: {}", path.display())]
    InputNotFound { kind: &'static str, path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON reference table could not be decoded
    #[error("failed to decode {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A row of a tab-separated table is unusable
    #[error("malformed record in {} at line {line}: {message}", path.display())]
    MalformedTable {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Matrix or distribution violates its shape/order invariants
    #[error("malformed reference data for allele {allele}: {message}")]
    MalformedReference { allele: String, message: String },

    #[error("allele not supported: {0} has no entry in the allele similarity table")]
    AlleleNotSupported(String),

    /// The similarity table points at a reference allele we hold no data for
    #[error(
        "allele not supported: reference allele {reference} (matched for {allele}) \
         is missing from the {table} table"
    )]
    MissingReferenceData {
        allele: String,
        reference: String,
        table: &'static str,
    },

    #[error("invalid residue '{residue}' at position {position} of sequence {sequence}")]
    InvalidResidue {
        sequence: String,
        position: usize,
        residue: char,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write predictions: {0}")]
    Output(#[source] csv::Error),

    #[error("prediction writer thread panicked")]
    WriterPanicked,
}

impl PredError {
    pub fn config(message: impl Into<String>) -> Self {
        PredError::Config(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PredError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed_reference(allele: impl Into<String>, message: impl Into<String>) -> Self {
        PredError::MalformedReference {
            allele: allele.into(),
            message: message.into(),
        }
    }
}

pub type PredResult<T> = Result<T, PredError>;
