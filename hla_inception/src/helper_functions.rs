use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::errors::{PredError, PredResult};

/// Install root of the predictor; reference tables live under `<root>/data`.
pub fn hi_pred_root() -> PathBuf {
    match env::var_os("HI_PRED_PATH") {
        Some(val) => PathBuf::from(val),
        None => {
            // Fall back to current directory if HI_PRED_PATH not set
            env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    hi_pred_root().join("data")
}

/// Opens `path` for buffered reading, telling "missing" apart from other I/O failures.
pub fn open_input(path: &Path, kind: &'static str) -> PredResult<BufReader<File>> {
    if !path.exists() {
        return Err(PredError::InputNotFound {
            kind,
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| PredError::io(path, e))?;
    Ok(BufReader::new(file))
}

/// Headerless tab-separated reader over `path`.
pub fn read_tsv(path: &Path, kind: &'static str) -> PredResult<csv::Reader<BufReader<File>>> {
    let reader = open_input(path, kind)?;
    Ok(csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader))
}

/// Line number of a csv record, for error messages.
pub fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
