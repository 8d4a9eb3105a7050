//! JSON reference panel: log-odds matrices (`LO.json`) and calibration
//! distributions (`Dist.json`).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::errors::{PredError, PredResult};
use crate::helper_functions::open_input;
use crate::models::Dataset;
use crate::prediction_tools::motif_matrix::{PositionScoringMatrix, ALPHABET_LEN, MOTIF_LEN};
use crate::prediction_tools::score_distribution::{ScoreDistribution, DISTRIBUTION_LEN};
use crate::prediction_tools::scoring_table_store::ScoringTableStore;

/// One `LO.json` entry; `PosN` lists weights in `ARNDCQEGHILKMFPSTWYV` order.
#[derive(Debug, Deserialize)]
struct MatrixRecord {
    #[serde(rename = "HLA")]
    hla: String,
    #[serde(rename = "Pos1")]
    pos1: Vec<f64>,
    #[serde(rename = "Pos2")]
    pos2: Vec<f64>,
    #[serde(rename = "Pos3")]
    pos3: Vec<f64>,
    #[serde(rename = "Pos4")]
    pos4: Vec<f64>,
    #[serde(rename = "Pos5")]
    pos5: Vec<f64>,
    #[serde(rename = "Pos6")]
    pos6: Vec<f64>,
    #[serde(rename = "Pos7")]
    pos7: Vec<f64>,
    #[serde(rename = "Pos8")]
    pos8: Vec<f64>,
    #[serde(rename = "Pos9")]
    pos9: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct DistributionRecord {
    #[serde(rename = "HLA")]
    hla: String,
    #[serde(rename = "Score")]
    score: Vec<f64>,
    #[serde(rename = "Perc")]
    perc: Vec<f64>,
}

impl MatrixRecord {
    fn into_matrix(self) -> PredResult<(String, PositionScoringMatrix)> {
        let positions = [
            self.pos1, self.pos2, self.pos3, self.pos4, self.pos5, self.pos6, self.pos7, self.pos8,
            self.pos9,
        ];
        let mut weights = [[0.0; ALPHABET_LEN]; MOTIF_LEN];
        for (pos, (row, values)) in weights.iter_mut().zip(positions.iter()).enumerate() {
            if values.len() != ALPHABET_LEN {
                return Err(PredError::malformed_reference(
                    &self.hla,
                    format!(
                        "Pos{} has {} weights, expected {}",
                        pos + 1,
                        values.len(),
                        ALPHABET_LEN
                    ),
                ));
            }
            row.copy_from_slice(values);
        }
        Ok((self.hla, PositionScoringMatrix::new(weights)))
    }
}

impl DistributionRecord {
    fn into_distribution(self) -> PredResult<(String, ScoreDistribution)> {
        if self.score.len() != DISTRIBUTION_LEN || self.perc.len() != DISTRIBUTION_LEN {
            return Err(PredError::malformed_reference(
                &self.hla,
                format!(
                    "distribution has {} scores and {} percentiles, expected {} of each",
                    self.score.len(),
                    self.perc.len(),
                    DISTRIBUTION_LEN
                ),
            ));
        }
        let distribution = ScoreDistribution::new(&self.hla, self.score, self.perc)?;
        Ok((self.hla, distribution))
    }
}

/// Both JSON tables of the reference panel
pub struct ReferencePanel {
    pub matrices_path: PathBuf,
    pub distributions_path: PathBuf,
}

impl Dataset for ReferencePanel {
    type Output = ScoringTableStore;

    fn load(&self) -> PredResult<ScoringTableStore> {
        let mut store = ScoringTableStore::default();

        info!("Reading log-odds matrices from {}", self.matrices_path.display());
        let matrices: Vec<MatrixRecord> = read_json(&self.matrices_path, "log-odds matrix")?;
        let n_matrices = matrices.len();
        for record in matrices {
            let (allele, matrix) = record.into_matrix()?;
            if store.has_matrix(&allele) {
                debug!("Ignoring repeated matrix for {}", allele);
                continue;
            }
            store.insert_matrix(allele, matrix);
        }

        info!("Reading score distributions from {}", self.distributions_path.display());
        let distributions: Vec<DistributionRecord> =
            read_json(&self.distributions_path, "score distribution")?;
        let n_distributions = distributions.len();
        for record in distributions {
            let (allele, distribution) = record.into_distribution()?;
            if store.has_distribution(&allele) {
                debug!("Ignoring repeated distribution for {}", allele);
                continue;
            }
            store.insert_distribution(allele, distribution);
        }

        info!(
            "Reference panel holds {} matrices and {} distributions",
            n_matrices, n_distributions
        );
        Ok(store)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, kind: &'static str) -> PredResult<T> {
    let reader = open_input(path, kind)?;
    serde_json::from_reader(reader).map_err(|source| PredError::Json {
        path: path.to_path_buf(),
        source,
    })
}
