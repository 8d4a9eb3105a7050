//! Run driver: loads the reference panel, resolves alleles, fans scoring out
//! over rayon and funnels records into the single output writer.
//!
//! Alleles are processed one after another. Within an allele every protein
//! (or peptide) is an independent rayon task, and the allele finishes only
//! when all of them have, before the next allele starts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::sync::mpsc::{SendError, Sender};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::RunConfig;
use crate::data_handling::reference_tables::ReferencePanel;
use crate::data_handling::sequences::{FastaFile, PeptideList};
use crate::data_handling::tsv_tables::{AlleleAlignments, LengthWeights};
use crate::errors::{PredError, PredResult};
use crate::models::{Dataset, InputMode, PredictionRecord, ProteinSequence};
use crate::output::{OutputSink, RecordWriter};
use crate::prediction_tools::length_correction::LengthCorrectionTable;
use crate::prediction_tools::scoring_engine::{evaluate_peptide, score_peptide, PeptideScore};
use crate::prediction_tools::scoring_table_store::{resolve_alleles, ResolvedAlleleContext};
use crate::prediction_tools::window_generator::WindowGenerator;

type RecordSender = Sender<PredictionRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlleleSummary {
    pub allele: String,
    /// Windows (or peptides) scored
    pub scored: usize,
    /// Records sent to the output
    pub reported: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub summaries: Vec<AlleleSummary>,
    pub records_written: usize,
}

/// Performs a whole run as configured.
///
/// All reference data is loaded and every allele resolved before the output
/// file is created, so a configuration error leaves no output behind.
pub fn execute(config: &RunConfig) -> PredResult<RunReport> {
    let refs = &config.references;
    let store = ReferencePanel {
        matrices_path: refs.matrices.clone(),
        distributions_path: refs.distributions.clone(),
    }
    .load()?;
    let similarity = AlleleAlignments {
        path: refs.alignments.clone(),
    }
    .load()?;
    let corrections = match &refs.length_weights {
        Some(path) => LengthWeights { path: path.clone() }.load()?,
        None => LengthCorrectionTable::default(),
    };
    if refs.length_weights.is_some() && corrections.is_empty() {
        warn!("Length weights file holds no entries; scores are reported uncorrected");
    }

    let contexts = resolve_alleles(&config.alleles, &store, &similarity, config.threshold)?;

    let (inner, summaries, records_written) = match config.mode {
        InputMode::Fasta => {
            let proteins = FastaFile {
                path: config.input.clone(),
            }
            .load()?;
            let sink = OutputSink::new(create_output(config)?, config.mode)?;
            scan_proteins(
                &proteins,
                &contexts,
                &corrections,
                &config.lengths,
                config.threshold,
                sink,
            )?
        }
        InputMode::Peptide => {
            let peptides = PeptideList {
                path: config.input.clone(),
            }
            .load()?;
            let sink = OutputSink::new(create_output(config)?, config.mode)?;
            score_peptide_list(&peptides, &contexts, &corrections, sink)?
        }
    };
    finish_output(inner, config)?;

    info!(
        "Wrote {} predictions to {}",
        records_written,
        config.output.display()
    );
    Ok(RunReport {
        summaries,
        records_written,
    })
}

/// Protein-scan mode: windows whose length-corrected score reaches the
/// allele's cutoff are reported.
///
/// # Arguments
///
/// * `lengths` - Window lengths to cut from every protein
/// * `selected_threshold` - Requested percentile, echoed into each record
pub fn scan_proteins<W: Write + Send + 'static>(
    proteins: &[ProteinSequence],
    contexts: &[ResolvedAlleleContext],
    corrections: &LengthCorrectionTable,
    lengths: &[usize],
    selected_threshold: f64,
    sink: OutputSink<W>,
) -> PredResult<(W, Vec<AlleleSummary>, usize)> {
    run_alleles(contexts, sink, |context, sender| {
        info!(
            "Running {} in fasta mode with a threshold of {} ({:.6}) and length(s) {:?}",
            context.allele, selected_threshold, context.threshold, lengths
        );
        let (scored, reported) = proteins
            .par_iter()
            .map_with(sender, |tx, protein| {
                scan_protein(protein, context, corrections, lengths, selected_threshold, tx)
            })
            .try_reduce(|| (0, 0), |a, b| Ok((a.0 + b.0, a.1 + b.1)))?;
        Ok(AlleleSummary {
            allele: context.allele.clone(),
            scored,
            reported,
        })
    })
}

/// Peptide mode: every peptide is scored and reported, no cutoff.
pub fn score_peptide_list<W: Write + Send + 'static>(
    peptides: &[String],
    contexts: &[ResolvedAlleleContext],
    corrections: &LengthCorrectionTable,
    sink: OutputSink<W>,
) -> PredResult<(W, Vec<AlleleSummary>, usize)> {
    run_alleles(contexts, sink, |context, sender| {
        info!("Running {} in peptide mode on {} peptides", context.allele, peptides.len());
        peptides.par_iter().try_for_each_with(sender, |tx, peptide| {
            let score = evaluate_peptide(peptide, context, corrections);
            tx.send(PredictionRecord::from_peptide(peptide, &context.allele, score))
        })?;
        Ok(AlleleSummary {
            allele: context.allele.clone(),
            scored: peptides.len(),
            reported: peptides.len(),
        })
    })
}

fn scan_protein(
    protein: &ProteinSequence,
    context: &ResolvedAlleleContext,
    corrections: &LengthCorrectionTable,
    lengths: &[usize],
    selected_threshold: f64,
    tx: &mut RecordSender,
) -> Result<(usize, usize), SendError<PredictionRecord>> {
    let mut scored = 0;
    let mut reported = 0;
    for window in WindowGenerator::new(&protein.name, &protein.sequence, lengths) {
        scored += 1;
        let raw = score_peptide(window.peptide.as_bytes(), &context.matrix);
        let corrected = corrections.apply(raw, window.length);
        if corrected < context.threshold {
            continue;
        }
        let score = PeptideScore::ranked(raw, corrected, &context.distribution);
        tx.send(PredictionRecord::from_window(
            &window,
            &context.allele,
            selected_threshold,
            score,
        ))?;
        reported += 1;
    }
    Ok((scored, reported))
}

/// Spawns the writer, runs `per_allele` for each allele in order and joins
/// the writer once all alleles are done.
fn run_alleles<W, F>(
    contexts: &[ResolvedAlleleContext],
    sink: OutputSink<W>,
    mut per_allele: F,
) -> PredResult<(W, Vec<AlleleSummary>, usize)>
where
    W: Write + Send + 'static,
    F: FnMut(
        &ResolvedAlleleContext,
        RecordSender,
    ) -> Result<AlleleSummary, SendError<PredictionRecord>>,
{
    let writer = RecordWriter::spawn(sink);
    let mut summaries = Vec::with_capacity(contexts.len());

    for context in contexts {
        match per_allele(context, writer.sender()) {
            Ok(summary) => {
                info!(
                    "{}: {} scored, {} reported",
                    summary.allele, summary.scored, summary.reported
                );
                summaries.push(summary);
            }
            // the writer hung up, so it has already failed; surface its error
            Err(_) => return Err(writer.finish().err().unwrap_or(PredError::WriterPanicked)),
        }
    }

    let (inner, written) = writer.finish()?;
    Ok((inner, summaries, written))
}

fn create_output(config: &RunConfig) -> PredResult<BufWriter<File>> {
    let file = File::create(&config.output).map_err(|e| PredError::io(&config.output, e))?;
    Ok(BufWriter::new(file))
}

fn finish_output(mut inner: BufWriter<File>, config: &RunConfig) -> PredResult<()> {
    inner.flush().map_err(|e| PredError::io(&config.output, e))
}
