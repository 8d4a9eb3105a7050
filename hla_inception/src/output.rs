//! Semicolon-delimited prediction output and its single writer thread.

use std::io::Write;
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::errors::{PredError, PredResult};
use crate::models::{InputMode, PredictionRecord};

pub const FASTA_HEADER: [&str; 13] = [
    "Peptide",
    "Length",
    "Allele",
    "Protein",
    "Start",
    "End",
    "SelectedThres",
    "upstream",
    "downstream",
    "RawScore",
    "RawScorePercentile",
    "LengthCorrectedScore",
    "LengthCorrectedScorePercentile",
];

pub const PEPTIDE_HEADER: [&str; 8] = [
    "Peptide",
    "Length",
    "Allele",
    "Protein",
    "RawScore",
    "RawScorePercentile",
    "LengthCorrectedScore",
    "LengthCorrectedScorePercentile",
];

pub struct OutputSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutputSink<W> {
    /// Wraps `inner` and writes the header line for `mode`.
    pub fn new(inner: W, mode: InputMode) -> PredResult<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .flexible(true)
            .from_writer(inner);
        let header: &[&str] = match mode {
            InputMode::Fasta => &FASTA_HEADER,
            InputMode::Peptide => &PEPTIDE_HEADER,
        };
        writer.write_record(header).map_err(PredError::Output)?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, record: &PredictionRecord) -> PredResult<()> {
        self.writer
            .write_record(record.fields())
            .map_err(PredError::Output)
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(self) -> PredResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| PredError::Output(csv::Error::from(e.into_error())))
    }
}

/// Owns the sink on a dedicated thread; scoring workers only ever send
/// complete records, so lines never interleave.
pub struct RecordWriter<W: Write + Send + 'static> {
    sender: Sender<PredictionRecord>,
    handle: JoinHandle<PredResult<(W, usize)>>,
}

impl<W: Write + Send + 'static> RecordWriter<W> {
    pub fn spawn(mut sink: OutputSink<W>) -> Self {
        let (sender, receiver) = mpsc::channel::<PredictionRecord>();
        let handle = thread::spawn(move || {
            let mut written = 0usize;
            for record in receiver {
                sink.write(&record)?;
                written += 1;
            }
            debug!("Writer thread drained after {} records", written);
            Ok((sink.finish()?, written))
        });
        Self { sender, handle }
    }

    pub fn sender(&self) -> Sender<PredictionRecord> {
        self.sender.clone()
    }

    /// Closes the channel, waits for the backlog to be written and returns
    /// the inner writer with the number of records written.
    pub fn finish(self) -> PredResult<(W, usize)> {
        drop(self.sender);
        self.handle.join().map_err(|_| PredError::WriterPanicked)?
    }
}
