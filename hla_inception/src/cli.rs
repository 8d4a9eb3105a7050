use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "hla_inception",
    about = "Predict MHC class I binding peptides from log-odds motifs",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(
        short = 'i',
        long = "input",
        help = "Path to .fasta file (or peptide list with -P 1)",
        value_name = "FILE",
        default_value = "example.fasta"
    )]
    pub input: PathBuf,

    #[arg(
        short = 'w',
        long = "weights",
        help = "Length correction weights (length<TAB>offset); \
                defaults to DefaultLengthWeights.txt in the data dir",
        value_name = "FILE"
    )]
    pub weights: Option<PathBuf>,

    #[arg(
        short = 'l',
        long = "lengths",
        help = "Peptide length(s) to scan, comma-separated (8-15)",
        value_name = "LENGTHS",
        default_value = "9"
    )]
    pub lengths: String,

    #[arg(
        long = "threshold",
        help = "Percentile threshold for reporting in fasta mode",
        value_name = "PERCENTILE",
        default_value_t = 99.5
    )]
    pub threshold: f64,

    #[arg(
        short = 'a',
        long = "alleles",
        help = "Target MHC-I allele(s), comma-separated",
        value_name = "ALLELES",
        default_value = "A_02:01"
    )]
    pub alleles: String,

    #[arg(
        short = 'o',
        long = "output",
        help = "Output file for predictions",
        value_name = "FILE",
        default_value = "output.txt"
    )]
    pub output: PathBuf,

    #[arg(
        short = 'P',
        long = "peptide-mode",
        help = "Input file type (1: peptides ; 0: fasta)",
        value_name = "MODE",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=1)
    )]
    pub peptide_mode: u8,

    #[arg(
        short = 'd',
        long = "data-dir",
        help = "Directory holding LO.json, Dist.json and AlleleAlignments.txt \
                [default: $HI_PRED_PATH/data]",
        value_name = "DIR"
    )]
    pub data_dir: Option<PathBuf>,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of worker threads [default: all cores]",
        value_name = "THREADS"
    )]
    pub threads: Option<usize>,
}
