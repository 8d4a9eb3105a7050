pub mod allele_resolver;
pub mod amino_acids;
pub mod length_correction;
pub mod motif_matrix;
pub mod score_distribution;
pub mod scoring_engine;
pub mod scoring_table_store;
pub mod window_generator;
