pub mod reference_tables;
pub mod sequences;
pub mod tsv_tables;
