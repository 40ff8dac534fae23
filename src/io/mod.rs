//! Types and methods for reading sequence arrays and writing output.

pub mod file;
pub mod tsv;

pub use file::{read_seqarray, InputFile, OutputFile};
pub use tsv::{write_tsv, write_tsv_to};
