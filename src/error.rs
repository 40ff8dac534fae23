//! The [`SeqLibError`] `enum` definition and error messages.
//!
use thiserror::Error;

/// The [`SeqLibError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum SeqLibError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    // Sequence array construction errors
    #[error("Invalid base '{0}': must be one of A, C, G, T, or N")]
    InvalidBase(char),
    #[error("Row {row} has {found} sites, but the first row has {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Array shape error: {0}")]
    ShapeError(#[from] ndarray::ShapeError),

    // Simulation and statistics errors
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Site {0} has no non-missing bases; minor allele frequency is undefined")]
    AllMissingColumn(usize),
    #[error("Per-site vector has length {found}, but the array has {expected} sites")]
    LengthMismatch { expected: usize, found: usize },

    // Command line tool related errors
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
}
