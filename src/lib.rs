//! # seqlib
//!
//! Simulate individuals-by-sites sequence arrays with a simple mutation and
//! missing data model, filter their sites, and compute population-genetic
//! summary statistics.
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use seqlib::prelude::*;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let lib = SeqLib::new(10, 20, &mut rng)?;
//! let filtered = lib.filter_seqlib(0.1, 0.2)?;
//! if let Some(stats) = filtered.calculate_statistics() {
//!     println!("{} variable sites", stats.variable_sites);
//! }
//! # Ok::<(), SeqLibError>(())
//! ```

pub mod base;
pub mod commands;
pub mod error;
pub mod filters;
pub mod io;
pub mod reporting;
pub mod seqlib;
pub mod sequences;
pub mod simulate;
pub mod stats;
pub mod test_utilities;

/// The raw storage of a [`SequenceArray`](sequences::SequenceArray).
pub type SeqArray = ndarray::Array2<base::Base>;

/// A per-site minor allele frequency vector.
pub type Maf = ndarray::Array1<f64>;

pub mod prelude {
    pub use crate::base::Base;
    pub use crate::error::SeqLibError;
    pub use crate::filters::filter;
    pub use crate::io::{read_seqarray, InputFile, OutputFile};
    pub use crate::seqlib::SeqLib;
    pub use crate::sequences::SequenceArray;
    pub use crate::simulate::{simulate, SimulationParams};
    pub use crate::stats::{calculate_statistics, minor_allele_frequencies, Statistics};
}
