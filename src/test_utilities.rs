//! Test cases and test utility functions.
//!

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tempfile::{Builder, NamedTempFile};

use crate::{error::SeqLibError, seqlib::SeqLib, sequences::SequenceArray};

// Stochastic test defaults
//
// This is the number of random arrays to simulate in property-style tests.
// The tradeoff is catching stochastic errors vs test time.
pub const NRANDOM_SIMULATIONS: usize = 200;

/// A deterministic [`ChaCha8Rng`] for tests. Its output stream is fixed
/// across releases, so seeded draws can be compared against literal values.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Simulate a [`SeqLib`] with default rates, redrawing in the (rare) case
/// that a site comes out entirely missing.
///
/// # Panics
/// On any other error, e.g. a zero dimension.
pub fn random_seqlib<R: Rng>(ninds: usize, nsites: usize, rng: &mut R) -> SeqLib {
    loop {
        match SeqLib::new(ninds, nsites, rng) {
            Ok(lib) => return lib,
            Err(SeqLibError::AllMissingColumn(_)) => continue,
            Err(e) => panic!("random_seqlib({}, {}) failed: {}", ninds, nsites, e),
        }
    }
}

/// Four individuals, three sites:
///
/// ```text
/// AAA
/// AAN
/// ATN
/// ATN
/// ```
///
/// Site 0 is invariant, site 1 has MAF 0.5, site 2 has a single called base.
pub fn seqarray_test_case_01() -> SequenceArray {
    SequenceArray::from_rows(&["AAA", "AAN", "ATN", "ATN"])
        .expect("test case 01 is a valid array")
}

/// Create a temporary file for sequence array output.
pub fn temp_seqfile() -> NamedTempFile {
    Builder::new()
        .suffix(".txt")
        .tempfile()
        .expect("Failed to create temp file")
}

/// Get the path to the `seqlib` command line tool after a build.
/// This is used for integration tests.
pub fn seqlib_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().expect("Failed to get current exe path");
    path.pop(); // Remove the test binary name
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("seqlib");
    path
}
