//! Random generation of [`SequenceArray`] data.
//!
//! The model is deliberately simple:
//!
//!  1. An origin sequence is drawn with each site uniform over A, C, G, T.
//!  2. Every individual starts as a copy of the origin.
//!  3. Each cell is flagged for mutation with probability `mutation_rate`. For
//!     each site one replacement base is drawn from the three bases that differ
//!     from the origin, and *all* flagged individuals at that site receive it.
//!  4. Each cell is independently flagged as missing with probability
//!     `missing_rate`, and overwritten with `N` (whether mutated or not).
//!
//! The random source is always passed in, so seeded generators give
//! reproducible arrays.

use ndarray::Array2;
use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::base::Base;
use crate::error::SeqLibError;
use crate::sequences::SequenceArray;

/// The default per-cell mutation probability.
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;

/// The default per-cell missing data probability.
pub const DEFAULT_MISSING_RATE: f64 = 0.1;

/// Per-cell probabilities used by [`simulate`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub mutation_rate: f64,
    pub missing_rate: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            mutation_rate: DEFAULT_MUTATION_RATE,
            missing_rate: DEFAULT_MISSING_RATE,
        }
    }
}

impl SimulationParams {
    pub fn new(mutation_rate: f64, missing_rate: f64) -> Result<Self, SeqLibError> {
        let params = Self {
            mutation_rate,
            missing_rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check both rates are probabilities.
    pub fn validate(&self) -> Result<(), SeqLibError> {
        for (name, value) in [
            ("mutation rate", self.mutation_rate),
            ("missing rate", self.missing_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SeqLibError::InvalidParameter(format!(
                    "{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Check that the array dimensions are both at least one.
pub fn validate_dimensions(ninds: usize, nsites: usize) -> Result<(), SeqLibError> {
    if ninds == 0 || nsites == 0 {
        return Err(SeqLibError::InvalidParameter(format!(
            "ninds and nsites must be positive, got ninds={} nsites={}",
            ninds, nsites
        )));
    }
    Ok(())
}

/// Draw a Bernoulli mask of shape `(ninds, nsites)`, filled in row-major order.
fn bernoulli_mask<R: Rng + ?Sized>(
    rng: &mut R,
    p: f64,
    ninds: usize,
    nsites: usize,
) -> Result<Array2<bool>, SeqLibError> {
    let dist = Bernoulli::new(p).map_err(|e| SeqLibError::InvalidParameter(e.to_string()))?;
    let flat: Vec<bool> = (0..ninds * nsites).map(|_| dist.sample(rng)).collect();
    Ok(Array2::from_shape_vec((ninds, nsites), flat)?)
}

/// Simulate a `(ninds, nsites)` [`SequenceArray`].
///
/// # Arguments
/// * `ninds`: the number of individuals (rows), at least one.
/// * `nsites`: the number of sites (columns), at least one.
/// * `params`: the mutation and missing data probabilities.
/// * `rng`: the random source.
pub fn simulate<R: Rng + ?Sized>(
    ninds: usize,
    nsites: usize,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<SequenceArray, SeqLibError> {
    validate_dimensions(ninds, nsites)?;
    params.validate()?;

    let origin: Vec<Base> = (0..nsites).map(|_| Base::random(rng)).collect();
    let mut array = Array2::from_shape_fn((ninds, nsites), |(_, site)| origin[site]);

    let mutations = bernoulli_mask(rng, params.mutation_rate, ninds, nsites)?;
    for (site, &origin_base) in origin.iter().enumerate() {
        // one replacement per site, drawn even when nothing mutates
        let replacement = origin_base.random_other(rng);
        let mut column = array.column_mut(site);
        for (cell, mutated) in column.iter_mut().zip(mutations.column(site)) {
            if *mutated {
                *cell = replacement;
            }
        }
    }

    let missing = bernoulli_mask(rng, params.missing_rate, ninds, nsites)?;
    array.zip_mut_with(&missing, |cell, is_missing| {
        if *is_missing {
            *cell = Base::N;
        }
    });

    log::debug!(
        "simulated {} individuals x {} sites (mutation rate {}, missing rate {})",
        ninds,
        nsites,
        params.mutation_rate,
        params.missing_rate
    );
    Ok(SequenceArray::new(array))
}
