//! The [`SeqLib`] type: a simulated sequence array and its derived data.

use rand::Rng;

use crate::error::SeqLibError;
use crate::filters;
use crate::sequences::SequenceArray;
use crate::simulate::{simulate, validate_dimensions, SimulationParams};
use crate::stats::{self, SiteSummary, Statistics};
use crate::Maf;

/// A [`SequenceArray`] together with its dimensions, the parameters it was
/// simulated under, and its minor allele frequency vector.
///
/// The MAF vector is recomputed whenever the array changes, so the two are
/// always in sync.
#[derive(Clone, Debug, PartialEq)]
pub struct SeqLib {
    ninds: usize,
    nsites: usize,
    params: SimulationParams,
    seqs: SequenceArray,
    maf: Maf,
}

impl SeqLib {
    /// Simulate a new `(ninds, nsites)` array with the default mutation and
    /// missing data rates.
    pub fn new<R: Rng + ?Sized>(
        ninds: usize,
        nsites: usize,
        rng: &mut R,
    ) -> Result<Self, SeqLibError> {
        Self::with_params(ninds, nsites, SimulationParams::default(), rng)
    }

    /// Simulate a new `(ninds, nsites)` array under `params`.
    ///
    /// # Errors
    /// [`SeqLibError::InvalidParameter`] if either dimension is zero or a rate
    /// is not a probability; [`SeqLibError::AllMissingColumn`] if a simulated
    /// site ends up with every call missing.
    pub fn with_params<R: Rng + ?Sized>(
        ninds: usize,
        nsites: usize,
        params: SimulationParams,
        rng: &mut R,
    ) -> Result<Self, SeqLibError> {
        validate_dimensions(ninds, nsites)?;
        let seqs = simulate(ninds, nsites, &params, rng)?;
        Self::build(seqs, params)
    }

    /// Build a [`SeqLib`] directly from an existing array. The dimensions
    /// are taken from the array's shape.
    pub fn from_array(seqs: SequenceArray) -> Result<Self, SeqLibError> {
        Self::build(seqs, SimulationParams::default())
    }

    fn build(seqs: SequenceArray, params: SimulationParams) -> Result<Self, SeqLibError> {
        let maf = stats::minor_allele_frequencies(&seqs)?;
        Ok(Self {
            ninds: seqs.ninds(),
            nsites: seqs.nsites(),
            params,
            seqs,
            maf,
        })
    }

    /// Draw a fresh array with the same dimensions and parameters.
    ///
    /// On error `self` is left unchanged.
    pub fn resimulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SeqLibError> {
        let seqs = simulate(self.ninds, self.nsites, &self.params, rng)?;
        let maf = stats::minor_allele_frequencies(&seqs)?;
        self.seqs = seqs;
        self.maf = maf;
        Ok(())
    }

    pub fn ninds(&self) -> usize {
        self.ninds
    }

    pub fn nsites(&self) -> usize {
        self.nsites
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// The sequence array.
    pub fn seqs(&self) -> &SequenceArray {
        &self.seqs
    }

    /// The minor allele frequency of each site.
    pub fn maf(&self) -> &Maf {
        &self.maf
    }

    /// Take the sequence array, dropping the derived data.
    pub fn into_seqs(self) -> SequenceArray {
        self.seqs
    }

    /// Return a new array with the sites failing the MAF or missing data
    /// filters removed. See [`filters::filter`].
    pub fn filter(&self, min_maf: f64, max_missing: f64) -> Result<SequenceArray, SeqLibError> {
        filters::filter(&self.seqs, &self.maf, min_maf, max_missing)
    }

    /// Apply [`SeqLib::filter`] and wrap the result in a new [`SeqLib`].
    ///
    /// The new value's dimensions match the filtered array, its data is the
    /// filtered data (not a fresh simulation), and its MAF vector is
    /// recomputed for the narrower array. Simulation parameters are carried
    /// over, so a later [`SeqLib::resimulate`] draws at the new dimensions.
    pub fn filter_seqlib(&self, min_maf: f64, max_missing: f64) -> Result<Self, SeqLibError> {
        let seqs = self.filter(min_maf, max_missing)?;
        log::debug!("filtered SeqLib from {} to {} sites", self.nsites, seqs.nsites());
        Self::build(seqs, self.params)
    }

    /// Summary statistics for the array, or `None` if it is empty.
    pub fn calculate_statistics(&self) -> Option<Statistics> {
        stats::calculate_statistics(&self.seqs)
    }

    /// The per-site MAF and missing fraction table.
    pub fn site_summaries(&self) -> Vec<SiteSummary> {
        stats::summarize_sites(&self.maf, &self.seqs)
    }
}
