//! Per-site and whole-array summary statistics.
//!
//! Two different notions of allele frequency live here and should not be
//! confused:
//!
//!  - [`minor_allele_frequencies`] masks out missing calls, takes the first
//!    non-missing call at a site as the reference, and folds the frequency of
//!    non-reference calls into [0, 0.5].
//!  - [`Statistics::mean_minor_allele_frequency`] uses the first individual's
//!    call (missing or not) as the reference and averages the unfolded
//!    fraction of individuals that differ from it.

use ndarray::{Array1, Axis};
use serde::Serialize;

use crate::error::SeqLibError;
use crate::sequences::SequenceArray;
use crate::Maf;

/// Compute the minor allele frequency of each site, ignoring missing calls.
///
/// For each site, `freq` is the fraction of non-missing calls that differ
/// from the first non-missing call. Values above 0.5 are folded to
/// `1 - freq`. With more than two alleles at a site the formula is still
/// applied as is.
///
/// # Errors
/// Returns [`SeqLibError::AllMissingColumn`] for the first site that has
/// no non-missing calls.
pub fn minor_allele_frequencies(seqs: &SequenceArray) -> Result<Maf, SeqLibError> {
    seqs.axis_iter(Axis(1))
        .enumerate()
        .map(|(index, site)| {
            let mut called = site.iter().filter(|b| !b.is_missing());
            let reference = *called.next().ok_or(SeqLibError::AllMissingColumn(index))?;
            // the reference itself is one called, non-differing base
            let (ncalled, ndiffer) = called.fold((1usize, 0usize), |(n, d), b| {
                (n + 1, d + usize::from(*b != reference))
            });
            let freq = ndiffer as f64 / ncalled as f64;
            Ok(if freq > 0.5 { 1.0 - freq } else { freq })
        })
        .collect()
}

/// Compute the fraction of individuals with a missing call at each site.
///
/// An array with no individuals gives `NaN` for every site.
pub fn missingness(seqs: &SequenceArray) -> Array1<f64> {
    let ninds = seqs.ninds() as f64;
    seqs.count_missing().mapv(|n| n as f64 / ninds)
}

/// Summary statistics over a whole [`SequenceArray`], with the first
/// individual as the per-site reference.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    /// Mean over sites of the population variance of "equals reference".
    pub mean_nucleotide_diversity: f64,
    /// Mean over sites of the fraction of individuals differing from the reference.
    pub mean_minor_allele_frequency: f64,
    /// Sites where every individual matches the reference.
    pub invariant_sites: usize,
    /// `nsites - invariant_sites`.
    pub variable_sites: usize,
}

/// Compute [`Statistics`] for `seqs`.
///
/// Returns `None` if the array has no individuals or no sites.
pub fn calculate_statistics(seqs: &SequenceArray) -> Option<Statistics> {
    if seqs.is_empty() {
        log::warn!("seqs array is empty");
        return None;
    }

    let ninds = seqs.ninds() as f64;
    let nsites = seqs.nsites();
    let reference = seqs.individual(0);

    let mut diversity_sum = 0.0;
    let mut differ_sum = 0.0;
    let mut invariant_sites = 0;
    for (site, &ref_base) in seqs.axis_iter(Axis(1)).zip(reference.iter()) {
        let nequal = site.iter().filter(|b| **b == ref_base).count();
        let p = nequal as f64 / ninds;
        // population variance of a 0/1 vector with mean p
        diversity_sum += p * (1.0 - p);
        differ_sum += 1.0 - p;
        if nequal == seqs.ninds() {
            invariant_sites += 1;
        }
    }

    Some(Statistics {
        mean_nucleotide_diversity: diversity_sum / nsites as f64,
        mean_minor_allele_frequency: differ_sum / nsites as f64,
        invariant_sites,
        variable_sites: nsites - invariant_sites,
    })
}

/// One row of the per-site table written by `seqlib sites`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteSummary {
    pub site: usize,
    pub maf: f64,
    pub missing: f64,
}

/// Build the per-site summary table for `seqs`.
pub fn site_summaries(seqs: &SequenceArray) -> Result<Vec<SiteSummary>, SeqLibError> {
    let maf = minor_allele_frequencies(seqs)?;
    Ok(summarize_sites(&maf, seqs))
}

/// Pair a precomputed MAF vector with the missing fraction of each site.
///
/// `maf` must have one entry per site of `seqs`.
pub fn summarize_sites(maf: &Maf, seqs: &SequenceArray) -> Vec<SiteSummary> {
    debug_assert_eq!(maf.len(), seqs.nsites());
    maf.iter()
        .zip(missingness(seqs).iter())
        .enumerate()
        .map(|(site, (&maf, &missing))| SiteSummary { site, maf, missing })
        .collect()
}
