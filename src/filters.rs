//! Site filters.
//!
//! Each predicate returns a boolean mask with one entry per site, where
//! `true` means "drop this site". [`filter`] combines them with a logical OR,
//! so a site survives only if its MAF is at least `min_maf` *and* its
//! missing fraction is at most `max_missing`.

use ndarray::Array1;

use crate::error::SeqLibError;
use crate::sequences::SequenceArray;
use crate::stats::missingness;
use crate::Maf;

fn check_threshold(name: &str, value: f64) -> Result<(), SeqLibError> {
    if value.is_nan() {
        return Err(SeqLibError::InvalidParameter(format!(
            "{} threshold must be a number",
            name
        )));
    }
    Ok(())
}

/// Flag sites whose fraction of missing calls is above `max_missing`.
pub fn missing_mask(seqs: &SequenceArray, max_missing: f64) -> Array1<bool> {
    missingness(seqs).mapv(|fraction| fraction > max_missing)
}

/// Flag sites whose minor allele frequency is below `min_maf`.
pub fn maf_mask(maf: &Maf, min_maf: f64) -> Array1<bool> {
    maf.mapv(|m| m < min_maf)
}

/// The indices of the sites that pass both filters, in their original order.
pub fn retained_sites(
    seqs: &SequenceArray,
    maf: &Maf,
    min_maf: f64,
    max_missing: f64,
) -> Result<Vec<usize>, SeqLibError> {
    check_threshold("minimum MAF", min_maf)?;
    check_threshold("maximum missing", max_missing)?;
    if maf.len() != seqs.nsites() {
        return Err(SeqLibError::LengthMismatch {
            expected: seqs.nsites(),
            found: maf.len(),
        });
    }

    let low_maf = maf_mask(maf, min_maf);
    let too_missing = missing_mask(seqs, max_missing);
    log::debug!(
        "{} sites below minimum MAF {}, {} sites above maximum missing {}",
        low_maf.iter().filter(|x| **x).count(),
        min_maf,
        too_missing.iter().filter(|x| **x).count(),
        max_missing
    );

    Ok(low_maf
        .iter()
        .zip(too_missing.iter())
        .enumerate()
        .filter_map(|(i, (low, missing))| (!(*low || *missing)).then_some(i))
        .collect())
}

/// Drop the sites of `seqs` that fail either filter.
///
/// All individuals are kept and the surviving sites keep their left to
/// right order.
///
/// # Arguments
/// * `seqs`: the array to filter.
/// * `maf`: a precomputed minor allele frequency vector for `seqs`.
/// * `min_maf`: the minimum minor allele frequency; sites below this are dropped.
/// * `max_missing`: the maximum fraction of missing calls; sites above this are dropped.
pub fn filter(
    seqs: &SequenceArray,
    maf: &Maf,
    min_maf: f64,
    max_missing: f64,
) -> Result<SequenceArray, SeqLibError> {
    let keep = retained_sites(seqs, maf, min_maf, max_missing)?;
    log::info!("filtering kept {} of {} sites", keep.len(), seqs.nsites());
    Ok(seqs.select_sites(&keep))
}
