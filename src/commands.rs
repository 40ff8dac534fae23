//! Implementations of the `seqlib` command line subcommands.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use crate::{
    io::{read_seqarray, write_tsv, OutputFile},
    prelude::*,
    reporting::{CommandOutput, Report},
};

/// Site filter thresholds given on the command line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteFilters {
    pub min_maf: f64,
    pub max_missing: f64,
}

impl SiteFilters {
    /// Build filters from optional thresholds; `None` if neither is set.
    /// A missing threshold is filled with one that keeps every site.
    pub fn from_options(min_maf: Option<f64>, max_missing: Option<f64>) -> Option<Self> {
        if min_maf.is_none() && max_missing.is_none() {
            return None;
        }
        Some(Self {
            min_maf: min_maf.unwrap_or(0.0),
            max_missing: max_missing.unwrap_or(1.0),
        })
    }
}

/// A [`ChaCha8Rng`] seeded from `seed`, or from system entropy if not given.
///
/// ChaCha8's stream is fixed, so a given `--seed` produces the same array
/// across builds.
pub fn build_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn apply_filters(
    lib: SeqLib,
    filters: Option<SiteFilters>,
    report: &mut Report,
) -> Result<SeqLib, SeqLibError> {
    let Some(filters) = filters else {
        return Ok(lib);
    };
    let filtered = lib.filter_seqlib(filters.min_maf, filters.max_missing)?;
    let removed = lib.nsites() - filtered.nsites();
    if removed > 0 {
        report.add_issue(format!(
            "{} of {} sites were removed (minimum MAF {}, maximum missing {})",
            removed,
            lib.nsites(),
            filters.min_maf,
            filters.max_missing
        ));
    }
    Ok(filtered)
}

/// Simulate a sequence array, optionally filter its sites, and write it.
pub fn seqlib_simulate(
    ninds: usize,
    nsites: usize,
    params: SimulationParams,
    seed: Option<u64>,
    filters: Option<SiteFilters>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, SeqLibError> {
    let mut rng = build_rng(seed);
    let mut report = Report::new();

    let lib = SeqLib::with_params(ninds, nsites, params, &mut rng)?;
    let lib = apply_filters(lib, filters, &mut report)?;

    let header = vec![lib.seqs().shape_header()];
    OutputFile::from_option(output, Some(header)).write_seqarray(lib.seqs())?;
    Ok(CommandOutput::new((), report))
}

/// Read a sequence array, optionally filter its sites, and write its
/// summary statistics. Nothing is written if the array is empty.
pub fn seqlib_stats(
    input: &PathBuf,
    filters: Option<SiteFilters>,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<Option<Statistics>>, SeqLibError> {
    let mut report = Report::new();
    let seqs = read_seqarray(input)?;

    // MAF is only needed (and only required to be defined) when filtering
    let seqs = match filters {
        Some(_) => apply_filters(SeqLib::from_array(seqs)?, filters, &mut report)?.into_seqs(),
        None => seqs,
    };

    let stats = calculate_statistics(&seqs);
    match &stats {
        Some(stats) => write_tsv([stats], &OutputFile::from_option(output, None))?,
        None => report.add_issue("seqs array is empty".to_string()),
    }
    Ok(CommandOutput::new(stats, report))
}

/// Read a sequence array and write the per-site MAF and missing fraction table.
pub fn seqlib_sites(
    input: &PathBuf,
    output: Option<&PathBuf>,
) -> Result<CommandOutput<()>, SeqLibError> {
    let report = Report::new();
    let lib = SeqLib::from_array(read_seqarray(input)?)?;
    write_tsv(lib.site_summaries(), &OutputFile::from_option(output, None))?;
    Ok(CommandOutput::new((), report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::{seqarray_test_case_01, temp_seqfile};

    fn write_test_case_01() -> tempfile::NamedTempFile {
        let file = temp_seqfile();
        OutputFile::new(file.path(), None)
            .write_seqarray(&seqarray_test_case_01())
            .unwrap();
        file
    }

    #[test]
    fn test_site_filters_from_options() {
        assert_eq!(SiteFilters::from_options(None, None), None);
        assert_eq!(
            SiteFilters::from_options(Some(0.1), None),
            Some(SiteFilters {
                min_maf: 0.1,
                max_missing: 1.0
            })
        );
    }

    #[test]
    fn test_seqlib_simulate_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        let params = SimulationParams::default();
        seqlib_simulate(6, 12, params, Some(9), None, Some(&first)).unwrap();
        seqlib_simulate(6, 12, params, Some(9), None, Some(&second)).unwrap();

        let a = read_seqarray(&first).unwrap();
        assert_eq!(a.dim(), (6, 12));
        assert_eq!(a, read_seqarray(&second).unwrap());
    }

    #[test]
    fn test_seqlib_simulate_exact_output() {
        let file = temp_seqfile();
        let path = file.path().to_path_buf();
        seqlib_simulate(10, 20, SimulationParams::default(), Some(42), None, Some(&path)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("#ninds=10 nsites=20"));
        assert_eq!(lines.next(), Some("CCTTGGGACAACTTATAGNA"));
        assert_eq!(lines.last(), Some("CCCTGNGAGCACNTANANNA"));
    }

    #[test]
    fn test_seqlib_simulate_filtered() {
        let file = temp_seqfile();
        let path = file.path().to_path_buf();
        let filters = SiteFilters::from_options(Some(0.6), None);
        // no site can have MAF above 0.5
        let output =
            seqlib_simulate(5, 10, SimulationParams::default(), Some(1), filters, Some(&path))
                .unwrap();
        assert_eq!(output.report.entries().len(), 1);
        let seqs = read_seqarray(&path).unwrap();
        // the header keeps the row count when every site is dropped
        assert_eq!(seqs.dim(), (5, 0));
    }

    #[test]
    fn test_seqlib_stats() {
        let input = write_test_case_01();
        let out = temp_seqfile();
        let result = seqlib_stats(
            &input.path().to_path_buf(),
            None,
            Some(&out.path().to_path_buf()),
        )
        .unwrap();
        let stats = result.value.unwrap();
        assert_eq!(stats.invariant_sites, 1);
        assert!(result.report.is_empty());
    }

    #[test]
    fn test_seqlib_stats_empty_after_filter() {
        let input = write_test_case_01();
        let result = seqlib_stats(
            &input.path().to_path_buf(),
            SiteFilters::from_options(Some(0.9), None),
            None,
        )
        .unwrap();
        assert!(result.value.is_none());
        assert!(result
            .report
            .entries()
            .iter()
            .any(|e| e == "seqs array is empty"));
    }

    #[test]
    fn test_seqlib_sites() {
        let input = write_test_case_01();
        let out = temp_seqfile();
        seqlib_sites(&input.path().to_path_buf(), Some(&out.path().to_path_buf())).unwrap();
        let text = std::fs::read_to_string(out.path()).unwrap();
        assert_eq!(text.lines().count(), 4);
    }
}
