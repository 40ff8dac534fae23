//! The [`SequenceArray`] newtype.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::base::Base;
use crate::error::SeqLibError;
use crate::SeqArray;

/// A newtype around an individuals-by-sites [`Array2`] of [`Base`] calls.
///
/// Every row has the same number of sites; this holds by construction since
/// the inner storage is a rectangular array.
#[derive(Clone, Debug, PartialEq)]
pub struct SequenceArray(SeqArray);

impl Deref for SequenceArray {
    type Target = SeqArray;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<SeqArray> for SequenceArray {
    fn from(array: SeqArray) -> Self {
        SequenceArray(array)
    }
}

impl SequenceArray {
    /// Wrap an existing [`Array2`] of bases.
    pub fn new(array: SeqArray) -> Self {
        Self(array)
    }

    /// Build a [`SequenceArray`] from one string per individual.
    ///
    /// Characters are validated against {A, C, G, T, N} (case-insensitive).
    /// All rows must have the same length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, SeqLibError> {
        let ninds = rows.len();
        let nsites = rows.first().map_or(0, |row| row.as_ref().chars().count());

        let mut flat = Vec::with_capacity(ninds * nsites);
        for (i, row) in rows.iter().enumerate() {
            let before = flat.len();
            for c in row.as_ref().chars() {
                flat.push(Base::try_from(c)?);
            }
            let found = flat.len() - before;
            if found != nsites {
                return Err(SeqLibError::RaggedRows {
                    row: i,
                    expected: nsites,
                    found,
                });
            }
        }
        Ok(Self(Array2::from_shape_vec((ninds, nsites), flat)?))
    }

    /// The number of individuals (rows).
    pub fn ninds(&self) -> usize {
        self.0.nrows()
    }

    /// The number of sites (columns).
    pub fn nsites(&self) -> usize {
        self.0.ncols()
    }

    /// Return whether the array has no individuals or no sites.
    pub fn is_empty(&self) -> bool {
        self.ninds() == 0 || self.nsites() == 0
    }

    /// A view of all the calls at one site.
    pub fn site(&self, index: usize) -> ArrayView1<'_, Base> {
        self.0.column(index)
    }

    /// A view of all the calls of one individual.
    pub fn individual(&self, index: usize) -> ArrayView1<'_, Base> {
        self.0.row(index)
    }

    /// Count the missing (`N`) calls at each site.
    pub fn count_missing(&self) -> Array1<usize> {
        self.0
            .axis_iter(Axis(1))
            .map(|site| site.iter().filter(|b| b.is_missing()).count())
            .collect()
    }

    /// Return a new [`SequenceArray`] holding only the sites at `indices`,
    /// in the order given. All individuals are kept.
    pub fn select_sites(&self, indices: &[usize]) -> Self {
        let selected = Array2::from_shape_fn((self.ninds(), indices.len()), |(row, col)| {
            self.0[[row, indices[col]]]
        });
        Self(selected)
    }

    /// Take the inner [`Array2`].
    pub fn into_inner(self) -> SeqArray {
        self.0
    }

    /// The `ninds=N nsites=M` header line (without the leading `#`).
    ///
    /// An array with individuals but no sites has no rows in the text
    /// form, so readers rely on this header to recover its shape.
    pub fn shape_header(&self) -> String {
        format!("ninds={} nsites={}", self.ninds(), self.nsites())
    }
}

/// Parse a `ninds=N nsites=M` header. Other fields are ignored.
fn parse_shape_header(header: &str) -> Option<(usize, usize)> {
    let mut ninds = None;
    let mut nsites = None;
    for field in header.split_whitespace() {
        match field.split_once('=') {
            Some(("ninds", value)) => ninds = value.parse().ok(),
            Some(("nsites", value)) => nsites = value.parse().ok(),
            _ => {}
        }
    }
    Some((ninds?, nsites?))
}

impl fmt::Display for SequenceArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.rows() {
            let line: String = row.iter().map(|b| b.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for SequenceArray {
    type Err = SeqLibError;

    /// Parse one individual per line. Surrounding whitespace is trimmed,
    /// and blank lines and lines starting with `#` are skipped.
    ///
    /// If there are no rows, a `#ninds=N nsites=0` header (see
    /// [`SequenceArray::shape_header`]) gives an `(N, 0)` array.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut shape = None;
        let mut rows = Vec::new();
        for line in s.lines().map(str::trim) {
            if let Some(header) = line.strip_prefix('#') {
                shape = shape.or_else(|| parse_shape_header(header));
            } else if !line.is_empty() {
                rows.push(line);
            }
        }
        match shape {
            Some((ninds, 0)) if rows.is_empty() => {
                Ok(Self(SeqArray::from_shape_vec((ninds, 0), Vec::new())?))
            }
            _ => Self::from_rows(&rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utilities::seqarray_test_case_01;

    #[test]
    fn test_from_rows_shape() {
        let seqs = seqarray_test_case_01();
        assert_eq!(seqs.ninds(), 4);
        assert_eq!(seqs.nsites(), 3);
        assert_eq!(seqs[[2, 1]], Base::T);
        assert_eq!(seqs[[3, 2]], Base::N);
    }

    #[test]
    fn test_from_rows_ragged() {
        let result = SequenceArray::from_rows(&["ACGT", "ACG"]);
        assert!(matches!(
            result,
            Err(SeqLibError::RaggedRows {
                row: 1,
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_from_rows_invalid_base() {
        let result = SequenceArray::from_rows(&["ACGT", "ACGX"]);
        assert!(matches!(result, Err(SeqLibError::InvalidBase('X'))));
    }

    #[test]
    fn test_empty_arrays() {
        let no_rows = SequenceArray::from_rows::<&str>(&[]).unwrap();
        assert!(no_rows.is_empty());
        assert_eq!(no_rows.nsites(), 0);

        let no_sites = SequenceArray::from_rows(&["", ""]).unwrap();
        assert!(no_sites.is_empty());
        assert_eq!(no_sites.ninds(), 2);
    }

    #[test]
    fn test_count_missing() {
        let seqs = seqarray_test_case_01();
        assert_eq!(seqs.count_missing().to_vec(), vec![0, 0, 3]);
    }

    #[test]
    fn test_select_sites_keeps_order() {
        let seqs = seqarray_test_case_01();
        let selected = seqs.select_sites(&[0, 2]);
        assert_eq!(selected.ninds(), 4);
        assert_eq!(selected.nsites(), 2);
        assert_eq!(selected.site(0), seqs.site(0));
        assert_eq!(selected.site(1), seqs.site(2));

        let none = seqs.select_sites(&[]);
        assert_eq!(none.ninds(), 4);
        assert_eq!(none.nsites(), 0);
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let seqs = seqarray_test_case_01();
        let text = seqs.to_string();
        assert_eq!(text, "AAA\nAAN\nATN\nATN\n");
        let parsed: SequenceArray = format!("# comment\n{}", text).parse().unwrap();
        assert_eq!(parsed, seqs);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed: SequenceArray = "  AAA\nAAN  \n\tATN\nATN\r\n".parse().unwrap();
        assert_eq!(parsed, seqarray_test_case_01());
    }

    #[test]
    fn test_shape_header_recovers_sites_free_array() {
        let no_sites = seqarray_test_case_01().select_sites(&[]);
        assert_eq!(no_sites.shape_header(), "ninds=4 nsites=0");
        let text = format!("#{}\n{}", no_sites.shape_header(), no_sites);
        assert_eq!(text, "#ninds=4 nsites=0\n\n\n\n\n");
        let parsed: SequenceArray = text.parse().unwrap();
        assert_eq!(parsed.dim(), (4, 0));
        assert_eq!(parsed, no_sites);

        // without the header the row count is lost
        let parsed: SequenceArray = "\n\n\n\n".parse().unwrap();
        assert_eq!(parsed.dim(), (0, 0));
    }

    #[test]
    fn test_shape_header_ignored_when_rows_present() {
        let parsed: SequenceArray = "#ninds=9 nsites=0\nAC\nGT\n".parse().unwrap();
        assert_eq!(parsed.dim(), (2, 2));
        assert_eq!(parse_shape_header("ninds=3 nsites=x"), None);
        assert_eq!(parse_shape_header("source=sim ninds=3 nsites=0"), Some((3, 0)));
    }
}
