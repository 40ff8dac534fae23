//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading/writing both plaintext and gzip-compressed
//! input/output.

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::Write;
use std::io::{self, BufWriter};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::SeqLibError;
use crate::sequences::SequenceArray;

/// Read a [`SequenceArray`] from a file with one individual per line.
///
/// The text is parsed with [`SequenceArray`]'s `FromStr`: lines starting
/// with `#` (e.g. headers written by [`OutputFile`]) and blank lines are
/// skipped, and a `#ninds=N nsites=0` header restores an array with no
/// sites. Gzip-compressed input is detected automatically.
pub fn read_seqarray(filepath: impl Into<PathBuf>) -> Result<SequenceArray, SeqLibError> {
    let input_file = InputFile::new(filepath);
    let mut text = String::new();
    input_file.reader()?.read_to_string(&mut text)?;
    text.parse()
}

/// Check if a file is a gzipped by looking for the magic numbers
fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let mut file = File::open(file_path.as_ref())?;
    let mut buffer = [0; 2];
    match file.read_exact(&mut buffer) {
        Ok(()) => Ok(buffer == [0x1f, 0x8b]),
        // files shorter than the magic number are plaintext
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and
/// gzip-compressed input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// If the file is gzip-compressed (detected by its magic number), this
    /// method will automatically handle the decompression.
    pub fn reader(&self) -> io::Result<BufReader<Box<dyn Read>>> {
        let file = File::open(&self.filepath)?;
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This abstracts writing both plaintext and gzip-compressed files, or
/// standard output.
pub struct OutputFile {
    destination: OutputDestination,
    pub header: Option<Vec<String>>,
}

impl OutputFile {
    /// Constructs a new `OutputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - the path to the file. If the file extension is `.gz`,
    /// `OutputFile` will write gzip-compressed output.
    /// * `header` - optional lines written first, each prefixed with `#`.
    pub fn new(filepath: impl Into<PathBuf>, header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
            header,
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout(header: Option<Vec<String>>) -> Self {
        Self {
            destination: OutputDestination::Stdout,
            header,
        }
    }

    /// Use `path` if given, standard output otherwise.
    pub fn from_option(path: Option<&PathBuf>, header: Option<Vec<String>>) -> Self {
        match path {
            Some(path) => Self::new(path, header),
            None => Self::new_stdout(header),
        }
    }

    /// Opens the file and returns a writer, writing the header if one is set.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let mut writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => {
                let is_gzip = path.extension().map_or(false, |ext| ext == "gz");
                if is_gzip {
                    Box::new(BufWriter::new(GzEncoder::new(
                        File::create(path)?,
                        Compression::default(),
                    )))
                } else {
                    Box::new(BufWriter::new(File::create(path)?))
                }
            }
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        if let Some(entries) = &self.header {
            for entry in entries {
                writeln!(writer, "#{}", entry)?;
            }
        }
        Ok(writer)
    }

    /// Write `seqs` in the one-individual-per-line format.
    pub fn write_seqarray(&self, seqs: &SequenceArray) -> Result<(), SeqLibError> {
        let mut writer = self.writer()?;
        write!(writer, "{}", seqs)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seqlib::SeqLib;
    use crate::test_utilities::{seqarray_test_case_01, temp_seqfile};

    #[test]
    fn test_write_read_plaintext() {
        let seqs = seqarray_test_case_01();
        let file = temp_seqfile();
        let header = Some(vec!["ninds=4 nsites=3".to_string()]);
        OutputFile::new(file.path(), header)
            .write_seqarray(&seqs)
            .unwrap();
        let read = read_seqarray(file.path()).unwrap();
        assert_eq!(read, seqs);
    }

    #[test]
    fn test_write_read_gzip() {
        let seqs = seqarray_test_case_01();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqs.txt.gz");
        OutputFile::new(&path, None).write_seqarray(&seqs).unwrap();
        assert!(is_gzipped_file(&path).unwrap());
        let read = read_seqarray(&path).unwrap();
        assert_eq!(read, seqs);
    }

    #[test]
    fn test_read_invalid_base() {
        let file = temp_seqfile();
        std::fs::write(file.path(), "ACGT\nACQT\n").unwrap();
        assert!(matches!(
            read_seqarray(file.path()),
            Err(SeqLibError::InvalidBase('Q'))
        ));
    }

    #[test]
    fn test_read_empty_file() {
        let file = temp_seqfile();
        let seqs = read_seqarray(file.path()).unwrap();
        assert!(seqs.is_empty());
    }

    #[test]
    fn test_write_read_filtered_to_no_sites() {
        let lib = SeqLib::from_array(seqarray_test_case_01()).unwrap();
        let filtered = lib.filter_seqlib(0.9, 1.0).unwrap();
        assert_eq!(filtered.seqs().dim(), (4, 0));

        for name in ["no_sites.txt", "no_sites.txt.gz"] {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join(name);
            let header = Some(vec![filtered.seqs().shape_header()]);
            OutputFile::new(&path, header)
                .write_seqarray(filtered.seqs())
                .unwrap();
            let read = read_seqarray(&path).unwrap();
            assert_eq!(read.dim(), (4, 0));
            assert_eq!(&read, filtered.seqs());
        }
    }

    #[test]
    fn test_read_trims_whitespace() {
        let file = temp_seqfile();
        std::fs::write(file.path(), "# header\n  AAA\nAAN \n\tATN\nATN\r\n\n").unwrap();
        let read = read_seqarray(file.path()).unwrap();
        assert_eq!(read, seqarray_test_case_01());
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(read, text.parse::<SequenceArray>().unwrap());
    }
}
