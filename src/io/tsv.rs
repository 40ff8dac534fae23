//! TSV table output.

use serde::Serialize;
use std::io::Write;

use super::OutputFile;
use crate::error::SeqLibError;

/// Write `records` as a tab-separated table with a header row taken from
/// the record's field names.
pub fn write_tsv<S, I>(records: I, output: &OutputFile) -> Result<(), SeqLibError>
where
    S: Serialize,
    I: IntoIterator<Item = S>,
{
    let writer = output.writer()?;
    write_tsv_to(records, writer)
}

/// Like [`write_tsv`], but to any [`Write`].
pub fn write_tsv_to<S, I, W>(records: I, writer: W) -> Result<(), SeqLibError>
where
    S: Serialize,
    I: IntoIterator<Item = S>,
    W: Write,
{
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(writer);
    for record in records {
        tsv.serialize(record)?;
    }
    tsv.flush()?;
    Ok(())
}
