//! Read-only views of a finished index.
//!
//! Both views walk the index in the same order: buckets 0 to 26, entries in
//! first-seen order, occurrences in first-seen order.
//!
//! ## Flat export format
//!
//! One `|`-delimited record per word entry, after a header row:
//!
//! ```text
//! Index|Word|FileCount|WordCount|Filenames
//! 2|cat|2|3|a.txt,b.txt
//! 3|dog|1|1|a.txt
//! ```
//!
//! `WordCount` is the total over all files. `Filenames` is itself a
//! comma-separated record, so a filename containing `,` or `"` is quoted
//! there and survives a read back. [`read_records`] parses this
//! format back for inspection; it is never loaded into an index.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use log::info;
use serde::Serialize;

use crate::error::{Result, WordexError};
use crate::index::inverted::InvertedIndex;
use crate::index::posting::WordEntry;

/// Header of the flat export.
pub const EXPORT_HEADER: [&str; 5] = ["Index", "Word", "FileCount", "WordCount", "Filenames"];

/// Field delimiter of the flat export.
pub const EXPORT_DELIMITER: u8 = b'|';

const FILE_DELIMITER: u8 = b',';

/// One exported word entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub index: usize,
    pub word: String,
    pub file_count: usize,
    pub word_count: u64,
    pub files: Vec<String>,
}

impl ExportRecord {
    fn from_entry(bucket: usize, entry: &WordEntry) -> Self {
        ExportRecord {
            index: bucket,
            word: entry.word().to_string(),
            file_count: entry.file_count(),
            word_count: entry.total_count(),
            files: entry
                .occurrences()
                .iter()
                .map(|o| o.file().to_string())
                .collect(),
        }
    }
}

/// One line of the display table.
///
/// A word occupies one row per file. The word-level columns are only set on
/// the word's first row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow<'a> {
    pub index: Option<usize>,
    pub word: Option<&'a str>,
    pub file_count: Option<usize>,
    pub file: &'a str,
    pub count: u32,
}

/// Export records for every entry, in export order.
pub fn records(index: &InvertedIndex) -> impl Iterator<Item = ExportRecord> + '_ {
    index
        .entries()
        .map(|(bucket, entry)| ExportRecord::from_entry(bucket, entry))
}

/// Rows of the display table, in export order.
pub fn display_rows(index: &InvertedIndex) -> Vec<DisplayRow<'_>> {
    let mut rows = Vec::new();
    for (bucket, entry) in index.entries() {
        for (i, occurrence) in entry.occurrences().iter().enumerate() {
            let first = i == 0;
            rows.push(DisplayRow {
                index: first.then_some(bucket),
                word: first.then_some(entry.word()),
                file_count: first.then_some(entry.file_count()),
                file: occurrence.file(),
                count: occurrence.count(),
            });
        }
    }
    rows
}

/// Write the flat export to `writer`. Returns the number of records written.
pub fn write_export<W: Write>(index: &InvertedIndex, writer: W) -> Result<usize> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv.write_record(EXPORT_HEADER)?;

    let mut written = 0;
    for record in records(index) {
        csv.write_record([
            record.index.to_string(),
            record.word,
            record.file_count.to_string(),
            record.word_count.to_string(),
            join_files(&record.files)?,
        ])?;
        written += 1;
    }

    csv.flush()?;
    Ok(written)
}

/// Write the flat export to a file at `path`, replacing any existing file.
pub fn save(index: &InvertedIndex, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|e| WordexError::file_open(path, e))?;
    let written = write_export(index, BufWriter::new(file))?;
    info!("saved {written} records to {}", path.display());
    Ok(written)
}

/// Parse a flat export back into records.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ExportRecord>> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(EXPORT_DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    if headers.iter().ne(EXPORT_HEADER) {
        return Err(WordexError::invalid_export(format!(
            "unexpected header: {headers:?}"
        )));
    }

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let field = |i: usize| row.get(i).unwrap_or_default();

        records.push(ExportRecord {
            index: parse_number(field(0), "Index")?,
            word: field(1).to_string(),
            file_count: parse_number(field(2), "FileCount")?,
            word_count: parse_number(field(3), "WordCount")?,
            files: split_files(field(4))?,
        });
    }

    Ok(records)
}

fn join_files(files: &[String]) -> Result<String> {
    if files.is_empty() {
        return Ok(String::new());
    }

    let mut csv = csv::WriterBuilder::new()
        .delimiter(FILE_DELIMITER)
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    csv.write_record(files)?;

    let mut bytes = csv
        .into_inner()
        .map_err(|e| WordexError::invalid_export(e.to_string()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    String::from_utf8(bytes)
        .map_err(|e| WordexError::invalid_export(e.to_string()))
}

fn split_files(field: &str) -> Result<Vec<String>> {
    let mut csv = csv::ReaderBuilder::new()
        .delimiter(FILE_DELIMITER)
        .has_headers(false)
        .from_reader(field.as_bytes());

    match csv.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, column: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| {
            WordexError::invalid_export(format!("{column} is not a number: {value:?}"))
        })
}
