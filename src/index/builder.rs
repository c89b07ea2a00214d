//! File ingestion.
//!
//! [`IndexBuilder`] walks a list of files in order, scans each one token by
//! token and folds every token into an [`InvertedIndex`]. Builds are
//! all-or-nothing with respect to opening: if any file cannot be opened the
//! build stops with [`WordexError::FileOpen`] and the remaining files are not
//! read. Words indexed before the failure stay in the index.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::AddAssign;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Serialize;

use crate::analysis::TokenScanner;
use crate::engine::config::{DEFAULT_MAX_WORD_LEN, IndexConfig};
use crate::error::{Result, WordexError};
use crate::index::inverted::{IndexOutcome, InvertedIndex};

/// Counters collected while building.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Files fully scanned.
    pub files: usize,
    /// Raw tokens read.
    pub tokens: u64,
    /// Tokens that produced a word after normalization.
    pub indexed: u64,
    /// Word entries created.
    pub new_words: u64,
}

impl AddAssign for BuildStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.tokens += other.tokens;
        self.indexed += other.indexed;
        self.new_words += other.new_words;
    }
}

/// Drives file ingestion into an index.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    max_word_len: usize,
}

impl IndexBuilder {
    pub fn new(config: &IndexConfig) -> Self {
        Self::with_max_word_len(config.max_word_len)
    }

    pub fn with_max_word_len(max_word_len: usize) -> Self {
        IndexBuilder {
            max_word_len: max_word_len.max(1),
        }
    }

    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// Index every file in `files`, in order.
    ///
    /// Returns only after every file was opened and read to the end. The
    /// first file that cannot be opened or read aborts the build.
    pub fn build<I, P>(&self, index: &mut InvertedIndex, files: I) -> Result<BuildStats>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut stats = BuildStats::default();
        for path in files {
            stats += self.index_file(index, path.as_ref())?;
        }
        Ok(stats)
    }

    /// Index `files[*indexed..]`, moving `indexed` past each file as soon as
    /// it is fully read.
    ///
    /// On error `indexed` points at the file that failed, so a later call
    /// resumes there and never reads a finished file twice.
    pub fn build_pending(
        &self,
        index: &mut InvertedIndex,
        files: &[PathBuf],
        indexed: &mut usize,
    ) -> Result<BuildStats> {
        let mut stats = BuildStats::default();
        while let Some(path) = files.get(*indexed) {
            stats += self.index_file(index, path)?;
            *indexed += 1;
        }
        Ok(stats)
    }

    /// Index a single file. The handle is closed before this returns.
    pub fn index_file(&self, index: &mut InvertedIndex, path: &Path) -> Result<BuildStats> {
        let file = File::open(path).map_err(|e| WordexError::file_open(path, e))?;
        info!("indexing {}", path.display());

        let file_id = path.to_string_lossy();
        let stats = self.index_reader(index, BufReader::new(file), &file_id)?;
        info!(
            "indexed {}: {} tokens, {} new words",
            path.display(),
            stats.tokens,
            stats.new_words
        );
        Ok(stats)
    }

    /// Index everything readable from `reader` under the identifier `file_id`.
    pub fn index_reader<R: BufRead>(
        &self,
        index: &mut InvertedIndex,
        reader: R,
        file_id: &str,
    ) -> Result<BuildStats> {
        let mut stats = BuildStats::default();

        for token in TokenScanner::new(reader, self.max_word_len) {
            let token = token?;
            stats.tokens += 1;
            match index.index_word(&token, file_id)? {
                IndexOutcome::Skipped => debug!("skipped token {token:?} in {file_id}"),
                IndexOutcome::NewWord => {
                    stats.indexed += 1;
                    stats.new_words += 1;
                }
                IndexOutcome::NewFile | IndexOutcome::Incremented => stats.indexed += 1,
            }
        }

        stats.files = 1;
        Ok(stats)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::with_max_word_len(DEFAULT_MAX_WORD_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_index_reader_counts() {
        let mut index = InvertedIndex::new();
        let stats = IndexBuilder::default()
            .index_reader(&mut index, Cursor::new("cat cat -- dog"), "a.txt")
            .unwrap();

        assert_eq!(
            stats,
            BuildStats {
                files: 1,
                tokens: 4,
                indexed: 3,
                new_words: 2,
            }
        );
        assert_eq!(
            index.get("cat").unwrap().occurrence("a.txt").unwrap().count(),
            2
        );
    }

    #[test]
    fn test_repeated_word_in_one_file_terminates() {
        let mut index = InvertedIndex::new();
        let text = "echo ".repeat(1000);
        IndexBuilder::default()
            .index_reader(&mut index, Cursor::new(text), "a.txt")
            .unwrap();

        let entry = index.get("echo").unwrap();
        assert_eq!(entry.file_count(), 1);
        assert_eq!(entry.total_count(), 1000);
    }

    #[test]
    fn test_width_bound_splits_long_words() {
        let mut index = InvertedIndex::new();
        IndexBuilder::with_max_word_len(4)
            .index_reader(&mut index, Cursor::new("abcdefgh"), "a.txt")
            .unwrap();

        assert!(index.get("abcd").is_some());
        assert!(index.get("efgh").is_some());
        assert!(index.get("abcdefgh").is_none());
    }

    #[test]
    fn test_build_pending_stops_on_the_failing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let c = dir.path().join("c.txt");
        std::fs::write(&a, "alpha alpha").unwrap();
        std::fs::write(&c, "gamma").unwrap();
        let files = vec![a, b.clone(), c];

        let builder = IndexBuilder::default();
        let mut index = InvertedIndex::new();
        let mut indexed = 0;

        let result = builder.build_pending(&mut index, &files, &mut indexed);
        assert!(result.is_err());
        assert_eq!(indexed, 1);

        std::fs::write(&b, "beta").unwrap();
        let stats = builder
            .build_pending(&mut index, &files, &mut indexed)
            .unwrap();

        assert_eq!(stats.files, 2);
        assert_eq!(indexed, 3);
        assert_eq!(index.get("alpha").unwrap().total_count(), 2);
        assert!(index.get("beta").is_some());
        assert!(index.get("gamma").is_some());
    }

    #[test]
    fn test_stats_add() {
        let mut total = BuildStats::default();
        total += BuildStats {
            files: 1,
            tokens: 3,
            indexed: 2,
            new_words: 1,
        };
        total += BuildStats {
            files: 1,
            tokens: 1,
            indexed: 1,
            new_words: 1,
        };
        assert_eq!(total.files, 2);
        assert_eq!(total.tokens, 4);
        assert_eq!(total.new_words, 2);
    }
}
