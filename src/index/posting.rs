//! Per-word and per-file records held by the index.
//!
//! Both levels are insertion-ordered vectors: a [`Bucket`] keeps its words in
//! first-seen order and a [`WordEntry`] keeps its files in first-seen order.
//! Capacity is reserved before anything is mutated, so a failed allocation
//! never leaves a half-built entry behind.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::index::inverted::WordIdentity;

/// Occurrences of one word in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOccurrence {
    file: String,
    count: u32,
}

impl FileOccurrence {
    fn try_new(file: &str) -> Result<Self> {
        Ok(FileOccurrence {
            file: try_to_owned(file)?,
            count: 1,
        })
    }

    /// File identifier.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Number of times the word was seen in this file. Always at least 1.
    pub fn count(&self) -> u32 {
        self.count
    }

    fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

/// A unique word within a bucket together with the files it occurs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    word: String,
    occurrences: Vec<FileOccurrence>,
}

impl WordEntry {
    /// Create an entry for a word first seen in `file`.
    pub(crate) fn try_new(word: String, file: &str) -> Result<Self> {
        let mut occurrences = Vec::new();
        occurrences.try_reserve_exact(1)?;
        occurrences.push(FileOccurrence::try_new(file)?);
        Ok(WordEntry { word, occurrences })
    }

    /// The word as first seen, case preserved.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Number of distinct files containing the word.
    pub fn file_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Sum of occurrence counts over all files.
    pub fn total_count(&self) -> u64 {
        self.occurrences.iter().map(|o| u64::from(o.count)).sum()
    }

    /// Per-file occurrences in first-seen order.
    pub fn occurrences(&self) -> &[FileOccurrence] {
        &self.occurrences
    }

    /// The occurrence record for `file`, if any.
    pub fn occurrence(&self, file: &str) -> Option<&FileOccurrence> {
        self.occurrences.iter().find(|o| o.file == file)
    }

    /// Record one more sighting in `file`.
    ///
    /// Returns `true` when `file` was not yet recorded for this word.
    pub(crate) fn record(&mut self, file: &str) -> Result<bool> {
        if let Some(occurrence) = self.occurrences.iter_mut().find(|o| o.file == file) {
            occurrence.increment();
            return Ok(false);
        }

        let occurrence = FileOccurrence::try_new(file)?;
        self.occurrences.try_reserve(1)?;
        self.occurrences.push(occurrence);
        Ok(true)
    }
}

/// One of the fixed partitions of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    index: usize,
    entries: Vec<WordEntry>,
}

impl Bucket {
    pub(crate) fn new(index: usize) -> Self {
        Bucket {
            index,
            entries: Vec::new(),
        }
    }

    /// Position of this bucket in the index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the entry for `word`.
    ///
    /// The whole chain is examined until the first match, so a word that sits
    /// behind other words is still found and never duplicated.
    pub(crate) fn position(&self, word: &str, identity: WordIdentity) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| identity.same_word(&entry.word, word))
    }

    pub(crate) fn entry_mut(&mut self, position: usize) -> &mut WordEntry {
        &mut self.entries[position]
    }

    pub(crate) fn push(&mut self, entry: WordEntry) -> Result<()> {
        self.entries.try_reserve(1)?;
        self.entries.push(entry);
        Ok(())
    }

    pub(crate) fn clear(&mut self) {
        self.entries = Vec::new();
    }
}

/// Copy a string, reporting allocation failure instead of aborting.
fn try_to_owned(s: &str) -> Result<String> {
    let mut owned = String::new();
    owned.try_reserve_exact(s.len())?;
    owned.push_str(s);
    Ok(owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_same_file_increments() {
        let mut entry = WordEntry::try_new("cat".to_string(), "a.txt").unwrap();
        assert!(!entry.record("a.txt").unwrap());
        assert!(!entry.record("a.txt").unwrap());

        assert_eq!(entry.file_count(), 1);
        assert_eq!(entry.occurrence("a.txt").unwrap().count(), 3);
        assert_eq!(entry.total_count(), 3);
    }

    #[test]
    fn test_record_new_file_appends() {
        let mut entry = WordEntry::try_new("cat".to_string(), "a.txt").unwrap();
        assert!(entry.record("b.txt").unwrap());
        entry.record("a.txt").unwrap();

        let files: Vec<&str> = entry.occurrences().iter().map(|o| o.file()).collect();
        assert_eq!(files, vec!["a.txt", "b.txt"]);
        assert_eq!(entry.file_count(), 2);
        assert_eq!(entry.total_count(), 3);
    }

    #[test]
    fn test_bucket_finds_entry_behind_others() {
        let mut bucket = Bucket::new(2);
        for word in ["cat", "cow", "cup"] {
            bucket
                .push(WordEntry::try_new(word.to_string(), "a.txt").unwrap())
                .unwrap();
        }

        assert_eq!(bucket.position("cup", WordIdentity::CaseSensitive), Some(2));
        assert_eq!(bucket.position("Cup", WordIdentity::CaseSensitive), None);
        assert_eq!(
            bucket.position("Cup", WordIdentity::CaseInsensitive),
            Some(2)
        );
        assert_eq!(bucket.position("cod", WordIdentity::CaseSensitive), None);
    }

    #[test]
    fn test_bucket_clear_releases_entries() {
        let mut bucket = Bucket::new(0);
        bucket
            .push(WordEntry::try_new("ant".to_string(), "a.txt").unwrap())
            .unwrap();
        bucket.clear();
        assert!(bucket.is_empty());
        assert_eq!(bucket.index(), 0);
    }
}
