//! The bucketed inverted index.
//!
//! An [`InvertedIndex`] is a fixed array of 27 [`Bucket`]s. Each bucket holds
//! the words whose first character routes to it, and each word holds the files
//! it occurs in with a count per file.
//!
//! ```text
//! InvertedIndex
//! ├── Bucket 0 (a/A)
//! │   ├── WordEntry "apple"  → [a.txt × 2, b.txt × 1]
//! │   └── WordEntry "and"    → [a.txt × 7]
//! ├── ...
//! └── Bucket 26 (everything else)
//! ```
//!
//! The index only grows: words and occurrences are added or incremented, never
//! removed, until [`InvertedIndex::clear`] tears the whole structure down.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::{BUCKET_COUNT, normalize, route};
use crate::error::Result;
use crate::index::posting::{Bucket, WordEntry};
use crate::index::search::{MatchPolicy, Search};

/// Rule deciding whether two tokens are the same word at build time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordIdentity {
    /// Exact string comparison: `Cat` and `cat` are separate entries.
    #[default]
    CaseSensitive,
    /// ASCII case-insensitive comparison: `Cat` and `cat` share the entry of
    /// whichever spelling was seen first.
    CaseInsensitive,
}

impl WordIdentity {
    pub fn same_word(self, stored: &str, token: &str) -> bool {
        match self {
            WordIdentity::CaseSensitive => stored == token,
            WordIdentity::CaseInsensitive => stored.eq_ignore_ascii_case(token),
        }
    }
}

/// What a single [`InvertedIndex::index_word`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// A new word entry was created.
    NewWord,
    /// An existing word was seen in a new file.
    NewFile,
    /// An existing word was seen again in a file it was already recorded for.
    Incremented,
    /// The token normalized to nothing and was ignored.
    Skipped,
}

/// Summary counts over the whole index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Number of word entries.
    pub words: usize,
    /// Number of (word, file) occurrence records.
    pub occurrences: usize,
    /// Sum of all occurrence counts.
    pub tokens: u64,
    /// Number of non-empty buckets.
    pub buckets_used: usize,
}

/// In-memory inverted index over a set of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    buckets: [Bucket; BUCKET_COUNT],
    identity: WordIdentity,
}

impl InvertedIndex {
    /// Create an empty index with case-sensitive word identity.
    pub fn new() -> Self {
        Self::with_identity(WordIdentity::default())
    }

    /// Create an empty index using the given word identity rule.
    pub fn with_identity(identity: WordIdentity) -> Self {
        InvertedIndex {
            buckets: std::array::from_fn(Bucket::new),
            identity,
        }
    }

    /// The word identity rule used when inserting.
    pub fn identity(&self) -> WordIdentity {
        self.identity
    }

    /// Record one occurrence of `word` in `file`.
    ///
    /// The word is normalized and routed to its bucket. The bucket is scanned
    /// for an existing entry; if one is found its occurrence for `file` is
    /// incremented or created, otherwise a new entry is appended.
    ///
    /// A word that normalizes to the empty string is not indexed and returns
    /// [`IndexOutcome::Skipped`]. Every other normalized word starts with an
    /// ASCII letter, so nothing inserted through this method lands in
    /// [`OTHER_BUCKET`](crate::analysis::OTHER_BUCKET); the bucket exists so
    /// routing is total, and stays empty.
    ///
    /// On allocation failure nothing is modified and
    /// [`WordexError::AllocationFailure`](crate::WordexError::AllocationFailure)
    /// is returned.
    pub fn index_word(&mut self, word: &str, file: &str) -> Result<IndexOutcome> {
        let token = normalize(word);
        if token.is_empty() {
            return Ok(IndexOutcome::Skipped);
        }

        let identity = self.identity;
        let bucket = &mut self.buckets[route(&token)];

        match bucket.position(&token, identity) {
            Some(position) => {
                if bucket.entry_mut(position).record(file)? {
                    Ok(IndexOutcome::NewFile)
                } else {
                    Ok(IndexOutcome::Incremented)
                }
            }
            None => {
                debug!("new word {token:?} in bucket {}", bucket.index());
                let entry = WordEntry::try_new(token, file)?;
                bucket.push(entry)?;
                Ok(IndexOutcome::NewWord)
            }
        }
    }

    /// Look up the stored entry for `word` under the index's identity rule.
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        let token = normalize(word);
        if token.is_empty() {
            return None;
        }
        let bucket = &self.buckets[route(&token)];
        bucket
            .position(&token, self.identity)
            .map(|position| &bucket.entries()[position])
    }

    /// Search the index. See [`Search`].
    pub fn search(&self, word: &str, policy: MatchPolicy) -> Search<'_> {
        Search::new(self, word, policy)
    }

    /// All buckets, in index order.
    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// The bucket at `index`, if it exists.
    pub fn bucket(&self, index: usize) -> Option<&Bucket> {
        self.buckets.get(index)
    }

    /// Every entry with its bucket index: buckets in order, then entries in
    /// first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &WordEntry)> + '_ {
        self.buckets
            .iter()
            .flat_map(|bucket| {
                bucket
                    .entries()
                    .iter()
                    .map(move |e| (bucket.index(), e))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Bucket::is_empty)
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats::default();
        for bucket in &self.buckets {
            if !bucket.is_empty() {
                stats.buckets_used += 1;
            }
            for entry in bucket.entries() {
                stats.words += 1;
                stats.occurrences += entry.file_count();
                stats.tokens += entry.total_count();
            }
        }
        stats
    }

    /// Release every entry. The 27 buckets remain, empty.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        debug!("index cleared");
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}
