//! Case-insensitive word lookup.
//!
//! A query is normalized and routed exactly like an indexed word, then the
//! whole target bucket is scanned. Every entry accepted by the
//! [`MatchPolicy`] is yielded, so a case-sensitive index holding both `Cat`
//! and `cat` returns two hits for the query `CAT`.

use serde::{Deserialize, Serialize};

use crate::analysis::{normalize, route};
use crate::index::inverted::InvertedIndex;
use crate::index::posting::{FileOccurrence, WordEntry};

/// Comparison used between a query and stored words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Same length, equal ignoring ASCII case.
    #[default]
    Exact,
    /// Stored word starts with the query, ignoring ASCII case.
    Prefix,
}

impl MatchPolicy {
    pub fn matches(self, stored: &str, query: &str) -> bool {
        match self {
            MatchPolicy::Exact => stored.eq_ignore_ascii_case(query),
            MatchPolicy::Prefix => stored
                .as_bytes()
                .get(..query.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(query.as_bytes())),
        }
    }
}

/// One matching word and where it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    /// The stored word that matched.
    pub word: &'a str,
    /// Per-file occurrences in first-seen order.
    pub occurrences: &'a [FileOccurrence],
    /// Sum of the per-file counts.
    pub total: u64,
}

impl<'a> SearchHit<'a> {
    fn from_entry(entry: &'a WordEntry) -> Self {
        SearchHit {
            word: entry.word(),
            occurrences: entry.occurrences(),
            total: entry.total_count(),
        }
    }

    pub fn file_count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Lazy iterator over the hits for one query.
///
/// The iterator borrows the index, so the index cannot change while a search
/// is alive. Cloning it, or calling [`InvertedIndex::search`] again with the
/// same arguments, yields the same hits.
#[derive(Debug, Clone)]
pub struct Search<'a> {
    query: String,
    policy: MatchPolicy,
    entries: std::slice::Iter<'a, WordEntry>,
}

impl<'a> Search<'a> {
    pub(crate) fn new(index: &'a InvertedIndex, word: &str, policy: MatchPolicy) -> Self {
        let query = normalize(word);
        let entries: &'a [WordEntry] = if query.is_empty() {
            &[]
        } else {
            index
                .bucket(route(&query))
                .map(|bucket| bucket.entries())
                .unwrap_or(&[])
        };

        Search {
            query,
            policy,
            entries: entries.iter(),
        }
    }

    /// The normalized query.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }
}

impl<'a> Iterator for Search<'a> {
    type Item = SearchHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query.as_str();
        let policy = self.policy;
        self.entries
            .by_ref()
            .find(|entry| policy.matches(entry.word(), query))
            .map(SearchHit::from_entry)
    }
}
