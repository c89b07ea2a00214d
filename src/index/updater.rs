//! Incremental index updates.
//!
//! An update admits new candidate files into the source list and then builds
//! only the files past the indexed mark. Files indexed by an earlier build or
//! update are never scanned again, so each update costs the size of the new
//! files, not of the whole corpus.

use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::index::builder::{BuildStats, IndexBuilder};
use crate::index::inverted::InvertedIndex;
use crate::source::{FileValidator, Rejected, SourceFileList};

/// Outcome of one update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Candidates accepted by this update. Files that were already pending
    /// are indexed too but only show up in `stats`.
    pub indexed: Vec<PathBuf>,
    /// Candidates turned away by validation.
    pub rejected: Vec<Rejected>,
    pub stats: BuildStats,
}

impl UpdateReport {
    /// True when no file was read and the index was left untouched.
    pub fn is_noop(&self) -> bool {
        self.indexed.is_empty() && self.stats.files == 0
    }
}

/// Extends an existing index with newly added files.
#[derive(Debug, Clone, Default)]
pub struct IncrementalUpdater {
    validator: FileValidator,
    builder: IndexBuilder,
}

impl IncrementalUpdater {
    pub fn new(validator: FileValidator, builder: IndexBuilder) -> Self {
        IncrementalUpdater { validator, builder }
    }

    /// Validate `new_files`, append the accepted ones to `files` and index
    /// every file from position `indexed` on.
    ///
    /// `indexed` is the number of leading files of `files` already in the
    /// index. It advances one file at a time, so when a file that passed
    /// validation cannot be opened at build time the call fails with
    /// `indexed` pointing at that file and the files before it are not read
    /// again by the next call. Rejected candidates are reported, not fatal.
    pub fn update<I, P>(
        &self,
        index: &mut InvertedIndex,
        files: &mut SourceFileList,
        indexed: &mut usize,
        new_files: I,
    ) -> Result<UpdateReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let admission = self.validator.admit(files, new_files);

        if files.since(*indexed).is_empty() {
            info!("no new valid files were added to the index");
            return Ok(UpdateReport {
                indexed: Vec::new(),
                rejected: admission.rejected,
                stats: BuildStats::default(),
            });
        }

        let stats = self
            .builder
            .build_pending(index, files.as_slice(), indexed)?;
        info!(
            "update indexed {} file(s), {} new words",
            stats.files, stats.new_words
        );

        Ok(UpdateReport {
            indexed: admission.accepted,
            rejected: admission.rejected,
            stats,
        })
    }
}
