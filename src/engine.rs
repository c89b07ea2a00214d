//! Session-level entry point.
//!
//! [`Engine`] owns one [`InvertedIndex`], the [`SourceFileList`] it was built
//! from and the [`IndexConfig`] that governs both. It maps one-to-one onto the
//! operations a driver offers: load files, create, display, search, update and
//! save.
//!
//! Files are loaded first and indexed later. The engine remembers how many of
//! the loaded files are already indexed, so calling [`Engine::create`] twice
//! never counts a file twice.

pub mod config;

use std::path::Path;

use log::info;

use crate::error::{Result, WordexError};
use crate::export::{self, DisplayRow, ExportRecord};
use crate::index::builder::{BuildStats, IndexBuilder};
use crate::index::inverted::{IndexStats, InvertedIndex};
use crate::index::search::{MatchPolicy, Search, SearchHit};
use crate::index::updater::{IncrementalUpdater, UpdateReport};
use crate::source::{Admission, FileValidator, SourceFileList};

use self::config::IndexConfig;

/// An index together with its source files and configuration.
#[derive(Debug)]
pub struct Engine {
    config: IndexConfig,
    index: InvertedIndex,
    files: SourceFileList,
    validator: FileValidator,
    builder: IndexBuilder,
    /// Number of leading entries of `files` already indexed.
    indexed: usize,
}

impl Engine {
    /// Create an engine with an empty index.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        Ok(Engine {
            index: InvertedIndex::with_identity(config.word_identity),
            files: SourceFileList::new(),
            validator: FileValidator::new(&config),
            builder: IndexBuilder::new(&config),
            indexed: 0,
            config,
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    pub fn files(&self) -> &SourceFileList {
        &self.files
    }

    /// Loaded files that have not been indexed yet.
    pub fn pending_files(&self) -> &[std::path::PathBuf] {
        self.files.since(self.indexed)
    }

    /// Whether every loaded file has been indexed.
    pub fn is_up_to_date(&self) -> bool {
        self.indexed == self.files.len()
    }

    /// Validate candidates and add the accepted ones to the source list
    /// without indexing them.
    pub fn load_files<I, P>(&mut self, candidates: I) -> Admission
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.validator.admit(&mut self.files, candidates)
    }

    /// Index every loaded file that is not indexed yet.
    ///
    /// Aborts on the first file that cannot be opened. Files indexed before
    /// the failure are kept and counted as indexed; the failing file and the
    /// ones after it stay pending.
    pub fn create(&mut self) -> Result<BuildStats> {
        if self.is_up_to_date() {
            info!(
                "all {} loaded file(s) are already indexed",
                self.files.len()
            );
            return Ok(BuildStats::default());
        }

        let stats = self.builder.build_pending(
            &mut self.index,
            self.files.as_slice(),
            &mut self.indexed,
        )?;

        info!(
            "index created: {} file(s), {} words",
            stats.files,
            self.index.stats().words
        );
        Ok(stats)
    }

    /// Add new files and index only those.
    ///
    /// Loaded files that were never indexed are indexed first. Indexing
    /// advances one file at a time as in [`Engine::create`]: if a new file
    /// cannot be opened, the files before it stay indexed and are not read
    /// again by a later call.
    pub fn update<I, P>(&mut self, candidates: I) -> Result<UpdateReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let updater = IncrementalUpdater::new(self.validator.clone(), self.builder.clone());
        updater.update(
            &mut self.index,
            &mut self.files,
            &mut self.indexed,
            candidates,
        )
    }

    /// Search with the configured match policy.
    pub fn search_iter(&self, word: &str) -> Search<'_> {
        self.index.search(word, self.config.match_policy)
    }

    /// Search with an explicit match policy.
    pub fn search_with(&self, word: &str, policy: MatchPolicy) -> Search<'_> {
        self.index.search(word, policy)
    }

    /// Search with the configured match policy, treating no match as
    /// [`WordexError::WordNotFound`].
    pub fn search(&self, word: &str) -> Result<Vec<SearchHit<'_>>> {
        let hits: Vec<SearchHit<'_>> = self.search_iter(word).collect();
        if hits.is_empty() {
            return Err(WordexError::WordNotFound(word.to_string()));
        }
        Ok(hits)
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }

    pub fn display_rows(&self) -> Vec<DisplayRow<'_>> {
        export::display_rows(&self.index)
    }

    pub fn records(&self) -> Vec<ExportRecord> {
        export::records(&self.index).collect()
    }

    /// Write the flat export to `path`.
    pub fn save(&self, path: &Path) -> Result<usize> {
        export::save(&self.index, path)
    }

    /// Release the index and forget every loaded file.
    pub fn close(&mut self) {
        self.index.clear();
        self.files.clear();
        self.indexed = 0;
        info!("index released");
    }
}
