//! # Wordex
//!
//! A small in-memory inverted index over an explicitly loaded set of text
//! files. For every word it records which files contain it and how many times.
//!
//! ## Features
//!
//! - 27-bucket index keyed by a word's first letter
//! - Incremental updates that only read newly added files
//! - Case-insensitive exact or prefix lookup
//! - Flat `|`-delimited export
//!
//! ## Example
//!
//! ```no_run
//! use wordex::{Engine, IndexConfig};
//!
//! let mut engine = Engine::new(IndexConfig::default())?;
//! engine.load_files(["a.txt", "b.txt"]);
//! engine.create()?;
//!
//! for hit in engine.search("cat")? {
//!     println!("{}: {} times in {} files", hit.word, hit.total, hit.file_count());
//! }
//! # Ok::<(), wordex::WordexError>(())
//! ```

pub mod analysis;
mod engine;
mod error;
pub mod export;
pub mod index;
pub mod source;

// Re-exports for the public API
pub use engine::Engine;
pub use engine::config::{IndexConfig, IndexConfigBuilder};
pub use error::{Result, WordexError};
pub use export::{DisplayRow, ExportRecord};
pub use index::{
    BuildStats, FileOccurrence, IndexBuilder, IndexStats, IncrementalUpdater, InvertedIndex,
    MatchPolicy, SearchHit, UpdateReport, WordEntry, WordIdentity,
};
pub use source::{FileValidator, Rejected, Rejection, SourceFileList};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
