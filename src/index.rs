//! The inverted index and the operations that read and write it.
//!
//! - [`inverted`]: the 27-bucket structure and insertion
//! - [`posting`]: bucket, word and file occurrence records
//! - [`search`]: case-insensitive lookup
//! - [`builder`]: whole-file ingestion
//! - [`updater`]: incremental ingestion of newly added files

pub mod builder;
pub mod inverted;
pub mod posting;
pub mod search;
pub mod updater;

pub use builder::{BuildStats, IndexBuilder};
pub use inverted::{IndexOutcome, IndexStats, InvertedIndex, WordIdentity};
pub use posting::{Bucket, FileOccurrence, WordEntry};
pub use search::{MatchPolicy, Search, SearchHit};
pub use updater::{IncrementalUpdater, UpdateReport};
