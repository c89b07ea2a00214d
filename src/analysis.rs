//! Text analysis for Wordex.
//!
//! Raw file contents pass through three small stages before they reach the
//! index:
//!
//! ```text
//! bytes → TokenScanner → raw token → normalize → word → route → bucket
//! ```
//!
//! - [`tokenizer`]: whitespace-delimited, width-bounded token scanning
//! - [`normalizer`]: punctuation stripping
//! - [`router`]: first-character bucket selection

pub mod normalizer;
pub mod router;
pub mod tokenizer;

pub use normalizer::normalize;
pub use router::{BUCKET_COUNT, OTHER_BUCKET, route};
pub use tokenizer::TokenScanner;
