use serde::{Deserialize, Serialize};

use crate::error::{Result, WordexError};
use crate::index::inverted::WordIdentity;
use crate::index::search::MatchPolicy;

/// Default maximum token width in bytes.
pub const DEFAULT_MAX_WORD_LEN: usize = 64;

/// Default accepted source file extension.
pub const DEFAULT_EXTENSION: &str = "txt";

/// Configuration for an [`Engine`](crate::Engine).
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// match_policy = "prefix"
/// word_identity = "case_insensitive"
/// max_word_len = 32
/// extension = "txt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// How search compares queries with stored words.
    pub match_policy: MatchPolicy,
    /// How the builder decides two tokens are the same word.
    pub word_identity: WordIdentity,
    /// Longest raw token scanned in one piece, in bytes.
    pub max_word_len: usize,
    /// Accepted source file extension, without the dot.
    pub extension: String,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            word_identity: WordIdentity::default(),
            max_word_len: DEFAULT_MAX_WORD_LEN,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn builder() -> IndexConfigBuilder {
        IndexConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_word_len == 0 {
            return Err(WordexError::invalid_config(
                "max_word_len must be at least 1",
            ));
        }
        if self.extension.trim_start_matches('.').is_empty() {
            return Err(WordexError::invalid_config("extension must not be empty"));
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default)]
pub struct IndexConfigBuilder {
    config: IndexConfig,
}

impl IndexConfigBuilder {
    pub fn match_policy(mut self, policy: MatchPolicy) -> Self {
        self.config.match_policy = policy;
        self
    }

    pub fn word_identity(mut self, identity: WordIdentity) -> Self {
        self.config.word_identity = identity;
        self
    }

    pub fn max_word_len(mut self, max_word_len: usize) -> Self {
        self.config.max_word_len = max_word_len;
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.config.extension = extension.into();
        self
    }

    pub fn build(self) -> IndexConfig {
        self.config
    }
}
