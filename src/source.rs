//! Source file admission.
//!
//! Files reach the index in two steps. A [`FileValidator`] checks each
//! candidate (extension, readable, non-empty, not already loaded) and the
//! accepted ones are appended to a [`SourceFileList`], which keeps them in
//! load order. The index builder only ever reads from the list.

use std::fmt;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use ahash::AHashSet;
use log::{info, warn};

use crate::engine::config::IndexConfig;
use crate::error::{Result, WordexError};

/// Why a candidate file was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    WrongExtension,
    NotOpenable,
    Empty,
    Duplicate,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Rejection::WrongExtension => "wrong extension",
            Rejection::NotOpenable => "could not open / not found",
            Rejection::Empty => "file is empty",
            Rejection::Duplicate => "duplicate file",
        };
        f.write_str(reason)
    }
}

/// A candidate that was turned away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub path: PathBuf,
    pub reason: Rejection,
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of admitting a batch of candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Admission {
    pub accepted: Vec<PathBuf>,
    pub rejected: Vec<Rejected>,
}

/// Ordered, duplicate-free list of accepted source files.
#[derive(Debug, Clone, Default)]
pub struct SourceFileList {
    files: Vec<PathBuf>,
    seen: AHashSet<PathBuf>,
}

impl SourceFileList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file. Fails with [`WordexError::DuplicateFile`] if it is
    /// already in the list.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        if self.seen.contains(&path) {
            return Err(WordexError::DuplicateFile(path));
        }
        self.seen.insert(path.clone());
        self.files.push(path);
        Ok(())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.seen.contains(path)
    }

    /// Number of files, which is also the position of the next appended file.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.files
    }

    /// Files appended at or after position `mark`.
    pub fn since(&self, mark: usize) -> &[PathBuf] {
        self.files.get(mark..).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.seen.clear();
    }
}

impl<'a> IntoIterator for &'a SourceFileList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Checks candidate files before they are loaded.
#[derive(Debug, Clone)]
pub struct FileValidator {
    extension: String,
}

impl FileValidator {
    pub fn new(config: &IndexConfig) -> Self {
        Self::with_extension(config.extension.clone())
    }

    /// Accept files with the given extension (without the leading dot).
    pub fn with_extension(extension: impl Into<String>) -> Self {
        FileValidator {
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Check one candidate against the filesystem and the current list.
    pub fn validate(
        &self,
        path: &Path,
        list: &SourceFileList,
    ) -> std::result::Result<(), Rejection> {
        self.check(path, list).map_err(|err| match err {
            WordexError::WrongExtension { .. } => Rejection::WrongExtension,
            WordexError::EmptyFile(_) => Rejection::Empty,
            WordexError::DuplicateFile(_) => Rejection::Duplicate,
            _ => Rejection::NotOpenable,
        })
    }

    /// Like [`validate`](Self::validate), but reports the failure as a
    /// [`WordexError`] carrying the path and, for open failures, the I/O cause.
    pub fn check(&self, path: &Path, list: &SourceFileList) -> Result<()> {
        let has_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension));
        if !has_extension {
            return Err(WordexError::WrongExtension {
                path: path.to_path_buf(),
                extension: self.extension.clone(),
            });
        }

        let file = File::open(path).map_err(|e| WordexError::file_open(path, e))?;
        let metadata = file
            .metadata()
            .map_err(|e| WordexError::file_open(path, e))?;
        if !metadata.is_file() {
            return Err(WordexError::file_open(
                path,
                io::Error::other("not a regular file"),
            ));
        }
        if metadata.len() == 0 {
            return Err(WordexError::EmptyFile(path.to_path_buf()));
        }

        if list.contains(path) {
            return Err(WordexError::DuplicateFile(path.to_path_buf()));
        }

        Ok(())
    }

    /// Validate each candidate in order and append the accepted ones to
    /// `list`. Rejections are collected, not fatal.
    pub fn admit<I, P>(&self, list: &mut SourceFileList, candidates: I) -> Admission
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut admission = Admission::default();

        for candidate in candidates {
            let path = candidate.as_ref();
            let verdict = self
                .validate(path, list)
                .and_then(|()| list.push(path).map_err(|_| Rejection::Duplicate));

            match verdict {
                Ok(()) => {
                    info!("accepted {}", path.display());
                    admission.accepted.push(path.to_path_buf());
                }
                Err(reason) => {
                    warn!("rejected {}: {reason}", path.display());
                    admission.rejected.push(Rejected {
                        path: path.to_path_buf(),
                        reason,
                    });
                }
            }
        }

        admission
    }
}

impl Default for FileValidator {
    fn default() -> Self {
        Self::new(&IndexConfig::default())
    }
}
