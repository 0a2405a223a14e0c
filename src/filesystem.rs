//! In-memory staging of the merged output tree.
//!
//! Everything a run produces (artifact copies, index registries, facade
//! modules) is staged here first and written to disk in one pass at the end,
//! so a run that fails halfway leaves the previous output untouched. Paths are
//! relative to the output root and kept sorted, which makes the write order
//! and any listing of the tree deterministic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Staged output files as relative path -> text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTree {
    files: BTreeMap<PathBuf, String>,
}

impl OutputTree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn put<P: AsRef<Path>>(&mut self, path: P, content: impl Into<String>) -> Result<()> {
        let path = Self::checked(path.as_ref())?;
        self.files.insert(path, content.into());
        Ok(())
    }

    /// Append to a file, creating it empty first if needed.
    pub fn append<P: AsRef<Path>>(&mut self, path: P, content: &str) -> Result<()> {
        let path = Self::checked(path.as_ref())?;
        self.files.entry(path).or_default().push_str(content);
        Ok(())
    }

    /// Get a file's content by path
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Check if a file exists
    pub fn exists<P: AsRef<Path>>(&self, path: P) -> bool {
        self.files.contains_key(path.as_ref())
    }

    /// Get the number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all files as (path, content) pairs in path order
    pub fn files(&self) -> impl Iterator<Item = (&PathBuf, &String)> {
        self.files.iter()
    }

    fn checked(path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() || path.is_absolute() {
            return Err(Error::Filesystem {
                message: format!(
                    "Staged path must be relative and non-empty: '{}'",
                    path.display()
                ),
            });
        }
        Ok(path.to_path_buf())
    }
}
