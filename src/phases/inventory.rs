//! Phase 1: Inventory
//!
//! Lists the generated files of one artifact category in one edition tree.
//! Only regular files directly under the category directory are returned; no
//! recursion and no extension filtering, since the generator writes one flat
//! directory per category. An unreadable directory aborts the run.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::edition::Edition;
use crate::error::{Error, Result};
use crate::naming;

/// A generated file found in one edition's tree.
#[derive(Debug, Clone)]
pub struct FileDescriptor {
    /// Bare filename (`device_controller_api.py`)
    pub filename: String,
    /// Directory the file was found in
    pub source_dir: PathBuf,
    /// Edition the file belongs to
    pub edition: Edition,
    class_name: OnceCell<String>,
}

impl FileDescriptor {
    pub fn new(filename: impl Into<String>, source_dir: impl Into<PathBuf>, edition: Edition) -> Self {
        Self {
            filename: filename.into(),
            source_dir: source_dir.into(),
            edition,
            class_name: OnceCell::new(),
        }
    }

    /// Full path of the source file.
    pub fn path(&self) -> PathBuf {
        self.source_dir.join(&self.filename)
    }

    /// Filename without extension, which is also the Python module name.
    pub fn stem(&self) -> &str {
        naming::file_stem(&self.filename)
    }

    /// Class name assigned at registration time, if any.
    pub fn class_name(&self) -> Option<&str> {
        self.class_name.get().map(String::as_str)
    }

    /// Record the class name exported by this file. May only happen once.
    pub fn set_class_name(&self, class_name: String) -> Result<()> {
        self.class_name
            .set(class_name)
            .map_err(|_| Error::ClassNameAlreadySet {
                filename: self.filename.clone(),
                existing: self.class_name().unwrap_or_default().to_string(),
            })
    }
}

/// List the regular files directly under `dir`, sorted by filename.
pub fn list_artifacts(dir: &Path, edition: Edition) -> Result<Vec<FileDescriptor>> {
    let inventory_error = |message: String| Error::Inventory {
        edition: edition.to_string(),
        path: dir.to_path_buf(),
        message,
    };

    let metadata = fs::metadata(dir).map_err(|e| inventory_error(e.to_string()))?;
    if !metadata.is_dir() {
        return Err(inventory_error("not a directory".to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| inventory_error(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(filename) = entry.file_name().to_str() else {
            return Err(inventory_error(format!(
                "non UTF-8 filename {:?}",
                entry.file_name()
            )));
        };
        files.push(FileDescriptor::new(filename, dir, edition));
    }

    debug!(
        "Found {} {} files in {}",
        files.len(),
        edition,
        dir.display()
    );
    Ok(files)
}
