//! Phase 4: Writing to Disk
//!
//! Flushes the staged [`OutputTree`] under the output root. Parent
//! directories are created as needed and existing files are overwritten, so
//! re-running on unchanged inputs reproduces the same tree byte for byte.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::filesystem::OutputTree;

/// Write every staged file under `output_root`.
pub fn execute(tree: &OutputTree, output_root: &Path) -> Result<()> {
    for (relative_path, content) in tree.files() {
        let full_path = output_root.join(relative_path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
                message: format!("Failed to create directory '{}': {}", parent.display(), e),
            })?;
        }

        fs::write(&full_path, content).map_err(|e| Error::Filesystem {
            message: format!("Failed to write file '{}': {}", full_path.display(), e),
        })?;
    }

    debug!("Wrote {} files to {}", tree.len(), output_root.display());
    Ok(())
}
