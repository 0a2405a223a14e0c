//! # Merge Configuration
//!
//! This module defines [`MergeConfig`], the layout conventions a merge run
//! follows: where generated sources live inside each edition root, where the
//! merged package is written, and how generated controllers are patched.
//!
//! Every field has a default (see [`crate::defaults`]), so an empty YAML
//! document is a valid configuration and most runs need no file at all:
//!
//! ```
//! use tb_rest_merge::config;
//!
//! let config = config::parse("collapse_numbered_duplicates: true").unwrap();
//! assert!(config.collapse_numbered_duplicates);
//! assert_eq!(config.package, "tb_rest_client");
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::defaults;
use crate::edition::{ArtifactCategory, Edition};
use crate::error::{Error, Result};

/// Layout and behavior settings for one merge run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Directory the merged package is written to.
    pub output_root: PathBuf,
    /// Python package name used in rendered import statements.
    pub package: String,
    /// Subpath of each edition root holding generated models.
    pub models_source: PathBuf,
    /// Subpath of each edition root holding generated controllers.
    pub controllers_source: PathBuf,
    /// Import statement patched into every controller.
    pub client_import: String,
    /// 1-based line number the client import is written to.
    pub client_import_line: usize,
    /// Drop numbered duplicate operations (`save_device1`) whose base exists.
    pub collapse_numbered_duplicates: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            output_root: defaults::default_output_root(),
            package: defaults::PACKAGE.to_string(),
            models_source: PathBuf::from(defaults::MODELS_SOURCE),
            controllers_source: PathBuf::from(defaults::CONTROLLERS_SOURCE),
            client_import: defaults::default_client_import(),
            client_import_line: defaults::CLIENT_IMPORT_LINE,
            collapse_numbered_duplicates: false,
        }
    }
}

impl MergeConfig {
    /// Source directory of a category inside an edition root.
    pub fn source_dir(&self, root: &Path, category: ArtifactCategory) -> PathBuf {
        match category {
            ArtifactCategory::Models => root.join(&self.models_source),
            ArtifactCategory::Controllers => root.join(&self.controllers_source),
        }
    }

    /// Python module path of an edition's controller package
    /// (`tb_rest_client.api.api_ce`).
    pub fn module_path(&self, category: ArtifactCategory, edition: Edition) -> String {
        format!(
            "{}.{}",
            self.package,
            category.edition_dir(edition).replace('/', ".")
        )
    }
}

/// Parse a YAML merge configuration.
pub fn parse(yaml: &str) -> Result<MergeConfig> {
    if yaml.trim().is_empty() {
        return Ok(MergeConfig::default());
    }
    let config: MergeConfig = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some("Known keys: output_root, package, models_source, controllers_source, client_import, client_import_line, collapse_numbered_duplicates".to_string()),
    })?;
    validate(&config)?;
    Ok(config)
}

/// Read and parse a YAML merge configuration file.
pub fn from_file(path: &Path) -> Result<MergeConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse(&content)
}

fn validate(config: &MergeConfig) -> Result<()> {
    if config.client_import_line == 0 {
        return Err(Error::ConfigParse {
            message: "client_import_line must be at least 1".to_string(),
            hint: Some("Line numbers are 1-based".to_string()),
        });
    }
    if config.package.trim().is_empty() {
        return Err(Error::ConfigParse {
            message: "package must not be empty".to_string(),
            hint: None,
        });
    }
    Ok(())
}
