//! # Error Handling
//!
//! This module defines the centralized error type for `tb-rest-merge`. It uses
//! the `thiserror` library to describe every failure mode the merge can hit,
//! with enough context (paths, controller names) to fix the inputs and re-run.
//!
//! ## Fatal vs. non-fatal
//!
//! Most variants abort the run: a missing edition tree, an unreadable source
//! file or a failed write leaves nothing sensible to generate. The one
//! exception is [`Error::Introspection`], which the reconciler catches per
//! controller, logs, and records in the run report.
//!
//! The `Result` type alias is used to return `Result<T, Error>` from
//! library functions; the binary wraps it in `anyhow` at the top level.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for tb-rest-merge operations
#[derive(Error, Debug)]
pub enum Error {
    /// An error occurred while parsing a merge configuration file.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An edition's source directory could not be listed.
    #[error("Cannot read {edition} source directory '{}': {message}", path.display())]
    Inventory {
        edition: String,
        path: PathBuf,
        message: String,
    },

    /// A generated source file could not be read.
    #[error("Failed to read '{}': {message}", path.display())]
    Read { path: PathBuf, message: String },

    /// A generated controller could not be parsed into operations.
    ///
    /// Non-fatal: the reconciler logs it and moves on to the next artifact.
    #[error("Cannot introspect controller '{controller}': {message}")]
    Introspection { controller: String, message: String },

    /// A class name was assigned twice to the same file descriptor.
    #[error("Class name for '{filename}' already set to '{existing}'")]
    ClassNameAlreadySet { filename: String, existing: String },

    /// An error occurred with the staged output tree.
    #[error("Filesystem operation error: {message}")]
    Filesystem { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
