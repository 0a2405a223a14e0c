//! Shared test utilities for integration and E2E tests.
//!
//! Provides a [`MergeFixture`] that lays out two generated edition trees in a
//! temporary directory, and a generator for controller sources shaped like
//! the swagger code generator's output.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = MergeFixture::new()
//!     .with_model(Side::Both, "device.py", "class Device(object):\n    pass\n")
//!     .with_controller(Side::Pe, "admin_controller_api.py", "AdminControllerApi", &[("get_server_time", &[])]);
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::controller_source;
    pub use super::{MergeFixture, Side};
}

/// Which edition tree(s) a fixture file is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Ce,
    Pe,
    Both,
}

/// Source of a generated controller module.
///
/// The runtime-client import sits on line 20 like in generated code; every
/// method documents `async_req` first, then one `:param` per parameter.
pub fn controller_source(class_name: &str, methods: &[(&str, &[&str])]) -> String {
    let mut source = String::from("# coding: utf-8\n\n\"\"\"\n    Generated API\n\"\"\"\n");
    for i in 6..=18 {
        source.push_str(&format!("# generated line {}\n", i));
    }
    source.push_str("import six\n");
    source.push_str("from swagger_client.api_client import ApiClient\n\n\n");
    source.push_str(&format!("class {}(object):\n", class_name));
    source.push_str("    def __init__(self, api_client=None):\n");
    source.push_str("        self.api_client = api_client\n\n");
    for (name, params) in methods {
        source.push_str(&format!("    def {}(self, **kwargs):  # noqa: E501\n", name));
        source.push_str("        \"\"\"Generated operation.  # noqa: E501\n\n");
        source.push_str("        :param async_req bool\n");
        for param in *params {
            source.push_str(&format!("        :param str {}: value (required)\n", param));
        }
        source.push_str("        :return: None\n        \"\"\"\n");
        source.push_str(&format!(
            "        return self.{}_with_http_info(**kwargs)  # noqa: E501\n\n",
            name
        ));
        source.push_str(&format!("    def {}_with_http_info(self, **kwargs):\n", name));
        source.push_str("        pass\n\n");
    }
    source
}

/// Two edition trees and an output directory inside one temp directory.
pub struct MergeFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl MergeFixture {
    /// Create empty model and controller directories for both editions.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        for edition in ["ce", "pe"] {
            for dir in ["swagger_client/models", "swagger_client/api"] {
                temp_dir
                    .child(edition)
                    .child(dir)
                    .create_dir_all()
                    .expect("Failed to create edition directory");
            }
        }
        Self { temp_dir }
    }

    fn write(self, side: Side, dir: &str, filename: &str, content: &str) -> Self {
        let editions: &[&str] = match side {
            Side::Ce => &["ce"],
            Side::Pe => &["pe"],
            Side::Both => &["ce", "pe"],
        };
        for edition in editions {
            self.temp_dir
                .child(edition)
                .child(dir)
                .child(filename)
                .write_str(content)
                .expect("Failed to write fixture file");
        }
        self
    }

    /// Add a model file.
    pub fn with_model(self, side: Side, filename: &str, content: &str) -> Self {
        self.write(side, "swagger_client/models", filename, content)
    }

    /// Add a generated controller with the given methods and parameters.
    pub fn with_controller(
        self,
        side: Side,
        filename: &str,
        class_name: &str,
        methods: &[(&str, &[&str])],
    ) -> Self {
        let source = controller_source(class_name, methods);
        self.write(side, "swagger_client/api", filename, &source)
    }

    /// Add a controller file with arbitrary content.
    pub fn with_controller_text(self, side: Side, filename: &str, content: &str) -> Self {
        self.write(side, "swagger_client/api", filename, content)
    }

    pub fn ce_root(&self) -> PathBuf {
        self.temp_dir.path().join("ce")
    }

    pub fn pe_root(&self) -> PathBuf {
        self.temp_dir.path().join("pe")
    }

    pub fn output(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file of the output tree.
    pub fn read_output(&self, relative: &str) -> String {
        std::fs::read_to_string(self.output().join(relative))
            .unwrap_or_else(|e| panic!("Failed to read output {}: {}", relative, e))
    }
}

impl Default for MergeFixture {
    fn default() -> Self {
        Self::new()
    }
}
