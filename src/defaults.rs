//! Default values for tb-rest-merge configuration.
//!
//! This module provides centralized default values for the input and output
//! layout, ensuring the CLI, the config file loader and the tests agree on
//! where generated files live.

use std::path::PathBuf;

/// Python package the merged client is published as.
pub const PACKAGE: &str = "tb_rest_client";

/// Subpath of an edition root holding generated models.
pub const MODELS_SOURCE: &str = "swagger_client/models";

/// Subpath of an edition root holding generated API controllers.
pub const CONTROLLERS_SOURCE: &str = "swagger_client/api";

/// Index-registry filename in every output directory.
pub const REGISTRY_FILENAME: &str = "__init__.py";

/// 1-based line of a generated controller that imports the runtime client.
pub const CLIENT_IMPORT_LINE: usize = 20;

/// Returns the default output root: the package directory in the current
/// working directory.
pub fn default_output_root() -> PathBuf {
    PathBuf::from(PACKAGE)
}

/// Returns the import statement written over [`CLIENT_IMPORT_LINE`] in every
/// merged controller.
pub fn default_client_import() -> String {
    format!("from {}.api_client import ApiClient", PACKAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_root_is_package_dir() {
        assert_eq!(default_output_root(), PathBuf::from("tb_rest_client"));
    }

    #[test]
    fn test_default_client_import() {
        assert_eq!(
            default_client_import(),
            "from tb_rest_client.api_client import ApiClient"
        );
    }
}
