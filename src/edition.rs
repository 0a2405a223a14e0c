//! Edition tags and artifact categories.

use std::fmt;

/// One of the two generated client editions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edition {
    /// Community edition
    Ce,
    /// Enterprise edition
    Pe,
}

impl Edition {
    /// Both editions, community first.
    pub const ALL: [Edition; 2] = [Edition::Ce, Edition::Pe];

    /// Short tag used in directory names (`api_ce`, `models_pe`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            Edition::Ce => "ce",
            Edition::Pe => "pe",
        }
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Kind of generated artifact being merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactCategory {
    /// Data model classes
    Models,
    /// API controller classes
    Controllers,
}

impl ArtifactCategory {
    /// Categories in processing order.
    pub const ALL: [ArtifactCategory; 2] = [ArtifactCategory::Models, ArtifactCategory::Controllers];

    /// Name of the output directory holding this category (`models` / `api`).
    pub fn output_dir(self) -> &'static str {
        match self {
            ArtifactCategory::Models => "models",
            ArtifactCategory::Controllers => "api",
        }
    }

    /// Directory for one edition of this category, relative to the output root.
    ///
    /// ```
    /// use tb_rest_merge::edition::{ArtifactCategory, Edition};
    ///
    /// assert_eq!(ArtifactCategory::Controllers.edition_dir(Edition::Pe), "api/api_pe");
    /// ```
    pub fn edition_dir(self, edition: Edition) -> String {
        let dir = self.output_dir();
        format!("{}/{}_{}", dir, dir, edition.tag())
    }
}

impl fmt::Display for ArtifactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactCategory::Models => f.write_str("models"),
            ArtifactCategory::Controllers => f.write_str("controllers"),
        }
    }
}
