//! Implementation of the phases of a merge run.
//!
//! ## Overview
//!
//! A run goes through 4 phases:
//! 1. Inventory - List the generated files of each edition tree
//! 2. Reconciliation - Compare editions file by file and partition controller operations
//! 3. Emission - Stage copies, index registries and facade methods
//! 4. Writing to Disk - Flush the staged tree to the output root
//!
//! Phases 1-3 run once per artifact category (models, then controllers);
//! phase 4 runs once at the end, after the facades are rendered.

use crate::edition::ArtifactCategory;

// Phase modules
pub mod emit;
pub mod inventory;
pub mod orchestrator;
pub mod reconcile;
pub mod write;

/// Outcome of reconciling one artifact category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub category: ArtifactCategory,
    /// Filenames identical in both editions
    pub identical: usize,
    /// Filenames present in both editions with different content
    pub divergent: usize,
    pub ce_only: usize,
    pub pe_only: usize,
    /// Methods appended to the shared base facade
    pub shared_operations: usize,
    /// Methods appended to the community facade
    pub ce_operations: usize,
    /// Methods appended to the enterprise facade
    pub pe_operations: usize,
    /// Controller class -> numbered duplicate operation names
    pub duplicate_operations: Vec<(String, Vec<String>)>,
    /// Controllers whose operations could not be read
    pub skipped_controllers: Vec<String>,
    /// Controllers too short to carry the client import line
    pub unpatched: Vec<String>,
}

impl CategoryReport {
    pub fn new(category: ArtifactCategory) -> Self {
        Self {
            category,
            identical: 0,
            divergent: 0,
            ce_only: 0,
            pe_only: 0,
            shared_operations: 0,
            ce_operations: 0,
            pe_operations: 0,
            duplicate_operations: Vec::new(),
            skipped_controllers: Vec::new(),
            unpatched: Vec::new(),
        }
    }

    /// Number of logical filenames processed.
    pub fn files(&self) -> usize {
        self.identical + self.divergent + self.ce_only + self.pe_only
    }
}

/// Outcome of a complete merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub categories: Vec<CategoryReport>,
    /// Number of files staged for writing, registries and facades included
    pub files_written: usize,
}

impl RunReport {
    pub fn category(&self, category: ArtifactCategory) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Total number of warnings raised during the run.
    pub fn warnings(&self) -> usize {
        self.categories
            .iter()
            .map(|c| c.duplicate_operations.len() + c.skipped_controllers.len() + c.unpatched.len())
            .sum()
    }
}
