//! Orchestrator for a complete merge run
//!
//! This module coordinates all phases to provide a clean API for merging the
//! two edition trees. All run state (staged output, registries, facade
//! accumulators) is created here and dropped at the end, so independent runs
//! never share anything.

use std::path::Path;

use log::info;

use super::emit::Emitter;
use super::{inventory, reconcile, write, CategoryReport, RunReport};
use crate::config::MergeConfig;
use crate::edition::{ArtifactCategory, Edition};
use crate::error::Result;
use crate::facade::{FacadeRenderer, FacadeSet, PythonFacadeRenderer};
use crate::filesystem::OutputTree;

/// Staged result of a run, before anything touches the disk.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub tree: OutputTree,
    pub facades: FacadeSet,
    pub report: RunReport,
}

/// Run phases 1-3 for both categories and render the facades.
pub fn plan(
    ce_root: &Path,
    pe_root: &Path,
    config: &MergeConfig,
    renderer: Box<dyn FacadeRenderer>,
) -> Result<MergePlan> {
    let mut emitter = Emitter::new(config.clone(), renderer)?;
    let mut categories = Vec::new();

    for category in ArtifactCategory::ALL {
        let ce_files = inventory::list_artifacts(&config.source_dir(ce_root, category), Edition::Ce)?;
        let pe_files = inventory::list_artifacts(&config.source_dir(pe_root, category), Edition::Pe)?;

        let report = reconcile::execute(category, &ce_files, &pe_files, &mut emitter)?;
        log_category(&report);
        categories.push(report);
    }

    let (tree, facades) = emitter.finish()?;
    let files_written = tree.len();
    Ok(MergePlan {
        tree,
        facades,
        report: RunReport {
            categories,
            files_written,
        },
    })
}

/// Execute the complete merge: plan with the Python renderer, then write the
/// staged tree to `config.output_root` unless `dry_run` is set.
pub fn execute(ce_root: &Path, pe_root: &Path, config: &MergeConfig, dry_run: bool) -> Result<MergePlan> {
    let plan = plan(ce_root, pe_root, config, Box::new(PythonFacadeRenderer))?;

    if dry_run {
        info!("Dry run: {} files not written", plan.tree.len());
    } else {
        write::execute(&plan.tree, &config.output_root)?;
        info!(
            "Wrote {} files to {}",
            plan.tree.len(),
            config.output_root.display()
        );
    }
    Ok(plan)
}

fn log_category(report: &CategoryReport) {
    info!(
        "{}: {} identical, {} divergent, {} ce-only, {} pe-only",
        report.category, report.identical, report.divergent, report.ce_only, report.pe_only
    );
    if report.category == ArtifactCategory::Controllers {
        info!(
            "operations: {} shared, {} ce-specific, {} pe-specific",
            report.shared_operations, report.ce_operations, report.pe_operations
        );
    }
}
