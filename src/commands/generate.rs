//! Generate command implementation
//!
//! Merges the two edition trees into the output package:
//! 1. Inventory of models and controllers in both editions
//! 2. Reconciliation of same-named files and controller operations
//! 3. Emission of copies, index registries and the three facades
//! 4. Writing to disk (skipped with `--dry-run`)

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use tb_rest_merge::config::{self, MergeConfig};
use tb_rest_merge::edition::ArtifactCategory;
use tb_rest_merge::output::{emoji, OutputConfig};
use tb_rest_merge::phases::orchestrator;
use tb_rest_merge::phases::RunReport;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Root of the generated community edition client
    #[arg(value_name = "CE_ROOT")]
    pub ce_root: PathBuf,

    /// Root of the generated professional edition client
    #[arg(value_name = "PE_ROOT")]
    pub pe_root: PathBuf,

    /// Output directory (defaults to ./tb_rest_client)
    #[arg(short, long, value_name = "DIR", env = "TB_REST_MERGE_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Path to a YAML merge configuration
    #[arg(short, long, value_name = "FILE", env = "TB_REST_MERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Drop numbered duplicate operations whose base name also exists
    #[arg(long)]
    pub collapse_duplicates: bool,

    /// Show what would be written without touching the disk
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the generate command
pub fn execute(args: GenerateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let start_time = Instant::now();
    let config = resolve_config(&args)?;

    if !args.quiet {
        println!(
            "{} Merging {} (ce) and {} (pe)",
            emoji(&out, "🔀", "[MERGE]"),
            args.ce_root.display(),
            args.pe_root.display()
        );
    }

    let plan = orchestrator::execute(&args.ce_root, &args.pe_root, &config, args.dry_run)
        .context("Merge failed")?;

    if !args.quiet {
        print_summary(&out, &plan.report);
        if args.dry_run {
            println!(
                "\n{} Dry run: {} files would be written to {}",
                emoji(&out, "📋", "[DRY]"),
                plan.report.files_written,
                config.output_root.display()
            );
            for (path, _) in plan.tree.files() {
                println!("   {}", path.display());
            }
        } else {
            println!(
                "\n{} Wrote {} files to {} in {:.2?}",
                emoji(&out, "✅", "[OK]"),
                plan.report.files_written,
                config.output_root.display(),
                start_time.elapsed()
            );
        }
    }

    Ok(())
}

/// Load the configuration file if one was given, then apply CLI overrides.
fn resolve_config(args: &GenerateArgs) -> Result<MergeConfig> {
    let mut config = match &args.config {
        Some(path) => config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MergeConfig::default(),
    };
    if let Some(output) = &args.output {
        config.output_root = output.clone();
    }
    if args.collapse_duplicates {
        config.collapse_numbered_duplicates = true;
    }
    Ok(config)
}

fn print_summary(out: &OutputConfig, report: &RunReport) {
    println!("\n{} Summary:", emoji(out, "📊", "[INFO]"));
    for category in ArtifactCategory::ALL {
        let Some(c) = report.category(category) else {
            continue;
        };
        println!(
            "   {}: {} files ({} identical, {} divergent, {} ce-only, {} pe-only)",
            category,
            c.files(),
            c.identical,
            c.divergent,
            c.ce_only,
            c.pe_only
        );
        if category == ArtifactCategory::Controllers {
            println!(
                "   operations: {} shared, {} ce, {} pe",
                c.shared_operations, c.ce_operations, c.pe_operations
            );
        }
        for (controller, names) in &c.duplicate_operations {
            println!(
                "   {} {} has numbered duplicates: {}",
                emoji(out, "⚠️", "[WARN]"),
                controller,
                names.join(", ")
            );
        }
        for skipped in &c.skipped_controllers {
            println!("   {} skipped {}", emoji(out, "❌", "[ERR]"), skipped);
        }
    }
}
