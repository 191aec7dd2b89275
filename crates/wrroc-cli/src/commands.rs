use std::path::{Path, PathBuf};

use colored::Colorize;
use serde_json::json;
use wrroc_merge::MergeReport;
use wrroc_store::{persist, InMemoryGraphStore};

use crate::cli::*;
use crate::config::CliConfig;
use crate::pipeline::{self, BatchSummary, CrateSummary};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = CliConfig::load(cli.config.as_deref(), &cwd)?;
    match cli.command {
        Command::Append(args) => cmd_append(args, config, &cli.format),
        Command::Batch(args) => cmd_batch(args, config, &cli.format),
        Command::Inspect(args) => cmd_inspect(args, &config, &cli.format),
    }
}

fn cmd_append(args: AppendArgs, mut config: CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if let Some(user) = args.user {
        config.user = user;
    }
    let workdir = args.workdir.unwrap_or_else(|| default_workdir(&args.archive));
    let merged = pipeline::append_crate(&args.archive, &workdir, &config)?.summary;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&merged)?),
        OutputFormat::Text => print_merged(&merged),
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs, mut config: CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if let Some(user) = args.user {
        config.user = user;
    }
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(rdf_format) = args.rdf_format {
        config.format = rdf_format;
    }

    let store = InMemoryGraphStore::new();
    let summary = pipeline::run_batch(&args.dir, &config, args.fail_fast, &store)?;
    let header = [
        format!("WRROC aggregate written {}", chrono::Utc::now().to_rfc3339()),
        format!("{} crates merged, {} failed", summary.merged.len(), summary.failed.len()),
    ];
    let written = persist(&store, &config.output, config.format, &header)?;

    match format {
        OutputFormat::Json => {
            let doc = json!({
                "output": config.output,
                "format": config.format,
                "triples": written,
                "merged": summary.merged,
                "failed": summary.failed,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        OutputFormat::Text => print_batch(&summary, &config.output, written),
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs, config: &CliConfig, format: &OutputFormat) -> anyhow::Result<()> {
    let report = pipeline::inspect_crate(&args.archive, config)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("{} {}", "Crate".bold(), args.archive.display());
            print_report(&report);
        }
    }
    Ok(())
}

/// `runs/a.zip` extracts into `runs/a`. Any other name gets a `.d` suffix
/// so the directory never collides with the archive itself.
fn default_workdir(archive: &Path) -> PathBuf {
    let is_zip = archive
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    if is_zip {
        return archive.with_extension("");
    }
    let mut name = archive.as_os_str().to_owned();
    name.push(".d");
    PathBuf::from(name)
}

fn print_merged(merged: &CrateSummary) {
    println!("{} Merged {}", "✓".green().bold(), merged.archive.display());
    println!("  Crate: {}", merged.identity.to_string().cyan());
    print_report(&merged.report);
    println!("  Written: {}", merged.updated.display());
}

fn print_report(report: &MergeReport) {
    println!("  Workflow: {}", report.workflow_id.yellow());
    for id in &report.new_file_ids {
        println!("  {} {}", "added:".green(), id);
    }
    for id in &report.updated_ids {
        println!("  {} {}", "refreshed:".blue(), id);
    }
    if !report.new_param_ids.is_empty() {
        println!("  Outputs: {}", report.new_param_ids.join(", "));
    }
    if report.is_empty() {
        println!("  No provenance records.");
    }
}

fn print_batch(summary: &BatchSummary, output: &Path, written: usize) {
    for merged in &summary.merged {
        println!("{} {} ({})", "✓".green(), merged.archive.display(), merged.report);
    }
    for failed in &summary.failed {
        println!("{} {}: {}", "✗".red(), failed.archive.display(), failed.error);
    }
    println!(
        "{} crates merged, {} failed, {} triples written to {}",
        summary.merged.len().to_string().bold(),
        summary.failed.len().to_string().bold(),
        written,
        output.display()
    );
}
