//! Per-crate processing shared by the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use oxrdf::Triple;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use wrroc_merge::{MergeReport, ProvenanceMerger};
use wrroc_pack::unpack;
use wrroc_store::{GraphStore, JsonLdConverter};
use wrroc_types::{CrateIdentity, Graph};

use crate::config::CliConfig;

/// What was done to one crate.
#[derive(Debug, Serialize)]
pub struct CrateSummary {
    pub archive: PathBuf,
    pub identity: CrateIdentity,
    /// The merged document written next to the original metadata.
    pub updated: PathBuf,
    pub report: MergeReport,
}

/// One crate after its provenance has been merged, with the merged graph.
#[derive(Debug)]
pub struct MergedCrate {
    pub summary: CrateSummary,
    pub graph: Graph,
}

impl MergedCrate {
    /// Triples of the merged document under the crate's `arcp://` base.
    pub fn triples(&self) -> anyhow::Result<Vec<Triple>> {
        let identity = &self.summary.identity;
        let mut converter = JsonLdConverter::new(&identity.arcp_base())?
            .with_blank_prefix(format!("c{}b", identity.short_id()));
        converter
            .convert(&self.graph)
            .with_context(|| format!("cannot convert {} to triples", self.summary.archive.display()))
    }
}

/// Extract `archive` into `workdir`, merge, and write the updated document.
pub fn append_crate(archive: &Path, workdir: &Path, config: &CliConfig) -> anyhow::Result<MergedCrate> {
    let identity = CrateIdentity::generate();
    debug!(archive = %archive.display(), %identity, "processing crate");

    let mut docs = unpack(archive, workdir, &config.layout)
        .with_context(|| format!("cannot unpack {}", archive.display()))?;
    let report = ProvenanceMerger::new(config.merge.clone())
        .merge(&mut docs.graph, &docs.records, &identity.base_url(), &config.user)
        .with_context(|| format!("cannot merge provenance of {}", archive.display()))?;
    let updated = wrroc_pack::write_updated(&docs.root, &config.layout, &docs.graph)?;

    Ok(MergedCrate {
        summary: CrateSummary {
            archive: archive.to_path_buf(),
            identity,
            updated,
            report,
        },
        graph: docs.graph,
    })
}

/// Dry run: what a merge would add and refresh. Nothing is written outside
/// a temporary directory.
pub fn inspect_crate(archive: &Path, config: &CliConfig) -> anyhow::Result<MergeReport> {
    let scratch = tempfile::tempdir().context("cannot create scratch directory")?;
    let mut docs = unpack(archive, scratch.path(), &config.layout)
        .with_context(|| format!("cannot unpack {}", archive.display()))?;
    let identity = CrateIdentity::generate();
    let report = ProvenanceMerger::new(config.merge.clone())
        .merge(&mut docs.graph, &docs.records, &identity.base_url(), &config.user)
        .with_context(|| format!("cannot merge provenance of {}", archive.display()))?;
    Ok(report)
}

/// Every `*.zip` directly inside `dir`, sorted by file name.
pub fn discover_archives(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    let mut archives = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("cannot list {}", dir.display()))?;
        let is_zip = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
        if entry.file_type().is_file() && is_zip {
            archives.push(entry.into_path());
        }
    }
    Ok(archives)
}

#[derive(Debug, Serialize)]
pub struct FailedCrate {
    pub archive: PathBuf,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub merged: Vec<CrateSummary>,
    pub failed: Vec<FailedCrate>,
    /// Distinct triples added to the aggregate.
    pub triples: usize,
}

/// Merge every crate in `dir` and load the results into `store`.
///
/// Each crate is extracted into its own temporary directory. Only the
/// summary of a crate outlives its conversion; the merged graph is dropped
/// once its triples are in `store`. A failing crate is logged and skipped
/// unless `fail_fast` is set.
pub fn run_batch(
    dir: &Path,
    config: &CliConfig,
    fail_fast: bool,
    store: &dyn GraphStore,
) -> anyhow::Result<BatchSummary> {
    let archives = discover_archives(dir)?;
    info!(dir = %dir.display(), crates = archives.len(), "starting batch");

    let mut summary = BatchSummary::default();
    for archive in archives {
        let workdir = tempfile::tempdir().context("cannot create work directory")?;
        let loaded = append_crate(&archive, workdir.path(), config)
            .and_then(|merged| Ok((merged.triples()?, merged.summary)));
        match loaded {
            Ok((triples, merged)) => {
                summary.triples += store.extend(triples)?;
                summary.merged.push(merged);
            }
            Err(e) if fail_fast => return Err(e),
            Err(e) => {
                warn!(archive = %archive.display(), error = %format!("{e:#}"), "skipping crate");
                summary.failed.push(FailedCrate {
                    archive,
                    error: format!("{e:#}"),
                });
            }
        }
    }
    Ok(summary)
}
