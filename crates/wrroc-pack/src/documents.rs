//! Reading and writing the JSON documents of an extracted crate.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wrroc_types::{FileProvenanceRecord, Graph};

use crate::error::{PackError, PackResult};
use crate::layout::Layout;

/// The two documents a merge needs, loaded from an extracted crate.
#[derive(Clone, Debug)]
pub struct CrateDocuments {
    /// Directory holding the metadata document.
    pub root: PathBuf,
    pub graph: Graph,
    pub records: Vec<FileProvenanceRecord>,
}

impl CrateDocuments {
    /// Load the metadata graph and provenance records from `dir`.
    ///
    /// The crate root is `dir` itself, or the single directory directly below
    /// it when the archive wrapped everything in a top-level folder.
    pub fn load(dir: &Path, layout: &Layout) -> PackResult<Self> {
        let root = locate_crate_root(dir, layout)?;
        let graph = read_graph(&root.join(&layout.metadata_file))?;
        let records = read_records(&root.join(&layout.provenance_file))?;
        debug!(
            root = %root.display(),
            nodes = graph.len(),
            records = records.len(),
            "loaded crate documents"
        );
        Ok(Self {
            root,
            graph,
            records,
        })
    }
}

/// Find the directory containing the metadata document.
pub fn locate_crate_root(dir: &Path, layout: &Layout) -> PackResult<PathBuf> {
    if dir.join(&layout.metadata_file).is_file() {
        return Ok(dir.to_path_buf());
    }
    let mut candidates: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(2)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file() && e.file_name() == layout.metadata_file.as_str())
        .filter_map(|e| e.path().parent().map(Path::to_path_buf))
        .collect();
    match candidates.len() {
        1 => Ok(candidates.remove(0)),
        _ => Err(PackError::MissingDocument {
            path: dir.join(&layout.metadata_file),
        }),
    }
}

/// Read a JSON-LD metadata document.
pub fn read_graph(path: &Path) -> PackResult<Graph> {
    let text = read_document(path)?;
    Graph::from_json_str(&text).map_err(|e| PackError::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Read a provenance export: a JSON array of file records.
pub fn read_records(path: &Path) -> PackResult<Vec<FileProvenanceRecord>> {
    let text = read_document(path)?;
    serde_json::from_str(&text).map_err(|e| PackError::InvalidDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write the merged graph next to the original metadata document.
///
/// Returns the path written. The original document is never replaced.
pub fn write_updated(root: &Path, layout: &Layout, graph: &Graph) -> PackResult<PathBuf> {
    if layout.updated_file == layout.metadata_file {
        return Err(PackError::WouldOverwrite {
            path: root.join(&layout.metadata_file),
        });
    }
    let path = root.join(&layout.updated_file);
    let text = graph.to_json_pretty().map_err(|e| PackError::InvalidDocument {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    std::fs::write(&path, text)?;
    debug!(path = %path.display(), "wrote updated metadata");
    Ok(path)
}

fn read_document(path: &Path) -> PackResult<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PackError::MissingDocument {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e.into()),
    }
}
