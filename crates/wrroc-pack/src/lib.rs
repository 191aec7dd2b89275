//! RO-Crate archive handling for WRROC.
//!
//! Everything on the file-system side of a merge lives here: opening the
//! zipped crate, extracting it completely, loading the metadata and
//! provenance documents, and writing the merged document back next to the
//! original.
//!
//! # Layout
//!
//! - `ro-crate-metadata.json` -- the JSON-LD metadata graph
//! - `datasets_attrs.txt` -- the workflow engine's per-file provenance export
//! - `ro-crate-metadata-updated.json` -- written by [`write_updated`]
//!
//! All three names are configurable through [`Layout`].

pub mod archive;
pub mod documents;
pub mod error;
pub mod layout;

use std::path::Path;

pub use archive::{CrateArchive, ExtractedCrate};
pub use documents::{locate_crate_root, read_graph, read_records, write_updated, CrateDocuments};
pub use error::{PackError, PackResult};
pub use layout::Layout;

/// Extract `archive_path` into `dir` and load its documents.
///
/// Extraction finishes before either document is read.
pub fn unpack(archive_path: &Path, dir: &Path, layout: &Layout) -> PackResult<CrateDocuments> {
    let mut archive = CrateArchive::open(archive_path)?;
    archive.extract_to(dir)?;
    CrateDocuments::load(dir, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::tests::write_zip;

    const METADATA: &str = r#"{
        "@context": "https://w3id.org/ro/crate/1.1/context",
        "@graph": [
            {"@id": "./", "@type": "Dataset", "hasPart": [{"@id": "wf.gxwf.yml"}]},
            {"@id": "wf.gxwf.yml", "@type": ["File", "ComputationalWorkflow"]}
        ]
    }"#;

    const ATTRS: &str = r#"[
        {"file_name": "a.txt", "update_time": "2024-01-01T00:00:00", "name": "A", "dataset_uuid": "u1"},
        {"file_name": "b.txt", "update_time": "2024-01-01T00:00:01", "name": "B", "dataset_uuid": "u2"}
    ]"#;

    #[test]
    fn unpack_zipped_crate() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("run.zip");
        write_zip(
            &zip_path,
            &[
                ("ro-crate-metadata.json", METADATA),
                ("datasets_attrs.txt", ATTRS),
                ("wf.gxwf.yml", "class: GalaxyWorkflow"),
            ],
        );

        let work = dir.path().join("work");
        let docs = unpack(&zip_path, &work, &Layout::default()).unwrap();
        assert_eq!(docs.root, work);
        assert_eq!(docs.graph.len(), 2);
        assert_eq!(docs.records.len(), 2);
        assert!(work.join("wf.gxwf.yml").is_file());
    }

    #[test]
    fn unpack_without_provenance_fails() {
        let dir = tempfile::tempdir().unwrap();
        let zip_path = dir.path().join("run.zip");
        write_zip(&zip_path, &[("ro-crate-metadata.json", METADATA)]);
        let err = unpack(&zip_path, &dir.path().join("work"), &Layout::default()).unwrap_err();
        assert!(matches!(err, PackError::MissingDocument { .. }));
    }
}
