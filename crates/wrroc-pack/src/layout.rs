use serde::{Deserialize, Serialize};

/// File names of the documents inside an extracted crate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// The RO-Crate metadata document.
    pub metadata_file: String,
    /// The workflow engine's per-file provenance export.
    pub provenance_file: String,
    /// Where the merged document is written, next to the original.
    pub updated_file: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            metadata_file: "ro-crate-metadata.json".into(),
            provenance_file: "datasets_attrs.txt".into(),
            updated_file: "ro-crate-metadata-updated.json".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let l = Layout::default();
        assert_eq!(l.metadata_file, "ro-crate-metadata.json");
        assert_eq!(l.provenance_file, "datasets_attrs.txt");
        assert_eq!(l.updated_file, "ro-crate-metadata-updated.json");
    }

    #[test]
    fn partial_override() {
        let l: Layout = serde_json::from_str(r#"{"provenance_file": "attrs.json"}"#).unwrap();
        assert_eq!(l.provenance_file, "attrs.json");
        assert_eq!(l.metadata_file, "ro-crate-metadata.json");
    }
}
