use serde::{Deserialize, Serialize};

/// One file produced by a workflow run, as exported by the workflow engine.
///
/// All four attributes are required for a merge, but they are held as
/// `Option`s so an incomplete export still loads and the gap can be reported
/// against the record that caused it. Unknown attributes are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileProvenanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_uuid: Option<String>,
}

impl FileProvenanceRecord {
    /// Build a complete record.
    pub fn new(
        file_name: impl Into<String>,
        update_time: impl Into<String>,
        name: impl Into<String>,
        dataset_uuid: impl Into<String>,
    ) -> Self {
        Self {
            file_name: Some(file_name.into()),
            update_time: Some(update_time.into()),
            name: Some(name.into()),
            dataset_uuid: Some(dataset_uuid.into()),
        }
    }
}
