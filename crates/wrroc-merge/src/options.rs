use serde::{Deserialize, Serialize};
use wrroc_types::vocab::{DEFAULT_WORKFLOW_SUFFIX, ROOT_ID};

/// Knobs for [`ProvenanceMerger`](crate::ProvenanceMerger).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// The workflow node is the one node whose `@id` ends with this suffix.
    pub workflow_suffix: String,
    /// `@id` of the root dataset.
    pub root_id: String,
    /// When `true`, refreshing an id carried by several existing nodes is an
    /// error. Otherwise the first such node is patched and a warning logged.
    pub strict_ids: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            workflow_suffix: DEFAULT_WORKFLOW_SUFFIX.to_string(),
            root_id: ROOT_ID.to_string(),
            strict_ids: false,
        }
    }
}

impl MergeOptions {
    /// Options for a workflow manifest with a different file suffix.
    pub fn with_workflow_suffix(suffix: impl Into<String>) -> Self {
        Self {
            workflow_suffix: suffix.into(),
            ..Default::default()
        }
    }

    /// Reject ambiguous ids instead of patching the first match.
    pub fn strict(mut self) -> Self {
        self.strict_ids = true;
        self
    }
}
