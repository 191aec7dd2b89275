use std::fmt;

use serde::{Deserialize, Serialize};

/// What a merge did to the graph.
///
/// Id lists are in order of first appearance among the processed records,
/// which is also the order they were written into `output` and `hasPart`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    /// `@id` of the workflow node that was patched.
    pub workflow_id: String,
    /// Files appended to the graph and to the root's `hasPart`.
    pub new_file_ids: Vec<String>,
    /// Parameters that make up the workflow's new `output` list.
    pub new_param_ids: Vec<String>,
    /// Existing files whose `dateCreated` and `url` were refreshed.
    pub updated_ids: Vec<String>,
}

impl MergeReport {
    pub fn new(workflow_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            ..Default::default()
        }
    }

    /// Returns `true` if no file was added or refreshed.
    pub fn is_empty(&self) -> bool {
        self.new_file_ids.is_empty() && self.updated_ids.is_empty()
    }
}

impl fmt::Display for MergeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} new files, {} outputs, {} refreshed",
            self.workflow_id,
            self.new_file_ids.len(),
            self.new_param_ids.len(),
            self.updated_ids.len()
        )
    }
}
