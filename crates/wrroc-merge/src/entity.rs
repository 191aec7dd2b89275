//! Transform pass: derive the node pair described by one provenance record.

use serde_json::Value;
use wrroc_types::vocab::{
    KEY_ADDITIONAL_TYPE, KEY_DATE_CREATED, KEY_DESCRIPTION, KEY_EXAMPLE_OF_WORK, KEY_NAME,
    KEY_URL, TYPE_FILE, TYPE_FORMAL_PARAMETER,
};
use wrroc_types::{id_ref, FileProvenanceRecord, Node};

use crate::error::{MergeError, MergeResult};

/// The `File` node and `FormalParameter` node derived from one record.
#[derive(Clone, Debug, PartialEq)]
pub struct ProvenanceEntities {
    pub file_id: String,
    pub parameter_id: String,
    pub file: Node,
    pub parameter: Node,
}

impl ProvenanceEntities {
    /// Derive both nodes from `record`. `index` is the record's position in
    /// its batch and only used for error reporting.
    ///
    /// `base_url` is concatenated with the file name as-is.
    pub fn from_record(
        index: usize,
        record: &FileProvenanceRecord,
        base_url: &str,
    ) -> MergeResult<Self> {
        let file_name = require(index, &record.file_name, "file_name")?;
        let update_time = require(index, &record.update_time, "update_time")?;
        let name = require(index, &record.name, "name")?;
        let dataset_uuid = require(index, &record.dataset_uuid, "dataset_uuid")?;

        let parameter_id = parameter_id(dataset_uuid);
        let file = Node::typed(file_name, TYPE_FILE)
            .with(KEY_DATE_CREATED, update_time)
            .with(KEY_URL, file_url(base_url, file_name))
            .with(KEY_EXAMPLE_OF_WORK, id_ref(&parameter_id))
            .with(KEY_NAME, name);
        let parameter = Node::typed(parameter_id.as_str(), TYPE_FORMAL_PARAMETER)
            .with(KEY_ADDITIONAL_TYPE, TYPE_FILE)
            .with(KEY_DESCRIPTION, "")
            .with(KEY_NAME, name);

        Ok(Self {
            file_id: file_name.to_string(),
            parameter_id,
            file,
            parameter,
        })
    }

    /// The `dateCreated` value carried over to an existing node.
    pub fn date_created(&self) -> Value {
        self.file.get(KEY_DATE_CREATED).cloned().unwrap_or(Value::Null)
    }

    /// The `url` value carried over to an existing node.
    pub fn url(&self) -> Value {
        self.file.get(KEY_URL).cloned().unwrap_or(Value::Null)
    }
}

fn require<'a>(
    index: usize,
    value: &'a Option<String>,
    field: &'static str,
) -> MergeResult<&'a str> {
    value
        .as_deref()
        .ok_or(MergeError::MissingField { index, field })
}

/// `#` + dataset uuid.
pub fn parameter_id(dataset_uuid: &str) -> String {
    format!("#{dataset_uuid}")
}

pub fn file_url(base_url: &str, file_name: &str) -> String {
    format!("{base_url}{file_name}")
}
