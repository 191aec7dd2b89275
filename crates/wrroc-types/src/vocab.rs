//! Well-known identifiers and keys of the RO-Crate metadata document.

/// `@id` of the root data entity.
pub const ROOT_ID: &str = "./";

/// Suffix that marks the Galaxy workflow manifest node.
pub const DEFAULT_WORKFLOW_SUFFIX: &str = ".gxwf.yml";

pub const KEY_GRAPH: &str = "@graph";
pub const KEY_CONTEXT: &str = "@context";
pub const KEY_ID: &str = "@id";
pub const KEY_TYPE: &str = "@type";

pub const KEY_DATE_CREATED: &str = "dateCreated";
pub const KEY_URL: &str = "url";
pub const KEY_EXAMPLE_OF_WORK: &str = "exampleOfWork";
pub const KEY_NAME: &str = "name";
pub const KEY_ADDITIONAL_TYPE: &str = "additionalType";
pub const KEY_DESCRIPTION: &str = "description";
pub const KEY_OUTPUT: &str = "output";
pub const KEY_CREATOR: &str = "creator";
pub const KEY_HAS_PART: &str = "hasPart";

pub const TYPE_FILE: &str = "File";
pub const TYPE_FORMAL_PARAMETER: &str = "FormalParameter";
