use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::vocab::{KEY_ID, KEY_TYPE};

/// A single linked-data node of a metadata graph.
///
/// Wraps the raw JSON object so that unknown keys survive a load/save cycle
/// untouched. Key order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Map<String, Value>);

impl Node {
    /// Create a node with only an `@id`.
    pub fn new(id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(KEY_ID.to_string(), Value::String(id.into()));
        Self(fields)
    }

    /// Create a node with an `@id` and an `@type`.
    pub fn typed(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new(id).with(KEY_TYPE, Value::String(kind.into()))
    }

    /// Wrap an existing JSON object.
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builder-style field setter.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// The node's `@id`, if present and a string.
    pub fn id(&self) -> Option<&str> {
        self.0.get(KEY_ID).and_then(Value::as_str)
    }

    /// Read a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Mutable access to a field.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Set a field in place. An existing key keeps its position.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Returns `true` if the node carries the given `@type`, either as the
    /// single type or inside a type array.
    pub fn has_type(&self, kind: &str) -> bool {
        match self.0.get(KEY_TYPE) {
            Some(Value::String(t)) => t == kind,
            Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(kind)),
            _ => false,
        }
    }

    /// Iterate over all fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Value::Object(node.0)
    }
}

/// A `{"@id": id}` reference object.
pub fn id_ref(id: &str) -> Value {
    let mut reference = Map::new();
    reference.insert(KEY_ID.to_string(), Value::String(id.to_string()));
    Value::Object(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn typed_node_has_id_and_type() {
        let node = Node::typed("out.txt", "File");
        assert_eq!(node.id(), Some("out.txt"));
        assert!(node.has_type("File"));
        assert!(!node.has_type("Dataset"));
    }

    #[test]
    fn type_array_is_matched() {
        let node = Node::new("wf.gxwf.yml").with(
            "@type",
            json!(["File", "SoftwareSourceCode", "ComputationalWorkflow"]),
        );
        assert!(node.has_type("ComputationalWorkflow"));
    }

    #[test]
    fn set_keeps_key_position() {
        let mut node = Node::new("a")
            .with("dateCreated", "t0")
            .with("name", "A");
        node.set("dateCreated", "t1");
        let keys: Vec<&str> = node.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["@id", "dateCreated", "name"]);
        assert_eq!(node.get("dateCreated"), Some(&json!("t1")));
    }

    #[test]
    fn non_string_id_is_none() {
        let node = Node::from_map(json!({"@id": 7}).as_object().unwrap().clone());
        assert_eq!(node.id(), None);
    }

    #[test]
    fn id_ref_shape() {
        assert_eq!(id_ref("#p1"), json!({"@id": "#p1"}));
    }
}
