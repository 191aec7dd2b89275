//! The metadata graph: an ordered node set with an id index.
//!
//! A [`Graph`] mirrors the `@graph` array of an RO-Crate metadata document.
//! Node order is the document order and is never rearranged; the index maps
//! each `@id` to the positions holding it so lookups do not re-scan the
//! sequence. Every other top-level key of the document (`@context` and any
//! extension keys) is kept verbatim and written back in its original place.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::error::TypeError;
use crate::node::Node;
use crate::vocab::{KEY_CONTEXT, KEY_GRAPH};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Graph {
    /// Top-level document keys. `@graph` holds an empty placeholder so the
    /// node array is re-inserted at its original position on output.
    header: Map<String, Value>,
    nodes: Vec<Node>,
    index: HashMap<String, Vec<usize>>,
}

impl Graph {
    /// Create an empty graph with the given `@context`.
    pub fn new(context: Value) -> Self {
        let mut header = Map::new();
        header.insert(KEY_CONTEXT.to_string(), context);
        header.insert(KEY_GRAPH.to_string(), Value::Array(Vec::new()));
        Self {
            header,
            nodes: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a graph from a parsed JSON-LD document.
    pub fn from_value(document: Value) -> Result<Self, TypeError> {
        let Value::Object(mut header) = document else {
            return Err(TypeError::InvalidDocument(
                "top-level value is not an object".into(),
            ));
        };
        let raw_nodes = match header.get_mut(KEY_GRAPH) {
            Some(Value::Array(items)) => std::mem::take(items),
            Some(_) => {
                return Err(TypeError::InvalidDocument(
                    "@graph is not an array".into(),
                ))
            }
            None => return Err(TypeError::InvalidDocument("missing @graph".into())),
        };

        let mut graph = Self {
            header,
            nodes: Vec::with_capacity(raw_nodes.len()),
            index: HashMap::with_capacity(raw_nodes.len()),
        };
        for (position, raw) in raw_nodes.into_iter().enumerate() {
            let Value::Object(fields) = raw else {
                return Err(TypeError::InvalidNode { position });
            };
            let node = Node::from_map(fields);
            if node.id().is_none() {
                return Err(TypeError::MissingId { position });
            }
            graph.push(node)?;
        }
        Ok(graph)
    }

    /// Parse a graph from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, TypeError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// Render the full document as a JSON value.
    pub fn to_value(&self) -> Value {
        let mut document = self.header.clone();
        let nodes = self.nodes.iter().cloned().map(Value::from).collect();
        document.insert(KEY_GRAPH.to_string(), Value::Array(nodes));
        Value::Object(document)
    }

    /// Pretty-print the document with four-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, TypeError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.to_value()
            .serialize(&mut serializer)
            .map_err(|e| TypeError::Serialization(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// The document's `@context`, if any.
    pub fn context(&self) -> Option<&Value> {
        self.header.get(KEY_CONTEXT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns `true` if any node carries this `@id`.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Positions of every node carrying this `@id`, in document order.
    pub fn positions(&self, id: &str) -> &[usize] {
        self.index.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The first node with this `@id`.
    pub fn get(&self, id: &str) -> Option<&Node> {
        let position = *self.positions(id).first()?;
        self.nodes.get(position)
    }

    /// Mutable access to the first node with this `@id`.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        let position = *self.positions(id).first()?;
        self.nodes.get_mut(position)
    }

    /// Mutable access by position.
    ///
    /// The node's `@id` must not be changed through this reference; the index
    /// is not refreshed.
    pub fn node_at_mut(&mut self, position: usize) -> Option<&mut Node> {
        self.nodes.get_mut(position)
    }

    /// Distinct ids ending with `suffix`, in order of first appearance.
    pub fn ids_with_suffix(&self, suffix: &str) -> Vec<&str> {
        let mut found: Vec<&str> = Vec::new();
        for node in &self.nodes {
            if let Some(id) = node.id() {
                if id.ends_with(suffix) && !found.contains(&id) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Append a node and index it. Returns its position.
    pub fn push(&mut self, node: Node) -> Result<usize, TypeError> {
        let position = self.nodes.len();
        let id = node
            .id()
            .ok_or(TypeError::MissingId { position })?
            .to_string();
        self.index.entry(id).or_default().push(position);
        self.nodes.push(node);
        Ok(position)
    }
}

impl TryFrom<Value> for Graph {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<Graph> for Value {
    fn from(graph: Graph) -> Self {
        graph.to_value()
    }
}
