//! Namespaces and the term table used to expand RO-Crate keys.

use std::collections::HashMap;

use oxiri::Iri;
use serde_json::Value;

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SCHEMA: &str = "http://schema.org/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const BIOSCHEMAS: &str = "https://bioschemas.org/";
pub const DCT: &str = "http://purl.org/dc/terms/";

/// Terms of the RO-Crate 1.1 context that do not map to `schema:{term}`.
const RO_CRATE_TERMS: &[(&str, &str)] = &[
    ("File", "http://schema.org/MediaObject"),
    ("ComputationalWorkflow", "https://bioschemas.org/ComputationalWorkflow"),
    ("FormalParameter", "https://bioschemas.org/FormalParameter"),
    ("input", "https://bioschemas.org/ComputationalWorkflow#input"),
    ("output", "https://bioschemas.org/ComputationalWorkflow#output"),
    ("conformsTo", "http://purl.org/dc/terms/conformsTo"),
];

/// Maps compact keys and type names to full IRIs.
///
/// Starts from the RO-Crate defaults (`@vocab` = schema.org plus the few
/// non-schema.org terms above). Inline `@context` objects add or override
/// terms; remote context URLs are not fetched.
#[derive(Clone, Debug)]
pub struct TermMap {
    vocab: String,
    terms: HashMap<String, String>,
    prefixes: HashMap<String, String>,
}

impl Default for TermMap {
    fn default() -> Self {
        let terms = RO_CRATE_TERMS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let prefixes = [
            ("rdf", RDF),
            ("schema", SCHEMA),
            ("xsd", XSD),
            ("bioschemas", BIOSCHEMAS),
            ("dct", DCT),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        Self {
            vocab: SCHEMA.to_string(),
            terms,
            prefixes,
        }
    }
}

impl TermMap {
    /// A copy of this map extended with the definitions of `context`.
    pub fn with_context(&self, context: Option<&Value>) -> Self {
        let mut map = self.clone();
        if let Some(context) = context {
            map.absorb(context);
        }
        map
    }

    fn absorb(&mut self, context: &Value) {
        match context {
            Value::Array(items) => items.iter().for_each(|item| self.absorb(item)),
            Value::Object(definitions) => {
                for (key, definition) in definitions {
                    if key == "@vocab" {
                        if let Some(vocab) = definition.as_str() {
                            self.vocab = vocab.to_string();
                        }
                        continue;
                    }
                    if key.starts_with('@') {
                        continue;
                    }
                    let target = match definition {
                        Value::String(iri) => iri.as_str(),
                        Value::Object(expanded) => match expanded.get("@id").and_then(Value::as_str) {
                            Some(iri) => iri,
                            None => continue,
                        },
                        _ => continue,
                    };
                    let expanded = self.expand(target);
                    if expanded.ends_with('/') || expanded.ends_with('#') {
                        self.prefixes.insert(key.clone(), expanded.clone());
                    }
                    self.terms.insert(key.clone(), expanded);
                }
            }
            _ => {}
        }
    }

    /// Expand a key or type name.
    pub fn expand(&self, term: &str) -> String {
        if let Some(iri) = self.terms.get(term) {
            return iri.clone();
        }
        if let Some((prefix, local)) = term.split_once(':') {
            if let Some(ns) = self.prefixes.get(prefix) {
                return format!("{ns}{local}");
            }
        }
        if Iri::parse(term).is_ok() {
            return term.to_string();
        }
        format!("{}{term}", self.vocab)
    }

    /// Known namespace prefixes, sorted by name.
    pub fn prefixes(&self) -> Vec<(&str, &str)> {
        let mut all: Vec<(&str, &str)> = self
            .prefixes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        all.sort();
        all
    }
}
