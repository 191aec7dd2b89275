//! Turning a merged RO-Crate document into triples.
//!
//! This covers the flattened JSON-LD that RO-Crate metadata uses: a `@graph`
//! of nodes whose keys are compact terms and whose references are `{"@id"}`
//! objects. Node ids and references are resolved against the crate's base
//! IRI; keys and types are expanded through a [`TermMap`]. Strings become
//! plain literals, numbers and booleans typed literals, `{"@value"}` objects
//! keep their datatype or language, and other nested objects become blank
//! nodes. It is not a general JSON-LD processor: remote contexts are not
//! fetched and `@list`, `@reverse` and similar keywords are skipped.
//!
//! Ids that do not form a valid IRI once resolved are rejected rather than
//! rewritten.

use oxiri::Iri;
use oxrdf::vocab::{rdf, xsd};
use oxrdf::{BlankNode, Literal, NamedNode, NamedOrBlankNode, Term, Triple};
use serde_json::{Map, Value};
use wrroc_types::vocab::{KEY_ID, KEY_TYPE};
use wrroc_types::Graph;

use crate::error::{invalid_iri, StoreError, StoreResult};
use crate::vocab::TermMap;

/// Converts metadata graphs to triples under one base IRI.
#[derive(Clone, Debug)]
pub struct JsonLdConverter {
    base: Iri<String>,
    terms: TermMap,
    blank_prefix: String,
    next_blank: usize,
}

impl JsonLdConverter {
    pub fn new(base: &str) -> StoreResult<Self> {
        let base = Iri::parse(base.to_string()).map_err(|e| invalid_iri(base, e))?;
        Ok(Self {
            base,
            terms: TermMap::default(),
            blank_prefix: "b".to_string(),
            next_blank: 0,
        })
    }

    /// Prefix for generated blank node labels. Give every crate of an
    /// aggregate its own prefix so blank nodes never collide.
    pub fn with_blank_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.blank_prefix = prefix.into();
        self
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    /// Convert every node of `graph`, in document order.
    pub fn convert(&mut self, graph: &Graph) -> StoreResult<Vec<Triple>> {
        let terms = self.terms.with_context(graph.context());
        let mut out = Vec::new();
        for node in graph.nodes() {
            let Some(id) = node.id() else { continue };
            let subject = NamedOrBlankNode::NamedNode(self.resolve(id)?);
            self.node_triples(&subject, node.as_map(), &terms, &mut out)?;
        }
        Ok(out)
    }

    fn resolve(&self, id: &str) -> StoreResult<NamedNode> {
        let iri = self.base.resolve(id).map_err(|e| invalid_iri(id, e))?;
        Ok(NamedNode::new_unchecked(iri.into_inner()))
    }

    fn node_triples(
        &mut self,
        subject: &NamedOrBlankNode,
        fields: &Map<String, Value>,
        terms: &TermMap,
        out: &mut Vec<Triple>,
    ) -> StoreResult<()> {
        for (key, value) in fields {
            match key.as_str() {
                KEY_ID => {}
                KEY_TYPE => {
                    for kind in as_list(value).filter_map(Value::as_str) {
                        out.push(Triple::new(subject.clone(), rdf::TYPE, expand(terms, kind)?));
                    }
                }
                k if k.starts_with('@') => {}
                k => {
                    let predicate = expand(terms, k)?;
                    for item in as_list(value) {
                        if let Some(object) = self.object_term(item, terms, out)? {
                            out.push(Triple::new(subject.clone(), predicate.clone(), object));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn object_term(
        &mut self,
        value: &Value,
        terms: &TermMap,
        out: &mut Vec<Triple>,
    ) -> StoreResult<Option<Term>> {
        let literal = match value {
            Value::Null | Value::Array(_) => return Ok(None),
            Value::String(s) => Literal::new_simple_literal(s.as_str()),
            Value::Bool(b) => Literal::new_typed_literal(b.to_string(), xsd::BOOLEAN),
            Value::Number(n) if n.is_f64() => Literal::new_typed_literal(n.to_string(), xsd::DOUBLE),
            Value::Number(n) => Literal::new_typed_literal(n.to_string(), xsd::INTEGER),
            Value::Object(map) => {
                if let Some(literal) = map.get("@value") {
                    return Ok(value_object(literal, map, terms)?.map(Term::from));
                }
                let (node, term) = match map.get(KEY_ID).and_then(Value::as_str) {
                    Some(id) => {
                        let named = self.resolve(id)?;
                        (NamedOrBlankNode::NamedNode(named.clone()), Term::NamedNode(named))
                    }
                    None => {
                        let blank = self.fresh_blank()?;
                        (NamedOrBlankNode::BlankNode(blank.clone()), Term::BlankNode(blank))
                    }
                };
                // A reference with further keys is an embedded node.
                if map.keys().any(|k| k != KEY_ID) {
                    self.node_triples(&node, map, terms, out)?;
                }
                return Ok(Some(term));
            }
        };
        Ok(Some(Term::Literal(literal)))
    }

    fn fresh_blank(&mut self) -> StoreResult<BlankNode> {
        let label = format!("{}{}", self.blank_prefix, self.next_blank);
        self.next_blank += 1;
        BlankNode::new(label.as_str()).map_err(|e| StoreError::InvalidTerm(format!("_:{label}: {e}")))
    }
}

fn expand(terms: &TermMap, term: &str) -> StoreResult<NamedNode> {
    let iri = terms.expand(term);
    NamedNode::new(iri.as_str()).map_err(|e| invalid_iri(&iri, e))
}

fn value_object(literal: &Value, map: &Map<String, Value>, terms: &TermMap) -> StoreResult<Option<Literal>> {
    let lexical = match literal {
        Value::String(s) => s.clone(),
        Value::Null | Value::Array(_) | Value::Object(_) => return Ok(None),
        other => other.to_string(),
    };
    if let Some(language) = map.get("@language").and_then(Value::as_str) {
        let tagged = Literal::new_language_tagged_literal(lexical, language)
            .map_err(|e| StoreError::InvalidTerm(format!("@language {language}: {e}")))?;
        return Ok(Some(tagged));
    }
    match map.get(KEY_TYPE).and_then(Value::as_str) {
        Some(datatype) => Ok(Some(Literal::new_typed_literal(lexical, expand(terms, datatype)?))),
        None => Ok(Some(Literal::new_simple_literal(lexical))),
    }
}

fn as_list(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Array(items) => Box::new(items.iter()),
        single => Box::new(std::iter::once(single)),
    }
}

/// Convert `graph` with a fresh converter rooted at `base`.
pub fn to_triples(graph: &Graph, base: &str) -> StoreResult<Vec<Triple>> {
    JsonLdConverter::new(base)?.convert(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::SCHEMA;
    use serde_json::json;

    const BASE: &str = "arcp://uuid,abc/";

    fn iri(value: &str) -> NamedNode {
        NamedNode::new_unchecked(value)
    }

    fn schema(local: &str) -> NamedNode {
        iri(&format!("{SCHEMA}{local}"))
    }

    fn merged() -> Graph {
        Graph::from_value(json!({
            "@context": "https://w3id.org/ro/crate/1.1/context",
            "@graph": [
                {"@id": "./", "@type": "Dataset", "hasPart": [{"@id": "out.txt"}]},
                {
                    "@id": "out.txt",
                    "@type": "File",
                    "dateCreated": "t1",
                    "url": "https://abc/out.txt",
                    "exampleOfWork": {"@id": "#p1"},
                    "name": "Out"
                },
                {"@id": "#p1", "@type": "FormalParameter", "description": ""}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn converts_file_and_parameter_nodes() {
        let triples = to_triples(&merged(), BASE).unwrap();
        let file = iri("arcp://uuid,abc/out.txt");
        let param = iri("arcp://uuid,abc/#p1");

        assert!(triples.contains(&Triple::new(iri("arcp://uuid,abc/"), schema("hasPart"), file.clone())));
        assert!(triples.contains(&Triple::new(file.clone(), rdf::TYPE, schema("MediaObject"))));
        assert!(triples.contains(&Triple::new(file.clone(), schema("exampleOfWork"), param.clone())));
        assert!(triples.contains(&Triple::new(
            file,
            schema("url"),
            Literal::new_simple_literal("https://abc/out.txt")
        )));
        assert!(triples.contains(&Triple::new(
            param.clone(),
            rdf::TYPE,
            iri("https://bioschemas.org/FormalParameter")
        )));
        assert!(triples.contains(&Triple::new(param, schema("description"), Literal::new_simple_literal(""))));
        assert_eq!(triples.len(), 9);
    }

    #[test]
    fn typed_values_and_blank_nodes() {
        let graph = Graph::from_value(json!({
            "@graph": [{
                "@id": "x",
                "contentSize": 42,
                "ratio": 0.5,
                "isBasedOnUrl": true,
                "skip": null,
                "dateModified": {"@value": "2024-01-01", "@type": "xsd:date"},
                "headline": {"@value": "Hallo", "@language": "de"},
                "author": {"name": "Anon"}
            }]
        }))
        .unwrap();
        let mut converter = JsonLdConverter::new(BASE).unwrap().with_blank_prefix("c1b");
        let triples = converter.convert(&graph).unwrap();
        let x = iri("arcp://uuid,abc/x");
        let anon = BlankNode::new_unchecked("c1b0");

        assert!(triples.contains(&Triple::new(
            x.clone(),
            schema("contentSize"),
            Literal::new_typed_literal("42", xsd::INTEGER)
        )));
        assert!(triples.contains(&Triple::new(
            x.clone(),
            schema("ratio"),
            Literal::new_typed_literal("0.5", xsd::DOUBLE)
        )));
        assert!(triples.contains(&Triple::new(
            x.clone(),
            schema("isBasedOnUrl"),
            Literal::new_typed_literal("true", xsd::BOOLEAN)
        )));
        assert!(triples.contains(&Triple::new(
            x.clone(),
            schema("dateModified"),
            Literal::new_typed_literal("2024-01-01", xsd::DATE)
        )));
        assert!(triples.contains(&Triple::new(
            x.clone(),
            schema("headline"),
            Literal::new_language_tagged_literal_unchecked("Hallo", "de")
        )));
        assert!(triples.contains(&Triple::new(anon.clone(), schema("name"), Literal::new_simple_literal("Anon"))));
        assert!(triples.contains(&Triple::new(x, schema("author"), anon)));
        assert_eq!(triples.len(), 7);
    }

    #[test]
    fn embedded_node_with_id() {
        let graph = Graph::from_value(json!({
            "@graph": [{"@id": "wf.gxwf.yml", "creator": {"@id": "https://orcid.org/1", "name": "Ada"}}]
        }))
        .unwrap();
        let triples = to_triples(&graph, BASE).unwrap();
        let ada = iri("https://orcid.org/1");
        assert!(triples.contains(&Triple::new(iri("arcp://uuid,abc/wf.gxwf.yml"), schema("creator"), ada.clone())));
        assert!(triples.contains(&Triple::new(ada, schema("name"), Literal::new_simple_literal("Ada"))));
    }

    #[test]
    fn workflow_output_uses_bioschemas_property() {
        let graph = Graph::from_value(json!({
            "@graph": [{"@id": "wf.gxwf.yml", "output": [{"@id": "#p1"}, {"@id": "#p2"}]}]
        }))
        .unwrap();
        let triples = to_triples(&graph, BASE).unwrap();
        let output = iri("https://bioschemas.org/ComputationalWorkflow#output");
        assert_eq!(triples.iter().filter(|t| t.predicate == output).count(), 2);
    }

    #[test]
    fn relative_forms_resolve_against_base() {
        let graph = Graph::from_value(json!({
            "@graph": [{"@id": "outputs/../a.txt", "isPartOf": {"@id": "./"}}]
        }))
        .unwrap();
        let triples = to_triples(&graph, BASE).unwrap();
        assert_eq!(
            triples[0],
            Triple::new(iri("arcp://uuid,abc/a.txt"), schema("isPartOf"), iri("arcp://uuid,abc/"))
        );
    }

    #[test]
    fn invalid_id_is_an_error_not_a_rewrite() {
        for bad in ["{out}.txt", "a b.txt"] {
            let graph = Graph::from_value(json!({"@graph": [{"@id": bad, "name": "x"}]})).unwrap();
            let err = to_triples(&graph, BASE).unwrap_err();
            assert!(matches!(err, StoreError::InvalidIri { ref iri, .. } if iri == bad));
        }
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(matches!(JsonLdConverter::new("not a base"), Err(StoreError::InvalidIri { .. })));
    }
}
