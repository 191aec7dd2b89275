//! Writing the aggregate graph as Turtle or N-Triples.

use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;

use oxrdf::{NamedNode, NamedOrBlankNode, Triple};
use oxttl::{NTriplesSerializer, TurtleSerializer};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{invalid_iri, StoreResult};
use crate::traits::GraphStore;
use crate::vocab::{BIOSCHEMAS, RDF, SCHEMA, XSD};

/// Prefixes declared at the top of Turtle output.
const TURTLE_PREFIXES: &[(&str, &str)] = &[
    ("bioschemas", BIOSCHEMAS),
    ("rdf", RDF),
    ("schema", SCHEMA),
    ("xsd", XSD),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RdfFormat {
    #[default]
    Turtle,
    NTriples,
}

impl RdfFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            RdfFormat::Turtle => "ttl",
            RdfFormat::NTriples => "nt",
        }
    }

    pub fn render(self, triples: &[Triple]) -> StoreResult<String> {
        match self {
            RdfFormat::Turtle => to_turtle(triples),
            RdfFormat::NTriples => to_ntriples(triples),
        }
    }
}

impl fmt::Display for RdfFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RdfFormat::Turtle => f.write_str("turtle"),
            RdfFormat::NTriples => f.write_str("ntriples"),
        }
    }
}

impl FromStr for RdfFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "turtle" | "ttl" => Ok(RdfFormat::Turtle),
            "ntriples" | "nt" => Ok(RdfFormat::NTriples),
            other => Err(format!("unknown RDF format '{other}' (expected turtle or ntriples)")),
        }
    }
}

/// One N-Triples line per triple, in the given order.
pub fn to_ntriples(triples: &[Triple]) -> StoreResult<String> {
    let mut serializer = NTriplesSerializer::new().for_writer(Vec::new());
    for triple in triples {
        serializer.serialize_triple(triple)?;
    }
    Ok(String::from_utf8_lossy(&serializer.finish()).into_owned())
}

/// Turtle with subjects and predicates grouped in first-appearance order.
pub fn to_turtle(triples: &[Triple]) -> StoreResult<String> {
    let mut serializer = TurtleSerializer::new();
    for (prefix, namespace) in TURTLE_PREFIXES {
        serializer = serializer
            .with_prefix(*prefix, *namespace)
            .map_err(|e| invalid_iri(namespace, e))?;
    }
    let mut writer = serializer.for_writer(Vec::new());
    for triple in grouped(triples) {
        writer.serialize_triple(triple)?;
    }
    Ok(String::from_utf8_lossy(&writer.finish()?).into_owned())
}

/// Reorder so each subject's triples are adjacent, and within a subject each
/// predicate's. Both keep first-appearance order; the sort is stable.
fn grouped(triples: &[Triple]) -> Vec<&Triple> {
    let mut subjects: HashMap<&NamedOrBlankNode, usize> = HashMap::new();
    let mut predicates: HashMap<(&NamedOrBlankNode, &NamedNode), usize> = HashMap::new();
    let mut keyed: Vec<(usize, usize, &Triple)> = Vec::with_capacity(triples.len());
    for triple in triples {
        let next = subjects.len();
        let subject = *subjects.entry(&triple.subject).or_insert(next);
        let next = predicates.len();
        let predicate = *predicates
            .entry((&triple.subject, &triple.predicate))
            .or_insert(next);
        keyed.push((subject, predicate, triple));
    }
    keyed.sort_by_key(|(subject, predicate, _)| (*subject, *predicate));
    keyed.into_iter().map(|(_, _, triple)| triple).collect()
}

/// Write the whole store to `path`.
///
/// `header` lines are emitted as `#` comments first. Returns the number of
/// triples written.
pub fn persist(
    store: &dyn GraphStore,
    path: &Path,
    format: RdfFormat,
    header: &[String],
) -> StoreResult<usize> {
    let triples = store.triples()?;
    let mut text = String::new();
    for line in header {
        let _ = writeln!(text, "# {line}");
    }
    text.push_str(&format.render(&triples)?);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    info!(path = %path.display(), %format, triples = triples.len(), "aggregate graph written");
    Ok(triples.len())
}
