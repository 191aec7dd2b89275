//! Linked-data aggregation for WRROC.
//!
//! Merged crates are converted from their JSON-LD metadata into RDF triples
//! and loaded into one aggregate graph, which is then written out as Turtle
//! or N-Triples. Terms are `oxrdf` values, ids are resolved with `oxiri`, and
//! output goes through the `oxttl` serializers.
//!
//! # Identifiers
//!
//! Every crate is converted under its own `arcp://uuid,{uuid}/` base, so the
//! crate-relative ids of different crates (`./`, `#p1`, `out.txt`) never
//! collide in the aggregate.
//!
//! # Storage Backends
//!
//! All backends implement the [`GraphStore`] trait:
//!
//! - [`InMemoryGraphStore`] -- insertion-ordered, de-duplicating store

pub mod error;
pub mod jsonld;
pub mod memory;
pub mod serialize;
pub mod traits;
pub mod vocab;

pub use error::{StoreError, StoreResult};
pub use jsonld::{to_triples, JsonLdConverter};
pub use memory::InMemoryGraphStore;
pub use serialize::{persist, to_ntriples, to_turtle, RdfFormat};
pub use traits::GraphStore;
pub use vocab::TermMap;
