//! memrdf - in-memory RDF graphs and datasets
//!
//! A Rust library for building and querying RDF data held in memory.
//!
//! # Architecture
//!
//! - [`term`] - IRIs, literals, blank nodes, triples and quads, created through a [`TermFactory`]
//! - [`store`] - [`Graph`] and [`Dataset`] with single-pattern retrieval and graph views
//! - [`core::TripleStore`] - The Graph-shaped interface shared by graphs and dataset views
//! - [`ntriples`] - Reading back the N-Triples form that terms and statements print as
//! - [`config`] / [`error`] - Configuration loading and structured errors
//!
//! # Blank nodes and scopes
//!
//! Every factory has a [`Scope`]. Blank nodes carry the scope that minted
//! them and only compare equal within it, so nodes from two sources never
//! merge by accident. When a store receives terms from another factory, it
//! re-creates them under its own scope, mapping each foreign blank node to one
//! stable local node.
//!
//! # Example
//!
//! ```rust
//! use memrdf::{TermFactory, TripleStore, TripleStoreExt};
//!
//! let factory = TermFactory::new();
//! let graph = factory.create_graph();
//!
//! let s = factory.create_iri("http://example.org/s").unwrap();
//! let p = factory.create_iri("http://example.org/p").unwrap();
//! graph.add_spo(s.clone(), p, factory.create_literal("hello")).unwrap();
//!
//! assert_eq!(graph.len(), 1);
//! assert!(graph.contains_matching(Some(&s), None, None));
//! ```

pub mod core;
pub mod config;
pub mod error;
pub mod ntriples;
pub mod store;
pub mod term;

// Re-export core traits
pub use crate::core::{ns, TripleStore, TripleStoreExt};

// Re-export term types
pub use crate::term::{BlankNode, Iri, Literal, Quad, Scope, Term, TermFactory, Triple};

// Re-export store types
pub use crate::store::{
    Dataset, DatasetGraph, Graph, GraphPattern, QuadPattern, Quads, TriplePattern, Triples, UnionGraph,
};

// Re-export configuration
pub use crate::config::{IriValidation, LogLevel, MemrdfConfig};

// Re-export error types
pub use crate::error::{ErrorCode, RdfError, RdfResult};
