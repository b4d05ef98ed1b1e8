//! Core abstractions and common definitions
//!
//! This module provides:
//! - `traits`: the Graph-shaped [`TripleStore`] abstraction shared by graphs and dataset views
//! - `namespaces`: Standard RDF namespace IRI constants

pub mod traits;
pub mod namespaces;

pub use traits::*;
pub use namespaces::ns;
