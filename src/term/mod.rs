//! RDF term representations
//!
//! This module defines the core data types for representing RDF data:
//! - IRIs (named nodes)
//! - Literals (with datatype and optional language tag)
//! - Blank nodes (anonymous nodes scoped to their factory)
//! - Triples and quads
//!
//! Terms are created through a [`TermFactory`]; every term remembers the
//! [`Scope`] of the factory that made it.

use std::fmt;
use std::sync::Arc;

use crate::error::{RdfError, RdfResult};

mod blank;
mod factory;
mod iri;
mod literal;
mod scope;

pub use blank::BlankNode;
pub use factory::TermFactory;
pub use iri::Iri;
pub use literal::Literal;
pub use scope::Scope;

pub(crate) use iri::first_invalid_char;

/// A term in RDF
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// An IRI reference (named node)
    Iri(Arc<Iri>),
    /// A literal value
    Literal(Arc<Literal>),
    /// A blank node (anonymous)
    BlankNode(BlankNode),
}

impl Term {
    /// Check if this term is an IRI
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Check if this term is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }

    /// Check if this term is a blank node
    pub fn is_blank_node(&self) -> bool {
        matches!(self, Term::BlankNode(_))
    }

    /// Check if this term may appear as a subject or graph name
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// Get the IRI if this is an IRI term
    pub fn as_iri(&self) -> Option<&Iri> {
        match self {
            Term::Iri(i) => Some(i),
            _ => None,
        }
    }

    /// Get the literal if this is a literal term
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Term::Literal(l) => Some(l),
            _ => None,
        }
    }

    /// Get the blank node if this is a blank node term
    pub fn as_blank_node(&self) -> Option<&BlankNode> {
        match self {
            Term::BlankNode(b) => Some(b),
            _ => None,
        }
    }

    /// The scope of the factory that created this term
    pub fn scope(&self) -> Scope {
        match self {
            Term::Iri(i) => i.scope(),
            Term::Literal(l) => l.scope(),
            Term::BlankNode(b) => b.scope(),
        }
    }

    /// The canonical N-Triples form of this term
    pub fn ntriples_string(&self) -> String {
        self.to_string()
    }
}

impl From<BlankNode> for Term {
    fn from(b: BlankNode) -> Self {
        Term::BlankNode(b)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(i) => write!(f, "{}", i),
            Term::Literal(l) => write!(f, "{}", l),
            Term::BlankNode(b) => write!(f, "{}", b),
        }
    }
}

fn check_resource(term: &Term, position: &str) -> RdfResult<()> {
    if term.is_resource() {
        Ok(())
    } else {
        Err(RdfError::invalid_position(format!("{} cannot be a literal: {}", position, term))
            .with_context("position", position))
    }
}

fn check_predicate(term: &Term) -> RdfResult<()> {
    if term.is_iri() {
        Ok(())
    } else {
        Err(RdfError::invalid_position(format!("predicate must be an IRI: {}", term))
            .with_context("position", "predicate"))
    }
}

/// A triple (statement) in RDF
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    subject: Term,
    predicate: Term,
    object: Term,
}

impl Triple {
    /// Create a triple, checking that the subject is an IRI or blank node and
    /// the predicate an IRI
    pub fn new(subject: Term, predicate: Term, object: Term) -> RdfResult<Self> {
        check_resource(&subject, "subject")?;
        check_predicate(&predicate)?;
        Ok(Triple { subject, predicate, object })
    }

    /// Assemble a triple from components already known to be well placed
    pub(crate) fn from_parts(subject: Term, predicate: Term, object: Term) -> Self {
        Triple { subject, predicate, object }
    }

    pub fn subject(&self) -> &Term {
        &self.subject
    }

    pub fn predicate(&self) -> &Term {
        &self.predicate
    }

    pub fn object(&self) -> &Term {
        &self.object
    }

    /// Split into (subject, predicate, object)
    pub fn into_parts(self) -> (Term, Term, Term) {
        (self.subject, self.predicate, self.object)
    }
}

impl fmt::Debug for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A quad is a triple with an associated graph name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    /// The graph this quad belongs to. None means the default graph.
    graph_name: Option<Term>,
    triple: Triple,
}

impl Quad {
    /// Create a quad, checking term positions like [`Triple::new`] and that
    /// the graph name is an IRI or blank node
    pub fn new(graph_name: Option<Term>, subject: Term, predicate: Term, object: Term) -> RdfResult<Self> {
        let triple = Triple::new(subject, predicate, object)?;
        Self::from_triple(triple, graph_name)
    }

    /// Place a triple into a graph
    pub fn from_triple(triple: Triple, graph_name: Option<Term>) -> RdfResult<Self> {
        if let Some(g) = &graph_name {
            check_resource(g, "graph name")?;
        }
        Ok(Quad { graph_name, triple })
    }

    pub(crate) fn from_parts(graph_name: Option<Term>, triple: Triple) -> Self {
        Quad { graph_name, triple }
    }

    pub fn graph_name(&self) -> Option<&Term> {
        self.graph_name.as_ref()
    }

    pub fn subject(&self) -> &Term {
        &self.triple.subject
    }

    pub fn predicate(&self) -> &Term {
        &self.triple.predicate
    }

    pub fn object(&self) -> &Term {
        &self.triple.object
    }

    /// Borrow the triple part
    pub fn as_triple(&self) -> &Triple {
        &self.triple
    }

    /// Convert to a triple (dropping graph information)
    pub fn to_triple(&self) -> Triple {
        self.triple.clone()
    }

    /// Split into graph name and triple
    pub fn into_parts(self) -> (Option<Term>, Triple) {
        (self.graph_name, self.triple)
    }

    /// Check if this quad is in the default graph
    pub fn is_default_graph(&self) -> bool {
        self.graph_name.is_none()
    }
}

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.triple;
        match &self.graph_name {
            Some(g) => write!(f, "{} {} {} {} .", t.subject, t.predicate, t.object, g),
            None => write!(f, "{} {} {} .", t.subject, t.predicate, t.object),
        }
    }
}
