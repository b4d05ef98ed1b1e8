//! Term adaptation
//!
//! Stores only hold terms of their own scope. A term whose scope already
//! matches is adopted as-is; anything else is re-created through the store's
//! factory. Foreign blank nodes resolve to the local blank node named after
//! their internal identifier, which is itself derived from the foreign scope,
//! so distinct foreign nodes never collapse onto one local node.
//!
//! Adopted IRIs reuse an interned value when the factory has one but are never
//! added to the intern table, so the table only grows through the factory's
//! own `create_*` calls.
//!
//! The `localize_*` functions do the blank-node half of this without touching
//! the IRI intern table. Lookups use them: IRI and literal equality ignores
//! scope, so only blank nodes need mapping.

use std::borrow::Cow;

use tracing::debug;

use super::{GraphPattern, QuadPattern};
use crate::error::RdfResult;
use crate::term::{BlankNode, Quad, Scope, Term, TermFactory, Triple};

/// Adapt one term to the factory's scope
pub(crate) fn import_term<'t>(factory: &TermFactory, term: &'t Term) -> RdfResult<Cow<'t, Term>> {
    if term.scope() == factory.scope() {
        return Ok(Cow::Borrowed(term));
    }

    let local = match term {
        Term::Iri(iri) => Term::Iri(factory.adopt_iri(iri.as_str())?),
        Term::Literal(literal) => factory.copy_literal(literal)?,
        Term::BlankNode(blank) => {
            let local = factory.create_named_blank_node(&blank.internal_identifier());
            debug!(foreign = %blank, local = %local, "imported foreign blank node");
            local
        }
    };
    Ok(Cow::Owned(local))
}

/// Adapt every component of a triple, reusing it when nothing changed
pub(crate) fn import_triple<'t>(factory: &TermFactory, triple: &'t Triple) -> RdfResult<Cow<'t, Triple>> {
    let subject = import_term(factory, triple.subject())?;
    let predicate = import_term(factory, triple.predicate())?;
    let object = import_term(factory, triple.object())?;

    Ok(reassemble(triple, subject, predicate, object))
}

/// Adapt a quad's graph name and triple
pub(crate) fn import_quad<'q>(factory: &TermFactory, quad: &'q Quad) -> RdfResult<Cow<'q, Quad>> {
    let graph_name = quad.graph_name().map(|g| import_term(factory, g)).transpose()?;
    let triple = import_triple(factory, quad.as_triple())?;

    Ok(reassemble_quad(quad, graph_name, triple))
}

/// Map a foreign blank node into `scope`; other terms pass through
pub(crate) fn localize_term(scope: Scope, term: &Term) -> Cow<'_, Term> {
    match term {
        Term::BlankNode(blank) if blank.scope() != scope => {
            Cow::Owned(Term::BlankNode(BlankNode::named(scope, &blank.internal_identifier())))
        }
        _ => Cow::Borrowed(term),
    }
}

pub(crate) fn localize_triple(scope: Scope, triple: &Triple) -> Cow<'_, Triple> {
    reassemble(
        triple,
        localize_term(scope, triple.subject()),
        localize_term(scope, triple.predicate()),
        localize_term(scope, triple.object()),
    )
}

pub(crate) fn localize_quad(scope: Scope, quad: &Quad) -> Cow<'_, Quad> {
    let graph_name = quad.graph_name().map(|g| localize_term(scope, g));
    reassemble_quad(quad, graph_name, localize_triple(scope, quad.as_triple()))
}

/// Localize an optional pattern component
pub(crate) fn localize_opt(scope: Scope, term: Option<&Term>) -> Option<Cow<'_, Term>> {
    term.map(|t| localize_term(scope, t))
}

/// A quad pattern whose terms have been localized into one scope
pub(crate) struct ScopedPattern<'t> {
    graph: ScopedGraph<'t>,
    subject: Option<Cow<'t, Term>>,
    predicate: Option<Cow<'t, Term>>,
    object: Option<Cow<'t, Term>>,
}

enum ScopedGraph<'t> {
    Any,
    Default,
    Named(Cow<'t, Term>),
}

impl ScopedPattern<'_> {
    /// Borrow the localized terms as a pattern
    pub(crate) fn pattern(&self) -> QuadPattern<'_> {
        let graph = match &self.graph {
            ScopedGraph::Any => GraphPattern::Any,
            ScopedGraph::Default => GraphPattern::Default,
            ScopedGraph::Named(name) => GraphPattern::Named(&**name),
        };
        QuadPattern::new(graph, self.subject.as_deref(), self.predicate.as_deref(), self.object.as_deref())
    }
}

/// Localize every component of a quad pattern
pub(crate) fn localize_pattern<'t>(
    scope: Scope,
    graph: GraphPattern<'t>,
    subject: Option<&'t Term>,
    predicate: Option<&'t Term>,
    object: Option<&'t Term>,
) -> ScopedPattern<'t> {
    let graph = match graph {
        GraphPattern::Any => ScopedGraph::Any,
        GraphPattern::Default => ScopedGraph::Default,
        GraphPattern::Named(name) => ScopedGraph::Named(localize_term(scope, name)),
    };
    ScopedPattern {
        graph,
        subject: localize_opt(scope, subject),
        predicate: localize_opt(scope, predicate),
        object: localize_opt(scope, object),
    }
}

fn reassemble<'t>(
    original: &'t Triple,
    subject: Cow<'t, Term>,
    predicate: Cow<'t, Term>,
    object: Cow<'t, Term>,
) -> Cow<'t, Triple> {
    if is_borrowed(&subject) && is_borrowed(&predicate) && is_borrowed(&object) {
        return Cow::Borrowed(original);
    }
    // Components keep their positions, so the original checks still hold.
    Cow::Owned(Triple::from_parts(subject.into_owned(), predicate.into_owned(), object.into_owned()))
}

fn reassemble_quad<'q>(
    original: &'q Quad,
    graph_name: Option<Cow<'q, Term>>,
    triple: Cow<'q, Triple>,
) -> Cow<'q, Quad> {
    if graph_name.as_ref().map_or(true, is_borrowed) && is_borrowed(&triple) {
        return Cow::Borrowed(original);
    }
    Cow::Owned(Quad::from_parts(graph_name.map(Cow::into_owned), triple.into_owned()))
}

fn is_borrowed<B: ToOwned + ?Sized>(cow: &Cow<'_, B>) -> bool {
    matches!(cow, Cow::Borrowed(_))
}
