//! Term factory
//!
//! A factory owns a [`Scope`] and an IRI intern table. Cloning a factory
//! shares both, so clones produce terms that are local to each other.

use std::sync::Arc;

use fnv::FnvHashMap;
use parking_lot::RwLock;

use super::{first_invalid_char, BlankNode, Iri, Literal, Quad, Scope, Term, Triple};
use crate::config::{IriValidation, MemrdfConfig};
use crate::core::ns;
use crate::error::{RdfError, RdfResult};
use crate::store::{Dataset, Graph};

#[derive(Debug)]
struct FactoryInner {
    scope: Scope,
    validation: IriValidation,
    iris: RwLock<FnvHashMap<String, Arc<Iri>>>,
}

/// Creates IRIs, literals, blank nodes, triples and quads within one scope
#[derive(Clone, Debug)]
pub struct TermFactory {
    inner: Arc<FactoryInner>,
}

impl Default for TermFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TermFactory {
    /// Create a factory with a fresh scope and minimal IRI validation
    pub fn new() -> Self {
        Self::with_validation(IriValidation::Minimal)
    }

    /// Create a factory using the term settings of `config`
    pub fn with_config(config: &MemrdfConfig) -> Self {
        Self::with_validation(config.terms.iri_validation)
    }

    pub fn with_validation(validation: IriValidation) -> Self {
        TermFactory {
            inner: Arc::new(FactoryInner {
                scope: Scope::fresh(),
                validation,
                iris: RwLock::new(FnvHashMap::default()),
            }),
        }
    }

    /// The scope every term of this factory carries
    pub fn scope(&self) -> Scope {
        self.inner.scope
    }

    pub fn validation(&self) -> IriValidation {
        self.inner.validation
    }

    /// Number of distinct IRIs interned so far
    pub fn interned_iris(&self) -> usize {
        self.inner.iris.read().len()
    }

    // ========================================================================
    // IRIs
    // ========================================================================

    /// Create (or reuse) the IRI term for `value`
    pub fn create_iri(&self, value: &str) -> RdfResult<Term> {
        self.intern_iri(value).map(Term::Iri)
    }

    pub(crate) fn intern_iri(&self, value: &str) -> RdfResult<Arc<Iri>> {
        if let Some(iri) = self.inner.iris.read().get(value) {
            return Ok(Arc::clone(iri));
        }
        self.validate_iri(value)?;

        let mut iris = self.inner.iris.write();
        let iri = iris
            .entry(value.to_string())
            .or_insert_with(|| Arc::new(Iri::new(value.to_string(), self.inner.scope)));
        Ok(Arc::clone(iri))
    }

    /// IRI for a value taken from another scope
    ///
    /// Reuses the interned IRI when there is one but never adds to the table.
    pub(crate) fn adopt_iri(&self, value: &str) -> RdfResult<Arc<Iri>> {
        if let Some(iri) = self.inner.iris.read().get(value) {
            return Ok(Arc::clone(iri));
        }
        self.validate_iri(value)?;
        Ok(Arc::new(Iri::new(value.to_string(), self.inner.scope)))
    }

    fn validate_iri(&self, value: &str) -> RdfResult<()> {
        if value.is_empty() {
            return Err(RdfError::invalid_iri("IRI cannot be empty"));
        }
        if self.inner.validation == IriValidation::Strict {
            if let Some(c) = first_invalid_char(value) {
                return Err(RdfError::invalid_iri(format!("IRI contains {:?}: {}", c, value))
                    .with_context("iri", value)
                    .with_hint("Percent-encode reserved characters"));
            }
        }
        Ok(())
    }

    /// Interned IRI for a vocabulary constant that always validates
    fn vocab_iri(&self, value: &'static str) -> Arc<Iri> {
        if let Some(iri) = self.inner.iris.read().get(value) {
            return Arc::clone(iri);
        }
        let mut iris = self.inner.iris.write();
        Arc::clone(
            iris.entry(value.to_string())
                .or_insert_with(|| Arc::new(Iri::new(value.to_string(), self.inner.scope))),
        )
    }

    // ========================================================================
    // Literals
    // ========================================================================

    /// Create a plain `xsd:string` literal
    pub fn create_literal(&self, lexical: &str) -> Term {
        let datatype = self.vocab_iri(ns::XSD_STRING);
        self.literal(lexical, &datatype, None)
    }

    /// Create a literal with an explicit datatype IRI
    pub fn create_typed_literal(&self, lexical: &str, datatype: &str) -> RdfResult<Term> {
        let datatype = self.intern_iri(datatype)?;
        Ok(self.literal(lexical, &datatype, None))
    }

    /// Create a language-tagged `rdf:langString` literal
    pub fn create_lang_literal(&self, lexical: &str, language: &str) -> RdfResult<Term> {
        validate_language_tag(language)?;
        let datatype = self.vocab_iri(ns::RDF_LANG_STRING);
        Ok(self.literal(lexical, &datatype, Some(language)))
    }

    /// Re-create `literal` in this scope, keeping lexical form, datatype and
    /// language tag exactly as they are
    pub(crate) fn copy_literal(&self, literal: &Literal) -> RdfResult<Term> {
        if let Some(lang) = literal.language() {
            validate_language_tag(lang)?;
        }
        let datatype = self.adopt_iri(literal.datatype().as_str())?;
        Ok(self.literal(literal.lexical_form(), &datatype, literal.language()))
    }

    fn literal(&self, lexical: &str, datatype: &Arc<Iri>, language: Option<&str>) -> Term {
        Term::Literal(Arc::new(Literal::new(
            lexical.to_string(),
            Iri::clone(datatype),
            language.map(String::from),
            self.inner.scope,
        )))
    }

    // ========================================================================
    // Blank nodes
    // ========================================================================

    /// Mint a fresh blank node
    pub fn create_blank_node(&self) -> Term {
        Term::BlankNode(BlankNode::fresh(self.inner.scope))
    }

    /// Resolve `name` to this scope's blank node for it
    ///
    /// The same name always gives equal blank nodes from the same factory (or
    /// its clones). Other factories resolve it to a different node.
    pub fn create_named_blank_node(&self, name: &str) -> Term {
        Term::BlankNode(BlankNode::named(self.inner.scope, name))
    }

    // ========================================================================
    // Statements and stores
    // ========================================================================

    pub fn create_triple(&self, subject: Term, predicate: Term, object: Term) -> RdfResult<Triple> {
        Triple::new(subject, predicate, object)
    }

    pub fn create_quad(
        &self,
        graph_name: Option<Term>,
        subject: Term,
        predicate: Term,
        object: Term,
    ) -> RdfResult<Quad> {
        Quad::new(graph_name, subject, predicate, object)
    }

    /// Create an empty graph sharing this factory's scope
    pub fn create_graph(&self) -> Graph {
        Graph::with_factory(self.clone())
    }

    /// Create an empty dataset sharing this factory's scope
    pub fn create_dataset(&self) -> Dataset {
        Dataset::with_factory(self.clone())
    }
}

/// BCP 47 shape check: `[a-zA-Z]+(-[a-zA-Z0-9]+)*`
fn validate_language_tag(tag: &str) -> RdfResult<()> {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .map(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);
    let rest_ok = parts.all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_alphanumeric()));

    if primary_ok && rest_ok {
        Ok(())
    } else {
        Err(RdfError::invalid_language_tag(format!("Invalid language tag: {:?}", tag))
            .with_context("language", tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_create_iri_interns() {
        let f = TermFactory::new();
        let a = f.create_iri("http://example.org/a").unwrap();
        let b = f.create_iri("http://example.org/a").unwrap();
        assert_eq!(a, b);
        match (&a, &b) {
            (Term::Iri(x), Term::Iri(y)) => assert!(Arc::ptr_eq(x, y)),
            _ => panic!("expected IRIs"),
        }
        assert_eq!(f.interned_iris(), 1);
    }

    #[test]
    fn test_empty_iri_rejected() {
        let f = TermFactory::new();
        let err = f.create_iri("").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidIri);
        assert!(err.is_invalid_term());
    }

    #[test]
    fn test_strict_validation() {
        let lax = TermFactory::new();
        assert!(lax.create_iri("not an iri").is_ok());

        let strict = TermFactory::with_validation(IriValidation::Strict);
        assert!(strict.create_iri("not an iri").is_err());
        assert!(strict.create_iri("http://example.org/ok").is_ok());
        assert!(strict.create_typed_literal("1", "bad type").is_err());
    }

    #[test]
    fn test_literal_defaults() {
        let f = TermFactory::new();
        let plain = f.create_literal("x");
        let typed = f.create_typed_literal("x", ns::XSD_STRING).unwrap();
        assert_eq!(plain, typed);
        assert!(plain.as_literal().unwrap().is_plain());

        let lang = f.create_lang_literal("x", "en").unwrap();
        assert_eq!(lang.as_literal().unwrap().datatype().as_str(), ns::RDF_LANG_STRING);
        assert_ne!(plain, lang);
    }

    #[test]
    fn test_language_tag_validation() {
        let f = TermFactory::new();
        assert!(f.create_lang_literal("x", "en").is_ok());
        assert!(f.create_lang_literal("x", "en-US").is_ok());
        assert!(f.create_lang_literal("x", "sr-Latn-RS").is_ok());
        for bad in ["", "-en", "en-", "e n", "1en"] {
            let err = f.create_lang_literal("x", bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidLanguageTag, "tag {:?}", bad);
        }
    }

    #[test]
    fn test_blank_nodes_scoped() {
        let a = TermFactory::new();
        let b = TermFactory::new();

        assert_eq!(a.create_named_blank_node("x"), a.create_named_blank_node("x"));
        assert_ne!(a.create_named_blank_node("x"), b.create_named_blank_node("x"));
        assert_ne!(a.create_blank_node(), a.create_blank_node());

        let shared = a.clone();
        assert_eq!(a.create_named_blank_node("x"), shared.create_named_blank_node("x"));
    }

    #[test]
    fn test_copy_literal_preserves_fields() {
        let foreign = TermFactory::new();
        let local = TermFactory::new();
        let lit = foreign.create_lang_literal("bonjour", "fr-CA").unwrap();

        let copy = local.copy_literal(lit.as_literal().unwrap()).unwrap();
        assert_eq!(copy, lit);
        assert_eq!(copy.scope(), local.scope());
        assert_eq!(copy.as_literal().unwrap().language(), Some("fr-CA"));
    }

    #[test]
    fn test_adopt_iri_reuses_without_interning() {
        let f = TermFactory::new();
        let known = f.intern_iri("http://example.org/known").unwrap();

        assert!(Arc::ptr_eq(&f.adopt_iri("http://example.org/known").unwrap(), &known));
        let fresh = f.adopt_iri("http://example.org/fresh").unwrap();
        assert_eq!(fresh.scope(), f.scope());
        assert_eq!(f.interned_iris(), 1);
        assert_eq!(f.adopt_iri("").unwrap_err().code, ErrorCode::InvalidIri);
    }

    #[test]
    fn test_created_stores_share_scope() {
        let f = TermFactory::new();
        assert_eq!(f.create_graph().factory().scope(), f.scope());
        assert_eq!(f.create_dataset().factory().scope(), f.scope());
    }
}
