//! Core trait abstractions
//!
//! [`TripleStore`] is the Graph-shaped interface implemented by [`Graph`],
//! by the per-partition views of a [`Dataset`] and by its union view, so code
//! written against a graph works on any of them.
//!
//! [`Graph`]: crate::store::Graph
//! [`Dataset`]: crate::store::Dataset

use crate::error::RdfResult;
use crate::store::Triples;
use crate::term::{Term, TermFactory, Triple};

// ============================================================================
// Triple Store Abstraction
// ============================================================================

/// A set of triples with pattern-based retrieval
///
/// Pattern arguments use `None` as a wildcard. Terms from other factories are
/// accepted everywhere; blank nodes from other scopes are mapped into the
/// store's scope before comparison, the same way `add` maps them.
///
/// This trait is dyn-compatible for use with trait objects.
pub trait TripleStore: Send + Sync {
    /// Add a triple, returning `true` if it was not already present
    fn add(&self, triple: &Triple) -> RdfResult<bool>;

    /// Remove an exact triple, returning `true` if it was present
    fn remove(&self, triple: &Triple) -> RdfResult<bool>;

    /// Remove every triple matching the pattern, returning how many went
    fn remove_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> RdfResult<usize>;

    /// Check if a triple exists in the store
    fn contains(&self, triple: &Triple) -> bool;

    /// Check if at least one triple matches the pattern
    fn contains_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool;

    /// Get the number of triples
    fn len(&self) -> usize;

    /// Check if the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the triples matching the pattern
    fn triples_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples;

    /// Snapshot of all triples
    fn triples(&self) -> Triples {
        self.triples_matching(None, None, None)
    }

    /// Remove all triples
    fn clear(&self) -> RdfResult<()>;

    /// The factory whose scope this store's terms live in
    fn factory(&self) -> &TermFactory;
}

/// Extension trait for convenience methods on TripleStore
///
/// This provides ergonomic methods that can't be in the main trait
/// due to dyn-compatibility requirements.
pub trait TripleStoreExt: TripleStore {
    /// Assemble and add a triple
    fn add_spo(&self, subject: Term, predicate: Term, object: Term) -> RdfResult<bool> {
        self.add(&Triple::new(subject, predicate, object)?)
    }

    /// Add triples from any iterator, returning how many were new
    ///
    /// Stops at the first failure; triples added before it stay added.
    fn add_all<I: IntoIterator<Item = Triple>>(&self, triples: I) -> RdfResult<usize> {
        let mut added = 0;
        for triple in triples {
            if self.add(&triple)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Clone all triples to a Vec
    fn to_vec(&self) -> Vec<Triple> {
        self.triples().collect()
    }
}

// Blanket implementation for all TripleStore implementors
impl<T: TripleStore + ?Sized> TripleStoreExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Graph;

    fn as_dyn(store: &dyn TripleStore) -> usize {
        store.triples().count()
    }

    #[test]
    fn test_ext_methods_on_graph() {
        let graph = Graph::new();
        let f = graph.factory().clone();
        let s = f.create_iri("http://ex/s").unwrap();
        let p = f.create_iri("http://ex/p").unwrap();

        assert!(graph.add_spo(s.clone(), p.clone(), f.create_literal("a")).unwrap());
        let more = vec![
            Triple::new(s.clone(), p.clone(), f.create_literal("a")).unwrap(),
            Triple::new(s.clone(), p.clone(), f.create_literal("b")).unwrap(),
        ];
        assert_eq!(graph.add_all(more).unwrap(), 1);
        assert_eq!(graph.to_vec().len(), 2);
        assert_eq!(as_dyn(&graph), 2);
    }

    #[test]
    fn test_add_spo_checks_positions() {
        let graph = Graph::new();
        let f = graph.factory().clone();
        let lit = f.create_literal("x");
        assert!(graph.add_spo(lit.clone(), lit.clone(), lit).is_err());
        assert!(graph.is_empty());
    }
}
