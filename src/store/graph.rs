//! Graph: an in-memory set of triples

use std::fmt;

use parking_lot::RwLock;
use tracing::{debug, trace};

use super::import::{import_triple, localize_pattern, localize_triple, ScopedPattern};
use super::{triple_set, write_limited, GraphPattern, TriplePattern, TripleSet, Triples};
use crate::config::{MemrdfConfig, StoreConfig};
use crate::core::TripleStore;
use crate::error::RdfResult;
use crate::term::{Term, TermFactory, Triple};

/// A set of triples, iterated in insertion order
///
/// Removing a single triple keeps that order and so costs O(n) in the size of
/// the graph; bulk removal through [`TripleStore::remove_matching`] is one pass.
///
/// Every graph owns a [`TermFactory`]. Triples built from another factory's
/// terms are adapted on the way in, so the stored terms always belong to this
/// graph's scope.
pub struct Graph {
    factory: TermFactory,
    triples: RwLock<TripleSet>,
    display_limit: usize,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Create an empty graph with its own factory
    pub fn new() -> Self {
        Self::with_factory(TermFactory::new())
    }

    /// Create an empty graph sharing `factory`'s scope
    pub fn with_factory(factory: TermFactory) -> Self {
        Self::build(factory, &StoreConfig::default())
    }

    /// Create an empty graph using the term and store settings of `config`
    pub fn with_config(config: &MemrdfConfig) -> Self {
        Self::build(TermFactory::with_config(config), &config.store)
    }

    fn build(factory: TermFactory, store: &StoreConfig) -> Self {
        Graph {
            factory,
            triples: RwLock::new(triple_set(store.initial_capacity)),
            display_limit: store.display_limit,
        }
    }

    /// The factory whose scope this graph's terms live in
    pub fn factory(&self) -> &TermFactory {
        &self.factory
    }

    /// Snapshot of the triples satisfying an arbitrary predicate
    ///
    /// `filter` runs on a copy taken under the lock, so it may call back into
    /// the graph.
    pub fn triples_filtered<F>(&self, filter: F) -> Triples
    where
        F: Fn(&Triple) -> bool,
    {
        let snapshot: Vec<Triple> = self.triples.read().iter().cloned().collect();
        Triples::new(snapshot.into_iter().filter(|t| filter(t)).collect())
    }

    fn scoped<'t>(
        &self,
        subject: Option<&'t Term>,
        predicate: Option<&'t Term>,
        object: Option<&'t Term>,
    ) -> ScopedPattern<'t> {
        localize_pattern(self.factory.scope(), GraphPattern::Any, subject, predicate, object)
    }
}

impl TripleStore for Graph {
    fn add(&self, triple: &Triple) -> RdfResult<bool> {
        let local = import_triple(&self.factory, triple)?;

        let mut triples = self.triples.write();
        if triples.contains(&*local) {
            return Ok(false);
        }
        trace!(triple = %local, "added triple");
        Ok(triples.insert(local.into_owned()))
    }

    fn remove(&self, triple: &Triple) -> RdfResult<bool> {
        let local = localize_triple(self.factory.scope(), triple);
        let removed = self.triples.write().shift_remove(&*local);
        if removed {
            trace!(triple = %local, "removed triple");
        }
        Ok(removed)
    }

    fn remove_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> RdfResult<usize> {
        let scoped = self.scoped(subject, predicate, object);
        let pattern = scoped.pattern().triple;

        let mut triples = self.triples.write();
        let removed = sweep(&mut triples, &pattern);
        if removed > 0 {
            debug!(removed, "removed matching triples");
        }
        Ok(removed)
    }

    fn contains(&self, triple: &Triple) -> bool {
        let local = localize_triple(self.factory.scope(), triple);
        self.triples.read().contains(&*local)
    }

    fn contains_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        let scoped = self.scoped(subject, predicate, object);
        any_match(&self.triples.read(), &scoped.pattern().triple)
    }

    fn len(&self) -> usize {
        self.triples.read().len()
    }

    fn triples_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples {
        let scoped = self.scoped(subject, predicate, object);
        Triples::new(collect_matches(&self.triples.read(), &scoped.pattern().triple))
    }

    fn clear(&self) -> RdfResult<()> {
        let mut triples = self.triples.write();
        debug!(cleared = triples.len(), "cleared graph");
        triples.clear();
        Ok(())
    }

    fn factory(&self) -> &TermFactory {
        &self.factory
    }
}

/// Whether any triple in `set` matches; a concrete pattern is a set lookup
pub(crate) fn any_match(set: &TripleSet, pattern: &TriplePattern<'_>) -> bool {
    if pattern.is_concrete() {
        return pattern.to_triple().map_or(false, |t| set.contains(&t));
    }
    set.iter().any(|t| pattern.matches(t))
}

pub(crate) fn collect_matches(set: &TripleSet, pattern: &TriplePattern<'_>) -> Vec<Triple> {
    if pattern.is_wildcard() {
        return set.iter().cloned().collect();
    }
    if pattern.is_concrete() {
        return pattern.to_triple().filter(|t| set.contains(t)).into_iter().collect();
    }
    set.iter().filter(|t| pattern.matches(t)).cloned().collect()
}

/// Delete every match from `set`, keeping the order of the survivors
///
/// Matches are marked in one pass over the set and dropped in a second, both
/// under the caller's write guard.
pub(crate) fn sweep(set: &mut TripleSet, pattern: &TriplePattern<'_>) -> usize {
    let doomed: Vec<usize> = set
        .iter()
        .enumerate()
        .filter(|(_, t)| pattern.matches(t))
        .map(|(i, _)| i)
        .collect();
    if doomed.is_empty() {
        return 0;
    }

    let mut index = 0;
    let mut next = doomed.iter().peekable();
    set.retain(|_| {
        let keep = next.peek().map_or(true, |&&d| d != index);
        if !keep {
            next.next();
        }
        index += 1;
        keep
    });
    doomed.len()
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let triples = self.triples.read();
        write_limited(f, triples.iter(), triples.len(), self.display_limit)
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("scope", &self.factory.scope())
            .field("len", &self.triples.read().len())
            .finish()
    }
}
