//! RDF Dataset Implementation
//!
//! An RDF Dataset consists of a default graph and zero or more named graphs.
//! Quads are stored partitioned by graph name; a named partition exists
//! exactly as long as it holds at least one triple.
//!
//! # Example
//!
//! ```
//! use memrdf::store::{Dataset, GraphPattern};
//! use memrdf::core::TripleStore;
//!
//! let dataset = Dataset::new();
//! let f = dataset.factory().clone();
//! let g = f.create_iri("http://example.org/graph1").unwrap();
//! let s = f.create_iri("http://example.org/s").unwrap();
//! let p = f.create_iri("http://example.org/p").unwrap();
//!
//! dataset.add_gspo(Some(g.clone()), s.clone(), p.clone(), f.create_literal("o")).unwrap();
//! dataset.add_gspo(None, s.clone(), p.clone(), f.create_literal("o2")).unwrap();
//!
//! assert_eq!(dataset.graph().len(), 1);
//! assert_eq!(dataset.graph_names().collect::<Vec<_>>(), vec![g]);
//! assert_eq!(dataset.union_graph().len(), 2);
//! assert_eq!(dataset.quads_matching(GraphPattern::Any, Some(&s), None, None).count(), 2);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::vec;

use fnv::FnvBuildHasher;
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use tracing::{debug, trace};

use super::graph::{any_match, collect_matches, sweep};
use super::import::{
    import_quad, import_term, import_triple, localize_opt, localize_pattern, localize_quad, localize_term,
    localize_triple,
};
use super::view::{DatasetGraph, UnionGraph};
use super::{triple_set, write_limited, GraphPattern, QuadPattern, Quads, TripleSet, Triples};
use crate::config::{MemrdfConfig, StoreConfig};
use crate::error::{RdfError, RdfResult};
use crate::term::{Quad, Term, TermFactory, Triple};

/// The default graph plus the named graphs, in creation order
#[derive(Default)]
struct Partitions {
    default: TripleSet,
    named: IndexMap<Term, TripleSet, FnvBuildHasher>,
}

impl Partitions {
    fn get(&self, name: Option<&Term>) -> Option<&TripleSet> {
        match name {
            None => Some(&self.default),
            Some(n) => self.named.get(n),
        }
    }

    fn get_or_create(&mut self, name: Option<&Term>) -> &mut TripleSet {
        match name {
            None => &mut self.default,
            Some(n) => self.named.entry(n.clone()).or_default(),
        }
    }

    /// The partitions a graph pattern selects, each with its name
    fn selected(&self, graph: GraphPattern<'_>) -> Vec<(Option<&Term>, &TripleSet)> {
        match graph {
            GraphPattern::Any => std::iter::once((None, &self.default))
                .chain(self.named.iter().map(|(n, p)| (Some(n), p)))
                .collect(),
            GraphPattern::Default => vec![(None, &self.default)],
            GraphPattern::Named(n) => self.named.get_key_value(n).map(|(n, p)| (Some(n), p)).into_iter().collect(),
        }
    }

    /// Drop named partitions that no longer hold anything
    fn prune(&mut self) {
        self.named.retain(|_, p| !p.is_empty());
    }

    fn len(&self) -> usize {
        self.default.len() + self.named.values().map(|p| p.len()).sum::<usize>()
    }
}

/// A set of quads partitioned into the default graph and named graphs
pub struct Dataset {
    factory: TermFactory,
    partitions: RwLock<Partitions>,
    display_limit: usize,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl Dataset {
    /// Create a new empty dataset with its own factory
    pub fn new() -> Self {
        Self::with_factory(TermFactory::new())
    }

    /// Create an empty dataset sharing `factory`'s scope
    pub fn with_factory(factory: TermFactory) -> Self {
        Self::build(factory, &StoreConfig::default())
    }

    /// Create an empty dataset using the term and store settings of `config`
    pub fn with_config(config: &MemrdfConfig) -> Self {
        Self::build(TermFactory::with_config(config), &config.store)
    }

    fn build(factory: TermFactory, store: &StoreConfig) -> Self {
        Dataset {
            factory,
            partitions: RwLock::new(Partitions {
                default: triple_set(store.initial_capacity),
                named: IndexMap::default(),
            }),
            display_limit: store.display_limit,
        }
    }

    /// The factory whose scope this dataset's terms live in
    pub fn factory(&self) -> &TermFactory {
        &self.factory
    }

    pub(crate) fn display_limit(&self) -> usize {
        self.display_limit
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Add a quad, returning `true` if it was not already present
    pub fn add_quad(&self, quad: &Quad) -> RdfResult<bool> {
        let local = import_quad(&self.factory, quad)?;
        Ok(self.insert(local.graph_name(), Cow::Borrowed(local.as_triple())))
    }

    /// Assemble and add a quad; `None` names the default graph
    pub fn add_gspo(&self, graph_name: Option<Term>, subject: Term, predicate: Term, object: Term) -> RdfResult<bool> {
        self.add_quad(&Quad::new(graph_name, subject, predicate, object)?)
    }

    /// Add a triple to one partition; the name must already be checked
    pub(crate) fn add_in(&self, graph_name: Option<&Term>, triple: &Triple) -> RdfResult<bool> {
        let name = graph_name.map(|g| import_term(&self.factory, g)).transpose()?;
        let local = import_triple(&self.factory, triple)?;
        Ok(self.insert(name.as_deref(), local))
    }

    fn insert(&self, graph_name: Option<&Term>, triple: Cow<'_, Triple>) -> bool {
        let mut partitions = self.partitions.write();
        if partitions.get(graph_name).map_or(false, |p| p.contains(&*triple)) {
            return false;
        }
        trace!(graph = ?graph_name, triple = %triple, "added quad");
        partitions.get_or_create(graph_name).insert(triple.into_owned())
    }

    /// Remove an exact quad, returning `true` if it was present
    ///
    /// The partition keeps its insertion order, so this is O(n) in the size of
    /// that partition.
    pub fn remove_quad(&self, quad: &Quad) -> bool {
        let local = localize_quad(self.factory.scope(), quad);
        self.remove_local(local.graph_name(), local.as_triple())
    }

    pub(crate) fn remove_in(&self, graph_name: Option<&Term>, triple: &Triple) -> bool {
        let scope = self.factory.scope();
        let name = localize_opt(scope, graph_name);
        let local = localize_triple(scope, triple);
        self.remove_local(name.as_deref(), &local)
    }

    fn remove_local(&self, graph_name: Option<&Term>, triple: &Triple) -> bool {
        let mut partitions = self.partitions.write();
        let removed = match graph_name {
            None => partitions.default.shift_remove(triple),
            Some(name) => {
                let removed = partitions.named.get_mut(name).map_or(false, |p| p.shift_remove(triple));
                if partitions.named.get(name).map_or(false, |p| p.is_empty()) {
                    partitions.named.shift_remove(name);
                    debug!(graph = %name, "dropped empty named graph");
                }
                removed
            }
        };
        if removed {
            trace!(graph = ?graph_name, triple = %triple, "removed quad");
        }
        removed
    }

    /// Remove every quad matching the pattern, returning how many went
    ///
    /// Named graphs left empty are dropped.
    pub fn remove_matching(
        &self,
        graph: GraphPattern<'_>,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> usize {
        let scoped = localize_pattern(self.factory.scope(), graph, subject, predicate, object);
        let QuadPattern { graph, triple: pattern } = scoped.pattern();

        let mut partitions = self.partitions.write();
        let removed = match graph {
            GraphPattern::Any => {
                let mut removed = sweep(&mut partitions.default, &pattern);
                for partition in partitions.named.values_mut() {
                    removed += sweep(partition, &pattern);
                }
                removed
            }
            GraphPattern::Default => sweep(&mut partitions.default, &pattern),
            GraphPattern::Named(name) => partitions.named.get_mut(name).map_or(0, |p| sweep(p, &pattern)),
        };
        partitions.prune();

        if removed > 0 {
            debug!(removed, "removed matching quads");
        }
        removed
    }

    /// Remove everything; the dataset keeps its factory and scope
    pub fn clear(&self) {
        let mut partitions = self.partitions.write();
        debug!(cleared = partitions.len(), graphs = partitions.named.len(), "cleared dataset");
        partitions.default.clear();
        partitions.named.clear();
    }

    /// Empty a single partition
    pub(crate) fn clear_in(&self, graph_name: Option<&Term>) {
        let name = localize_opt(self.factory.scope(), graph_name);
        let mut partitions = self.partitions.write();
        let cleared = match name.as_deref() {
            None => {
                let n = partitions.default.len();
                partitions.default.clear();
                n
            }
            Some(n) => partitions.named.shift_remove(n).map_or(0, |p| p.len()),
        };
        debug!(graph = ?name, cleared, "cleared graph");
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Check if an exact quad is present
    pub fn contains_quad(&self, quad: &Quad) -> bool {
        let local = localize_quad(self.factory.scope(), quad);
        self.contains_local(local.graph_name(), local.as_triple())
    }

    pub(crate) fn contains_in(&self, graph_name: Option<&Term>, triple: &Triple) -> bool {
        let scope = self.factory.scope();
        let name = localize_opt(scope, graph_name);
        let local = localize_triple(scope, triple);
        self.contains_local(name.as_deref(), &local)
    }

    fn contains_local(&self, graph_name: Option<&Term>, triple: &Triple) -> bool {
        self.partitions.read().get(graph_name).map_or(false, |p| p.contains(triple))
    }

    /// Check if at least one quad matches the pattern
    pub fn contains_matching(
        &self,
        graph: GraphPattern<'_>,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        let scoped = localize_pattern(self.factory.scope(), graph, subject, predicate, object);
        let pattern = scoped.pattern();

        let partitions = self.partitions.read();
        partitions.selected(pattern.graph).into_iter().any(|(_, p)| any_match(p, &pattern.triple))
    }

    /// Total number of quads over every partition
    pub fn len(&self) -> usize {
        self.partitions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all quads, default graph first
    pub fn quads(&self) -> Quads {
        self.quads_matching(GraphPattern::Any, None, None, None)
    }

    /// Snapshot of the quads matching the pattern
    pub fn quads_matching(
        &self,
        graph: GraphPattern<'_>,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Quads {
        let scoped = localize_pattern(self.factory.scope(), graph, subject, predicate, object);
        let pattern = scoped.pattern();

        let partitions = self.partitions.read();
        let mut quads = Vec::new();
        for (name, partition) in partitions.selected(pattern.graph) {
            for triple in collect_matches(partition, &pattern.triple) {
                quads.push(Quad::from_parts(name.cloned(), triple));
            }
        }
        Quads::new(quads)
    }

    /// Triples of one partition matching the pattern
    pub(crate) fn triples_in(
        &self,
        graph_name: Option<&Term>,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples {
        let scoped = localize_pattern(self.factory.scope(), graph_name.into(), subject, predicate, object);
        let pattern = scoped.pattern();

        let partitions = self.partitions.read();
        let triples = partitions
            .selected(pattern.graph)
            .into_iter()
            .flat_map(|(_, partition)| collect_matches(partition, &pattern.triple))
            .collect();
        Triples::new(triples)
    }

    /// Matching triples over every partition, each reported once
    pub(crate) fn union_triples(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples {
        let scoped = localize_pattern(self.factory.scope(), GraphPattern::Any, subject, predicate, object);
        let pattern = scoped.pattern();

        let partitions = self.partitions.read();
        let mut seen: IndexSet<Triple, FnvBuildHasher> = IndexSet::default();
        for (_, partition) in partitions.selected(pattern.graph) {
            seen.extend(collect_matches(partition, &pattern.triple));
        }
        Triples::new(seen.into_iter().collect())
    }

    /// Number of distinct triples over every partition
    pub(crate) fn union_len(&self) -> usize {
        let partitions = self.partitions.read();
        if partitions.named.is_empty() {
            return partitions.default.len();
        }
        let mut seen: IndexSet<&Triple, FnvBuildHasher> = IndexSet::default();
        for (_, partition) in partitions.selected(GraphPattern::Any) {
            seen.extend(partition.iter());
        }
        seen.len()
    }

    /// Number of triples in one partition
    pub(crate) fn len_in(&self, graph_name: Option<&Term>) -> usize {
        let name = localize_opt(self.factory.scope(), graph_name);
        self.partitions.read().get(name.as_deref()).map_or(0, |p| p.len())
    }

    // ========================================================================
    // Graph views
    // ========================================================================

    /// View of the default graph
    pub fn graph(&self) -> DatasetGraph<'_> {
        DatasetGraph::new(self, None)
    }

    /// View of a named graph, if it currently holds any triple
    pub fn graph_named(&self, name: &Term) -> Option<DatasetGraph<'_>> {
        let local = localize_term(self.factory.scope(), name);
        if !self.partitions.read().named.contains_key(&*local) {
            return None;
        }
        Some(DatasetGraph::new(self, Some(local.into_owned())))
    }

    /// View of a named graph whether or not it holds anything yet
    ///
    /// Adding through the view creates the partition.
    pub fn named_graph(&self, name: &Term) -> RdfResult<DatasetGraph<'_>> {
        if name.is_literal() {
            return Err(RdfError::invalid_position(format!("graph name cannot be a literal: {}", name))
                .with_context("position", "graph name"));
        }
        let local = import_term(&self.factory, name)?;
        Ok(DatasetGraph::new(self, Some(local.into_owned())))
    }

    /// Read-only view over every partition
    pub fn union_graph(&self) -> UnionGraph<'_> {
        UnionGraph::new(self)
    }

    /// Check if a named graph currently holds any triple
    pub fn contains_graph(&self, name: &Term) -> bool {
        let local = localize_term(self.factory.scope(), name);
        self.partitions.read().named.contains_key(&*local)
    }

    /// Names of the graphs holding at least one triple, in creation order
    pub fn graph_names(&self) -> vec::IntoIter<Term> {
        let names: Vec<Term> = self.partitions.read().named.keys().cloned().collect();
        names.into_iter()
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partitions = self.partitions.read();
        let quads = partitions
            .selected(GraphPattern::Any)
            .into_iter()
            .flat_map(|(name, p)| p.iter().map(move |t| QuadLine(name, t)));
        write_limited(f, quads, partitions.len(), self.display_limit)
    }
}

/// Display form of a stored quad without cloning it
struct QuadLine<'a>(Option<&'a Term>, &'a Triple);

impl fmt::Display for QuadLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let QuadLine(name, t) = self;
        match name {
            Some(g) => write!(f, "{} {} {} {} .", t.subject(), t.predicate(), t.object(), g),
            None => write!(f, "{}", t),
        }
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let partitions = self.partitions.read();
        write!(
            f,
            "Dataset {{ default_graph: {} triples, named_graphs: {} }}",
            partitions.default.len(),
            partitions.named.len()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
