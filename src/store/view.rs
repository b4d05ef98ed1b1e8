//! Graph-shaped views over a dataset
//!
//! Views borrow the dataset and carry nothing but a partition selector, so
//! they never copy statements. A [`DatasetGraph`] reads and writes one
//! partition; a [`UnionGraph`] reads all of them and rejects writes.

use std::fmt;

use tracing::{debug, warn};

use super::{write_limited, Dataset, GraphPattern, Triples};
use crate::core::TripleStore;
use crate::error::{RdfError, RdfResult};
use crate::term::{Term, TermFactory, Triple};

/// One partition of a dataset seen as a graph
///
/// `name` is `None` for the default graph. Adding through a view of a named
/// graph creates that graph if needed; removing its last triple drops it.
#[derive(Clone)]
pub struct DatasetGraph<'a> {
    dataset: &'a Dataset,
    name: Option<Term>,
}

impl<'a> DatasetGraph<'a> {
    pub(crate) fn new(dataset: &'a Dataset, name: Option<Term>) -> Self {
        debug!(graph = ?name, "opened dataset graph view");
        DatasetGraph { dataset, name }
    }

    /// The graph name, or `None` for the default graph
    pub fn name(&self) -> Option<&Term> {
        self.name.as_ref()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn pattern(&self) -> GraphPattern<'_> {
        GraphPattern::from(self.name.as_ref())
    }
}

impl TripleStore for DatasetGraph<'_> {
    fn add(&self, triple: &Triple) -> RdfResult<bool> {
        self.dataset.add_in(self.name.as_ref(), triple)
    }

    fn remove(&self, triple: &Triple) -> RdfResult<bool> {
        Ok(self.dataset.remove_in(self.name.as_ref(), triple))
    }

    fn remove_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> RdfResult<usize> {
        Ok(self.dataset.remove_matching(self.pattern(), subject, predicate, object))
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.dataset.contains_in(self.name.as_ref(), triple)
    }

    fn contains_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        self.dataset.contains_matching(self.pattern(), subject, predicate, object)
    }

    fn len(&self) -> usize {
        self.dataset.len_in(self.name.as_ref())
    }

    fn triples_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples {
        self.dataset.triples_in(self.name.as_ref(), subject, predicate, object)
    }

    fn clear(&self) -> RdfResult<()> {
        self.dataset.clear_in(self.name.as_ref());
        Ok(())
    }

    fn factory(&self) -> &TermFactory {
        self.dataset.factory()
    }
}

impl fmt::Display for DatasetGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let triples = self.triples();
        let total = triples.len();
        write_limited(f, triples, total, self.dataset.display_limit())
    }
}

impl fmt::Debug for DatasetGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetGraph").field("name", &self.name).field("len", &self.len()).finish()
    }
}

/// Read-only union of every partition of a dataset
///
/// A triple stored in several partitions is reported once.
#[derive(Clone, Copy)]
pub struct UnionGraph<'a> {
    dataset: &'a Dataset,
}

impl<'a> UnionGraph<'a> {
    pub(crate) fn new(dataset: &'a Dataset) -> Self {
        UnionGraph { dataset }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    fn reject<T>(&self, operation: &str) -> RdfResult<T> {
        warn!(operation, "write rejected by read-only union graph");
        Err(RdfError::read_only("union graph").with_context("operation", operation))
    }
}

impl TripleStore for UnionGraph<'_> {
    fn add(&self, _triple: &Triple) -> RdfResult<bool> {
        self.reject("add")
    }

    fn remove(&self, _triple: &Triple) -> RdfResult<bool> {
        self.reject("remove")
    }

    fn remove_matching(
        &self,
        _subject: Option<&Term>,
        _predicate: Option<&Term>,
        _object: Option<&Term>,
    ) -> RdfResult<usize> {
        self.reject("remove_matching")
    }

    fn contains(&self, triple: &Triple) -> bool {
        self.dataset.contains_matching(
            GraphPattern::Any,
            Some(triple.subject()),
            Some(triple.predicate()),
            Some(triple.object()),
        )
    }

    fn contains_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> bool {
        self.dataset.contains_matching(GraphPattern::Any, subject, predicate, object)
    }

    fn len(&self) -> usize {
        self.dataset.union_len()
    }

    fn triples_matching(
        &self,
        subject: Option<&Term>,
        predicate: Option<&Term>,
        object: Option<&Term>,
    ) -> Triples {
        self.dataset.union_triples(subject, predicate, object)
    }

    fn clear(&self) -> RdfResult<()> {
        self.reject("clear")
    }

    fn factory(&self) -> &TermFactory {
        self.dataset.factory()
    }
}

impl fmt::Display for UnionGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let triples = self.triples();
        let total = triples.len();
        write_limited(f, triples, total, self.dataset.display_limit())
    }
}

impl fmt::Debug for UnionGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnionGraph").field("len", &self.len()).finish()
    }
}
