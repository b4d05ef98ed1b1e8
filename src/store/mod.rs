//! In-memory triple and quad stores
//!
//! A [`Graph`] holds a set of triples; a [`Dataset`] holds quads partitioned
//! into the default graph and named graphs. Both own a [`TermFactory`] and
//! adapt incoming terms to its scope (see [`import`]). Dataset partitions are
//! exposed through Graph-shaped views in [`view`].
//!
//! Query results are snapshots: the matching statements are collected under
//! the read lock and handed out through [`Triples`] / [`Quads`], so no lock is
//! held while a caller iterates.
//!
//! [`TermFactory`]: crate::term::TermFactory

use std::fmt;
use std::iter::FusedIterator;
use std::vec;

use fnv::FnvBuildHasher;
use indexmap::IndexSet;

use crate::term::{Quad, Triple};

mod dataset;
mod graph;
pub(crate) mod import;
mod pattern;
mod view;

pub use dataset::Dataset;
pub use graph::Graph;
pub use pattern::{GraphPattern, QuadPattern, TriplePattern};
pub use view::{DatasetGraph, UnionGraph};

/// Insertion-ordered triple set backing a graph or dataset partition
pub(crate) type TripleSet = IndexSet<Triple, FnvBuildHasher>;

pub(crate) fn triple_set(capacity: usize) -> TripleSet {
    IndexSet::with_capacity_and_hasher(capacity, FnvBuildHasher::default())
}

/// Snapshot iterator over triples
#[derive(Debug, Clone)]
pub struct Triples {
    inner: vec::IntoIter<Triple>,
}

impl Triples {
    pub(crate) fn new(triples: Vec<Triple>) -> Self {
        Triples { inner: triples.into_iter() }
    }
}

impl Iterator for Triples {
    type Item = Triple;

    fn next(&mut self) -> Option<Triple> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Triples {}
impl FusedIterator for Triples {}

/// Snapshot iterator over quads
#[derive(Debug, Clone)]
pub struct Quads {
    inner: vec::IntoIter<Quad>,
}

impl Quads {
    pub(crate) fn new(quads: Vec<Quad>) -> Self {
        Quads { inner: quads.into_iter() }
    }
}

impl Iterator for Quads {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Quads {}
impl FusedIterator for Quads {}

/// Write one statement per line, eliding everything after `limit`
pub(crate) fn write_limited<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    total: usize,
    limit: usize,
) -> fmt::Result {
    for item in items.into_iter().take(limit) {
        writeln!(f, "{}", item)?;
    }
    if total > limit {
        writeln!(f, "# ... +{} more", total - limit)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lines(Vec<&'static str>, usize);

    impl fmt::Display for Lines {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_limited(f, self.0.iter(), self.0.len(), self.1)
        }
    }

    #[test]
    fn test_write_limited() {
        assert_eq!(Lines(vec!["a", "b"], 10).to_string(), "a\nb\n");
        assert_eq!(Lines(vec!["a", "b", "c"], 1).to_string(), "a\n# ... +2 more\n");
        assert_eq!(Lines(vec![], 3).to_string(), "");
    }

    #[test]
    fn test_triples_is_exact_size() {
        assert_eq!(Triples::new(Vec::new()).len(), 0);
        assert_eq!(Quads::new(Vec::new()).count(), 0);
    }
}
