//! Single triple and quad patterns
//!
//! A pattern component set to `None` is a wildcard. Set components must be
//! equal to the stored component; all components are ANDed together.

use crate::term::{Quad, Term, Triple};

/// A (subject, predicate, object) pattern with optional wildcards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriplePattern<'a> {
    pub subject: Option<&'a Term>,
    pub predicate: Option<&'a Term>,
    pub object: Option<&'a Term>,
}

impl<'a> TriplePattern<'a> {
    pub fn new(subject: Option<&'a Term>, predicate: Option<&'a Term>, object: Option<&'a Term>) -> Self {
        TriplePattern { subject, predicate, object }
    }

    /// The pattern matching every triple
    pub fn any() -> Self {
        Self::default()
    }

    /// True when no component is a wildcard
    pub fn is_concrete(&self) -> bool {
        self.subject.is_some() && self.predicate.is_some() && self.object.is_some()
    }

    /// True when every component is a wildcard
    pub fn is_wildcard(&self) -> bool {
        self.subject.is_none() && self.predicate.is_none() && self.object.is_none()
    }

    /// The single triple a concrete pattern can match
    ///
    /// Returns `None` for patterns with wildcards or with components that
    /// could never appear in a stored triple (a literal subject, say), so a
    /// caller may fall back to a scan or report no match.
    pub fn to_triple(&self) -> Option<Triple> {
        match (self.subject, self.predicate, self.object) {
            (Some(s), Some(p), Some(o)) => Triple::new(s.clone(), p.clone(), o.clone()).ok(),
            _ => None,
        }
    }

    /// Check a stored triple against the pattern
    pub fn matches(&self, triple: &Triple) -> bool {
        // Objects vary the most, predicates the least.
        component_matches(self.object, triple.object())
            && component_matches(self.subject, triple.subject())
            && component_matches(self.predicate, triple.predicate())
    }
}

impl<'a> From<&'a Triple> for TriplePattern<'a> {
    fn from(triple: &'a Triple) -> Self {
        TriplePattern::new(Some(triple.subject()), Some(triple.predicate()), Some(triple.object()))
    }
}

#[inline]
fn component_matches(pattern: Option<&Term>, stored: &Term) -> bool {
    pattern.map_or(true, |p| p == stored)
}

/// Which partitions of a dataset a pattern looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GraphPattern<'a> {
    /// Every partition, default graph included
    #[default]
    Any,
    /// Only the default graph
    Default,
    /// Only the named graph with this name
    Named(&'a Term),
}

impl<'a> GraphPattern<'a> {
    /// Check a quad's graph name against the pattern
    pub fn matches(&self, graph_name: Option<&Term>) -> bool {
        match (self, graph_name) {
            (GraphPattern::Any, _) => true,
            (GraphPattern::Default, None) => true,
            (GraphPattern::Named(name), Some(g)) => *name == g,
            _ => false,
        }
    }
}

impl<'a> From<Option<&'a Term>> for GraphPattern<'a> {
    /// `None` selects the default graph, `Some` the named one
    fn from(name: Option<&'a Term>) -> Self {
        match name {
            Some(n) => GraphPattern::Named(n),
            None => GraphPattern::Default,
        }
    }
}

/// A (graph, subject, predicate, object) pattern
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadPattern<'a> {
    pub graph: GraphPattern<'a>,
    pub triple: TriplePattern<'a>,
}

impl<'a> QuadPattern<'a> {
    pub fn new(
        graph: GraphPattern<'a>,
        subject: Option<&'a Term>,
        predicate: Option<&'a Term>,
        object: Option<&'a Term>,
    ) -> Self {
        QuadPattern { graph, triple: TriplePattern::new(subject, predicate, object) }
    }

    pub fn matches(&self, quad: &Quad) -> bool {
        self.graph.matches(quad.graph_name()) && self.triple.matches(quad.as_triple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::TermFactory;

    fn sample(f: &TermFactory) -> (Term, Term, Term) {
        (
            f.create_iri("http://ex/s").unwrap(),
            f.create_iri("http://ex/p").unwrap(),
            f.create_literal("o"),
        )
    }

    #[test]
    fn test_wildcards_match_everything() {
        let f = TermFactory::new();
        let (s, p, o) = sample(&f);
        let t = Triple::new(s, p, o).unwrap();
        assert!(TriplePattern::any().matches(&t));
        assert!(TriplePattern::any().is_wildcard());
    }

    #[test]
    fn test_selectivity() {
        let f = TermFactory::new();
        let (s, p, o) = sample(&f);
        let t = Triple::new(s.clone(), p.clone(), o.clone()).unwrap();
        let other = f.create_iri("http://ex/other").unwrap();

        assert!(TriplePattern::from(&t).matches(&t));
        assert!(TriplePattern::new(Some(&s), None, None).matches(&t));
        assert!(!TriplePattern::new(Some(&other), None, None).matches(&t));
        assert!(!TriplePattern::new(None, Some(&other), None).matches(&t));
        assert!(!TriplePattern::new(None, None, Some(&other)).matches(&t));
        assert!(!TriplePattern::new(Some(&s), Some(&p), Some(&other)).matches(&t));
    }

    #[test]
    fn test_to_triple() {
        let f = TermFactory::new();
        let (s, p, o) = sample(&f);
        assert!(TriplePattern::new(Some(&s), Some(&p), None).to_triple().is_none());
        assert!(TriplePattern::new(Some(&o), Some(&p), Some(&s)).to_triple().is_none());

        let t = TriplePattern::new(Some(&s), Some(&p), Some(&o)).to_triple().unwrap();
        assert_eq!(t.object(), &o);
    }

    #[test]
    fn test_graph_pattern() {
        let f = TermFactory::new();
        let g1 = f.create_iri("http://ex/g1").unwrap();
        let g2 = f.create_iri("http://ex/g2").unwrap();

        assert!(GraphPattern::Any.matches(None));
        assert!(GraphPattern::Any.matches(Some(&g1)));
        assert!(GraphPattern::Default.matches(None));
        assert!(!GraphPattern::Default.matches(Some(&g1)));
        assert!(GraphPattern::Named(&g1).matches(Some(&g1)));
        assert!(!GraphPattern::Named(&g1).matches(Some(&g2)));
        assert!(!GraphPattern::Named(&g1).matches(None));

        assert_eq!(GraphPattern::from(None), GraphPattern::Default);
        assert_eq!(GraphPattern::from(Some(&g1)), GraphPattern::Named(&g1));
    }

    #[test]
    fn test_quad_pattern() {
        let f = TermFactory::new();
        let (s, p, o) = sample(&f);
        let g = f.create_iri("http://ex/g").unwrap();
        let q = f.create_quad(Some(g.clone()), s.clone(), p, o).unwrap();

        assert!(QuadPattern::new(GraphPattern::Named(&g), Some(&s), None, None).matches(&q));
        assert!(QuadPattern::new(GraphPattern::Any, None, None, None).matches(&q));
        assert!(!QuadPattern::new(GraphPattern::Default, Some(&s), None, None).matches(&q));
    }
}
