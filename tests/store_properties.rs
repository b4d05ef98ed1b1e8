//! Behavioural properties of graphs, datasets and their views

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use memrdf::ntriples::{parse_quad, parse_triple};
use memrdf::{
    Dataset, ErrorCode, Graph, GraphPattern, IriValidation, Quad, Term, TermFactory, Triple, TripleStore, TripleStoreExt,
};

fn iri(f: &TermFactory, local: &str) -> Term {
    f.create_iri(&format!("http://ex/{}", local)).unwrap()
}

fn sample_triples(f: &TermFactory) -> Vec<Triple> {
    let (a, b, c) = (iri(f, "a"), iri(f, "b"), iri(f, "c"));
    let (p, q) = (iri(f, "p"), iri(f, "q"));
    let blank = f.create_named_blank_node("n");
    vec![
        Triple::new(a.clone(), p.clone(), b.clone()).unwrap(),
        Triple::new(a.clone(), q.clone(), f.create_literal("x")).unwrap(),
        Triple::new(b.clone(), p.clone(), c.clone()).unwrap(),
        Triple::new(blank.clone(), q.clone(), f.create_lang_literal("y", "en").unwrap()).unwrap(),
        Triple::new(c, p, blank).unwrap(),
    ]
}

#[test]
fn scenario_single_triple() {
    let graph = Graph::new();
    let f = graph.factory().clone();
    let s = f.create_iri("http://ex/s").unwrap();
    let p = f.create_iri("http://ex/p").unwrap();

    graph.add_spo(s.clone(), p, f.create_literal("hello")).unwrap();

    assert_eq!(graph.len(), 1);
    assert!(graph.contains_matching(Some(&s), None, None));
}

#[test]
fn scenario_foreign_blank_node_maps_once() {
    let graph = Graph::new();
    let foreign = TermFactory::new();
    let b1 = foreign.create_named_blank_node("b1");
    let p = iri(&foreign, "p");

    graph.add_spo(b1.clone(), p.clone(), foreign.create_literal("one")).unwrap();
    graph.add_spo(iri(&foreign, "s"), p.clone(), b1.clone()).unwrap();

    let stored = graph.to_vec();
    let as_subject = stored[0].subject().clone();
    let as_object = stored[1].object().clone();
    assert_eq!(as_subject, as_object);
    assert_ne!(as_subject, b1);
    assert_eq!(as_subject.scope(), graph.factory().scope());
}

#[test]
fn scenario_partitions_and_union() {
    let dataset = Dataset::new();
    let f = dataset.factory().clone();
    let (g1, s, p) = (iri(&f, "g1"), iri(&f, "s"), iri(&f, "p"));

    dataset.add_gspo(Some(g1.clone()), s.clone(), p.clone(), iri(&f, "o")).unwrap();
    dataset.add_gspo(None, s, p, iri(&f, "o2")).unwrap();

    assert_eq!(dataset.graph().len(), 1);
    assert_eq!(dataset.graph_names().collect::<Vec<_>>(), vec![g1]);
    assert_eq!(dataset.union_graph().len(), 2);
    assert_eq!(dataset.len(), 2);
}

#[test]
fn scenario_remove_matching_subject() {
    let graph = Graph::new();
    let f = graph.factory().clone();
    let (s, t, p) = (iri(&f, "s"), iri(&f, "t"), iri(&f, "p"));
    for o in ["1", "2", "3"] {
        graph.add_spo(s.clone(), p.clone(), f.create_literal(o)).unwrap();
    }
    graph.add_spo(t.clone(), p.clone(), f.create_literal("1")).unwrap();
    graph.add_spo(t, p, s.clone()).unwrap();

    assert_eq!(graph.remove_matching(Some(&s), None, None).unwrap(), 3);
    assert_eq!(graph.len(), 2);
    assert!(!graph.contains_matching(Some(&s), None, None));
}

#[test]
fn add_is_idempotent() {
    let graph = Graph::new();
    let triples = sample_triples(graph.factory());
    graph.add_all(triples.clone()).unwrap();
    let before: Vec<Triple> = graph.to_vec();

    assert_eq!(graph.add_all(triples).unwrap(), 0);
    assert_eq!(graph.to_vec(), before);
}

#[test]
fn set_semantics_hold_for_local_and_foreign_triples() {
    let graph = Graph::new();
    let foreign = TermFactory::new();

    for t in sample_triples(graph.factory()).into_iter().chain(sample_triples(&foreign)) {
        graph.add(&t).unwrap();
        assert!(graph.contains(&t), "{} missing after add", t);
        graph.remove(&t).unwrap();
        assert!(!graph.contains(&t), "{} present after remove", t);
    }
    assert!(graph.is_empty());
}

#[test]
fn wildcard_pattern_yields_stored_set() {
    let graph = Graph::new();
    let triples = sample_triples(graph.factory());
    graph.add_all(triples.clone()).unwrap();

    let got: HashSet<Triple> = graph.triples_matching(None, None, None).collect();
    let want: HashSet<Triple> = triples.into_iter().collect();
    assert_eq!(got, want);
}

#[test]
fn fully_bound_patterns_are_selective() {
    let graph = Graph::new();
    let f = graph.factory().clone();
    let triples = sample_triples(&f);
    graph.add_all(triples.clone()).unwrap();
    let stranger = iri(&f, "stranger");

    for t in &triples {
        let (s, p, o) = (t.subject(), t.predicate(), t.object());
        assert_eq!(graph.triples_matching(Some(s), Some(p), Some(o)).count(), 1);
        assert!(!graph.contains_matching(Some(&stranger), Some(p), Some(o)));
        assert!(!graph.contains_matching(Some(s), Some(&stranger), Some(o)));
        assert!(!graph.contains_matching(Some(s), Some(p), Some(&stranger)));
    }
}

#[test]
fn blank_nodes_are_scoped_to_their_factory() {
    let a = TermFactory::new();
    let b = TermFactory::new();

    assert_eq!(a.create_named_blank_node("x"), a.create_named_blank_node("x"));
    assert_ne!(a.create_named_blank_node("x"), b.create_named_blank_node("x"));

    let fresh_a: HashSet<Term> = (0..50).map(|_| a.create_blank_node()).collect();
    let fresh_b: HashSet<Term> = (0..50).map(|_| b.create_blank_node()).collect();
    assert_eq!(fresh_a.len(), 50);
    assert!(fresh_a.is_disjoint(&fresh_b));
}

#[test]
fn union_contains_iff_some_partition_does() {
    let dataset = Dataset::new();
    let f = dataset.factory().clone();
    let triples = sample_triples(&f);
    let graphs = [None, Some(iri(&f, "g1")), Some(iri(&f, "g2"))];

    for (i, t) in triples.iter().enumerate().take(4) {
        let (s, p, o) = t.clone().into_parts();
        dataset.add_gspo(graphs[i % graphs.len()].clone(), s, p, o).unwrap();
    }

    let union = dataset.union_graph();
    for t in &triples {
        let in_some = dataset.graph().contains(t)
            || dataset.graph_names().any(|g| dataset.graph_named(&g).map_or(false, |v| v.contains(t)));
        assert_eq!(union.contains(t), in_some, "{}", t);
    }
}

#[test]
fn union_graph_rejects_writes() {
    let dataset = Dataset::new();
    let f = dataset.factory().clone();
    let t = sample_triples(&f).remove(0);

    let err = dataset.union_graph().add(&t).unwrap_err();
    assert_eq!(err.code, ErrorCode::ReadOnlyView);
    assert!(dataset.is_empty());
}

#[test]
fn emptied_named_graph_disappears() {
    let dataset = Dataset::new();
    let f = dataset.factory().clone();
    let g = iri(&f, "g");
    let view = dataset.named_graph(&g).unwrap();
    let triples = sample_triples(&f);

    view.add_all(triples.clone()).unwrap();
    assert!(dataset.graph_named(&g).is_some());

    assert_eq!(dataset.remove_matching(GraphPattern::Named(&g), None, None, None), triples.len());
    assert!(dataset.graph_named(&g).is_none());
    assert_eq!(dataset.graph_names().count(), 0);
}

#[test]
fn ntriples_round_trip() {
    let f = TermFactory::new();
    for t in sample_triples(&f) {
        let text = t.to_string();
        assert_eq!(parse_triple(&f, &text).unwrap(), {
            // Blank node labels are read back as names, so remap them the same way.
            let remap = |term: &Term| match term {
                Term::BlankNode(b) => f.create_named_blank_node(&b.label()),
                other => other.clone(),
            };
            Triple::new(remap(t.subject()), remap(t.predicate()), remap(t.object())).unwrap()
        });
    }

    let q = f
        .create_quad(Some(iri(&f, "g")), iri(&f, "s"), iri(&f, "p"), f.create_literal("o"))
        .unwrap();
    assert_eq!(parse_quad(&f, &q.to_string()).unwrap(), q);
}

#[test]
fn ntriples_round_trip_escapes_iri_characters() {
    let f = TermFactory::new();
    let t = Triple::new(
        f.create_iri("http://ex/a>b").unwrap(),
        f.create_iri("http://ex/has space").unwrap(),
        f.create_typed_literal("x", "http://ex/{type}").unwrap(),
    )
    .unwrap();

    let text = t.to_string();
    assert_eq!(text.matches(' ').count(), 3, "{}", text);
    assert_eq!(parse_triple(&f, &text).unwrap(), t);
}

#[test]
fn failed_adds_leave_stores_untouched() {
    let lax = TermFactory::new();
    let strict = TermFactory::with_validation(IriValidation::Strict);
    let (s, p) = (iri(&lax, "s"), iri(&lax, "p"));
    let bad_object = lax.create_typed_literal("1", "not a datatype").unwrap();
    let bad_graph = lax.create_iri("http://ex/bad graph").unwrap();
    let bad = Triple::new(s.clone(), p.clone(), bad_object).unwrap();
    let good = Triple::new(s, p, lax.create_literal("ok")).unwrap();

    let graph = strict.create_graph();
    assert_eq!(graph.add(&bad).unwrap_err().code, ErrorCode::InvalidIri);
    assert!(graph.is_empty());
    assert_eq!(graph.add_all(vec![good.clone(), bad.clone()]).unwrap_err().code, ErrorCode::InvalidIri);
    assert_eq!(graph.to_vec(), vec![good.clone()]);

    let dataset = strict.create_dataset();
    let g = iri(&strict, "g");
    let quad = Quad::from_triple(bad.clone(), Some(g.clone())).unwrap();
    assert!(dataset.add_quad(&quad).is_err());
    let quad = Quad::from_triple(good.clone(), Some(bad_graph)).unwrap();
    assert!(dataset.add_quad(&quad).is_err());

    let view = dataset.named_graph(&g).unwrap();
    assert!(view.add(&bad).is_err());
    assert!(dataset.graph().add(&bad).is_err());

    assert!(dataset.is_empty());
    assert_eq!(dataset.graph_names().count(), 0);
    assert!(!dataset.contains_graph(&g));
    assert!(dataset.graph_named(&g).is_none());
    assert_eq!(view.len(), 0);
}

#[test]
fn concurrent_adds_and_reads() {
    let dataset = Arc::new(Dataset::new());
    let f = dataset.factory().clone();
    let p = iri(&f, "p");

    let writers: Vec<_> = (0..4)
        .map(|w| {
            let dataset = Arc::clone(&dataset);
            let p = p.clone();
            thread::spawn(move || {
                let foreign = TermFactory::new();
                for i in 0..100 {
                    let s = foreign.create_iri(&format!("http://ex/s{}", i)).unwrap();
                    let g = foreign.create_iri(&format!("http://ex/g{}", w)).unwrap();
                    dataset.add_gspo(Some(g), s, p.clone(), foreign.create_literal("v")).unwrap();
                    assert!(dataset.len() <= 400);
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }

    assert_eq!(dataset.len(), 400);
    assert_eq!(dataset.graph_names().count(), 4);
    assert_eq!(dataset.union_graph().len(), 100);
}
