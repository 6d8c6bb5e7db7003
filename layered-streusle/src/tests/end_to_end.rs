//! Whole-document conversion of a three sentence review.
//!
//! The fixture covers a strong MWE, an ellipsis token with enhanced edges,
//! and a relative clause whose `edeps` close a cycle.

use layered_graph::AnnotationGraph;

use super::support::{assert_alignment_round_trip, assert_one_primary_head, load_fixture, sentence_span};
use crate::{Document, DocumentSummary, StreusleMapper};

fn fixture() -> Document {
    load_fixture("reviews-086839.json")
}

fn convert() -> (AnnotationGraph, DocumentSummary) {
    StreusleMapper::new()
        .convert_with_summary(&fixture())
        .expect("Failed to convert fixture")
}

#[test]
fn test_document_text_joins_sentences_with_tabs() {
    let (graph, _) = convert();
    assert_eq!(graph.texts().len(), 1);
    assert_eq!(
        graph.texts()[0],
        "My 8 year old daughter loves this place.\t\
         I ordered the fish and my wife the steak.\t\
         The waiter who served us was great."
    );
}

#[test]
fn test_summary() {
    let (_, summary) = convert();
    assert_eq!(
        summary,
        DocumentSummary {
            sentences: 3,
            tokens: 28,
            virtual_tokens: 1,
            spans: 11,
            primary_relations: 24,
            enhanced_relations: 5,
            cycle_relations: 1,
        }
    );
}

#[test]
fn test_daughter_sentence() {
    let (graph, _) = convert();
    let sentence = sentence_span(&graph, "reviews-086839-0001");
    assert_eq!(graph.annotation(sentence.id, "CAT"), Some("S"));
    assert_eq!(sentence.tokens.len(), 9);

    // spans concatenate back to the sentence with single-space gaps
    let words: Vec<_> = sentence
        .tokens
        .iter()
        .map(|token| graph.token_text(*token).unwrap())
        .collect();
    assert_eq!(
        words,
        vec!["My", "8", "year", "old", "daughter", "loves", "this", "place", "."]
    );
    let first = graph.token(sentence.tokens[0]).unwrap();
    let last = graph.token(sentence.tokens[8]).unwrap();
    assert_eq!((first.start, last.end), (0, 40));

    let loves = sentence.tokens[5];
    assert_eq!(graph.annotation(loves, "lemma"), Some("love"));
    assert_eq!(graph.annotation(loves, "pos"), Some("VBZ"));
    assert_eq!(graph.annotation(loves, "Tense"), Some("Pres"));
    assert_eq!(graph.node(loves).unwrap().name(), Some("reviews-086839-0001_6"));

    // the root predicate anchors the subject and object edges
    let mut labels: Vec<_> = graph
        .relations()
        .iter()
        .filter(|rel| rel.source == loves)
        .filter_map(|rel| rel.annotation("deprel"))
        .collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["nsubj", "obj", "punct"]);
    assert_eq!(graph.incoming(loves, "ud").count(), 0);

    insta::assert_snapshot!(graph.display_span(sentence.id).with_spans("CAT").with_relations("ud"), @r###"
    My  8  year  old  daughter  loves  this  place  .
    ╰───────────────────────────────────────────────╯CAT=S
                      └─ud:nmod:poss─>My
           └─ud:nummod─>8
                 └─ud:obl:npmod─>year
                      └─ud:amod─>old
                                └─ud:nsubj─>daughter
                                             └─ud:det─>this
                                └─ud:obj─>place
                                └─ud:punct─>.
    "###);
}

#[test]
fn test_expression_spans() {
    let (graph, _) = convert();

    let mwe = graph
        .spans()
        .find(|span| span.name.as_deref() == Some("reviews-086839-0001_SMWE_1"))
        .unwrap();
    let words: Vec<_> = mwe.tokens.iter().map(|t| graph.token_text(*t).unwrap()).collect();
    assert_eq!(words, vec!["year", "old"]);
    assert_eq!(graph.annotation(mwe.id, "lexcat"), Some("ADJ"));
    assert_eq!(graph.annotation(mwe.id, "ss"), None);

    let possessive = graph.spans_with("ss2", "p.Gestalt").next().unwrap();
    assert_eq!(possessive.name.as_deref(), Some("reviews-086839-0001_SWE_1"));
    assert_eq!(graph.annotation(possessive.id, "ss"), Some("p.SocialRel"));
}

#[test]
fn test_ellipsis_sentence() {
    let (graph, _) = convert();
    let sentence = sentence_span(&graph, "reviews-086839-0002");
    assert_eq!(sentence.tokens.len(), 11);

    let ghost = graph.token(sentence.tokens[7]).unwrap();
    assert_eq!(ghost.range(), 41..41);
    assert_eq!(ghost.name.as_deref(), Some("reviews-086839-0002_7.1"));
    assert_eq!(graph.annotation(ghost.id, "CopyOf"), Some("2"));
    // the ellipsis token never takes part in a primary edge
    assert!(graph.relations().iter().all(|rel| rel.source != ghost.id && rel.target != ghost.id));

    insta::assert_snapshot!(graph.display_span(sentence.id).with_relations("ude"), @r###"
    I  ordered  the  fish  and  my  wife  ∅  the  steak  .
                                          └─+ude:cc─>and
                                          └─+ude:nsubj─>wife
       └─+ude:conj:and─>∅
                                          └─+ude:obj─>steak
    "###);

    let orphan = graph.relations().iter().find(|rel| rel.annotation("deprel") == Some("orphan")).unwrap();
    assert_eq!(orphan.annotation("in_edeps"), Some("no"));
}

#[test]
fn test_relative_clause_cycle() {
    let (graph, _) = convert();
    let cycle = graph.layer("cycle").unwrap();
    assert_eq!(cycle.len(), 1);

    let edge = &cycle.relations[0];
    assert_eq!(edge.id, "reviews-086839-0003_extdep_4-udecycle->1");
    assert_eq!(graph.token_text(edge.source), Some("served"));
    assert_eq!(graph.token_text(edge.target), Some("waiter"));
    assert_eq!(edge.annotation("deprel"), Some("nsubj"));

    let reference = graph
        .layer("edeps")
        .unwrap()
        .relations
        .iter()
        .find(|rel| rel.annotation("deprel") == Some("ref"))
        .unwrap();
    assert_eq!(reference.kind, "ude");
    assert_eq!(graph.token_text(reference.target), Some("who"));
}

#[test]
fn test_alignment_round_trip_and_monotonic_offsets() {
    let document = fixture();
    let graph = StreusleMapper::new().convert(&document).unwrap();
    assert_alignment_round_trip(&document, &graph);
}

#[test]
fn test_one_primary_head_per_non_root_token() {
    let document = fixture();
    let graph = StreusleMapper::new().convert(&document).unwrap();
    assert_one_primary_head(&document, &graph);
}

#[test]
fn test_snapshot_round_trip() {
    let (graph, _) = convert();
    let ron = graph.to_ron_string().unwrap();
    assert_eq!(AnnotationGraph::from_ron_string(&ron).unwrap(), graph);
}
