//! Fixture loading and document-wide checks shared by the fixture tests.

use std::path::Path;

use layered_graph::{AnnotationGraph, SpanNode};

use crate::{load_document, Document};

pub fn load_fixture(name: &str) -> Document {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name);
    load_document(&path).unwrap_or_else(|err| panic!("Failed to load fixture {}: {}", name, err))
}

pub fn sentence_span<'g>(graph: &'g AnnotationGraph, sent_id: &str) -> &'g SpanNode {
    graph
        .spans_with("sent_id", sent_id)
        .next()
        .unwrap_or_else(|| panic!("no span for {}", sent_id))
}

/// Every word line maps back to its own surface string, and the word tokens
/// of a sentence never overlap or go backwards.
pub fn assert_alignment_round_trip(document: &Document, graph: &AnnotationGraph) {
    for sentence in document {
        let span = sentence_span(graph, &sentence.sent_id);
        let mut previous_end = 0;
        let mut records = sentence.toks.iter();
        for token in span.tokens.iter().map(|id| graph.token(*id).unwrap()) {
            if token.is_zero_width() {
                continue;
            }
            let record = records.next().unwrap();
            assert_eq!(graph.token_text(token.id), Some(record.word.as_str()));
            assert!(previous_end <= token.start, "{} overlaps its predecessor", record.word);
            previous_end = token.end;
        }
        assert!(records.next().is_none(), "{} has unaligned words", sentence.sent_id);
    }
}

/// Each word line has exactly one primary head, except the root.
pub fn assert_one_primary_head(document: &Document, graph: &AnnotationGraph) {
    for sentence in document {
        let span = sentence_span(graph, &sentence.sent_id);
        let ordinary = span.tokens.iter().filter(|id| !graph.token(**id).unwrap().is_zero_width());
        for (token, record) in ordinary.zip(&sentence.toks) {
            let expected = if record.columns.head == Some(0) { 0 } else { 1 };
            assert_eq!(graph.incoming(*token, "ud").count(), expected, "token {}", record.word);
        }
    }
}
