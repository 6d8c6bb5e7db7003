//! Per-token column annotations.

use layered_graph::GraphSink;
use tracing::warn;

use crate::context::SentenceContext;
use crate::ConverterConfig;

/// Copy the flat columns of every merged token onto its node.
///
/// String columns map 1:1 to a key (`xpos` is stored as `pos`); `feats` and
/// `misc` explode into one annotation per `K=V` item. Absent columns produce
/// no annotation at all.
///
/// Returns the number of `lextag` spans created.
pub fn apply_columns<S: GraphSink>(ctx: &SentenceContext<'_>, sink: &mut S, config: &ConverterConfig) -> usize {
    let mut lextag_spans = 0;
    for token in ctx.tokens() {
        let columns = token.columns;
        let simple = [
            ("lemma", &columns.lemma),
            ("upos", &columns.upos),
            ("pos", &columns.xpos),
            ("lexcat", &columns.lexcat),
            ("ss", &columns.ss),
            ("ss2", &columns.ss2),
            ("lextag", &columns.lextag),
        ];
        for (key, value) in simple {
            if let Some(value) = value {
                sink.annotate(token.node, key, value);
            }
        }

        for (column, value) in [("feats", &columns.feats), ("misc", &columns.misc)] {
            let Some(value) = value else { continue };
            for (key, value) in key_value_pairs(value) {
                match value {
                    Some(value) => sink.annotate(token.node, key, value),
                    None => warn!(
                        sentence = ctx.sent_id(),
                        token = %token.id,
                        column,
                        item = key,
                        "skipping item without `=`"
                    ),
                }
            }
        }

        if config.lextag_spans {
            if let Some(lextag) = &columns.lextag {
                let span = sink.create_span(&[token.node]);
                sink.annotate(span, "lextag", lextag);
                lextag_spans += 1;
            }
        }
    }
    lextag_spans
}

/// Split a `K=V|K=V` column. `_` is the empty column.
///
/// Items without `=` come back with a `None` value. Values may contain
/// further `=` signs.
pub fn key_value_pairs(column: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    column
        .split('|')
        .filter(move |item| !item.is_empty() && column != "_")
        .map(|item| match item.split_once('=') {
            Some((key, value)) => (key, Some(value)),
            None => (item, None),
        })
}
