//! Ellipsis token merging.
//!
//! Ellipsis tokens are stored separately under `etoks`. Each one is created
//! as a zero-width token at the start of its sentence and spliced into the
//! merged token list right after the word it follows, so that every later
//! stage treats it as any other token.

use layered_graph::GraphSink;

use crate::context::{ContextToken, SentenceContext};
use crate::errors::IdRole;
use crate::model::{ConlluId, EllipsisRecord};
use crate::{ConvertError, ConvertResult};

/// Splice the sentence's ellipsis tokens into the merged token list.
///
/// Records are applied in ascending `(base id, counter)` order, so `8.1`
/// always lands before `8.2` whatever order the input lists them in.
pub fn merge_ellipsis_tokens<S: GraphSink>(ctx: &mut SentenceContext<'_>, sink: &mut S) -> ConvertResult<()> {
    let sentence = ctx.sentence;
    let mut records: Vec<&EllipsisRecord> = sentence.etoks.iter().collect();
    records.sort_by_key(|record| (record.id.base(), record.id.counter()));

    for record in records {
        let base = ConlluId::Word(record.id.base());
        let base_position = ctx
            .position_of(base)
            .ok_or_else(|| ctx.unresolved(base.to_string(), IdRole::EllipsisBase))?;

        let virtual_id = record.id.virtual_id();
        let id: ConlluId = virtual_id.parse().map_err(|_| ConvertError::MalformedColumn {
            sentence: sentence.sent_id.clone(),
            column: "#",
            value: virtual_id.to_string(),
        })?;

        let node = sink.create_token(ctx.text, ctx.offset..ctx.offset);
        sink.set_name(node, &format!("{}_{}", sentence.sent_id, virtual_id));
        sink.annotate(node, "conllu_id", virtual_id);

        let position = (base_position + record.id.counter() as usize).min(ctx.tokens().len());
        ctx.insert_token(
            position,
            ContextToken {
                node,
                id,
                columns: &record.columns,
                is_virtual: true,
                primary_head: None,
            },
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::create_tokens;
    use crate::model::Sentence;
    use layered_graph::AnnotationGraph;

    fn sentence(etoks: serde_json::Value) -> Sentence {
        serde_json::from_value(serde_json::json!({
            "sent_id": "s-1",
            "text": "I like tea and you coffee",
            "toks": [
                {"#": 1, "word": "I"},
                {"#": 2, "word": "like"},
                {"#": 3, "word": "tea"},
                {"#": 4, "word": "and"},
                {"#": 5, "word": "you"},
                {"#": 6, "word": "coffee"}
            ],
            "etoks": etoks
        }))
        .unwrap()
    }

    fn merged_ids(sentence: &Sentence, offset: usize) -> ConvertResult<(AnnotationGraph, Vec<String>)> {
        let mut graph = AnnotationGraph::new();
        let text = graph.create_text(&format!("{}{}", " ".repeat(offset), sentence.text));
        let mut ctx = SentenceContext::new(sentence, text, offset);
        create_tokens(&mut ctx, &mut graph)?;
        merge_ellipsis_tokens(&mut ctx, &mut graph)?;
        let ids = ctx.tokens().iter().map(|token| token.id.to_string()).collect();
        Ok((graph, ids))
    }

    #[test]
    fn test_virtual_token_follows_base() {
        let sentence = sentence(serde_json::json!([
            {"#": [5, 1, "5.1"], "word": "like", "edeps": "4:cc|2:conj"}
        ]));
        let (graph, ids) = merged_ids(&sentence, 0).unwrap();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "5.1", "6"]);

        let ghost = graph.tokens().last().unwrap();
        assert!(ghost.is_zero_width());
        assert_eq!(ghost.start, 0);
        assert_eq!(ghost.name.as_deref(), Some("s-1_5.1"));
        assert_eq!(graph.annotation(ghost.id, "conllu_id"), Some("5.1"));
    }

    #[test]
    fn test_virtual_token_grounded_at_sentence_offset() {
        let sentence = sentence(serde_json::json!([{"#": [2, 1, "2.1"]}]));
        let (graph, _) = merged_ids(&sentence, 7).unwrap();
        let ghost = graph.tokens().last().unwrap();
        assert_eq!(ghost.range(), 7..7);
        // ordinary tokens keep their alignment
        assert_eq!(graph.token_text(graph.tokens().next().unwrap().id), Some("I"));
    }

    #[test]
    fn test_counters_applied_in_ascending_order() {
        let sentence = sentence(serde_json::json!([
            {"#": [2, 2, "2.2"]},
            {"#": [5, 1, "5.1"]},
            {"#": [2, 1, "2.1"]}
        ]));
        let (_, ids) = merged_ids(&sentence, 0).unwrap();
        assert_eq!(ids, vec!["1", "2", "2.1", "2.2", "3", "4", "5", "5.1", "6"]);
    }

    #[test]
    fn test_unknown_base_fails() {
        let sentence = sentence(serde_json::json!([{"#": [9, 1, "9.1"]}]));
        let err = merged_ids(&sentence, 0).unwrap_err();
        match err {
            ConvertError::IdentifierResolution { id, role, .. } => {
                assert_eq!(id, "9");
                assert_eq!(role, IdRole::EllipsisBase);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_malformed_virtual_id_fails() {
        let sentence = sentence(serde_json::json!([{"#": [2, 1, "two.one"]}]));
        let err = merged_ids(&sentence, 0).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedColumn { column: "#", .. }));
    }
}
