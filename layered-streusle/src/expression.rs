//! Sentence and lexical expression spans.
//!
//! Every non-empty sentence gets one span over its merged token list.
//! Single-word expressions take their members from the `toknums` of the
//! `swes` table; strong and weak multiword expressions are grouped from the
//! per-token `smwe` / `wmwe` columns. Expression spans are annotated from
//! their side table, never from the member tokens.

use std::collections::BTreeMap;

use layered_graph::{GraphSink, NodeId};
use tracing::warn;

use crate::context::SentenceContext;
use crate::errors::{ExpressionKind, IdRole};
use crate::model::{ConlluId, ExpressionRef, ExpressionTags, MweRecord, TokenColumns};
use crate::{ConvertError, ConvertResult, ConverterConfig};

/// Build the sentence span and every expression span of one sentence.
///
/// Returns the number of spans created.
pub fn build_spans<S: GraphSink>(
    ctx: &SentenceContext<'_>,
    sink: &mut S,
    config: &ConverterConfig,
) -> ConvertResult<usize> {
    let mut created = 0;

    let nodes = ctx.nodes();
    if !nodes.is_empty() {
        let span = sink.create_span(&nodes);
        sink.set_name(span, ctx.sent_id());
        sink.annotate(span, "sent_id", ctx.sent_id());
        if let Some((key, value)) = &config.sentence_category {
            sink.annotate(span, key, value);
        }
        created += 1;
    }

    created += build_single_word_spans(ctx, sink)?;
    created += build_multiword_spans(ctx, sink, ExpressionKind::Strong, &ctx.sentence.smwes, |columns| columns.smwe)?;
    created += build_multiword_spans(ctx, sink, ExpressionKind::Weak, &ctx.sentence.wmwes, |columns| columns.wmwe)?;
    Ok(created)
}

/// Fail unless `positions` is strictly increasing.
pub fn validate_member_positions(
    sentence: &str,
    kind: ExpressionKind,
    expression: &str,
    positions: &[usize],
) -> ConvertResult<()> {
    if positions.windows(2).all(|pair| pair[0] < pair[1]) {
        Ok(())
    } else {
        Err(ConvertError::OrderingInvariant {
            sentence: sentence.to_string(),
            kind,
            expression: expression.to_string(),
            positions: positions.to_vec(),
        })
    }
}

fn build_single_word_spans<S: GraphSink>(ctx: &SentenceContext<'_>, sink: &mut S) -> ConvertResult<usize> {
    let mut entries: Vec<_> = ctx.sentence.swes.iter().collect();
    entries.sort_by(|(a, _), (b, _)| numeric_key(a).cmp(&numeric_key(b)));

    let mut created = 0;
    for (id, record) in entries {
        let mut positions = Vec::with_capacity(record.toknums.len());
        for &toknum in &record.toknums {
            let member = ConlluId::Word(toknum);
            let position = ctx
                .position_of(member)
                .ok_or_else(|| ctx.unresolved(member.to_string(), IdRole::ExpressionMember))?;
            positions.push(position + 1);
        }

        validate_member_positions(ctx.sent_id(), ExpressionKind::Single, id, &positions)?;
        if emit_expression(ctx, sink, ExpressionKind::Single, id, &positions, &record.tags) {
            created += 1;
        }
    }
    Ok(created)
}

fn build_multiword_spans<S, F>(
    ctx: &SentenceContext<'_>,
    sink: &mut S,
    kind: ExpressionKind,
    table: &BTreeMap<String, MweRecord>,
    membership: F,
) -> ConvertResult<usize>
where
    S: GraphSink,
    F: Fn(&TokenColumns) -> Option<ExpressionRef>,
{
    // expression id -> (ordinal, 1-based position, member id)
    let mut groups: BTreeMap<u32, Vec<(u32, usize, ConlluId)>> = BTreeMap::new();
    for (position, token) in ctx.tokens().iter().enumerate() {
        if let Some(ExpressionRef(id, ordinal)) = membership(token.columns) {
            groups.entry(id).or_default().push((ordinal, position + 1, token.id));
        }
    }

    let mut created = 0;
    for (id, mut members) in groups {
        members.sort_by_key(|(ordinal, _, _)| *ordinal);
        let positions: Vec<usize> = members.iter().map(|(_, position, _)| *position).collect();
        let id = id.to_string();
        validate_member_positions(ctx.sent_id(), kind, &id, &positions)?;

        let default_tags = ExpressionTags::default();
        let record = table.get(&id);
        if let Some(record) = record {
            let member_ids: Vec<ConlluId> = members.iter().map(|(_, _, member)| *member).collect();
            if !toknums_agree(&record.toknums, &member_ids) {
                warn!(
                    sentence = ctx.sent_id(),
                    kind = %kind,
                    expression = %id,
                    toknums = ?record.toknums,
                    "token columns disagree with expression toknums"
                );
            }
        }
        let tags = record.map_or(&default_tags, |record| &record.tags);
        if emit_expression(ctx, sink, kind, &id, &positions, tags) {
            created += 1;
        }
    }

    for id in table.keys() {
        let grouped = id.parse::<u32>().map_or(false, |id| {
            ctx.tokens()
                .iter()
                .any(|token| membership(token.columns).map_or(false, |member| member.0 == id))
        });
        if !grouped {
            warn!(sentence = ctx.sent_id(), kind = %kind, expression = %id, "no token is a member of expression");
        }
    }
    Ok(created)
}

/// Whether a table's `toknums` list the members found through the token
/// columns, in ordinal order. An empty list is not checked.
fn toknums_agree(toknums: &[u32], members: &[ConlluId]) -> bool {
    toknums.is_empty() || toknums.iter().map(|&toknum| ConlluId::Word(toknum)).eq(members.iter().copied())
}

/// Create one expression span. Returns `false` when it has no members.
fn emit_expression<S: GraphSink>(
    ctx: &SentenceContext<'_>,
    sink: &mut S,
    kind: ExpressionKind,
    id: &str,
    positions: &[usize],
    tags: &ExpressionTags,
) -> bool {
    if positions.is_empty() {
        warn!(sentence = ctx.sent_id(), kind = %kind, expression = id, "skipping expression without members");
        return false;
    }

    let tokens = ctx.tokens();
    let members: Vec<NodeId> = positions.iter().map(|position| tokens[position - 1].node).collect();
    let span = sink.create_span(&members);
    sink.set_name(span, &format!("{}_{}_{}", ctx.sent_id(), kind.tag(), id));
    for (key, value) in tags.present() {
        sink.annotate(span, key, value);
    }
    true
}

/// Order table keys numerically, with non-numeric keys last.
fn numeric_key(id: &str) -> (u64, &str) {
    (id.parse().unwrap_or(u64::MAX), id)
}
