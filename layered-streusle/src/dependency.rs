//! Primary and enhanced dependency edges.
//!
//! Primary edges go straight into the default relation set. Enhanced edges
//! are buffered in two layers, one for ordinary enhanced edges and one for
//! edges that would close a cycle, and are only handed to the sink once the
//! whole document has been processed.

use std::collections::HashMap;

use layered_graph::{GraphSink, Layer, NodeId, Relation, RelationKind};
use pathfinding::prelude::dfs_reach;

use crate::context::SentenceContext;
use crate::errors::IdRole;
use crate::model::ConlluId;
use crate::{ConvertError, ConvertResult, ConverterConfig};

/// The dependency edge vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    /// The single syntactic head edge of a token.
    Primary,
    /// An additional `edeps` edge.
    Enhanced,
    /// An `edeps` edge that would close a cycle.
    CycleBroken,
}

impl RelationKind for DependencyKind {
    fn type_name(&self) -> &'static str {
        match self {
            DependencyKind::Primary => "ud",
            DependencyKind::Enhanced => "ude",
            DependencyKind::CycleBroken => "udecycle",
        }
    }

    fn glyph(&self) -> Option<&'static str> {
        match self {
            DependencyKind::Primary => None,
            DependencyKind::Enhanced => Some("+"),
            DependencyKind::CycleBroken => Some("!"),
        }
    }
}

/// Head to children adjacency of the acyclic edges of one sentence.
#[derive(Debug, Default)]
pub struct EdgeIndex {
    successors: HashMap<NodeId, Vec<NodeId>>,
}

impl EdgeIndex {
    pub fn add_edge(&mut self, head: NodeId, child: NodeId) {
        self.successors.entry(head).or_default().push(child);
    }

    /// Whether adding `head -> child` would close a cycle, i.e. whether `head`
    /// is already reachable from `child`. A self edge always does.
    pub fn would_close_cycle(&self, head: NodeId, child: NodeId) -> bool {
        // dfs_reach yields the start node first
        dfs_reach(child, |node| self.successors.get(node).into_iter().flatten().copied()).any(|node| node == head)
    }
}

/// Whether `edeps` carries the edge `head:deprel`, possibly with a more
/// specific enhanced label such as `obl:on` for `obl`.
fn lists_edge(edeps: &str, head: ConlluId, deprel: &str) -> bool {
    edeps.split('|').filter_map(|entry| entry.split_once(':')).any(|(entry_head, label)| {
        entry_head.parse::<ConlluId>().ok() == Some(head)
            && label
                .strip_prefix(deprel)
                .map_or(false, |rest| rest.is_empty() || rest.starts_with(':'))
    })
}

/// Builds the dependency edges of a document, sentence by sentence.
#[derive(Debug)]
pub struct DependencyBuilder {
    enhanced: Layer,
    cycle: Layer,
    primary_count: usize,
    mark_missing_edeps: bool,
}

impl DependencyBuilder {
    pub fn new(config: &ConverterConfig) -> Self {
        Self {
            enhanced: Layer::new(config.edeps_layer.as_str()),
            cycle: Layer::new(config.cycle_layer.as_str()),
            primary_count: 0,
            mark_missing_edeps: config.mark_missing_edeps,
        }
    }

    pub fn primary_count(&self) -> usize {
        self.primary_count
    }

    pub fn enhanced_count(&self) -> usize {
        self.enhanced.len()
    }

    pub fn cycle_count(&self) -> usize {
        self.cycle.len()
    }

    /// Run both passes over one sentence.
    pub fn build_sentence<S: GraphSink>(&mut self, ctx: &mut SentenceContext<'_>, sink: &mut S) -> ConvertResult<()> {
        let mut edges = EdgeIndex::default();
        self.primary_pass(ctx, sink, &mut edges)?;
        self.enhanced_pass(ctx, &mut edges)
    }

    fn primary_pass<S: GraphSink>(
        &mut self,
        ctx: &mut SentenceContext<'_>,
        sink: &mut S,
        edges: &mut EdgeIndex,
    ) -> ConvertResult<()> {
        let sent_id = ctx.sent_id();
        let mut consumed = Vec::new();

        for (position, token) in ctx.tokens().iter().enumerate() {
            let columns = token.columns;
            let (Some(head), Some(deprel)) = (columns.head, columns.deprel.as_deref()) else {
                continue;
            };
            // 0 is the artificial root
            if head == 0 {
                continue;
            }

            let head_id = ConlluId::Word(head);
            let head_node = ctx.resolve(head_id, IdRole::Head)?;
            let mut relation = Relation::new(
                format!("{}_dep_{}-{}->{}", sent_id, head_id, DependencyKind::Primary.type_name(), position),
                DependencyKind::Primary,
                head_node,
                token.node,
            )
            .with_annotation("deprel", deprel);

            if self.mark_missing_edeps {
                if let Some(edeps) = columns.edeps.as_deref() {
                    if !lists_edge(edeps, head_id, deprel) {
                        relation.annotate("in_edeps", "no");
                    }
                }
            }

            sink.add_relation(relation);
            edges.add_edge(head_node, token.node);
            self.primary_count += 1;
            consumed.push((position, head_id));
        }

        let tokens = ctx.tokens_mut();
        for (position, head_id) in consumed {
            tokens[position].primary_head = Some(head_id);
        }
        Ok(())
    }

    fn enhanced_pass(&mut self, ctx: &SentenceContext<'_>, edges: &mut EdgeIndex) -> ConvertResult<()> {
        let sent_id = ctx.sent_id();
        let malformed = |value: &str| ConvertError::MalformedColumn {
            sentence: sent_id.to_string(),
            column: "edeps",
            value: value.to_string(),
        };

        for (position, token) in ctx.tokens().iter().enumerate() {
            let Some(edeps) = token.columns.edeps.as_deref() else {
                continue;
            };
            for entry in edeps.split('|').filter(|entry| !entry.is_empty() && *entry != "_") {
                // the label itself may contain colons, e.g. `nmod:poss`
                let (head, deprel) = entry.split_once(':').ok_or_else(|| malformed(entry))?;
                let head_id: ConlluId = head.parse().map_err(|_| malformed(entry))?;
                if head_id == ConlluId::Word(0) || Some(head_id) == token.primary_head {
                    continue;
                }

                let head_node = ctx.resolve(head_id, IdRole::Head)?;
                let kind = if edges.would_close_cycle(head_node, token.node) {
                    DependencyKind::CycleBroken
                } else {
                    DependencyKind::Enhanced
                };
                let relation = Relation::new(
                    format!("{}_extdep_{}-{}->{}", sent_id, head_id, kind.type_name(), position),
                    kind,
                    head_node,
                    token.node,
                )
                .with_annotation("deprel", deprel);

                if kind == DependencyKind::CycleBroken {
                    self.cycle.add_relation(relation);
                } else {
                    edges.add_edge(head_node, token.node);
                    self.enhanced.add_relation(relation);
                }
            }
        }
        Ok(())
    }

    /// Hand the buffered enhanced layers to the sink.
    pub fn finish<S: GraphSink>(self, sink: &mut S) {
        sink.add_layer(self.enhanced);
        sink.add_layer(self.cycle);
    }
}
