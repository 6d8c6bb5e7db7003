use std::collections::HashMap;
use std::fmt::Write;

use unicode_width::UnicodeWidthStr;

use super::{AnnotationGraph, NodeId};

/// Rendered in place of zero-width tokens.
const ZERO_WIDTH_MARKER: &str = "∅";

/// Internal representation of an included span for display.
struct IncludedSpan {
    /// Inclusive token positions within the displayed token list
    range: (usize, usize),
    label: String,
}

/// Internal representation of an included relation for display.
struct IncludedRelation {
    source: usize,
    target: usize,
    glyph: String,
    label: String,
}

/// Renders the tokens of one span (usually a sentence) on a single line,
/// followed by the spans and relations selected with [`with_spans`] and
/// [`with_relations`].
///
/// [`with_spans`]: SentenceDisplay::with_spans
/// [`with_relations`]: SentenceDisplay::with_relations
//
// Dogs  bark  loudly
// ╰────────────────╯CAT=S
// ╰──╯ss=n.ANIMAL
//       └─ud:nsubj─>Dogs
//       └─ud:advmod─>loudly
pub struct SentenceDisplay<'a> {
    graph: &'a AnnotationGraph,
    tokens: Vec<NodeId>,
    include_spans: Vec<IncludedSpan>,
    include_relations: Vec<IncludedRelation>,
}

impl<'a> std::fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut token_idx_to_start_display_char_idx = Vec::new();
        let mut token_idx_to_end_display_char_idx = Vec::new();
        // write opening display text
        let mut opening_line = String::new();
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
            }

            token_idx_to_start_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            opening_line.push_str(self.surface(*token));
            token_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
        }

        f.write_str(&opening_line)?;

        for span in self.include_spans.iter() {
            f.write_char('\n')?;

            let start_char_idx = token_idx_to_start_display_char_idx[span.range.0];
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let end_char_idx = token_idx_to_end_display_char_idx[span.range.1];
            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&span.label)?;
        }

        for relation in self.include_relations.iter() {
            f.write_char('\n')?;

            let indent = token_idx_to_start_display_char_idx[relation.source];
            for _ in 0..indent {
                f.write_char(' ')?;
            }

            write!(
                f,
                "└─{}{}─>{}",
                relation.glyph,
                relation.label,
                self.surface(self.tokens[relation.target])
            )?;
        }

        Ok(())
    }
}

impl<'a> SentenceDisplay<'a> {
    /// Display the tokens of `span`. Nothing is displayed if `span` is not a span node.
    pub fn new(graph: &'a AnnotationGraph, span: NodeId) -> Self {
        let tokens = graph
            .span(span)
            .map(|span| span.tokens.clone())
            .unwrap_or_default();
        SentenceDisplay {
            graph,
            tokens,
            include_spans: Vec::new(),
            include_relations: Vec::new(),
        }
    }

    fn surface(&self, token: NodeId) -> &'a str {
        match self.graph.token_text(token) {
            Some("") | None => ZERO_WIDTH_MARKER,
            Some(text) => text,
        }
    }

    fn positions(&self) -> HashMap<NodeId, usize> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| (*token, idx))
            .collect()
    }

    /// Include every span annotated with `key` whose tokens are all displayed.
    ///
    /// The span is labelled `key=value`.
    pub fn include_spans(&mut self, key: &str) {
        let graph = self.graph;
        let positions = self.positions();
        for span in graph.spans() {
            let value = match span.annotations.iter().find(|ann| ann.key == key) {
                Some(ann) => &ann.value,
                None => continue,
            };
            let covered: Option<Vec<usize>> = span
                .tokens
                .iter()
                .map(|token| positions.get(token).copied())
                .collect();
            let covered = match covered {
                Some(covered) if !covered.is_empty() => covered,
                _ => continue,
            };
            let start = covered.iter().copied().min().unwrap_or(0);
            let end = covered.iter().copied().max().unwrap_or(0);
            self.include_spans.push(IncludedSpan {
                range: (start, end),
                label: format!("{}={}", key, value),
            });
        }
    }

    /// Include every relation of type `kind` between two displayed tokens.
    ///
    /// The arrow is labelled with the type name and, when present, the
    /// relation's first annotation value.
    pub fn include_relations(&mut self, kind: &str) {
        let graph = self.graph;
        let positions = self.positions();
        for relation in graph.all_relations().filter(|rel| rel.kind == kind) {
            let (source, target) = match (positions.get(&relation.source), positions.get(&relation.target)) {
                (Some(source), Some(target)) => (*source, *target),
                _ => continue,
            };
            let label = match relation.annotations.first() {
                Some(ann) => format!("{}:{}", relation.kind, ann.value),
                None => relation.kind.clone(),
            };
            self.include_relations.push(IncludedRelation {
                source,
                target,
                glyph: relation.glyph.clone().unwrap_or_default(),
                label,
            });
        }
    }

    /// Takes self
    pub fn with_spans(mut self, key: &str) -> Self {
        self.include_spans(key);
        self
    }

    /// Takes self
    pub fn with_relations(mut self, kind: &str) -> Self {
        self.include_relations(kind);
        self
    }
}
