//! The graph construction primitives producers call.

use std::ops::Range;

use crate::{Layer, NodeId, Relation, TextId};

/// A graph store that exposes node and edge creation primitives.
///
/// Producers only ever append: nodes, annotations and relations are never
/// removed or rewritten through this trait. Implementations must hand out
/// ids that stay valid for the lifetime of the store.
pub trait GraphSink {
    /// Register a text buffer that tokens can be grounded in.
    fn create_text(&mut self, text: &str) -> TextId;

    /// Create a token grounded in the byte `range` of `text`.
    ///
    /// Zero-width ranges are permitted.
    fn create_token(&mut self, text: TextId, range: Range<usize>) -> NodeId;

    /// Create a span over `tokens`, in the given order.
    ///
    /// Callers must pass at least one token.
    fn create_span(&mut self, tokens: &[NodeId]) -> NodeId;

    fn set_name(&mut self, node: NodeId, name: &str);

    fn annotate(&mut self, node: NodeId, key: &str, value: &str);

    /// Add a relation to the default relation set.
    fn add_relation(&mut self, relation: Relation);

    /// Add a layer together with the relations buffered in it.
    fn add_layer(&mut self, layer: Layer);
}

impl<S: GraphSink + ?Sized> GraphSink for &mut S {
    fn create_text(&mut self, text: &str) -> TextId {
        (**self).create_text(text)
    }

    fn create_token(&mut self, text: TextId, range: Range<usize>) -> NodeId {
        (**self).create_token(text, range)
    }

    fn create_span(&mut self, tokens: &[NodeId]) -> NodeId {
        (**self).create_span(tokens)
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        (**self).set_name(node, name)
    }

    fn annotate(&mut self, node: NodeId, key: &str, value: &str) {
        (**self).annotate(node, key, value)
    }

    fn add_relation(&mut self, relation: Relation) {
        (**self).add_relation(relation)
    }

    fn add_layer(&mut self, layer: Layer) {
        (**self).add_layer(layer)
    }
}
