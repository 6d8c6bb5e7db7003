//! In-memory annotation graph.
//!
//! The graph holds one or more text buffers, token nodes grounded in byte
//! ranges of those buffers, span nodes grouping tokens, and typed relations
//! that live either in the default relation set or in a named [`Layer`].

mod display;
mod relation;
mod snapshot;

pub use display::SentenceDisplay;
pub use relation::{Layer, Relation, RelationKind};

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::GraphSink;

/// Handle of a text buffer within an [`AnnotationGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextId(pub u32);

/// Handle of a token or span node within an [`AnnotationGraph`].
///
/// Ids are dense and assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A key/value pair attached to a node or relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    pub key: String,
    pub value: String,
}

impl Annotation {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A token grounded in `start..end` (byte offsets) of a text buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenNode {
    pub id: NodeId,
    pub text: TextId,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl TokenNode {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Zero-width tokens stand for positions with no surface text.
    pub fn is_zero_width(&self) -> bool {
        self.start == self.end
    }
}

/// An ordered, non-empty group of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanNode {
    pub id: NodeId,
    pub tokens: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Token(TokenNode),
    Span(SpanNode),
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::Token(token) => token.id,
            Node::Span(span) => span.id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Token(token) => token.name.as_deref(),
            Node::Span(span) => span.name.as_deref(),
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            Node::Token(token) => &token.annotations,
            Node::Span(span) => &span.annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut Vec<Annotation> {
        match self {
            Node::Token(token) => &mut token.annotations,
            Node::Span(span) => &mut span.annotations,
        }
    }

    fn set_name(&mut self, name: String) {
        match self {
            Node::Token(token) => token.name = Some(name),
            Node::Span(span) => span.name = Some(name),
        }
    }
}

/// A document-level annotation graph.
///
/// `AnnotationGraph` is the in-memory [`GraphSink`]: producers build it
/// through the sink primitives and consumers read it through the query
/// methods below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationGraph {
    texts: Vec<String>,
    nodes: Vec<Node>,
    relations: Vec<Relation>,
    layers: Vec<Layer>,
}

impl AnnotationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a text buffer.
    pub fn text(&self, id: TextId) -> Option<&str> {
        self.texts.get(id.0 as usize).map(String::as_str)
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    pub fn token(&self, id: NodeId) -> Option<&TokenNode> {
        match self.node(id)? {
            Node::Token(token) => Some(token),
            Node::Span(_) => None,
        }
    }

    pub fn span(&self, id: NodeId) -> Option<&SpanNode> {
        match self.node(id)? {
            Node::Span(span) => Some(span),
            Node::Token(_) => None,
        }
    }

    /// Iterate over token nodes in creation order.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Token(token) => Some(token),
            Node::Span(_) => None,
        })
    }

    /// Iterate over span nodes in creation order.
    pub fn spans(&self) -> impl Iterator<Item = &SpanNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Span(span) => Some(span),
            Node::Token(_) => None,
        })
    }

    /// Relations of the default relation set (not in any layer).
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name == name)
    }

    /// Default relation set followed by each layer in insertion order.
    pub fn all_relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations
            .iter()
            .chain(self.layers.iter().flat_map(|layer| layer.relations.iter()))
    }

    /// The surface text a token is grounded in.
    pub fn token_text(&self, id: NodeId) -> Option<&str> {
        let token = self.token(id)?;
        self.text(token.text)?.get(token.range())
    }

    /// First value annotated on `node` under `key`.
    pub fn annotation(&self, node: NodeId, key: &str) -> Option<&str> {
        self.node(node)?
            .annotations()
            .iter()
            .find(|ann| ann.key == key)
            .map(|ann| ann.value.as_str())
    }

    /// Spans carrying the annotation `key=value`.
    pub fn spans_with<'a, 'k>(&'a self, key: &'k str, value: &'k str) -> impl Iterator<Item = &'a SpanNode> + 'k
    where
        'a: 'k,
    {
        self.spans().filter(move |span| {
            span.annotations
                .iter()
                .any(|ann| ann.key == key && ann.value == value)
        })
    }

    /// Relations of type `kind` pointing at `node`, across all layers.
    pub fn incoming<'a, 'k>(&'a self, node: NodeId, kind: &'k str) -> impl Iterator<Item = &'a Relation> + 'k
    where
        'a: 'k,
    {
        self.all_relations()
            .filter(move |rel| rel.target == node && rel.kind == kind)
    }

    /// Render the tokens of a span with selected spans and relations below.
    pub fn display_span(&self, span: NodeId) -> SentenceDisplay<'_> {
        SentenceDisplay::new(self, span)
    }

    fn push_node(&mut self, make: impl FnOnce(NodeId) -> Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(make(id));
        id
    }
}

impl GraphSink for AnnotationGraph {
    fn create_text(&mut self, text: &str) -> TextId {
        let id = TextId(self.texts.len() as u32);
        self.texts.push(text.to_string());
        id
    }

    fn create_token(&mut self, text: TextId, range: Range<usize>) -> NodeId {
        self.push_node(|id| {
            Node::Token(TokenNode {
                id,
                text,
                start: range.start,
                end: range.end,
                name: None,
                annotations: Vec::new(),
            })
        })
    }

    fn create_span(&mut self, tokens: &[NodeId]) -> NodeId {
        debug_assert!(!tokens.is_empty(), "spans must cover at least one token");
        self.push_node(|id| {
            Node::Span(SpanNode {
                id,
                tokens: tokens.to_vec(),
                name: None,
                annotations: Vec::new(),
            })
        })
    }

    fn set_name(&mut self, node: NodeId, name: &str) {
        if let Some(node) = self.nodes.get_mut(node.0 as usize) {
            node.set_name(name.to_string());
        }
    }

    fn annotate(&mut self, node: NodeId, key: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(node.0 as usize) {
            node.annotations_mut().push(Annotation::new(key, value));
        }
    }

    fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }
}
