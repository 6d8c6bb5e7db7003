#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Document-level annotation graph for layered-nlp.
//!
//! A graph is built from four kinds of things:
//!
//! - a text buffer ([`TextId`]) holding the document's surface text,
//! - token nodes grounded in byte ranges of that text,
//! - span nodes grouping tokens,
//! - typed, directed [`Relation`]s, either in the default relation set or in
//!   a named [`Layer`].
//!
//! Producers write through the [`GraphSink`] trait; [`AnnotationGraph`] is the
//! in-memory implementation.
//!
//! ## Example
//!
//! ```
//! use layered_graph::{AnnotationGraph, GraphSink};
//!
//! let mut graph = AnnotationGraph::new();
//! let text = graph.create_text("Hello world");
//! let hello = graph.create_token(text, 0..5);
//! let world = graph.create_token(text, 6..11);
//! let sentence = graph.create_span(&[hello, world]);
//! graph.annotate(sentence, "CAT", "S");
//!
//! assert_eq!(graph.token_text(world), Some("world"));
//! ```

mod graph;
mod sink;

pub use graph::{
    Annotation, AnnotationGraph, Layer, Node, NodeId, Relation, RelationKind, SentenceDisplay,
    SpanNode, TextId, TokenNode,
};
pub use sink::GraphSink;
