#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! STREUSLE importer for layered-graph.
//!
//! This crate converts document-level STREUSLE JSON (one record per
//! sentence, with CoNLL-U style token columns and lexical expression tables)
//! into an [`AnnotationGraph`](layered_graph::AnnotationGraph): one document
//! text, token nodes grounded in byte ranges of it, sentence and expression
//! spans, and dependency relations.
//!
//! ## Pipeline
//!
//! The document text is assembled once; then, per sentence and in document
//! order:
//!
//! - [`align`] - recovers token offsets and creates token nodes
//! - [`ellipsis`] - splices zero-width ellipsis tokens into the token list
//! - [`annotate`] - copies the flat token columns onto the nodes
//! - [`dependency`] - primary edges, and enhanced edges with cycle detection
//! - [`expression`] - sentence span and lexical expression spans
//!
//! Enhanced edges are buffered in the `edeps` and `cycle` layers, which are
//! added once all sentences are done.
//!
//! ## Usage
//!
//! ```no_run
//! use std::path::Path;
//! use layered_streusle::{load_document, StreusleMapper};
//!
//! let document = load_document(Path::new("reviews-001325.json"))?;
//! let graph = StreusleMapper::new().convert(&document)?;
//! for span in graph.spans_with("CAT", "S") {
//!     println!("{}", graph.display_span(span.id).with_relations("ud"));
//! }
//! # Ok::<(), layered_streusle::ConvertError>(())
//! ```

pub mod align;
pub mod annotate;
pub mod config;
pub mod context;
pub mod dependency;
pub mod ellipsis;
pub mod errors;
pub mod expression;
pub mod loader;
pub mod mapper;
pub mod model;
pub mod text;


pub use config::ConverterConfig;
pub use dependency::DependencyKind;
pub use errors::{AlignmentScope, ConvertError, ConvertResult, ExpressionKind, IdRole};
pub use loader::{document_from_reader, document_id, load_document, parse_document, split_documents};
pub use mapper::{DocumentSummary, StreusleMapper};
pub use model::{ConlluId, Document, EllipsisRecord, MweRecord, Sentence, SweRecord, TokenColumns, TokenRecord};
