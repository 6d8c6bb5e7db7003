//! The document conversion pipeline.

use layered_graph::{AnnotationGraph, GraphSink};
use tracing::{debug, info};

use crate::align::create_tokens;
use crate::annotate::apply_columns;
use crate::context::SentenceContext;
use crate::dependency::DependencyBuilder;
use crate::ellipsis::merge_ellipsis_tokens;
use crate::expression::build_spans;
use crate::text::DocumentText;
use crate::{ConvertResult, ConverterConfig, Document};

/// Counts of what a conversion produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocumentSummary {
    pub sentences: usize,
    /// All tokens, virtual ones included.
    pub tokens: usize,
    pub virtual_tokens: usize,
    pub spans: usize,
    pub primary_relations: usize,
    pub enhanced_relations: usize,
    pub cycle_relations: usize,
}

/// Converts STREUSLE documents into annotation graphs.
///
/// ```
/// use layered_streusle::{parse_document, StreusleMapper};
///
/// let document = parse_document(r##"[{
///     "sent_id": "reviews-001-0001",
///     "text": "Great food",
///     "toks": [
///         {"#": 1, "word": "Great", "head": 2, "deprel": "amod"},
///         {"#": 2, "word": "food", "head": 0, "deprel": "root"}
///     ]
/// }]"##).unwrap();
///
/// let graph = StreusleMapper::new().convert(&document).unwrap();
/// assert_eq!(graph.tokens().count(), 2);
/// assert_eq!(graph.relations()[0].annotation("deprel"), Some("amod"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreusleMapper {
    config: ConverterConfig,
}

impl StreusleMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Convert a document into a fresh graph.
    ///
    /// The graph is only handed out when the whole document converted.
    pub fn convert(&self, document: &Document) -> ConvertResult<AnnotationGraph> {
        self.convert_with_summary(document).map(|(graph, _)| graph)
    }

    pub fn convert_with_summary(&self, document: &Document) -> ConvertResult<(AnnotationGraph, DocumentSummary)> {
        let mut graph = AnnotationGraph::new();
        let summary = self.map_document(document, &mut graph)?;
        Ok((graph, summary))
    }

    /// Stream a document into `sink`.
    ///
    /// On error the sink holds a partial document that must be discarded.
    pub fn map_document<S: GraphSink>(&self, document: &Document, sink: &mut S) -> ConvertResult<DocumentSummary> {
        let mut text = DocumentText::assemble(document, self.config.sentence_separator);
        let text_id = sink.create_text(text.as_str());
        let mut dependencies = DependencyBuilder::new(&self.config);
        let mut summary = DocumentSummary {
            sentences: document.len(),
            ..DocumentSummary::default()
        };

        for sentence in document {
            let offset = text.locate(sentence)?;
            let mut ctx = SentenceContext::new(sentence, text_id, offset);

            create_tokens(&mut ctx, sink)?;
            merge_ellipsis_tokens(&mut ctx, sink)?;
            summary.spans += apply_columns(&ctx, sink, &self.config);
            dependencies.build_sentence(&mut ctx, sink)?;
            summary.spans += build_spans(&ctx, sink, &self.config)?;

            debug!(
                sentence = ctx.sent_id(),
                offset,
                tokens = ctx.tokens().len(),
                virtual_tokens = ctx.virtual_count(),
                "mapped sentence"
            );
            summary.tokens += ctx.tokens().len();
            summary.virtual_tokens += ctx.virtual_count();
        }

        summary.primary_relations = dependencies.primary_count();
        summary.enhanced_relations = dependencies.enhanced_count();
        summary.cycle_relations = dependencies.cycle_count();
        dependencies.finish(sink);

        info!(
            sentences = summary.sentences,
            tokens = summary.tokens,
            virtual_tokens = summary.virtual_tokens,
            spans = summary.spans,
            primary = summary.primary_relations,
            enhanced = summary.enhanced_relations,
            cycle = summary.cycle_relations,
            "mapped document"
        );
        Ok(summary)
    }
}
