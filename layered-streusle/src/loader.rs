//! Input loading.
//!
//! Shape errors surface here as [`ConvertError::Parse`], before any graph
//! construction runs.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{ConvertError, ConvertResult, Document, Sentence};

/// Parse a document from its JSON text.
pub fn parse_document(content: &str) -> ConvertResult<Document> {
    Ok(serde_json::from_str(content)?)
}

pub fn document_from_reader<R: Read>(reader: R) -> ConvertResult<Document> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a single document file.
pub fn load_document(path: &Path) -> ConvertResult<Document> {
    let file = File::open(path).map_err(|source| ConvertError::Io {
        path: path.display().to_string(),
        source,
    })?;
    document_from_reader(BufReader::new(file))
}

/// The document a sentence belongs to: its id minus the last `-` segment.
///
/// ```
/// use layered_streusle::document_id;
///
/// assert_eq!(document_id("reviews-001325-0003").unwrap(), "reviews-001325");
/// assert!(document_id("orphan").is_err());
/// ```
pub fn document_id(sent_id: &str) -> ConvertResult<&str> {
    match sent_id.rsplit_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => Ok(prefix),
        _ => Err(ConvertError::MalformedSentenceId(sent_id.to_string())),
    }
}

/// Group a corpus-level sentence list into consecutive documents.
///
/// Sentences of one document must be adjacent; a document id that shows up
/// again after another document starts a new group.
pub fn split_documents(sentences: Vec<Sentence>) -> ConvertResult<Vec<(String, Document)>> {
    let mut documents: Vec<(String, Document)> = Vec::new();
    for sentence in sentences {
        let doc_id = document_id(&sentence.sent_id)?.to_string();
        match documents.last_mut() {
            Some((current, sentences)) if *current == doc_id => sentences.push(sentence),
            _ => documents.push((doc_id, vec![sentence])),
        }
    }
    Ok(documents)
}
