//! Document text assembly.
//!
//! The JSON doesn't carry unbroken text for the whole document, only one
//! string per sentence. The document text is those strings joined with the
//! configured separator; every token is grounded in it.

use crate::errors::AlignmentScope;
use crate::{ConvertError, ConvertResult, Sentence};

/// The document text buffer plus a cursor marking how much of it earlier
/// sentences have consumed.
#[derive(Debug, Clone)]
pub struct DocumentText {
    text: String,
    cursor: usize,
}

impl DocumentText {
    /// Join the surface strings of `sentences` with `separator`.
    pub fn assemble(sentences: &[Sentence], separator: char) -> Self {
        let mut text = String::new();
        for (idx, sentence) in sentences.iter().enumerate() {
            if idx > 0 {
                text.push(separator);
            }
            text.push_str(&sentence.text);
        }
        Self { text, cursor: 0 }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The smallest byte position no sentence has claimed yet.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Find where `sentence` begins, searching from the cursor, and claim it.
    ///
    /// Searching from the cursor rather than from the start keeps a repeated
    /// sentence string from resolving to an earlier occurrence.
    pub fn locate(&mut self, sentence: &Sentence) -> ConvertResult<usize> {
        let start = self.text[self.cursor..]
            .find(sentence.text.as_str())
            .map(|found| self.cursor + found)
            .ok_or_else(|| ConvertError::Alignment {
                sentence: sentence.sent_id.clone(),
                needle: sentence.text.clone(),
                cursor: self.cursor,
                scope: AlignmentScope::Document,
            })?;
        self.cursor = start + sentence.text.len();
        Ok(start)
    }
}
