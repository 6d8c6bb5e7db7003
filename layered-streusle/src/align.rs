//! Token alignment.
//!
//! The JSON tokens don't carry offsets. We "chomp our way" up the sentence
//! string: each token is searched for from the end of the previous match,
//! so repeated words resolve left to right. The alignment is greedy and
//! never backtracks; a token that cannot be found fails the document.

use std::ops::Range;

use layered_graph::GraphSink;

use crate::context::{ContextToken, SentenceContext};
use crate::errors::AlignmentScope;
use crate::model::ConlluId;
use crate::{ConvertError, ConvertResult};

/// A token that could not be found at or after `cursor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misaligned<'w> {
    pub word: &'w str,
    pub cursor: usize,
}

/// Recover the byte range of each word within `sentence`.
pub fn align_words<'w, I>(words: I, sentence: &str) -> Result<Vec<Range<usize>>, Misaligned<'w>>
where
    I: IntoIterator<Item = &'w str>,
{
    let mut cursor = 0;
    let mut ranges = Vec::new();
    for word in words {
        let start = sentence
            .get(cursor..)
            .and_then(|rest| rest.find(word))
            .map(|found| cursor + found)
            .ok_or(Misaligned { word, cursor })?;
        cursor = start + word.len();
        ranges.push(start..cursor);
    }
    Ok(ranges)
}

/// Create one token node per word line of the sentence, grounded in the
/// document text, named `{sent_id}_{n}` and annotated with its `conllu_id`.
pub fn create_tokens<S: GraphSink>(ctx: &mut SentenceContext<'_>, sink: &mut S) -> ConvertResult<()> {
    let sentence = ctx.sentence;
    let ranges = align_words(sentence.toks.iter().map(|tok| tok.word.as_str()), &sentence.text)
        .map_err(|misaligned| ConvertError::Alignment {
            sentence: sentence.sent_id.clone(),
            needle: misaligned.word.to_string(),
            cursor: misaligned.cursor,
            scope: AlignmentScope::Sentence,
        })?;

    for (ordinal, (record, range)) in sentence.toks.iter().zip(ranges).enumerate() {
        // tokens are grounded in the document text, not the sentence string
        let global = (ctx.offset + range.start)..(ctx.offset + range.end);
        let node = sink.create_token(ctx.text, global);
        let id = ConlluId::Word(record.id);
        sink.set_name(node, &format!("{}_{}", sentence.sent_id, ordinal + 1));
        sink.annotate(node, "conllu_id", &id.to_string());

        ctx.push_token(ContextToken {
            node,
            id,
            columns: &record.columns,
            is_virtual: false,
            primary_head: None,
        })?;
    }

    Ok(())
}
