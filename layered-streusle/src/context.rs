//! Per-sentence conversion state.
//!
//! One [`SentenceContext`] is built per sentence and passed by reference
//! through the pipeline stages. It owns the merged token list and the
//! CoNLL-U id map; nothing in it outlives the sentence.

use std::collections::HashMap;

use layered_graph::{NodeId, TextId};

use crate::errors::IdRole;
use crate::model::{ConlluId, Sentence, TokenColumns};
use crate::{ConvertError, ConvertResult};

/// A token node together with the record it was created from.
#[derive(Debug, Clone)]
pub struct ContextToken<'a> {
    pub node: NodeId,
    pub id: ConlluId,
    pub columns: &'a TokenColumns,
    pub is_virtual: bool,
    /// Head consumed by the primary dependency pass, if any.
    pub primary_head: Option<ConlluId>,
}

#[derive(Debug)]
pub struct SentenceContext<'a> {
    pub sentence: &'a Sentence,
    /// The document text buffer tokens are grounded in.
    pub text: TextId,
    /// Byte offset of the sentence within the document text.
    pub offset: usize,
    tokens: Vec<ContextToken<'a>>,
    ids: HashMap<ConlluId, NodeId>,
}

impl<'a> SentenceContext<'a> {
    pub fn new(sentence: &'a Sentence, text: TextId, offset: usize) -> Self {
        Self {
            sentence,
            text,
            offset,
            tokens: Vec::new(),
            ids: HashMap::new(),
        }
    }

    pub fn sent_id(&self) -> &'a str {
        &self.sentence.sent_id
    }

    /// The merged token list, in final order.
    pub fn tokens(&self) -> &[ContextToken<'a>] {
        &self.tokens
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut [ContextToken<'a>] {
        &mut self.tokens
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        self.tokens.iter().map(|token| token.node).collect()
    }

    pub fn virtual_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_virtual).count()
    }

    /// Append a token and register its id.
    pub fn push_token(&mut self, token: ContextToken<'a>) -> ConvertResult<()> {
        let position = self.tokens.len();
        self.insert_token(position, token)
    }

    /// Insert a token at `position` of the merged list and register its id.
    pub fn insert_token(&mut self, position: usize, token: ContextToken<'a>) -> ConvertResult<()> {
        if self.ids.insert(token.id, token.node).is_some() {
            return Err(ConvertError::MalformedColumn {
                sentence: self.sentence.sent_id.clone(),
                column: "#",
                value: token.id.to_string(),
            });
        }
        self.tokens.insert(position, token);
        Ok(())
    }

    /// Position of the token with `id` in the merged list.
    pub fn position_of(&self, id: ConlluId) -> Option<usize> {
        self.tokens.iter().position(|token| token.id == id)
    }

    /// The node registered for `id`.
    pub fn resolve(&self, id: ConlluId, role: IdRole) -> ConvertResult<NodeId> {
        self.ids
            .get(&id)
            .copied()
            .ok_or_else(|| self.unresolved(id.to_string(), role))
    }

    pub(crate) fn unresolved(&self, id: String, role: IdRole) -> ConvertError {
        ConvertError::IdentifierResolution {
            sentence: self.sentence.sent_id.clone(),
            id,
            role,
        }
    }
}
