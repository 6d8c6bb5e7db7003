//! Typed schema for document-level STREUSLE JSON.
//!
//! A document is a JSON array of sentences. Each sentence holds its token
//! records (one per CoNLL-U word line), its ellipsis token records, and the
//! lexical expression tables. Optional columns are `Option`s; JSON `null` and
//! an absent key mean the same thing. Fields this importer has no use for
//! (`lexlemma`, `wlemma`, `streusle_sent_id`, ...) are ignored.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

/// One document: its sentences in document order.
pub type Document = Vec<Sentence>;

/// Treat `null` like an absent key for collection fields.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sentence {
    pub sent_id: String,
    /// Surface string, e.g. "My 8 year old daughter loves this place."
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub toks: Vec<TokenRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub etoks: Vec<EllipsisRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub swes: BTreeMap<String, SweRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub smwes: BTreeMap<String, MweRecord>,
    #[serde(default, deserialize_with = "nullable")]
    pub wmwes: BTreeMap<String, MweRecord>,
}

/// An ordinary word line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenRecord {
    /// 1-based CoNLL-U word id.
    #[serde(rename = "#")]
    pub id: u32,
    pub word: String,
    #[serde(flatten)]
    pub columns: TokenColumns,
}

/// An ellipsis (empty node) line, e.g. `8.1`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EllipsisRecord {
    #[serde(rename = "#")]
    pub id: EllipsisId,
    #[serde(default)]
    pub word: Option<String>,
    #[serde(flatten)]
    pub columns: TokenColumns,
}

/// `[base id, insertion counter, virtual id]`, e.g. `[8, 1, "8.1"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EllipsisId(pub u32, pub u32, pub String);

impl EllipsisId {
    pub fn base(&self) -> u32 {
        self.0
    }

    pub fn counter(&self) -> u32 {
        self.1
    }

    pub fn virtual_id(&self) -> &str {
        &self.2
    }
}

/// `[expression id, ordinal within the expression]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpressionRef(pub u32, pub u32);

/// The per-token columns shared by word and ellipsis lines.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenColumns {
    pub lemma: Option<String>,
    pub upos: Option<String>,
    pub xpos: Option<String>,
    /// `K=V|K=V|...`
    pub feats: Option<String>,
    pub head: Option<u32>,
    pub deprel: Option<String>,
    /// `head:rel|head:rel|...`; `rel` may itself contain colons.
    pub edeps: Option<String>,
    /// `K=V|...`
    pub misc: Option<String>,
    pub smwe: Option<ExpressionRef>,
    pub wmwe: Option<ExpressionRef>,
    pub lexcat: Option<String>,
    pub ss: Option<String>,
    pub ss2: Option<String>,
    pub lextag: Option<String>,
}

/// Supersense and lexical category of an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExpressionTags {
    pub ss: Option<String>,
    pub ss2: Option<String>,
    pub lexcat: Option<String>,
}

impl ExpressionTags {
    /// The tags that are present, as `(annotation key, value)`.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [("ss", &self.ss), ("ss2", &self.ss2), ("lexcat", &self.lexcat)]
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }
}

/// Entry of the `swes` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SweRecord {
    /// CoNLL-U ids of the member tokens.
    #[serde(default, deserialize_with = "nullable")]
    pub toknums: Vec<u32>,
    #[serde(flatten)]
    pub tags: ExpressionTags,
}

/// Entry of the `smwes` / `wmwes` tables.
///
/// Membership is read from the per-token `smwe` / `wmwe` columns, which also
/// carry each member's ordinal; `toknums` is only cross-checked against them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MweRecord {
    #[serde(default, deserialize_with = "nullable")]
    pub toknums: Vec<u32>,
    #[serde(flatten)]
    pub tags: ExpressionTags,
}

/// A CoNLL-U token identifier.
///
/// Word lines have integral ids; ellipsis tokens have decimal ids whose
/// integral part is the word they follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConlluId {
    Word(u32),
    Empty(u32, u32),
}

impl std::fmt::Display for ConlluId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConlluId::Word(id) => write!(f, "{}", id),
            ConlluId::Empty(base, counter) => write!(f, "{}.{}", base, counter),
        }
    }
}

/// A string that is not a CoNLL-U word or empty-node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidConlluId(pub String);

impl FromStr for ConlluId {
    type Err = InvalidConlluId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidConlluId(s.to_string());
        match s.split_once('.') {
            None => s.parse().map(ConlluId::Word).map_err(|_| invalid()),
            Some((base, counter)) => {
                let base = base.parse().map_err(|_| invalid())?;
                let counter = counter.parse().map_err(|_| invalid())?;
                Ok(ConlluId::Empty(base, counter))
            }
        }
    }
}
