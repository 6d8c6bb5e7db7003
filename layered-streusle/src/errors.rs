//! Error types for the importer.
//!
//! Every error is fatal to the document being converted: no partially
//! built graph is considered valid.

use thiserror::Error;

/// Where a literal text was being searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentScope {
    /// A sentence string within the document text.
    Document,
    /// A token string within its sentence string.
    Sentence,
}

impl std::fmt::Display for AlignmentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlignmentScope::Document => f.write_str("document text"),
            AlignmentScope::Sentence => f.write_str("sentence text"),
        }
    }
}

/// What an unresolved identifier was supposed to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRole {
    /// `head` or an `edeps` head.
    Head,
    /// The base id of an ellipsis token.
    EllipsisBase,
    /// A member of a lexical expression.
    ExpressionMember,
}

impl std::fmt::Display for IdRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdRole::Head => f.write_str("head"),
            IdRole::EllipsisBase => f.write_str("ellipsis base"),
            IdRole::ExpressionMember => f.write_str("expression member"),
        }
    }
}

/// Lexical expression tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpressionKind {
    /// Single-word expression (`swes`).
    Single,
    /// Strong multiword expression (`smwes`).
    Strong,
    /// Weak multiword expression (`wmwes`).
    Weak,
}

impl ExpressionKind {
    /// Infix used in span names, e.g. `reviews-001_SMWE_1`.
    pub fn tag(&self) -> &'static str {
        match self {
            ExpressionKind::Single => "SWE",
            ExpressionKind::Strong => "SMWE",
            ExpressionKind::Weak => "WMWE",
        }
    }
}

impl std::fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Errors that can occur while loading or converting a document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input does not have the expected shape.
    #[error("malformed input: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading the input failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A token's or sentence's literal text was not found at or after the cursor.
    #[error("sentence {sentence}: couldn't find `{needle}` after index {cursor} in the {scope}")]
    Alignment {
        sentence: String,
        needle: String,
        cursor: usize,
        scope: AlignmentScope,
    },

    /// An identifier refers to no token of the current sentence.
    #[error("sentence {sentence}: {role} id `{id}` does not name a token")]
    IdentifierResolution {
        sentence: String,
        id: String,
        role: IdRole,
    },

    /// A multiword expression's member positions are not strictly increasing.
    #[error("{kind} {expression} in sentence {sentence} has non-monotonically increasing token indexes {positions:?}")]
    OrderingInvariant {
        sentence: String,
        kind: ExpressionKind,
        expression: String,
        positions: Vec<usize>,
    },

    /// A column value could not be interpreted.
    #[error("sentence {sentence}: malformed {column} value `{value}`")]
    MalformedColumn {
        sentence: String,
        column: &'static str,
        value: String,
    },

    /// A sentence id from which no document id can be derived.
    #[error("sentence id `{0}` has no document prefix")]
    MalformedSentenceId(String),

    /// Invalid converter configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for importer operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
