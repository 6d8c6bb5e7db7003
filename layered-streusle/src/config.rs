//! Converter configuration.

use serde::Deserialize;

use crate::ConvertResult;

/// Configuration for [`StreusleMapper`](crate::StreusleMapper).
///
/// Every field has a default, so a TOML file only needs to name what it
/// changes:
///
/// ```
/// use layered_streusle::ConverterConfig;
///
/// let config = ConverterConfig::from_toml_str("sentence_separator = ' '").unwrap();
/// assert_eq!(config.sentence_separator, ' ');
/// assert_eq!(config.edeps_layer, "edeps");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Joins sentence strings into the document text.
    ///
    /// Offsets of every token after the first sentence depend on it, and
    /// consumers may split the document text on it to recover sentences.
    pub sentence_separator: char,
    /// Layer receiving ordinary enhanced dependencies.
    pub edeps_layer: String,
    /// Layer receiving enhanced dependencies that would close a cycle.
    pub cycle_layer: String,
    /// Category annotation put on every sentence span, as `(key, value)`.
    pub sentence_category: Option<(String, String)>,
    /// Also put each token's `lextag` on a one-token span.
    pub lextag_spans: bool,
    /// Annotate primary edges missing from the token's `edeps` with `in_edeps=no`.
    pub mark_missing_edeps: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            sentence_separator: '\t',
            edeps_layer: "edeps".into(),
            cycle_layer: "cycle".into(),
            sentence_category: Some(("CAT".into(), "S".into())),
            lextag_spans: false,
            mark_missing_edeps: true,
        }
    }
}

impl ConverterConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(content: &str) -> ConvertResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Takes self
    pub fn with_separator(mut self, separator: char) -> Self {
        self.sentence_separator = separator;
        self
    }

    /// Takes self
    pub fn with_lextag_spans(mut self, lextag_spans: bool) -> Self {
        self.lextag_spans = lextag_spans;
        self
    }
}
