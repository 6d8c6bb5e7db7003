//! Relation types for linking graph nodes.
//!
//! This module provides the typed directed edges of the annotation graph and
//! the named layers that partition them. A relation's type is supplied by a
//! [`RelationKind`], so that producers can keep their edge vocabulary in a
//! closed enum while the graph stores plain type names.

use serde::{Deserialize, Serialize};

use super::{Annotation, NodeId};

/// A typed label for a directed relation between two nodes.
///
/// Implement this trait to define the edge vocabulary of a producer.
///
/// # Example
///
/// ```
/// use layered_graph::RelationKind;
///
/// #[derive(Debug, Clone, Copy)]
/// pub struct Coreference;
///
/// impl RelationKind for Coreference {
///     fn type_name(&self) -> &'static str { "coref" }
///     fn glyph(&self) -> Option<&'static str> { Some("=") }
/// }
/// ```
pub trait RelationKind: std::fmt::Debug {
    /// Returns the type name stored on the relation.
    ///
    /// Relations of the same type name form one edge set; consumers that
    /// assume acyclicity do so per type name.
    fn type_name(&self) -> &'static str;

    /// Returns an optional glyph rendered before the type name in arrow displays.
    fn glyph(&self) -> Option<&'static str> {
        None
    }
}

/// A typed directed edge between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Producer-assigned identifier, kept for debugging.
    pub id: String,
    /// Type name from the [`RelationKind`] the relation was created with.
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Relation {
    /// Create a relation of the given kind from `source` to `target`.
    pub fn new<K: RelationKind>(id: impl Into<String>, kind: K, source: NodeId, target: NodeId) -> Self {
        Self {
            id: id.into(),
            kind: kind.type_name().to_string(),
            glyph: kind.glyph().map(str::to_string),
            source,
            target,
            annotations: Vec::new(),
        }
    }

    /// Takes self, adds an annotation.
    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotate(key, value);
        self
    }

    pub fn annotate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.annotations.push(Annotation::new(key, value));
    }

    /// First value annotated under `key`.
    pub fn annotation(&self, key: &str) -> Option<&str> {
        self.annotations
            .iter()
            .find(|ann| ann.key == key)
            .map(|ann| ann.value.as_str())
    }
}

/// A named bucket of relations.
///
/// Layers separate edge sets with different structural guarantees, e.g.
/// edges known to close a cycle from edges that keep a type acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub relations: Vec<Relation>,
}

impl Layer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relations: Vec::new(),
        }
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }
}
