//! Structure classification and preview decoding
//!
//! Heap objects arrive as a type tag plus an opaque textual preview. This
//! module classifies each object into a visual [`StructureKind`] and decodes
//! the preview into display tokens, producing presentation-ready
//! [`Structure`] descriptors for the layout engine and the host UI.
//!
//! Decoding never fails: a preview that does not match the expected
//! bracket/quote shape falls back to a single opaque token, so one odd
//! object cannot take down the rest of the visualization.

use crate::trace::{resolve::resolve_references, HeapObject, Step};

pub mod layout;
mod preview;

/// Visual category assigned to a heap object for rendering purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// Ordered cells: lists and tuples.
    Sequence,
    /// Ordered key/value entries: dicts.
    Mapping,
    /// Unordered nodes: sets and frozensets.
    Set,
    /// Anything unrecognized, rendered as a single label.
    Generic,
}

impl StructureKind {
    /// Classify a heap object's type tag.
    pub fn classify(type_name: &str) -> Self {
        match type_name {
            "list" | "tuple" => StructureKind::Sequence,
            "dict" => StructureKind::Mapping,
            "set" | "frozenset" => StructureKind::Set,
            _ => StructureKind::Generic,
        }
    }
}

/// Decoded display data for one structure.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureData {
    /// Ordered scalar display tokens.
    Sequence(Vec<String>),
    /// Ordered (key, value) display pairs.
    Mapping(Vec<(String, String)>),
    /// Element tokens; unordered in meaning, kept in preview order.
    Set(Vec<String>),
    /// A single undecomposed label.
    Generic(String),
}

impl StructureData {
    /// Number of discrete visual elements this data decomposes into.
    pub fn len(&self) -> usize {
        match self {
            StructureData::Sequence(items) | StructureData::Set(items) => items.len(),
            StructureData::Mapping(pairs) => pairs.len(),
            StructureData::Generic(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            StructureData::Sequence(items) | StructureData::Set(items) => items.is_empty(),
            StructureData::Mapping(pairs) => pairs.is_empty(),
            StructureData::Generic(_) => false,
        }
    }
}

/// A named, classified, decoded heap structure ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    /// The local variable name this structure is bound to.
    pub name: String,
    pub kind: StructureKind,
    pub data: StructureData,
    /// Element count as reported by the tracer, when present.
    pub size: Option<usize>,
}

/// Decode a preview string according to the object's kind.
///
/// Malformed previews fall back to one opaque token: sequences and sets
/// keep their kind with the whole preview as the only token, mappings
/// degrade to [`StructureData::Generic`] since a pair list cannot carry a
/// single token.
pub fn decode(kind: StructureKind, preview: &str) -> StructureData {
    match kind {
        StructureKind::Sequence => match preview::parse_sequence(preview) {
            Some(items) => StructureData::Sequence(items),
            None => {
                tracing::debug!(preview, "unparseable sequence preview; using opaque token");
                StructureData::Sequence(vec![preview.to_owned()])
            }
        },
        StructureKind::Mapping => match preview::parse_mapping(preview) {
            Some(pairs) => StructureData::Mapping(pairs),
            None => {
                tracing::debug!(preview, "unparseable mapping preview; using opaque token");
                StructureData::Generic(preview.to_owned())
            }
        },
        StructureKind::Set => match preview::parse_set(preview) {
            Some(items) => StructureData::Set(items),
            None => {
                tracing::debug!(preview, "unparseable set preview; using opaque token");
                StructureData::Set(vec![preview.to_owned()])
            }
        },
        StructureKind::Generic => StructureData::Generic(preview.to_owned()),
    }
}

/// Build the structure descriptors for one step: resolve by-reference
/// locals, classify each heap object, and decode its preview. Order follows
/// local-variable declaration order.
pub fn build_structures(step: &Step) -> Vec<Structure> {
    resolve_references(step)
        .into_iter()
        .map(|(name, object)| {
            let kind = StructureKind::classify(&object.type_name);
            Structure {
                name: name.to_owned(),
                kind,
                data: decode(kind, &object.preview),
                size: object.size,
            }
        })
        .collect()
}

/// Classify and decode a single heap object under a display name.
///
/// Convenience for hosts that resolve references themselves.
pub fn classify_object(name: &str, object: &HeapObject) -> Structure {
    let kind = StructureKind::classify(&object.type_name);
    Structure {
        name: name.to_owned(),
        kind,
        data: decode(kind, &object.preview),
        size: object.size,
    }
}
