//! Structure layout engine
//!
//! Turns decoded [`Structure`]s into draw geometry: structures stack
//! top-to-bottom at a fixed vertical pitch, each reserving width
//! proportional to its cardinality. Coordinates are abstract canvas units
//! with the origin at the top-left and y growing downward; the UI adapter
//! maps them onto its drawing surface.
//!
//! Layout is deterministic: the same structures in the same order always
//! produce identical geometry.

use super::{Structure, StructureData, StructureKind};

/// Logical canvas extent. The empty-state message is centered in this box
/// and the UI scales it onto the visible pane.
pub const VIEW_WIDTH: f64 = 640.0;
pub const VIEW_HEIGHT: f64 = 480.0;

/// Sequence cell geometry.
pub const CELL_WIDTH: f64 = 60.0;
pub const CELL_HEIGHT: f64 = 40.0;
pub const CELL_GAP: f64 = 10.0;

/// Mapping entry geometry.
pub const ENTRY_WIDTH: f64 = 120.0;
pub const ENTRY_GAP: f64 = 20.0;

/// Set node geometry.
pub const NODE_RADIUS: f64 = 25.0;
pub const NODE_GAP: f64 = 20.0;

/// Vertical pitch between consecutive structures, and the page margin.
pub const ROW_PITCH: f64 = 150.0;
pub const MARGIN: f64 = 50.0;

/// Approximate width of one character of label text, used to center labels.
pub const CHAR_WIDTH: f64 = 8.0;

/// Geometry of one discrete visual element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Circle { x: f64, y: f64, radius: f64 },
    /// Bare text anchored at a point; used by generic structures.
    Label { x: f64, y: f64 },
}

impl Shape {
    /// Center point of the shape, where its label is drawn.
    pub fn center(&self) -> (f64, f64) {
        match *self {
            Shape::Rect { x, y, width, height } => (x + width / 2.0, y + height / 2.0),
            Shape::Circle { x, y, .. } => (x, y),
            Shape::Label { x, y } => (x, y),
        }
    }
}

/// One drawable element: an array cell, a mapping entry, or a set node.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub shape: Shape,
    /// Text drawn at the shape's center.
    pub label: String,
    /// Secondary text below the shape (sequence index labels).
    pub sublabel: Option<String>,
    /// Position within the owning structure; drives the entrance stagger.
    pub ordinal: usize,
}

/// Bracket strokes enclosing a sequence row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed geometry for one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureLayout {
    pub name: String,
    pub kind: StructureKind,
    /// Anchor of the `name:` label above the structure.
    pub label_at: (f64, f64),
    pub elements: Vec<Element>,
    /// Present for non-empty sequences.
    pub brackets: Option<BracketFrame>,
}

/// Lay out `structures` top-to-bottom in the order given.
pub fn lay_out(structures: &[Structure]) -> Vec<StructureLayout> {
    structures
        .iter()
        .enumerate()
        .map(|(row, structure)| lay_out_one(structure, row))
        .collect()
}

fn lay_out_one(structure: &Structure, row: usize) -> StructureLayout {
    let x = MARGIN;
    let y = MARGIN + row as f64 * ROW_PITCH;
    let label_at = (x, y - 12.0);

    let (elements, brackets) = match &structure.data {
        StructureData::Sequence(items) => {
            let elements: Vec<Element> = items
                .iter()
                .enumerate()
                .map(|(i, item)| Element {
                    shape: Shape::Rect {
                        x: x + i as f64 * (CELL_WIDTH + CELL_GAP),
                        y,
                        width: CELL_WIDTH,
                        height: CELL_HEIGHT,
                    },
                    label: item.clone(),
                    sublabel: Some(i.to_string()),
                    ordinal: i,
                })
                .collect();
            let brackets = (!items.is_empty()).then(|| BracketFrame {
                x: x - CELL_GAP,
                y,
                width: items.len() as f64 * (CELL_WIDTH + CELL_GAP) - CELL_GAP + 2.0 * CELL_GAP,
                height: CELL_HEIGHT,
            });
            (elements, brackets)
        }
        StructureData::Mapping(pairs) => {
            let elements = pairs
                .iter()
                .enumerate()
                .map(|(i, (key, value))| Element {
                    shape: Shape::Rect {
                        x: x + i as f64 * (ENTRY_WIDTH + ENTRY_GAP),
                        y,
                        width: ENTRY_WIDTH,
                        height: CELL_HEIGHT,
                    },
                    label: format!("{} → {}", key, value),
                    sublabel: None,
                    ordinal: i,
                })
                .collect();
            (elements, None)
        }
        StructureData::Set(items) => {
            let elements = items
                .iter()
                .enumerate()
                .map(|(i, item)| Element {
                    shape: Shape::Circle {
                        x: x + NODE_RADIUS + i as f64 * (2.0 * NODE_RADIUS + NODE_GAP),
                        y: y + NODE_RADIUS,
                        radius: NODE_RADIUS,
                    },
                    label: item.clone(),
                    sublabel: None,
                    ordinal: i,
                })
                .collect();
            (elements, None)
        }
        StructureData::Generic(text) => {
            let element = Element {
                shape: Shape::Label { x, y: y + CELL_HEIGHT / 2.0 },
                label: text.clone(),
                sublabel: None,
                ordinal: 0,
            };
            (vec![element], None)
        }
    };

    StructureLayout {
        name: structure.name.clone(),
        kind: structure.kind,
        label_at,
        elements,
        brackets,
    }
}
