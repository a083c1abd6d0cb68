//! Step/trace data model
//!
//! This module defines the wire-format records produced by the external
//! tracer and consumed everywhere else in the crate. A trace is an ordered,
//! finite sequence of [`Step`]s, produced once per run and immutable after
//! deserialization.
//!
//! # Invariants
//!
//! - `locals` and `heap` preserve insertion order (declaration order for
//!   locals), which is why both are [`IndexMap`]s rather than hash maps.
//! - A [`VariableInfo`] carries either a `value` (by content) or an `id`
//!   (by reference into the same step's `heap`); exactly one of the two is
//!   meaningful for display.
//! - `call_stack` lists frames outermost first, innermost last.
//! - `timestamp` is monotonically non-decreasing across a trace.

use indexmap::IndexMap;
use serde::Deserialize;

pub mod diff;
pub mod resolve;

/// The distinguished frame name denoting top-level module scope.
pub const MODULE_SCOPE: &str = "<module>";

/// The full response object returned by the tracer for one run.
///
/// An empty or absent `trace` is legal input: playback controls stay
/// disabled and no step is displayed, but nothing downstream fails.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TraceResponse {
    #[serde(default)]
    pub trace: Vec<Step>,
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    /// Source lines of the traced program, 1-indexed by position.
    #[serde(default)]
    pub code_lines: Vec<String>,
    /// Set when the tracer hit its step limit and the trace is incomplete.
    #[serde(default)]
    pub trace_truncated: bool,
}

/// One execution snapshot: current line, variable bindings, heap state,
/// call stack, and a timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    /// Current source line, 1-indexed.
    pub line: u32,
    /// Locals of the innermost frame, in declaration order.
    #[serde(default)]
    pub locals: IndexMap<String, VariableInfo>,
    /// Heap objects reachable from user variables, keyed by object id.
    /// Ids are only meaningful within this step.
    #[serde(default)]
    pub heap: IndexMap<String, HeapObject>,
    /// Call stack, innermost frame last.
    #[serde(default)]
    pub call_stack: Vec<Frame>,
    /// Seconds since the start of the traced run.
    #[serde(default)]
    pub timestamp: f64,
}

impl Step {
    /// The innermost call frame, if any.
    pub fn innermost_frame(&self) -> Option<&Frame> {
        self.call_stack.last()
    }
}

/// One variable binding as recorded by the tracer.
///
/// Equality is deep content equality of the record (derived), never
/// identity; the diff tracker relies on this.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VariableInfo {
    /// Type tag as reported by the tracer (e.g. `int`, `list`, `dict`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Primitive text representation, present for by-content bindings.
    #[serde(default)]
    pub value: Option<String>,
    /// Heap object id, present for by-reference bindings.
    #[serde(default)]
    pub id: Option<String>,
    /// Textual preview of the referenced object, carried redundantly so
    /// variable chips can render without consulting the heap table.
    #[serde(default)]
    pub preview: Option<String>,
}

impl VariableInfo {
    /// Whether this binding refers to a heap object.
    pub fn is_reference(&self) -> bool {
        self.id.is_some()
    }

    /// Inline display text for the variables panel: the primitive value for
    /// by-content bindings, a `<ref:ID>` marker for by-reference ones.
    pub fn display_value(&self) -> String {
        if let Some(value) = &self.value {
            value.clone()
        } else if let Some(id) = &self.id {
            format!("<ref:{}>", id)
        } else {
            String::from("?")
        }
    }
}

/// One heap-resident composite object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeapObject {
    /// Structural-kind tag (e.g. `list`, `dict`, `set`).
    #[serde(rename = "type")]
    pub type_name: String,
    /// Textual rendering of the contents, decoded by the structure module.
    #[serde(default)]
    pub preview: String,
    /// Element count, when the tracer recorded one.
    #[serde(default)]
    pub size: Option<usize>,
}

/// One call stack frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
    /// Function name; [`MODULE_SCOPE`] denotes top-level scope.
    pub function: String,
    #[serde(default)]
    pub line_number: Option<u32>,
    #[serde(default)]
    pub locals: Option<IndexMap<String, VariableInfo>>,
}

impl Frame {
    /// Whether this frame is the top-level module scope.
    pub fn is_module_scope(&self) -> bool {
        self.function == MODULE_SCOPE
    }

    /// Number of locals recorded for this frame.
    pub fn local_count(&self) -> usize {
        self.locals.as_ref().map_or(0, IndexMap::len)
    }
}
