//! Heap reference resolution
//!
//! Maps by-reference locals to their heap entries within a single step.
//! Resolution is pure and step-scoped: ids are never looked up in another
//! step's heap, since the tracer does not guarantee id stability across
//! steps.

use super::{HeapObject, Step};

/// Resolve every by-reference local of `step` to its heap object, in
/// declaration order.
///
/// By-content locals are excluded; they render inline in the variables
/// panel rather than in the structure view. A local whose id is missing
/// from the heap is skipped without disturbing the remaining entries.
pub fn resolve_references(step: &Step) -> Vec<(&str, &HeapObject)> {
    let mut resolved = Vec::new();
    for (name, var) in &step.locals {
        let Some(id) = &var.id else { continue };
        match step.heap.get(id) {
            Some(object) => resolved.push((name.as_str(), object)),
            None => {
                tracing::debug!(%name, %id, "local references a missing heap entry; skipping");
            }
        }
    }
    resolved
}
