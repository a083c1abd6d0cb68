//! Variable change tracking between consecutive displayed steps
//!
//! The diff tracker holds the locals mapping of the previously displayed
//! step and classifies every name in the current step as unchanged, changed,
//! or new. Names that disappeared are not reported; a variable going out of
//! scope simply stops appearing, mirroring the tracer's own scope behavior.

use indexmap::IndexMap;

use super::VariableInfo;

/// Change status of one local between the previous and current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarStatus {
    Unchanged,
    Changed,
    New,
}

/// Classify every name in `current` against `previous`.
///
/// Comparison is deep content equality of the [`VariableInfo`] records.
/// Result order follows `current`'s insertion order.
pub fn diff(
    previous: &IndexMap<String, VariableInfo>,
    current: &IndexMap<String, VariableInfo>,
) -> IndexMap<String, VarStatus> {
    current
        .iter()
        .map(|(name, info)| {
            let status = match previous.get(name) {
                None => VarStatus::New,
                Some(prev) if prev != info => VarStatus::Changed,
                Some(_) => VarStatus::Unchanged,
            };
            (name.clone(), status)
        })
        .collect()
}

/// Owns the previous-locals snapshot across displayed steps.
///
/// The snapshot is overwritten on every [`DiffTracker::observe`] call and
/// never persisted; it exists only to feed the next diff.
#[derive(Debug, Default)]
pub struct DiffTracker {
    previous: IndexMap<String, VariableInfo>,
}

impl DiffTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `current` against the held snapshot, then replace the snapshot
    /// with `current`. Displaying the same step twice therefore yields all
    /// `Unchanged` on the second observation.
    pub fn observe(
        &mut self,
        current: &IndexMap<String, VariableInfo>,
    ) -> IndexMap<String, VarStatus> {
        let statuses = diff(&self.previous, current);
        self.previous = current.clone();
        statuses
    }

    /// Drop the snapshot. Called when a trace is installed or cleared so
    /// the first displayed step diffs against nothing.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}
