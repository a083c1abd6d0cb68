//! Entrance animation scheduling
//!
//! Every discrete visual element materializes by ramping its opacity from
//! 0 to 1 over a fixed duration, with a start delay proportional to its
//! ordinal within its structure, so cells appear left-to-right rather than
//! all at once.
//!
//! The scheduler is cooperative and single-threaded: the host calls
//! [`EntranceAnimator::tick`] on its own redraw cadence, and the return
//! value tells it whether further animation-rate frames are needed. With no
//! active transitions the animator is idle; it never spins.

use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use crate::structure::layout::StructureLayout;

/// Fixed duration of one entrance transition.
pub const ENTRANCE_DURATION: Duration = Duration::from_millis(500);

/// Start delay added per element ordinal within a structure.
pub const STAGGER_DELAY: Duration = Duration::from_millis(50);

/// Identifies one element: (structure index, element ordinal).
pub type ElementKey = (usize, usize);

#[derive(Debug)]
struct Transition {
    key: ElementKey,
    delay: Duration,
}

/// Schedules and evaluates entrance transitions for the current render.
///
/// A new [`EntranceAnimator::begin`] supersedes all in-flight transitions;
/// each step's visualization restarts its own entrance animation, with no
/// cross-step morphing.
#[derive(Debug, Default)]
pub struct EntranceAnimator {
    started: Option<Instant>,
    transitions: Vec<Transition>,
    opacities: FxHashMap<ElementKey, f32>,
}

impl EntranceAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one entrance transition per element of `layouts`, replacing
    /// whatever was in flight.
    pub fn begin(&mut self, layouts: &[StructureLayout], now: Instant) {
        self.transitions.clear();
        self.opacities.clear();
        self.started = Some(now);
        for (index, layout) in layouts.iter().enumerate() {
            for element in &layout.elements {
                let key = (index, element.ordinal);
                self.transitions.push(Transition {
                    key,
                    delay: STAGGER_DELAY * element.ordinal as u32,
                });
                self.opacities.insert(key, 0.0);
            }
        }
    }

    /// Recompute opacities at `now`, dropping transitions that completed.
    /// Returns `true` while at least one transition remains incomplete.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(started) = self.started else {
            return false;
        };
        let elapsed = now.saturating_duration_since(started);
        let opacities = &mut self.opacities;
        self.transitions.retain(|transition| {
            let progress = if elapsed <= transition.delay {
                0.0
            } else {
                ((elapsed - transition.delay).as_secs_f32()
                    / ENTRANCE_DURATION.as_secs_f32())
                .min(1.0)
            };
            opacities.insert(transition.key, progress);
            progress < 1.0
        });
        if self.transitions.is_empty() {
            self.started = None;
            return false;
        }
        true
    }

    /// Current opacity of an element. Elements whose transition completed
    /// (or that were never queued) are fully opaque.
    pub fn opacity(&self, key: ElementKey) -> f32 {
        self.opacities.get(&key).copied().unwrap_or(1.0)
    }

    /// Whether no transitions are in flight.
    pub fn is_idle(&self) -> bool {
        self.transitions.is_empty()
    }
}
