//! Playback state machine
//!
//! The [`Controller`] owns the installed trace and the only mutable session
//! state: current index, mode, and speed. Every display goes through
//! [`Controller::show_step`], which derives the presentation bundle (diff-
//! annotated variables, resolved and classified structures, the line to
//! highlight) as a [`StepView`].
//!
//! # State machine
//!
//! Modes are `Idle`, `Playing`, `Paused`. `Idle` is entered only when a
//! trace is installed or cleared and behaves like `Paused` at index 0;
//! `play()` and `pause()` toggle the other two. Reaching the last index
//! while playing transitions to `Paused` implicitly, so a later `play()`
//! rewinds instead of continuing past the end.
//!
//! # Timing
//!
//! The step timer is cooperative: the host calls [`Controller::advance`]
//! on its own cadence and a step fires when the armed deadline has passed.
//! Arming replaces any prior deadline, so timers never stack; `pause()`
//! disarms synchronously, so no tick fires after it returns.

use std::time::{Duration, Instant};

use crate::structure::{build_structures, Structure};
use crate::trace::diff::{DiffTracker, VarStatus};
use crate::trace::{Frame, Step, VariableInfo};

/// Default step interval.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(800);

/// Minimum accepted step interval.
pub const MIN_SPEED: Duration = Duration::from_millis(1);

/// Playback mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// No step displayed yet; behaviorally equivalent to `Paused` at 0.
    Idle,
    Playing,
    Paused,
}

/// The mutable session state, one instance per open session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub index: usize,
    pub mode: Mode,
    pub speed: Duration,
}

/// One diff-annotated variable entry, ready for the variables panel.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableView {
    pub name: String,
    pub info: VariableInfo,
    pub status: VarStatus,
}

/// Presentation bundle for one displayed step: everything the host UI
/// needs, already interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct StepView {
    pub index: usize,
    /// Source line to highlight, 1-indexed. A line beyond the known source
    /// is a legal no-op for the highlighter.
    pub line: u32,
    pub timestamp: f64,
    pub variables: Vec<VariableView>,
    pub structures: Vec<Structure>,
    pub call_stack: Vec<Frame>,
}

/// Drives stepping, play/pause, and speed control over an installed trace.
#[derive(Debug)]
pub struct Controller {
    trace: Vec<Step>,
    state: PlaybackState,
    /// Armed step deadline; `Some` only while playing.
    deadline: Option<Instant>,
    tracker: DiffTracker,
}

impl Controller {
    pub fn new(speed: Duration) -> Self {
        Controller {
            trace: Vec::new(),
            state: PlaybackState {
                index: 0,
                mode: Mode::Idle,
                speed: speed.max(MIN_SPEED),
            },
            deadline: None,
            tracker: DiffTracker::new(),
        }
    }

    /// Replace the current trace and reset to `Idle` at index 0.
    pub fn install(&mut self, trace: Vec<Step>) {
        tracing::info!(steps = trace.len(), "trace installed");
        self.trace = trace;
        self.reset();
    }

    /// Drop the current trace entirely.
    pub fn clear(&mut self) {
        self.trace.clear();
        self.reset();
    }

    fn reset(&mut self) {
        self.state.index = 0;
        self.state.mode = Mode::Idle;
        self.deadline = None;
        self.tracker.reset();
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn speed(&self) -> Duration {
        self.state.speed
    }

    pub fn is_playing(&self) -> bool {
        self.state.mode == Mode::Playing
    }

    /// Whether the current index is the last step of a non-empty trace.
    pub fn at_end(&self) -> bool {
        !self.trace.is_empty() && self.state.index + 1 == self.trace.len()
    }

    /// Display step `index`. Out-of-range indices are a silent no-op; in
    /// range, the index moves and the presentation bundle is derived.
    pub fn show_step(&mut self, index: usize) -> Option<StepView> {
        if index >= self.trace.len() {
            return None;
        }
        self.state.index = index;
        let step = &self.trace[index];
        let statuses = self.tracker.observe(&step.locals);
        let variables = step
            .locals
            .iter()
            .map(|(name, info)| VariableView {
                name: name.clone(),
                info: info.clone(),
                status: statuses
                    .get(name)
                    .copied()
                    .unwrap_or(VarStatus::Unchanged),
            })
            .collect();
        let structures = build_structures(step);
        tracing::debug!(index, line = step.line, "showing step");
        Some(StepView {
            index,
            line: step.line,
            timestamp: step.timestamp,
            variables,
            structures,
            call_stack: step.call_stack.clone(),
        })
    }

    /// Step to the next index; a no-op at the last step.
    pub fn step_forward(&mut self) -> Option<StepView> {
        self.show_step(self.state.index + 1)
    }

    /// Step to the previous index; a no-op at index 0.
    pub fn step_back(&mut self) -> Option<StepView> {
        let index = self.state.index.checked_sub(1)?;
        self.show_step(index)
    }

    /// Start playback. At the last index the trace rewinds to 0 first, and
    /// that rewind's view is returned so the host can display it. `Idle`
    /// is treated as `Paused` at the current index.
    pub fn play(&mut self, now: Instant) -> Option<StepView> {
        if self.trace.is_empty() {
            return None;
        }
        let rewound = if self.at_end() { self.show_step(0) } else { None };
        self.state.mode = Mode::Playing;
        self.deadline = Some(now + self.state.speed);
        rewound
    }

    /// Stop playback. The armed deadline is dropped before this returns,
    /// so no further tick can fire.
    pub fn pause(&mut self) {
        self.state.mode = Mode::Paused;
        self.deadline = None;
    }

    /// Change the step interval. While playing, the deadline is re-anchored
    /// in the same call (pause-then-resume), so no tick is lost or doubled.
    pub fn set_speed(&mut self, speed: Duration, now: Instant) {
        self.state.speed = speed.max(MIN_SPEED);
        if self.state.mode == Mode::Playing {
            self.deadline = Some(now + self.state.speed);
        }
    }

    /// Pause and return to the first step.
    pub fn restart(&mut self) -> Option<StepView> {
        self.pause();
        self.show_step(0)
    }

    /// Cooperative timer poll. Fires at most one step per call; intervals
    /// missed while the host was busy are coalesced, never queued. Reaching
    /// the last index pauses in the same call.
    pub fn advance(&mut self, now: Instant) -> Option<StepView> {
        if self.state.mode != Mode::Playing {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        let view = self.step_forward();
        match &view {
            Some(_) if self.at_end() => self.pause(),
            Some(_) => self.deadline = Some(now + self.state.speed),
            // Single-step trace: play() rewound to 0, which is also the end.
            None => self.pause(),
        }
        view
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED)
    }
}
