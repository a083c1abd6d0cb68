//! # Introduction
//!
//! TraceTTY replays a precomputed program-execution trace as an interactive
//! terminal visualization: the current source line, local variables with
//! change annotations, the call stack, and heap data structures drawn on a
//! 2D canvas with staggered entrance animation.  Traces are produced by an
//! external tracer service and consumed here as a single JSON response;
//! TraceTTY never executes user programs itself.
//!
//! ## Playback pipeline
//!
//! ```text
//! Tracer response → Trace model → Playback controller → Diff + Resolve
//!                                        ↓
//!                        Classify + Layout → Canvas renderer → TUI
//! ```
//!
//! 1. [`client`] — fetches the tracer response over HTTP or reads it from a
//!    JSON file on disk.
//! 2. [`trace`] — the immutable step/trace model, variable diffing, and
//!    heap reference resolution.
//! 3. [`structure`] — classifies heap objects into visual structure kinds,
//!    decodes their textual previews, and computes draw geometry.
//! 4. [`render`] — stateless draw routines over a [`render::Surface`] plus
//!    the entrance-animation scheduler.
//! 5. [`playback`] — the state machine driving stepping, play/pause, and
//!    speed control over the installed trace.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.

pub mod client;
pub mod playback;
pub mod render;
pub mod structure;
pub mod trace;
pub mod ui;
