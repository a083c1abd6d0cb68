//! ratatui-based terminal UI
//!
//! Not part of the stable library API; the [`App`] event loop owns the
//! playback controller and the animation scheduler and wires both to the
//! pane renderers.

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
