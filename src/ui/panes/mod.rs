//! TUI pane rendering modules
//!
//! Rendering logic for all visual panes, organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`source`]: traced source display with Python-aware highlighting and
//!   the current-line indicator
//! - [`variables`]: diff-annotated locals of the current step
//! - [`stack`]: call stack frames, innermost first
//! - [`structures`]: canvas-rendered heap structures with entrance animation
//! - [`output`]: stdout/stderr captured by the tracer
//! - [`status`]: status bar with step position, speed, and keybindings

pub mod output;
pub mod source;
pub mod stack;
pub mod status;
pub mod structures;
pub mod variables;

pub use output::render_output_pane;
pub use source::render_source_pane;
pub use stack::render_stack_pane;
pub use status::render_status_bar;
pub use structures::render_structures_pane;
pub use variables::render_variables_pane;

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

use super::theme::DEFAULT_THEME;

/// Common bordered block with focus styling.
pub(crate) fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}
