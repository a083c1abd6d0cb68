//! Program output pane
//!
//! Shows the stdout and stderr captured by the tracer for the whole run.
//! Output is not tied to individual steps; the tracer reports it once per
//! response.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{List, ListItem},
    Frame,
};

use super::pane_block;
use crate::ui::theme::DEFAULT_THEME;

/// Render the output pane.
pub fn render_output_pane(
    frame: &mut Frame,
    area: Rect,
    stdout: &str,
    stderr: &str,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Output ", is_focused);

    let mut items: Vec<ListItem> = Vec::new();
    for line in stdout.lines() {
        items.push(
            ListItem::new(line.to_owned()).style(Style::default().fg(DEFAULT_THEME.fg)),
        );
    }
    for line in stderr.lines() {
        items.push(
            ListItem::new(line.to_owned()).style(Style::default().fg(DEFAULT_THEME.error)),
        );
    }
    if items.is_empty() {
        items.push(
            ListItem::new("No output").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = (*scroll).min(items.len().saturating_sub(visible_height));
    let visible: Vec<ListItem> = items
        .into_iter()
        .skip(*scroll)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible).block(block), area);
}
