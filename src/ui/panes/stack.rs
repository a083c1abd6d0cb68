//! Call stack pane rendering
//!
//! Displays the current step's call stack with the innermost frame on top.
//! Each frame shows the function name (the distinguished `<module>` name
//! marks top-level scope), the frame's line when recorded, and how many
//! locals it holds.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::pane_block;
use crate::trace::Frame as CallFrame;
use crate::ui::theme::DEFAULT_THEME;

/// Render the call stack pane.
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    call_stack: Option<&[CallFrame]>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Call Stack ", is_focused);

    let mut items: Vec<ListItem> = Vec::new();
    match call_stack {
        None | Some([]) => {
            items.push(
                ListItem::new("No call stack to display")
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
            );
        }
        Some(frames) => {
            // Innermost frame last in the data, first in the panel.
            for (depth, call) in frames.iter().rev().enumerate() {
                items.push(ListItem::new(frame_line(call, depth == 0)));
            }
        }
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

fn frame_line(call: &CallFrame, is_innermost: bool) -> Line<'static> {
    let name_style = if is_innermost {
        Style::default()
            .fg(if call.is_module_scope() {
                DEFAULT_THEME.type_name
            } else {
                DEFAULT_THEME.function
            })
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.comment)
    };

    let mut spans = vec![
        Span::styled(if is_innermost { " ▶ " } else { "   " }, name_style),
        Span::styled(call.function.clone(), name_style),
    ];

    if let Some(line) = call.line_number {
        spans.push(Span::styled(
            format!("  line {}", line),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let count = call.local_count();
    spans.push(Span::styled(
        format!(
            "  ({} local{})",
            count,
            if count == 1 { "" } else { "s" }
        ),
        Style::default().fg(DEFAULT_THEME.comment),
    ));

    Line::from(spans)
}
