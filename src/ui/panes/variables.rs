//! Variables pane rendering with change annotations
//!
//! Lists the current step's locals in declaration order. Each entry shows
//! the name, type tag, and either the primitive value or a `<ref:ID>`
//! marker for heap references. New variables carry a `+` marker, changed
//! ones a `~`; unchanged entries render plain.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::pane_block;
use crate::playback::VariableView;
use crate::trace::diff::VarStatus;
use crate::ui::theme::DEFAULT_THEME;

/// Render the variables pane.
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    variables: Option<&[VariableView]>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" Variables ", is_focused);

    let mut items: Vec<ListItem> = Vec::new();
    match variables {
        None | Some([]) => {
            items.push(
                ListItem::new("No variables to display")
                    .style(Style::default().fg(DEFAULT_THEME.comment)),
            );
        }
        Some(variables) => {
            for var in variables {
                items.push(ListItem::new(variable_line(var)));
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

fn variable_line(var: &VariableView) -> Line<'static> {
    let (marker, marker_style) = match var.status {
        VarStatus::New => (
            "+",
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ),
        VarStatus::Changed => (
            "~",
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
        VarStatus::Unchanged => (" ", Style::default().fg(DEFAULT_THEME.comment)),
    };

    let value_style = if var.info.is_reference() {
        Style::default().fg(DEFAULT_THEME.primary)
    } else {
        Style::default().fg(DEFAULT_THEME.number)
    };

    Line::from(vec![
        Span::styled(format!(" {} ", marker), marker_style),
        Span::styled(
            var.name.clone(),
            Style::default()
                .fg(DEFAULT_THEME.fg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", var.info.type_name),
            Style::default().fg(DEFAULT_THEME.type_name),
        ),
        Span::raw("= "),
        Span::styled(var.info.display_value(), value_style),
    ])
}
