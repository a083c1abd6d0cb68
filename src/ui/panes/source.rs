//! Source pane rendering with Python-aware highlighting
//!
//! Displays the traced program's source (when the tracer supplied
//! `code_lines`) with line numbers and a highlighted current line. The
//! highlighted row tracks a target visual row so the current line stays
//! put while stepping; ↑/↓ nudge that row when the pane is focused.
//!
//! A current line beyond the known source is a legal no-op for the
//! highlighter: nothing is highlighted and the raw line number still shows
//! in the status bar.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::pane_block;
use crate::ui::theme::DEFAULT_THEME;

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise",
    "return", "try", "while", "with", "yield",
];

/// Render the source pane.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    code_lines: &[String],
    current_line: Option<u32>,
    is_focused: bool,
    target_row: &mut Option<usize>,
) {
    let block = pane_block(" Source ", is_focused);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if code_lines.is_empty() {
        let placeholder = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  (source unavailable — the trace was loaded without code lines)",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
        ])
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // Keep the current line at a stable visual row; center on first render.
    let row = target_row.get_or_insert(visible_height / 2);
    let row = (*row).min(visible_height.saturating_sub(1));
    let current = current_line.map(|l| l as usize);
    let offset = current.map_or(0, |line| line.saturating_sub(row + 1));

    let number_width = code_lines.len().to_string().len().max(3);
    let lines: Vec<Line> = code_lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible_height)
        .map(|(i, text)| {
            let line_number = i + 1;
            let is_current = current == Some(line_number);
            let marker = if is_current { "→" } else { " " };
            let mut spans = vec![
                Span::styled(
                    format!("{} {:>width$} ", marker, line_number, width = number_width),
                    if is_current {
                        Style::default()
                            .fg(DEFAULT_THEME.secondary)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(DEFAULT_THEME.comment)
                    },
                ),
            ];
            spans.extend(highlight_line(text).spans);
            let mut line = Line::from(spans);
            if is_current {
                line.style = Style::default().bg(DEFAULT_THEME.current_line_bg);
            }
            line
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Simple syntax highlighting for Python source
fn highlight_line(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Handle comments
        if c == '#' {
            if !current_word.is_empty() {
                spans.push(word_span(&current_word, false));
                current_word.clear();
            }
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        // Handle strings (both quoting conventions)
        if c == '"' || c == '\'' {
            if !current_word.is_empty() {
                spans.push(word_span(&current_word, false));
                current_word.clear();
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                if chars[end] == '\\' {
                    end += 2;
                } else {
                    end += 1;
                }
            }
            if end < chars.len() {
                end += 1;
            }
            spans.push(Span::styled(
                chars[i..end.min(chars.len())].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Delimiters end the current word
        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let is_call = c == '(';
                spans.push(word_span(&current_word, is_call));
                current_word.clear();
            }
            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => {
                    Style::default().fg(DEFAULT_THEME.primary)
                }
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        spans.push(word_span(&current_word, false));
    }

    Line::from(spans)
}

fn word_span(word: &str, is_call: bool) -> Span<'static> {
    let style = if PYTHON_KEYWORDS.contains(&word) {
        Style::default().fg(DEFAULT_THEME.keyword)
    } else if word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        Style::default().fg(DEFAULT_THEME.number)
    } else if is_call {
        Style::default().fg(DEFAULT_THEME.function)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };
    Span::styled(word.to_owned(), style)
}
