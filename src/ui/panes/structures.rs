//! Structure view pane: heap structures on a 2D canvas
//!
//! Adapts the abstract [`Surface`] drawing seam onto a ratatui braille
//! canvas. Layout coordinates are y-down; the canvas is y-up, so all
//! y values flip here and nowhere else.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line as TextLine, Span},
    widgets::canvas::{Canvas, Circle, Context, Line, Rectangle},
    Frame,
};

use super::pane_block;
use crate::render::anim::EntranceAnimator;
use crate::render::{draw, Surface};
use crate::structure::layout::{StructureLayout, VIEW_HEIGHT, VIEW_WIDTH};
use crate::ui::theme::DEFAULT_THEME;

/// Render the structures pane.
pub fn render_structures_pane(
    frame: &mut Frame,
    area: Rect,
    layouts: &[StructureLayout],
    animator: &EntranceAnimator,
    is_focused: bool,
) {
    let block = pane_block(" Structures ", is_focused);

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, VIEW_WIDTH])
        .y_bounds([0.0, VIEW_HEIGHT])
        .paint(|ctx| {
            let mut surface = CanvasSurface { ctx };
            draw(&mut surface, layouts, animator, &DEFAULT_THEME);
        });

    frame.render_widget(canvas, area);
}

/// [`Surface`] implementation over a canvas painting context.
struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
}

impl CanvasSurface<'_, '_> {
    fn flip(y: f64) -> f64 {
        VIEW_HEIGHT - y
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn clear(&mut self) {
        // The canvas starts each frame blank; nothing to erase.
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        self.ctx.draw(&Rectangle {
            x,
            y: Self::flip(y + height),
            width,
            height,
            color,
        });
    }

    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Color) {
        self.ctx.draw(&Circle {
            x,
            y: Self::flip(y),
            radius,
            color,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color) {
        self.ctx.draw(&Line {
            x1,
            y1: Self::flip(y1),
            x2,
            y2: Self::flip(y2),
            color,
        });
    }

    fn text(&mut self, x: f64, y: f64, content: &str, color: Color) {
        self.ctx.print(
            x,
            Self::flip(y),
            TextLine::from(Span::styled(
                content.to_owned(),
                Style::default().fg(color),
            )),
        );
    }
}
