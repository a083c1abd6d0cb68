//! Stateless draw routines for the structure view
//!
//! [`draw`] paints a set of laid-out structures onto any [`Surface`],
//! blending every element's color toward the background by its entrance
//! opacity. The routines hold no state of their own; animation state lives
//! in [`anim::EntranceAnimator`] and geometry in the layout engine.

pub mod anim;
pub mod surface;

pub use surface::Surface;

use ratatui::style::Color;

use crate::structure::layout::{
    BracketFrame, Shape, StructureLayout, VIEW_HEIGHT, VIEW_WIDTH, CHAR_WIDTH,
};
use crate::structure::StructureKind;
use crate::ui::theme::Theme;
use anim::EntranceAnimator;

/// Message drawn when there is nothing to visualize.
pub const EMPTY_STATE_MESSAGE: &str = "No data structures to visualize";

/// Clear the surface and draw every structure, or the empty-state message
/// when `layouts` is empty.
pub fn draw(
    surface: &mut dyn Surface,
    layouts: &[StructureLayout],
    animator: &EntranceAnimator,
    theme: &Theme,
) {
    surface.clear();

    if layouts.is_empty() {
        let x = VIEW_WIDTH / 2.0 - EMPTY_STATE_MESSAGE.len() as f64 * CHAR_WIDTH / 2.0;
        surface.text(x, VIEW_HEIGHT / 2.0, EMPTY_STATE_MESSAGE, theme.comment);
        return;
    }

    for (index, layout) in layouts.iter().enumerate() {
        draw_structure(surface, layout, index, animator, theme);
    }
}

fn draw_structure(
    surface: &mut dyn Surface,
    layout: &StructureLayout,
    index: usize,
    animator: &EntranceAnimator,
    theme: &Theme,
) {
    let (lx, ly) = layout.label_at;
    surface.text(lx, ly, &format!("{}:", layout.name), theme.fg);

    if let Some(frame) = layout.brackets {
        draw_brackets(surface, frame, theme.accent);
    }

    let outline = match layout.kind {
        StructureKind::Sequence | StructureKind::Mapping => theme.primary,
        StructureKind::Set => theme.secondary,
        StructureKind::Generic => theme.fg,
    };

    for element in &layout.elements {
        let alpha = animator.opacity((index, element.ordinal));
        let stroke = surface::blend(outline, theme.bg, alpha);
        let ink = surface::blend(theme.fg, theme.bg, alpha);

        match element.shape {
            Shape::Rect { x, y, width, height } => {
                surface.rect(x, y, width, height, stroke);
            }
            Shape::Circle { x, y, radius } => {
                surface.circle(x, y, radius, stroke);
            }
            Shape::Label { .. } => {}
        }

        let (cx, cy) = element.shape.center();
        let tx = cx - element.label.len() as f64 * CHAR_WIDTH / 2.0;
        surface.text(tx, cy, &element.label, ink);

        if let Some(sublabel) = &element.sublabel {
            if let Shape::Rect { x, y, width, height } = element.shape {
                let sx = x + width / 2.0 - sublabel.len() as f64 * CHAR_WIDTH / 2.0;
                let index_ink = surface::blend(theme.comment, theme.bg, alpha);
                surface.text(sx, y + height + 12.0, sublabel, index_ink);
            }
        }
    }
}

/// Square-bracket strokes on both ends of a sequence row.
fn draw_brackets(surface: &mut dyn Surface, frame: BracketFrame, color: Color) {
    let BracketFrame { x, y, width, height } = frame;
    let lip = 5.0;

    surface.line(x + lip, y, x, y, color);
    surface.line(x, y, x, y + height, color);
    surface.line(x, y + height, x + lip, y + height, color);

    let right = x + width;
    surface.line(right - lip, y, right, y, color);
    surface.line(right, y, right, y + height, color);
    surface.line(right, y + height, right - lip, y + height, color);
}
