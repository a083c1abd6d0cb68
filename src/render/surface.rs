//! The 2D drawing seam
//!
//! Draw routines target this trait rather than ratatui directly, so the
//! structure view can be rendered onto a TUI canvas in production and onto
//! a recording stub in tests.

use ratatui::style::Color;

/// An abstract 2D drawing surface in layout coordinates (origin top-left,
/// y growing downward).
pub trait Surface {
    /// Reset the surface to its background. Called once per render.
    fn clear(&mut self);
    /// Stroke a rectangle outline.
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color);
    /// Stroke a circle outline.
    fn circle(&mut self, x: f64, y: f64, radius: f64, color: Color);
    /// Stroke a line segment.
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Color);
    /// Draw text anchored at a point.
    fn text(&mut self, x: f64, y: f64, content: &str, color: Color);
}

/// Blend `color` toward `background` by `alpha` (0.0 = background,
/// 1.0 = full color). Terminal cells have no real alpha channel, so
/// entrance opacity is approximated by channel interpolation; non-RGB
/// colors snap at the midpoint.
pub fn blend(color: Color, background: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |from: u8, to: u8| -> u8 {
                (f32::from(from) + (f32::from(to) - f32::from(from)) * alpha).round() as u8
            };
            Color::Rgb(mix(br, r), mix(bg, g), mix(bb, b))
        }
        _ if alpha >= 0.5 => color,
        _ => background,
    }
}
