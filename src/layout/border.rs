//! Box-drawing borders.

use crate::draw::{Frame, Pixel, RenderResult};
use crate::geometry::{Bounds, Coordinate};

use super::{static_box, Layout};

/// The Unicode box-drawing sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    Single,
    Thick,
    Double,
    #[default]
    Rounded,
}

impl BorderStyle {
    /// Glyphs as (horizontal, vertical, top-left, top-right,
    /// bottom-right, bottom-left).
    pub const fn chars(self) -> (&'static str, &'static str, &'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Single => ("─", "│", "┌", "┐", "┘", "└"),
            Self::Thick => ("━", "┃", "┏", "┓", "┛", "┗"),
            Self::Double => ("═", "║", "╔", "╗", "╝", "╚"),
            Self::Rounded => ("─", "│", "╭", "╮", "╯", "╰"),
        }
    }
}

/// Overlay `title` on the top border line, one column in from the left.
pub fn border_with_title(child: Layout, title: Layout, style: BorderStyle) -> Layout {
    static_box([
        child.custom_border(style),
        title.custom_padding(0, 0, 1, 1).shrink_y().offset(1, 0),
    ])
}

impl Layout {
    pub fn border_with_title(self, title: Layout, style: BorderStyle) -> Layout {
        border_with_title(self, title, style)
    }
}

pub(crate) fn render_border(
    child: &Layout,
    style: BorderStyle,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let mut result = RenderResult::new();
    if bounds.is_empty() {
        return result;
    }
    let (horizontal, vertical, top_left, top_right, bottom_right, bottom_left) = style.chars();

    let run = (bounds.width - 2).max(0) as usize;
    let top = format!("{top_left}{}{top_right}", horizontal.repeat(run));
    result.draw_string_line(frame, &top, frame.default_style, bounds.position);
    if bounds.height > 1 {
        let bottom = format!("{bottom_left}{}{bottom_right}", horizontal.repeat(run));
        result.draw_string_line(
            frame,
            &bottom,
            frame.default_style,
            Coordinate::new(bounds.x(), bounds.bottom() - 1),
        );
    }
    for y in bounds.y() + 1..bounds.bottom() - 1 {
        result.draw_pixel(
            frame,
            Pixel::new(vertical, frame.default_style),
            Coordinate::new(bounds.x(), y),
        );
        if bounds.width > 1 {
            result.draw_pixel(
                frame,
                Pixel::new(vertical, frame.default_style),
                Coordinate::new(bounds.right() - 1, y),
            );
        }
    }

    result.merge(child.render(frame, bounds.resize_sides(-1, -1, -1, -1)));
    result
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::layout::text;
    use crate::raster::PixelGrid;
    use crate::style::ComputedStyle;
    use crate::text::display_width;

    fn render_to_text(layout: &Layout, width: i32, height: i32) -> Vec<String> {
        let frame = Frame::new(
            Size::new(width, height),
            ComputedStyle::default(),
            None,
            display_width,
        );
        let result = layout.render(&frame, Bounds::from_size(Size::new(width, height)));
        let grid = PixelGrid::rasterise(&result, Size::new(width, height), ComputedStyle::default());
        grid.rows()
            .iter()
            .map(|row| row.iter().map(|p| p.glyph.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_rounded_border_around_centered_text() {
        let layout = text("hi").center().border();
        let rows = render_to_text(&layout, 6, 3);
        assert_eq!(rows, vec!["╭────╮", "│ hi │", "╰────╯"]);
    }

    #[test]
    fn test_single_border_glyphs() {
        let layout = text("x").custom_border(BorderStyle::Single);
        let rows = render_to_text(&layout, 3, 3);
        assert_eq!(rows, vec!["┌─┐", "│x│", "└─┘"]);
    }

    #[test]
    fn test_double_border_glyphs() {
        let layout = crate::layout::nothing().custom_border(BorderStyle::Double);
        let rows = render_to_text(&layout, 3, 3);
        assert_eq!(rows, vec!["╔═╗", "║ ║", "╚═╝"]);
    }

    #[test]
    fn test_border_with_title_overlays_top_line() {
        let layout = text("body")
            .center()
            .border_with_title(text("t"), BorderStyle::Single);
        // The title paints over the top bar one column in; the padding
        // positions it without blanking the bar around it.
        let rows = render_to_text(&layout, 7, 3);
        assert_eq!(rows[0], "┌─t───┐");
        assert_eq!(rows[1], "│body │");
    }

    #[test]
    fn test_degenerate_boxes_do_not_panic() {
        let layout = text("x").border();
        let rows = render_to_text(&layout, 1, 1);
        assert_eq!(rows, vec!["╭"]);
        render_to_text(&layout, 0, 0);
    }
}
