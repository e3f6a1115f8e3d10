//! Rasterisation: replay draw commands into a pixel grid.
//!
//! The grid is the last stop before a backend encodes bytes. Commands
//! arrive pre-clipped against the frame view, but the grid still bounds
//! checks each cell so a stale view can never write out of range.

use crate::draw::{DrawCommand, Pixel, PixelKind, RenderResult};
use crate::geometry::{Coordinate, Size};
use crate::style::ComputedStyle;

/// Replacement glyph for a wide character that lost half of itself.
pub const CUTOFF: &str = "#";

/// A `height x width` grid of cells.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: i32,
    height: i32,
    rows: Vec<Vec<Pixel>>,
}

impl PixelGrid {
    /// Replay a result's commands onto a blank grid, then repair
    /// wide-character damage.
    pub fn rasterise(result: &RenderResult, screen: Size, default_style: ComputedStyle) -> Self {
        let width = screen.width.max(0);
        let height = screen.height.max(0);
        let blank = Pixel::blank(default_style);
        let mut grid = Self {
            width,
            height,
            rows: vec![vec![blank; width as usize]; height as usize],
        };

        for command in &result.commands {
            match command {
                DrawCommand::Pixel { pixel, at } => grid.set(*at, pixel.clone()),
                DrawCommand::Fill { pixel, bounds } => {
                    for y in bounds.y()..bounds.bottom() {
                        for x in bounds.x()..bounds.right() {
                            grid.set(Coordinate::new(x, y), pixel.clone());
                        }
                    }
                }
                DrawCommand::StringLine { pixels, at } => {
                    for (i, pixel) in pixels.iter().enumerate() {
                        grid.set(Coordinate::new(at.x + i as i32, at.y), pixel.clone());
                    }
                }
            }
        }

        grid.repair_wide();
        grid
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Pixel>] {
        &self.rows
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&Pixel> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.rows[y as usize][x as usize])
    }

    fn set(&mut self, at: Coordinate, pixel: Pixel) {
        if at.x < 0 || at.y < 0 || at.x >= self.width || at.y >= self.height {
            return;
        }
        self.rows[at.y as usize][at.x as usize] = pixel;
    }

    /// Wide-character consistency pass.
    ///
    /// Overpainting can orphan half of a head/tail pair. Walking each
    /// row left to right restores the invariant that every head is
    /// followed by its tail and no tail lacks a head; orphans become the
    /// cutoff glyph.
    fn repair_wide(&mut self) {
        for row in &mut self.rows {
            if let Some(first) = row.first_mut() {
                if first.kind == PixelKind::WideTail {
                    cutoff(first);
                }
            }
            for i in 0..row.len().saturating_sub(1) {
                let (kind, next_kind) = (row[i].kind, row[i + 1].kind);
                match (kind, next_kind) {
                    (PixelKind::WideHead, PixelKind::WideTail) => {}
                    (PixelKind::Normal | PixelKind::WideTail, PixelKind::WideTail) => {
                        cutoff(&mut row[i + 1]);
                    }
                    (PixelKind::WideHead, PixelKind::WideHead | PixelKind::Normal) => {
                        cutoff(&mut row[i]);
                    }
                    _ => {}
                }
            }
            if let Some(last) = row.last_mut() {
                if last.kind == PixelKind::WideHead {
                    cutoff(last);
                }
            }
        }
    }
}

fn cutoff(pixel: &mut Pixel) {
    pixel.glyph = CUTOFF.to_string();
    pixel.kind = PixelKind::Normal;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Frame;
    use crate::geometry::Bounds;
    use crate::text::display_width;

    fn frame(width: i32, height: i32) -> Frame {
        Frame::new(
            Size::new(width, height),
            ComputedStyle::default(),
            None,
            display_width,
        )
    }

    fn row_text(grid: &PixelGrid, y: i32) -> String {
        (0..grid.width())
            .filter_map(|x| grid.get(x, y))
            .map(|p| p.glyph.as_str())
            .collect()
    }

    #[test]
    fn test_commands_apply_in_order() {
        let frame = frame(3, 1);
        let mut result = RenderResult::new();
        result.draw_fill(
            &frame,
            Pixel::new(".", ComputedStyle::default()),
            Bounds::from_size(Size::new(3, 1)),
        );
        result.draw_string_line(&frame, "ab", ComputedStyle::default(), Coordinate::ORIGIN);

        let grid = PixelGrid::rasterise(&result, Size::new(3, 1), ComputedStyle::default());
        assert_eq!(row_text(&grid, 0), "ab.");
    }

    #[test]
    fn test_wide_char_survives_intact() {
        let frame = frame(4, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日x", ComputedStyle::default(), Coordinate::ORIGIN);

        let grid = PixelGrid::rasterise(&result, Size::new(4, 1), ComputedStyle::default());
        assert_eq!(grid.get(0, 0).unwrap().kind, PixelKind::WideHead);
        assert_eq!(grid.get(1, 0).unwrap().kind, PixelKind::WideTail);
        assert_eq!(grid.get(2, 0).unwrap().glyph, "x");
    }

    #[test]
    fn test_overpainted_tail_becomes_cutoff() {
        // Paint a wide char, then overwrite its head; the orphan tail
        // must not survive.
        let frame = frame(4, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日", ComputedStyle::default(), Coordinate::ORIGIN);
        result.draw_pixel(
            &frame,
            Pixel::new("A", ComputedStyle::default()),
            Coordinate::ORIGIN,
        );

        let grid = PixelGrid::rasterise(&result, Size::new(4, 1), ComputedStyle::default());
        assert_eq!(row_text(&grid, 0), "A#  ");
        assert_eq!(grid.get(1, 0).unwrap().kind, PixelKind::Normal);
    }

    #[test]
    fn test_overpainted_head_becomes_cutoff() {
        // Overwrite the tail: the head loses its second cell.
        let frame = frame(4, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日", ComputedStyle::default(), Coordinate::ORIGIN);
        result.draw_pixel(
            &frame,
            Pixel::new("A", ComputedStyle::default()),
            Coordinate::new(1, 0),
        );

        let grid = PixelGrid::rasterise(&result, Size::new(4, 1), ComputedStyle::default());
        assert_eq!(row_text(&grid, 0), "#A  ");
    }

    #[test]
    fn test_head_in_last_column_becomes_cutoff() {
        let frame = frame(1, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日", ComputedStyle::default(), Coordinate::ORIGIN);

        let grid = PixelGrid::rasterise(&result, Size::new(1, 1), ComputedStyle::default());
        assert_eq!(row_text(&grid, 0), "#");
    }

    #[test]
    fn test_no_naked_pairs_after_repair() {
        // Shear a row of wide chars with a single overwrite and check the
        // invariant globally.
        let frame = frame(8, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日本語で", ComputedStyle::default(), Coordinate::ORIGIN);
        result.draw_pixel(
            &frame,
            Pixel::new("|", ComputedStyle::default()),
            Coordinate::new(3, 0),
        );

        let grid = PixelGrid::rasterise(&result, Size::new(8, 1), ComputedStyle::default());
        let row = &grid.rows()[0];
        for i in 0..row.len() {
            if row[i].kind == PixelKind::WideHead {
                assert_eq!(row.get(i + 1).map(|p| p.kind), Some(PixelKind::WideTail));
            }
            if row[i].kind == PixelKind::WideTail {
                assert!(i > 0);
                assert_eq!(row[i - 1].kind, PixelKind::WideHead);
            }
        }
    }

    #[test]
    fn test_out_of_range_cells_ignored() {
        let mut result = RenderResult::new();
        // Bypass frame clipping with a hand-built command.
        result.commands.push(DrawCommand::Pixel {
            pixel: Pixel::new("x", ComputedStyle::default()),
            at: Coordinate::new(100, 100),
        });
        let grid = PixelGrid::rasterise(&result, Size::new(2, 2), ComputedStyle::default());
        assert_eq!(row_text(&grid, 0), "  ");
    }
}
