//! Draw commands, the render environment, and the render accumulator.
//!
//! A render walks the layout tree with a [`Frame`] (clip region, screen
//! size, inherited style, measurement) and produces a [`RenderResult`]:
//! an ordered list of [`DrawCommand`]s plus per-frame side data
//! (interactible registrations, hit boxes, state updates). Commands are
//! clipped against `frame.view` at production time, so the rasteriser
//! can stamp them without bounds checks.

use crate::geometry::{Bounds, Coordinate, Size};
use crate::nav::{InteractibleId, StateValue};
use crate::style::ComputedStyle;
use crate::text::{self, MeasureFn};

// =============================================================================
// Pixel
// =============================================================================

/// Cell classification for wide-character bookkeeping.
///
/// A wide character occupies two consecutive cells: the head carries the
/// glyph, the tail is a placeholder the terminal skips over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelKind {
    #[default]
    Normal,
    WideHead,
    WideTail,
}

/// One screen cell: a glyph, its wide-char classification, and a style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub glyph: String,
    pub kind: PixelKind,
    pub style: ComputedStyle,
}

impl Pixel {
    pub fn new(glyph: impl Into<String>, style: ComputedStyle) -> Self {
        Self {
            glyph: glyph.into(),
            kind: PixelKind::Normal,
            style,
        }
    }

    /// The blank cell the grid is initialised with.
    pub fn blank(style: ComputedStyle) -> Self {
        Self::new(" ", style)
    }

    fn wide_head(glyph: impl Into<String>, style: ComputedStyle) -> Self {
        Self {
            glyph: glyph.into(),
            kind: PixelKind::WideHead,
            style,
        }
    }

    fn wide_tail(style: ComputedStyle) -> Self {
        Self {
            glyph: String::new(),
            kind: PixelKind::WideTail,
            style,
        }
    }
}

// =============================================================================
// Commands and side data
// =============================================================================

/// One rasteriser instruction. Produced pre-clipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    /// Set a single cell.
    Pixel { pixel: Pixel, at: Coordinate },
    /// Fill a rectangle with one cell value.
    Fill { pixel: Pixel, bounds: Bounds },
    /// Stamp a pre-built horizontal run starting at `at`.
    StringLine { pixels: Vec<Pixel>, at: Coordinate },
}

/// Metadata stamped by the top-level render entry points; backends need
/// it to re-measure and size their output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedWith {
    pub measure: MeasureFn,
    pub screen: Size,
}

/// A persistent-state write requested by a layout during render. Folded
/// into the next `NavState` by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateUpdate {
    pub id: InteractibleId,
    pub value: StateValue,
}

// =============================================================================
// RenderResult
// =============================================================================

/// Accumulator returned by every render.
///
/// Child results merge into their parent in child order: commands
/// concatenate, list-shaped side data concatenates, `next_interactible`
/// prefers the child (so the innermost hovered area wins), and
/// `created_with` keeps whichever side has it.
#[derive(Debug, Clone, Default)]
pub struct RenderResult {
    pub commands: Vec<DrawCommand>,
    /// Interactible IDs in declaration order; the navigation list.
    pub nav_ids: Vec<InteractibleId>,
    /// Screen-space boxes recorded by interaction areas, for scroll
    /// adjustment and hit testing.
    pub hit_areas: Vec<(InteractibleId, Bounds)>,
    pub state_updates: Vec<StateUpdate>,
    /// Set when the mouse was inside an interaction area this frame.
    pub next_interactible: Option<InteractibleId>,
    pub created_with: Option<CreatedWith>,
}

impl RenderResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a child result into this one.
    pub fn merge(&mut self, child: Self) {
        self.commands.extend(child.commands);
        self.nav_ids.extend(child.nav_ids);
        self.hit_areas.extend(child.hit_areas);
        self.state_updates.extend(child.state_updates);
        if child.next_interactible.is_some() {
            self.next_interactible = child.next_interactible;
        }
        if child.created_with.is_some() {
            self.created_with = child.created_with;
        }
    }

    /// Set one cell, discarding it when outside the frame's view.
    pub fn draw_pixel(&mut self, frame: &Frame, pixel: Pixel, at: Coordinate) {
        if frame.view.contains(at) {
            self.commands.push(DrawCommand::Pixel { pixel, at });
        }
    }

    /// Fill a rectangle, clipped against the frame's view.
    pub fn draw_fill(&mut self, frame: &Frame, pixel: Pixel, bounds: Bounds) {
        let clipped = bounds.intersect(frame.view);
        if !clipped.is_empty() {
            self.commands.push(DrawCommand::Fill {
                pixel,
                bounds: clipped,
            });
        }
    }

    /// Emit one horizontal run of `text`, clipped against the view.
    ///
    /// The left edge is measure-clipped: the display column and the
    /// grapheme cursor advance in lockstep until the run enters the
    /// view. Width-2 graphemes emit a head/tail pair; a head in the
    /// last visible column is emitted without its tail and left for the
    /// rasteriser's consistency pass to repair.
    pub fn draw_string_line(
        &mut self,
        frame: &Frame,
        text: &str,
        style: ComputedStyle,
        at: Coordinate,
    ) {
        if at.y < frame.view.y() || at.y >= frame.view.bottom() {
            return;
        }
        let right = frame.view.right();
        let mut x = at.x;
        let mut pixels: Vec<Pixel> = Vec::new();
        let mut start_x: Option<i32> = None;

        for grapheme in text::graphemes(text) {
            let width = (frame.measure)(grapheme) as i32;
            if width == 0 {
                continue;
            }
            if x < frame.view.x() {
                // Wholly or partially left of the view: skip, keeping
                // the column and the grapheme cursor in lockstep.
                x += width;
                continue;
            }
            if x >= right {
                break;
            }
            if start_x.is_none() {
                start_x = Some(x);
            }
            if width == 1 {
                pixels.push(Pixel::new(grapheme, style));
            } else {
                pixels.push(Pixel::wide_head(grapheme, style));
                if x + 1 < right {
                    pixels.push(Pixel::wide_tail(style));
                }
            }
            x += width;
        }

        if let Some(start_x) = start_x {
            self.commands.push(DrawCommand::StringLine {
                pixels,
                at: Coordinate::new(start_x, at.y),
            });
        }
    }
}

// =============================================================================
// Frame
// =============================================================================

/// The environment threaded through a render pass.
///
/// `Copy` on purpose: wrappers derive child frames by value and the
/// parent's frame is untouched. `saved_style` is the style a chrome-only
/// wrapper restores for its child; see `styled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Clip region in screen space.
    pub view: Bounds,
    pub screen: Size,
    pub default_style: ComputedStyle,
    /// The default style before the innermost chrome rule was applied.
    pub saved_style: ComputedStyle,
    pub mouse: Option<Coordinate>,
    pub measure: MeasureFn,
}

impl Frame {
    /// A frame covering the whole screen.
    pub fn new(
        screen: Size,
        default_style: ComputedStyle,
        mouse: Option<Coordinate>,
        measure: MeasureFn,
    ) -> Self {
        Self {
            view: Bounds::from_size(screen),
            screen,
            default_style,
            saved_style: default_style,
            mouse,
            measure,
        }
    }

    /// Narrow the clip region to `view ∩ bounds`.
    pub fn clipped_to(mut self, bounds: Bounds) -> Self {
        self.view = self.view.intersect(bounds);
        self
    }

    /// Apply a style rule to the inherited default.
    pub fn with_rule(mut self, rule: crate::style::StyleRule) -> Self {
        self.default_style = self.default_style.apply(rule);
        self
    }

    /// Remember the current default before chrome styling changes it.
    pub fn saving_style(mut self) -> Self {
        self.saved_style = self.default_style;
        self
    }

    /// Put the remembered pre-chrome style back in force.
    pub fn restoring_style(mut self) -> Self {
        self.default_style = self.saved_style;
        self
    }

    /// Hash of everything (besides the box) that can change a render.
    pub fn cache_hash(&self) -> u64 {
        use std::hash::{Hash, Hasher};
        let mut hasher = rustc_hash::FxHasher::default();
        self.view.hash(&mut hasher);
        self.screen.hash(&mut hasher);
        self.default_style.hash(&mut hasher);
        self.saved_style.hash(&mut hasher);
        self.mouse.hash(&mut hasher);
        (self.measure as usize).hash(&mut hasher);
        hasher.finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::display_width;

    fn frame(width: i32, height: i32) -> Frame {
        Frame::new(
            Size::new(width, height),
            ComputedStyle::default(),
            None,
            display_width,
        )
    }

    fn style() -> ComputedStyle {
        ComputedStyle::default()
    }

    #[test]
    fn test_draw_pixel_discards_outside_view() {
        let frame = frame(3, 3);
        let mut result = RenderResult::new();
        result.draw_pixel(&frame, Pixel::new("a", style()), Coordinate::new(1, 1));
        result.draw_pixel(&frame, Pixel::new("b", style()), Coordinate::new(3, 1));
        result.draw_pixel(&frame, Pixel::new("c", style()), Coordinate::new(1, -1));
        assert_eq!(result.commands.len(), 1);
    }

    #[test]
    fn test_draw_fill_clips_to_view() {
        let frame = frame(4, 4);
        let mut result = RenderResult::new();
        result.draw_fill(
            &frame,
            Pixel::new("x", style()),
            Bounds::new(10, 10, Coordinate::new(2, 2)),
        );
        match &result.commands[0] {
            DrawCommand::Fill { bounds, .. } => {
                assert_eq!(*bounds, Bounds::new(2, 2, Coordinate::new(2, 2)));
            }
            other => panic!("expected fill, got {other:?}"),
        }

        // Entirely outside: nothing enqueued.
        let mut result = RenderResult::new();
        result.draw_fill(
            &frame,
            Pixel::new("x", style()),
            Bounds::new(2, 2, Coordinate::new(8, 8)),
        );
        assert!(result.commands.is_empty());
    }

    #[test]
    fn test_string_line_rejects_outside_band() {
        let frame = frame(10, 2);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "hi", style(), Coordinate::new(0, 2));
        result.draw_string_line(&frame, "hi", style(), Coordinate::new(0, -1));
        assert!(result.commands.is_empty());
    }

    #[test]
    fn test_string_line_left_clip_advances_in_lockstep() {
        // View starts at x=2; "abcdef" drawn at x=0 loses "ab", keeps
        // "cdef" starting at column 2.
        let frame = frame(10, 1).clipped_to(Bounds::new(8, 1, Coordinate::new(2, 0)));
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "abcdef", style(), Coordinate::new(0, 0));
        match &result.commands[0] {
            DrawCommand::StringLine { pixels, at } => {
                assert_eq!(*at, Coordinate::new(2, 0));
                let run: String = pixels.iter().map(|p| p.glyph.as_str()).collect();
                assert_eq!(run, "cdef");
            }
            other => panic!("expected string line, got {other:?}"),
        }
    }

    #[test]
    fn test_string_line_right_clip() {
        let frame = frame(3, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "abcdef", style(), Coordinate::new(0, 0));
        match &result.commands[0] {
            DrawCommand::StringLine { pixels, .. } => {
                let run: String = pixels.iter().map(|p| p.glyph.as_str()).collect();
                assert_eq!(run, "abc");
            }
            other => panic!("expected string line, got {other:?}"),
        }
    }

    #[test]
    fn test_wide_glyph_emits_head_and_tail() {
        let frame = frame(4, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日x", style(), Coordinate::new(0, 0));
        match &result.commands[0] {
            DrawCommand::StringLine { pixels, .. } => {
                assert_eq!(pixels.len(), 3);
                assert_eq!(pixels[0].kind, PixelKind::WideHead);
                assert_eq!(pixels[0].glyph, "日");
                assert_eq!(pixels[1].kind, PixelKind::WideTail);
                assert_eq!(pixels[2].kind, PixelKind::Normal);
                assert_eq!(pixels[2].glyph, "x");
            }
            other => panic!("expected string line, got {other:?}"),
        }
    }

    #[test]
    fn test_wide_glyph_at_right_edge_drops_tail() {
        // One-cell view: the head goes in naked; the rasteriser repairs
        // it to the cutoff char.
        let frame = frame(1, 1);
        let mut result = RenderResult::new();
        result.draw_string_line(&frame, "日", style(), Coordinate::new(0, 0));
        match &result.commands[0] {
            DrawCommand::StringLine { pixels, .. } => {
                assert_eq!(pixels.len(), 1);
                assert_eq!(pixels[0].kind, PixelKind::WideHead);
            }
            other => panic!("expected string line, got {other:?}"),
        }
    }

    #[test]
    fn test_merge_prefers_child_next_interactible() {
        use crate::nav::{Axis, IdPart};
        let outer = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let inner = outer.child(Axis::Vert, 1);

        let mut parent = RenderResult::new();
        parent.next_interactible = Some(outer);
        let mut child = RenderResult::new();
        child.next_interactible = Some(inner.clone());

        parent.merge(child);
        assert_eq!(parent.next_interactible, Some(inner));
    }

    #[test]
    fn test_merge_concatenates_in_child_order() {
        let frame = frame(10, 1);
        let mut first = RenderResult::new();
        first.draw_pixel(&frame, Pixel::new("a", style()), Coordinate::ORIGIN);
        let mut second = RenderResult::new();
        second.draw_pixel(&frame, Pixel::new("b", style()), Coordinate::ORIGIN);

        let mut parent = RenderResult::new();
        parent.merge(first);
        parent.merge(second);
        assert_eq!(parent.commands.len(), 2);
        match (&parent.commands[0], &parent.commands[1]) {
            (DrawCommand::Pixel { pixel: pa, .. }, DrawCommand::Pixel { pixel: pb, .. }) => {
                assert_eq!(pa.glyph, "a");
                assert_eq!(pb.glyph, "b");
            }
            other => panic!("expected two pixels, got {other:?}"),
        }
    }

    #[test]
    fn test_frame_style_save_restore() {
        use crate::style::{Color, StyleRule};
        let base = frame(1, 1);
        let chrome = base.saving_style().with_rule(StyleRule::fg(Color::RED));
        assert_eq!(chrome.default_style.fg, Color::RED);
        let restored = chrome.restoring_style();
        assert_eq!(restored.default_style, base.default_style);
    }
}
