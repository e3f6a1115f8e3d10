//! Rich and adaptive text nodes: styled spans, wrapped or as-is.

use crate::draw::{Frame, RenderResult};
use crate::geometry::{Bounds, Coordinate, Size};
use crate::text::wrap::{wrap_line, Justify};
use crate::text::{line_width, span_to_lines, Group, MeasureFn, Span, SpanNode};

pub(crate) fn rich_min_size(span: &Span, measure: MeasureFn) -> Size {
    let lines = span_to_lines(span, measure);
    let width = lines.iter().map(|l| line_width(l)).max().unwrap_or(0);
    Size::new(width as i32, lines.len() as i32)
}

pub(crate) fn render_rich(span: &Span, frame: &Frame, bounds: Bounds) -> RenderResult {
    let mut result = RenderResult::new();
    for (y, line) in span_to_lines(span, frame.measure).iter().enumerate() {
        draw_line(
            &mut result,
            frame,
            line,
            Coordinate::new(bounds.x(), bounds.y() + y as i32),
        );
    }
    result
}

// =============================================================================
// Adaptive (wrapped) text
// =============================================================================

fn is_styled(span: &Span) -> bool {
    !span.rule.is_empty() || span.children.iter().any(|c| matches!(c, SpanNode::Nested(_)))
}

pub(crate) fn adaptive_min_size(
    span: &Span,
    soft_hyphen: &str,
    measure: MeasureFn,
    available: Size,
) -> Size {
    // Same short-circuits as render: reported rows must actually paint.
    if available.width <= 1 || (available.width <= 4 && is_styled(span)) {
        return Size::ZERO;
    }
    let budget = available.width as usize;
    let mut width = 0usize;
    let mut height = 0i32;
    for line in span_to_lines(span, measure) {
        for wrapped in wrap_line(&line, budget, soft_hyphen, measure) {
            width = width.max(line_width(&wrapped));
            height += 1;
        }
    }
    Size::new(width as i32, height)
}

pub(crate) fn render_adaptive(
    span: &Span,
    justify: Justify,
    soft_hyphen: &str,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let mut result = RenderResult::new();
    if bounds.width <= 1 || (bounds.width <= 4 && is_styled(span)) {
        // Too narrow: wrapping would degenerate into hyphen confetti.
        return result;
    }
    let budget = bounds.width as usize;
    let mut y = bounds.y();
    for line in span_to_lines(span, frame.measure) {
        for wrapped in wrap_line(&line, budget, soft_hyphen, frame.measure) {
            let offset = justify.offset(bounds.width, line_width(&wrapped) as i32);
            draw_line(
                &mut result,
                frame,
                &wrapped,
                Coordinate::new(bounds.x() + offset, y),
            );
            y += 1;
        }
    }
    result
}

/// Write one line of groups, batching consecutive segments that fold to
/// the same style into a single run.
fn draw_line(result: &mut RenderResult, frame: &Frame, line: &[Group], at: Coordinate) {
    let mut x = at.x;
    let mut run = String::new();
    let mut run_width = 0i32;
    let mut run_style = frame.default_style;

    for segment in line.iter().flat_map(|g| g.segments.iter()) {
        let style = frame.default_style.apply(segment.rule);
        if style != run_style && !run.is_empty() {
            result.draw_string_line(frame, &run, run_style, Coordinate::new(x, at.y));
            x += run_width;
            run.clear();
            run_width = 0;
        }
        run_style = style;
        run.push_str(&segment.text);
        run_width += segment.width as i32;
    }
    if !run.is_empty() {
        result.draw_string_line(frame, &run, run_style, Coordinate::new(x, at.y));
    }
}

// =============================================================================
// Tests
// =============================================================================
