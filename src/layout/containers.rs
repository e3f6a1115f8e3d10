//! Stacking and flex containers.

use crate::draw::{Frame, RenderResult};
use crate::geometry::{Bounds, Coordinate, Size, UNBOUNDED};
use crate::text::MeasureFn;

use super::{FlexChild, Layout};

/// The axis a flex container distributes along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlexAxis {
    Vert,
    Horiz,
}

// =============================================================================
// Even divide
// =============================================================================

/// Split `n` into `k` near-equal integer bins.
///
/// Bins sum to exactly `n` and no two differ by more than one. Works for
/// negative `n` (deficit distribution) via euclidean division.
pub fn even_divide(n: i32, k: usize) -> Vec<i32> {
    if k == 0 {
        return Vec::new();
    }
    let k_i = k as i32;
    let base = n.div_euclid(k_i);
    let rem = n.rem_euclid(k_i);
    (0..k_i).map(|i| base + i32::from(i < rem)).collect()
}

/// Share `amount` across children proportionally to integer weights.
///
/// Each weight unit is one bin of [`even_divide`]; a child's share is the
/// sum of its consecutive units.
fn distribute(amount: i32, weights: &[u32]) -> Vec<i32> {
    let total: u32 = weights.iter().sum();
    if total == 0 {
        return vec![0; weights.len()];
    }
    let units = even_divide(amount, total as usize);
    let mut shares = Vec::with_capacity(weights.len());
    let mut offset = 0usize;
    for &weight in weights {
        let take = weight as usize;
        shares.push(units[offset..offset + take].iter().sum());
        offset += take;
    }
    shares
}

// =============================================================================
// vbox / hbox
// =============================================================================

pub(crate) fn vbox_min_size(children: &[Layout], measure: MeasureFn, available: Size) -> Size {
    let hint = Size::new(available.width, UNBOUNDED);
    let mut size = Size::ZERO;
    for child in children {
        let child_size = child.min_size(measure, hint);
        size.width = size.width.max(child_size.width);
        size.height += child_size.height;
    }
    size
}

pub(crate) fn hbox_min_size(children: &[Layout], measure: MeasureFn, available: Size) -> Size {
    let hint = Size::new(UNBOUNDED, available.height);
    let mut size = Size::ZERO;
    for child in children {
        let child_size = child.min_size(measure, hint);
        size.width += child_size.width;
        size.height = size.height.max(child_size.height);
    }
    size
}

pub(crate) fn render_vbox(
    children: &[Layout],
    at_y: i32,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let hint = Size::new(bounds.width, UNBOUNDED);
    let mut result = RenderResult::new();
    let mut y = bounds.y() + at_y;
    for child in children {
        let size = child.min_size(frame.measure, hint);
        let child_bounds = Bounds::new(bounds.width, size.height, Coordinate::new(bounds.x(), y));
        result.merge(child.render(frame, child_bounds));
        y += size.height;
    }
    result
}

pub(crate) fn render_hbox(
    children: &[Layout],
    at_x: i32,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let hint = Size::new(UNBOUNDED, bounds.height);
    let mut result = RenderResult::new();
    let mut x = bounds.x() + at_x;
    for child in children {
        let size = child.min_size(frame.measure, hint);
        let child_bounds = Bounds::new(size.width, bounds.height, Coordinate::new(x, bounds.y()));
        result.merge(child.render(frame, child_bounds));
        x += size.width;
    }
    result
}

// =============================================================================
// Flex
// =============================================================================

fn flex_hint(axis: FlexAxis, bounds_cross: i32) -> Size {
    match axis {
        FlexAxis::Vert => Size::new(bounds_cross, UNBOUNDED),
        FlexAxis::Horiz => Size::new(UNBOUNDED, bounds_cross),
    }
}

fn axis_len(axis: FlexAxis, size: Size) -> i32 {
    match axis {
        FlexAxis::Vert => size.height,
        FlexAxis::Horiz => size.width,
    }
}

/// Final per-child sizes along the flex axis.
///
/// Basis children reserve their min-size; the surplus (or deficit) is
/// shared by `grow` (or `shrink`) weights.
fn flex_sizes(children: &[FlexChild], minimums: &[Size], axis: FlexAxis, box_axis: i32) -> Vec<i32> {
    let reserved: i32 = children
        .iter()
        .zip(minimums)
        .filter(|(c, _)| c.basis)
        .map(|(_, m)| axis_len(axis, *m))
        .sum();
    let avail = box_axis - reserved;
    let weights: Vec<u32> = if avail >= 0 {
        children.iter().map(|c| c.grow).collect()
    } else {
        children.iter().map(|c| c.shrink).collect()
    };
    let shares = distribute(avail, &weights);
    children
        .iter()
        .zip(minimums)
        .zip(shares)
        .map(|((child, min), share)| {
            let base = if child.basis { axis_len(axis, *min) } else { 0 };
            (base + share).max(0)
        })
        .collect()
}

pub(crate) fn flex_min_size(
    children: &[FlexChild],
    measure: MeasureFn,
    available: Size,
    axis: FlexAxis,
) -> Size {
    let cross_avail = match axis {
        FlexAxis::Vert => available.width,
        FlexAxis::Horiz => available.height,
    };
    let hint = flex_hint(axis, cross_avail);
    let mut main = 0i32;
    let mut cross = 0i32;
    for child in children {
        let size = child.layout.min_size(measure, hint);
        if child.basis {
            main += axis_len(axis, size);
        }
        cross = cross.max(match axis {
            FlexAxis::Vert => size.width,
            FlexAxis::Horiz => size.height,
        });
    }
    match axis {
        FlexAxis::Vert => Size::new(cross, main),
        FlexAxis::Horiz => Size::new(main, cross),
    }
}

pub(crate) fn render_flex(
    children: &[FlexChild],
    frame: &Frame,
    bounds: Bounds,
    axis: FlexAxis,
) -> RenderResult {
    let (box_axis, cross) = match axis {
        FlexAxis::Vert => (bounds.height, bounds.width),
        FlexAxis::Horiz => (bounds.width, bounds.height),
    };
    let hint = flex_hint(axis, cross);
    let minimums: Vec<Size> = children
        .iter()
        .map(|c| c.layout.min_size(frame.measure, hint))
        .collect();
    let sizes = flex_sizes(children, &minimums, axis, box_axis);

    let mut result = RenderResult::new();
    let mut cursor = match axis {
        FlexAxis::Vert => bounds.y(),
        FlexAxis::Horiz => bounds.x(),
    };
    for (child, size) in children.iter().zip(sizes) {
        let child_bounds = match axis {
            FlexAxis::Vert => Bounds::new(cross, size, Coordinate::new(bounds.x(), cursor)),
            FlexAxis::Horiz => Bounds::new(size, cross, Coordinate::new(cursor, bounds.y())),
        };
        result.merge(child.layout.render(frame, child_bounds));
        cursor += size;
    }
    result
}

// =============================================================================
// Flex wrap
// =============================================================================

/// Greedy grouping: basis children accumulate width until the next one
/// would overflow, which starts a new line. Non-basis children attach to
/// the line in progress.
fn wrap_lines<'a>(
    children: &'a [FlexChild],
    measure: MeasureFn,
    width: i32,
) -> Vec<Vec<&'a FlexChild>> {
    let hint = Size::new(UNBOUNDED, UNBOUNDED);
    let mut lines: Vec<Vec<&FlexChild>> = Vec::new();
    let mut current: Vec<&FlexChild> = Vec::new();
    let mut used = 0i32;
    for child in children {
        if child.basis {
            let child_width = child.layout.min_size(measure, hint).width;
            if !current.is_empty() && used + child_width > width {
                lines.push(std::mem::take(&mut current));
                used = 0;
            }
            used += child_width;
        }
        current.push(child);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn line_height(line: &[&FlexChild], measure: MeasureFn) -> i32 {
    line.iter()
        .map(|c| c.layout.min_size(measure, Size::new(UNBOUNDED, UNBOUNDED)).height)
        .max()
        .unwrap_or(0)
}

pub(crate) fn flex_wrap_min_size(
    children: &[FlexChild],
    measure: MeasureFn,
    available: Size,
) -> Size {
    let lines = wrap_lines(children, measure, available.width);
    let mut size = Size::ZERO;
    for line in &lines {
        let owned: Vec<FlexChild> = line.iter().map(|c| (*c).clone()).collect();
        let line_size = flex_min_size(&owned, measure, available, FlexAxis::Horiz);
        size.width = size.width.max(line_size.width);
        size.height += line_height(line, measure);
    }
    size
}

pub(crate) fn render_flex_wrap(children: &[FlexChild], frame: &Frame, bounds: Bounds) -> RenderResult {
    let lines = wrap_lines(children, frame.measure, bounds.width);
    let mut result = RenderResult::new();
    let mut y = bounds.y();
    for line in lines {
        let height = line_height(&line, frame.measure);
        let owned: Vec<FlexChild> = line.into_iter().cloned().collect();
        let line_bounds = Bounds::new(bounds.width, height, Coordinate::new(bounds.x(), y));
        result.merge(render_flex(&owned, frame, line_bounds, FlexAxis::Horiz));
        y += height;
    }
    result
}

// =============================================================================
// Tests
// =============================================================================
