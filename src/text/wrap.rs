//! Line wrapping with soft-hyphen breaks and justification.

use std::collections::VecDeque;

use super::{Group, MeasureFn, Segment};

/// Horizontal placement of each wrapped line inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    /// Starting column for a line of `line_width` in a box of `box_width`.
    pub fn offset(self, box_width: i32, line_width: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Right => box_width - line_width,
            Self::Center => (box_width - line_width) / 2,
        }
    }
}

// =============================================================================
// Wrapping
// =============================================================================

/// [`wrap_line`] with the plain `-` break glyph.
pub fn wrap_line_default(line: &[Group], width: usize, measure: MeasureFn) -> Vec<Vec<Group>> {
    wrap_line(line, width, "-", measure)
}

/// Wrap one source line of groups into lines fitting `width`.
///
/// - Leading space groups on a new line are dropped.
/// - A group fitting the current line is appended.
/// - A word group wider than the whole line is split at grapheme
///   boundaries with a synthetic `soft_hyphen` segment appended.
/// - A non-fitting group on a non-empty line starts the next line
///   (space groups are dropped at the break instead).
pub fn wrap_line(
    line: &[Group],
    width: usize,
    soft_hyphen: &str,
    measure: MeasureFn,
) -> Vec<Vec<Group>> {
    let hyphen_width = measure(soft_hyphen);
    let mut queue: VecDeque<Group> = line.iter().cloned().collect();
    let mut out: Vec<Vec<Group>> = Vec::new();
    let mut current: Vec<Group> = Vec::new();
    let mut current_width = 0usize;

    while let Some(group) = queue.pop_front() {
        if current.is_empty() && group.is_space {
            continue;
        }
        let group_width = group.width();
        if current_width + group_width <= width {
            current_width += group_width;
            current.push(group);
            continue;
        }
        if current.is_empty() {
            // Oversize word: break it, leaving room for the hyphen.
            let budget = width.saturating_sub(hyphen_width);
            let (mut head, rest) = split_group(&group, budget, measure);
            if let Some(last) = head.segments.last() {
                let rule = last.rule;
                head.segments.push(Segment {
                    text: soft_hyphen.to_string(),
                    rule,
                    width: hyphen_width,
                });
            }
            out.push(vec![head]);
            if !rest.segments.is_empty() {
                queue.push_front(rest);
            }
        } else {
            out.push(std::mem::take(&mut current));
            current_width = 0;
            if !group.is_space {
                queue.push_front(group);
            }
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Split a group at grapheme boundaries so the head is at most `budget`
/// cells wide. Wide characters count their full display width and are
/// never split mid-cell. Always makes progress: the head takes at least
/// one grapheme even when the budget is too small for it.
fn split_group(group: &Group, budget: usize, measure: MeasureFn) -> (Group, Group) {
    let mut head = Group {
        segments: Vec::new(),
        is_space: group.is_space,
    };
    let mut rest = Group {
        segments: Vec::new(),
        is_space: group.is_space,
    };
    let mut used = 0usize;
    let mut full = false;

    for segment in &group.segments {
        if full {
            rest.segments.push(segment.clone());
            continue;
        }
        if used + segment.width <= budget {
            used += segment.width;
            head.segments.push(segment.clone());
            continue;
        }
        // The break falls inside this segment.
        let mut taken = String::new();
        let mut taken_width = 0usize;
        let mut remainder = String::new();
        for grapheme in super::graphemes(&segment.text) {
            let grapheme_width = measure(grapheme);
            let fits = used + taken_width + grapheme_width <= budget;
            let force_first = head.segments.is_empty() && taken.is_empty() && remainder.is_empty();
            if !full && (fits || force_first) {
                taken.push_str(grapheme);
                taken_width += grapheme_width;
            } else {
                full = true;
                remainder.push_str(grapheme);
            }
        }
        if !taken.is_empty() {
            head.segments.push(Segment {
                text: taken,
                rule: segment.rule,
                width: taken_width,
            });
        }
        if !remainder.is_empty() {
            let width = measure(&remainder);
            rest.segments.push(Segment {
                text: remainder,
                rule: segment.rule,
                width,
            });
        }
        full = true;
    }

    (head, rest)
}

// =============================================================================
// Tests
// =============================================================================
