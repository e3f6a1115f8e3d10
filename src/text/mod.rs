//! Rich-text engine: measurement, styled spans, and word grouping.
//!
//! Text flows through three shapes before it is drawn:
//! - [`Span`] — the nested, styled tree the host builds,
//! - [`Segment`] — a flat run of text with one folded [`StyleRule`],
//! - [`Group`] — a maximal run of same-kind (space vs word) segments.
//!
//! [`span_to_lines`] flattens a span tree into newline-split lines of
//! groups; [`wrap`] packs those groups into an available width.

pub mod wrap;

use crate::style::StyleRule;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

// =============================================================================
// Measurement
// =============================================================================

/// Display-width function threaded through layout and rendering.
///
/// A plain fn pointer so frames stay `Copy` and cache keys stay hashable.
pub type MeasureFn = fn(&str) -> usize;

/// Unicode display width in terminal cells (the default [`MeasureFn`]).
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Iterate extended grapheme clusters.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

// =============================================================================
// Span
// =============================================================================

/// One child of a span: literal text or a nested span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SpanNode {
    Text(String),
    Nested(Span),
}

/// A styled text tree. Nested spans compose their rules top-down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub rule: StyleRule,
    pub children: Vec<SpanNode>,
}

impl Span {
    pub fn new(rule: StyleRule, children: Vec<SpanNode>) -> Self {
        Self { rule, children }
    }

    /// An unstyled leaf span.
    pub fn raw(text: impl Into<String>) -> Self {
        Self {
            rule: StyleRule::EMPTY,
            children: vec![SpanNode::Text(text.into())],
        }
    }

    /// A styled leaf span.
    pub fn styled(text: impl Into<String>, rule: StyleRule) -> Self {
        Self {
            rule,
            children: vec![SpanNode::Text(text.into())],
        }
    }

    /// Append literal text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(SpanNode::Text(text.into()));
        self
    }

    /// Append a nested span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.children.push(SpanNode::Nested(span));
        self
    }
}

impl From<&str> for Span {
    fn from(text: &str) -> Self {
        Self::raw(text)
    }
}

impl From<String> for Span {
    fn from(text: String) -> Self {
        Self::raw(text)
    }
}

// =============================================================================
// Segment and Group
// =============================================================================

/// A flat run of text with one folded rule and a cached display width.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub text: String,
    pub rule: StyleRule,
    pub width: usize,
}

impl Segment {
    pub fn new(text: impl Into<String>, rule: StyleRule, measure: MeasureFn) -> Self {
        let text = text.into();
        let width = measure(&text);
        Self { text, rule, width }
    }
}

/// A maximal run of segments that is either all whitespace or all
/// non-whitespace. A word group may span segments with different rules.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    pub segments: Vec<Segment>,
    pub is_space: bool,
}

impl Group {
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.width).sum()
    }
}

/// Display width of a whole line of groups.
pub fn line_width(groups: &[Group]) -> usize {
    groups.iter().map(Group::width).sum()
}

// =============================================================================
// Flattening
// =============================================================================

/// Flatten a span tree into lines (split on `\n`) of groups.
///
/// Adjacent same-kind runs coalesce into one group; within a group,
/// adjacent segments with an identical rule merge into one segment.
pub fn span_to_lines(span: &Span, measure: MeasureFn) -> Vec<Vec<Group>> {
    let mut flat: Vec<(String, StyleRule)> = Vec::new();
    flatten(span, StyleRule::EMPTY, &mut flat);

    let mut lines: Vec<Vec<Group>> = Vec::new();
    let mut current: Vec<Group> = Vec::new();

    for (text, rule) in flat {
        for (i, piece) in text.split('\n').enumerate() {
            if i > 0 {
                lines.push(std::mem::take(&mut current));
            }
            for run in split_runs(piece) {
                let is_space = run.chars().all(char::is_whitespace);
                push_segment(&mut current, Segment::new(run, rule, measure), is_space);
            }
        }
    }

    lines.push(current);
    lines
}

fn flatten(span: &Span, inherited: StyleRule, out: &mut Vec<(String, StyleRule)>) {
    let rule = inherited.then(span.rule);
    for child in &span.children {
        match child {
            SpanNode::Text(text) => out.push((text.clone(), rule)),
            SpanNode::Nested(nested) => flatten(nested, rule, out),
        }
    }
}

/// Split a newline-free piece into alternating space/word runs.
fn split_runs(piece: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut kind: Option<bool> = None;
    for (i, c) in piece.char_indices() {
        let is_space = c.is_whitespace();
        match kind {
            Some(k) if k == is_space => {}
            Some(_) => {
                runs.push(&piece[start..i]);
                start = i;
                kind = Some(is_space);
            }
            None => kind = Some(is_space),
        }
    }
    if start < piece.len() {
        runs.push(&piece[start..]);
    }
    runs
}

fn push_segment(line: &mut Vec<Group>, segment: Segment, is_space: bool) {
    if segment.text.is_empty() {
        return;
    }
    if let Some(last) = line.last_mut() {
        if last.is_space == is_space {
            if let Some(tail) = last.segments.last_mut() {
                if tail.rule == segment.rule {
                    tail.width += segment.width;
                    tail.text.push_str(&segment.text);
                    return;
                }
            }
            last.segments.push(segment);
            return;
        }
    }
    line.push(Group {
        segments: vec![segment],
        is_space,
    });
}

// =============================================================================
// Tests
// =============================================================================
