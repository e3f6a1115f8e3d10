//! Layout values: the declarative tree the host builds every frame.
//!
//! A [`Layout`] is immutable data behind an `Rc`; wrapping composes by
//! allocating a new node around the old one. Every node carries a
//! structural hash computed at construction, so equality and cache keys
//! are O(1) and never walk the tree.
//!
//! Two operations define the protocol:
//! - [`Layout::min_size`] — smallest box the node renders into without
//!   further shrinking, given an availability hint,
//! - [`Layout::render`] — draw commands filling a concrete box.

pub mod border;
pub mod containers;
pub mod interact;
pub mod rich;
pub mod wrappers;

use std::hash::{Hash, Hasher};
use std::rc::Rc;

pub use border::BorderStyle;

use crate::cache;
use crate::draw::{Frame, Pixel, RenderResult};
use crate::geometry::{Bounds, Coordinate, Size};
use crate::nav::InteractibleId;
use crate::style::StyleRule;
use crate::text::wrap::Justify;
use crate::text::{MeasureFn, Span};

// =============================================================================
// Node
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum LayoutKind {
    Nothing,
    Text(String),
    HBar(String),
    VBar(String),
    RichText(Span),
    AdaptiveText {
        span: Span,
        justify: Justify,
        soft_hyphen: String,
    },
    StaticBox(Vec<Layout>),
    VBox {
        children: Vec<Layout>,
        at_y: i32,
    },
    HBox {
        children: Vec<Layout>,
        at_x: i32,
    },
    VBoxFlex(Vec<FlexChild>),
    HBoxFlex(Vec<FlexChild>),
    HBoxFlexWrap(Vec<FlexChild>),
    PushRule {
        child: Layout,
        rule: StyleRule,
    },
    /// Chrome styling: applies `rule` after remembering the inherited
    /// default, so a nested [`LayoutKind::ChromeReset`] can undo it.
    ChromeRule {
        child: Layout,
        rule: StyleRule,
    },
    ChromeReset(Layout),
    BgChar {
        child: Layout,
        glyph: String,
    },
    Shrink {
        child: Layout,
        x: bool,
        y: bool,
    },
    Center(Layout),
    Padding {
        child: Layout,
        top: i32,
        bottom: i32,
        left: i32,
        right: i32,
    },
    Offset {
        child: Layout,
        x: i32,
        y: i32,
    },
    ClampWidth {
        child: Layout,
        width: i32,
    },
    ClampHeight {
        child: Layout,
        height: i32,
    },
    MinWidth {
        child: Layout,
        width: i32,
    },
    MinHeight {
        child: Layout,
        height: i32,
    },
    Border {
        child: Layout,
        style: BorderStyle,
    },
    InteractionArea {
        child: Layout,
        id: InteractibleId,
    },
    VScroll {
        child: Layout,
        id: InteractibleId,
        selected: InteractibleId,
        offset: i32,
        delta: i32,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) kind: LayoutKind,
    pub(crate) hash: u64,
}

/// A cheap-to-clone handle to one immutable layout node.
#[derive(Debug, Clone)]
pub struct Layout {
    node: Rc<Node>,
}

impl Layout {
    pub(crate) fn from_kind(kind: LayoutKind) -> Self {
        let mut hasher = rustc_hash::FxHasher::default();
        kind.hash(&mut hasher);
        Self {
            node: Rc::new(Node {
                hash: hasher.finish(),
                kind,
            }),
        }
    }

    pub(crate) fn kind(&self) -> &LayoutKind {
        &self.node.kind
    }

    /// Structural hash, computed once at construction.
    pub fn structural_hash(&self) -> u64 {
        self.node.hash
    }
}

// Children hash by their cached value, so hashing a parent never walks
// the subtree.
impl Hash for Layout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.node.hash);
    }
}

impl PartialEq for Layout {
    fn eq(&self, other: &Self) -> bool {
        self.node.hash == other.node.hash && self.node.kind == other.node.kind
    }
}

impl Eq for Layout {}

// =============================================================================
// Flex children
// =============================================================================

/// A container child with flex weights.
///
/// `basis` reserves the child's min-size before free space is shared
/// out; a plain [`Layout`] coerces to `(grow 0, shrink 0, basis)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FlexChild {
    pub layout: Layout,
    pub grow: u32,
    pub shrink: u32,
    pub basis: bool,
}

impl From<Layout> for FlexChild {
    fn from(layout: Layout) -> Self {
        Self {
            layout,
            grow: 0,
            shrink: 0,
            basis: true,
        }
    }
}

// =============================================================================
// Constructors
// =============================================================================

/// Plain text. Newlines split lines; no wrapping.
pub fn text(s: impl Into<String>) -> Layout {
    Layout::from_kind(LayoutKind::Text(s.into()))
}

/// Styled text without wrapping.
pub fn rich_text(span: impl Into<Span>) -> Layout {
    Layout::from_kind(LayoutKind::RichText(span.into()))
}

/// Styled text wrapped to the box width.
pub fn adaptive_text(span: impl Into<Span>, justify: Justify) -> Layout {
    adaptive_text_hyphenated(span, justify, "-")
}

/// [`adaptive_text`] with a custom break glyph for oversize words.
pub fn adaptive_text_hyphenated(
    span: impl Into<Span>,
    justify: Justify,
    soft_hyphen: impl Into<String>,
) -> Layout {
    Layout::from_kind(LayoutKind::AdaptiveText {
        span: span.into(),
        justify,
        soft_hyphen: soft_hyphen.into(),
    })
}

/// Fill one row of the box with `glyph`.
pub fn hbar(glyph: impl Into<String>) -> Layout {
    Layout::from_kind(LayoutKind::HBar(glyph.into()))
}

/// Fill one column of the box with `glyph`.
pub fn vbar(glyph: impl Into<String>) -> Layout {
    Layout::from_kind(LayoutKind::VBar(glyph.into()))
}

/// The empty layout: zero min-size, renders nothing.
pub fn nothing() -> Layout {
    Layout::from_kind(LayoutKind::Nothing)
}

/// Alias for [`nothing`].
pub fn empty() -> Layout {
    nothing()
}

/// Children stacked in the same box; later children overpaint earlier.
pub fn static_box(children: impl IntoIterator<Item = Layout>) -> Layout {
    Layout::from_kind(LayoutKind::StaticBox(children.into_iter().collect()))
}

/// Vertical stack of children at their min heights.
pub fn vbox(children: impl IntoIterator<Item = Layout>) -> Layout {
    vbox_at(children, 0)
}

/// [`vbox`] starting at a y offset; negative values scroll content up.
pub fn vbox_at(children: impl IntoIterator<Item = Layout>, at_y: i32) -> Layout {
    Layout::from_kind(LayoutKind::VBox {
        children: children.into_iter().collect(),
        at_y,
    })
}

/// Horizontal row of children at their min widths.
pub fn hbox(children: impl IntoIterator<Item = Layout>) -> Layout {
    hbox_at(children, 0)
}

/// [`hbox`] starting at an x offset.
pub fn hbox_at(children: impl IntoIterator<Item = Layout>, at_x: i32) -> Layout {
    Layout::from_kind(LayoutKind::HBox {
        children: children.into_iter().collect(),
        at_x,
    })
}

/// Vertical stack distributing free height by flex weights.
pub fn vbox_flex(children: impl IntoIterator<Item = FlexChild>) -> Layout {
    Layout::from_kind(LayoutKind::VBoxFlex(children.into_iter().collect()))
}

/// Horizontal row distributing free width by flex weights.
pub fn hbox_flex(children: impl IntoIterator<Item = FlexChild>) -> Layout {
    Layout::from_kind(LayoutKind::HBoxFlex(children.into_iter().collect()))
}

/// Greedy line-packing row: basis children group into lines that fit the
/// box width, each line flexes independently, lines stack vertically.
pub fn hbox_flex_wrap(children: impl IntoIterator<Item = FlexChild>) -> Layout {
    Layout::from_kind(LayoutKind::HBoxFlexWrap(children.into_iter().collect()))
}

// =============================================================================
// Protocol dispatch
// =============================================================================

// Cache tags for the hot node kinds.
const CACHE_TEXT: u8 = 0;
const CACHE_VBOX: u8 = 1;
const CACHE_HBOX: u8 = 2;
const CACHE_BORDER: u8 = 3;
const CACHE_ADAPTIVE: u8 = 4;
const CACHE_RICH: u8 = 5;

impl Layout {
    /// The smallest box this node renders into given an availability
    /// hint. `available` feeds wrapping and flex; the result may exceed
    /// it and the caller decides how to handle that.
    pub fn min_size(&self, measure: MeasureFn, available: Size) -> Size {
        match self.kind() {
            LayoutKind::Nothing => Size::ZERO,
            LayoutKind::Text(s) => {
                let mut width = 0i32;
                let mut lines = 0i32;
                for line in s.split('\n') {
                    width = width.max(measure(line) as i32);
                    lines += 1;
                }
                Size::new(width, lines)
            }
            LayoutKind::HBar(_) => Size::new(0, 1),
            LayoutKind::VBar(_) => Size::new(1, 0),
            LayoutKind::RichText(span) => rich::rich_min_size(span, measure),
            LayoutKind::AdaptiveText {
                span, soft_hyphen, ..
            } => rich::adaptive_min_size(span, soft_hyphen, measure, available),
            LayoutKind::StaticBox(children) => children
                .iter()
                .fold(Size::ZERO, |acc, c| acc.union(c.min_size(measure, available))),
            LayoutKind::VBox { children, .. } => {
                containers::vbox_min_size(children, measure, available)
            }
            LayoutKind::HBox { children, .. } => {
                containers::hbox_min_size(children, measure, available)
            }
            LayoutKind::VBoxFlex(children) => {
                containers::flex_min_size(children, measure, available, containers::FlexAxis::Vert)
            }
            LayoutKind::HBoxFlex(children) => {
                containers::flex_min_size(children, measure, available, containers::FlexAxis::Horiz)
            }
            LayoutKind::HBoxFlexWrap(children) => {
                containers::flex_wrap_min_size(children, measure, available)
            }
            LayoutKind::PushRule { child, .. }
            | LayoutKind::ChromeRule { child, .. }
            | LayoutKind::ChromeReset(child)
            | LayoutKind::BgChar { child, .. }
            | LayoutKind::Shrink { child, .. }
            | LayoutKind::Center(child) => child.min_size(measure, available),
            LayoutKind::Padding {
                child,
                top,
                bottom,
                left,
                right,
            } => child
                .min_size(measure, available.resize(-(left + right), -(top + bottom)))
                .resize(left + right, top + bottom),
            LayoutKind::Offset { child, x, y } => child
                .min_size(measure, available.resize(-x, -y))
                .resize(*x, *y),
            LayoutKind::ClampWidth { child, width } => child
                .min_size(measure, available.clamp_width(*width))
                .clamp_width(*width),
            LayoutKind::ClampHeight { child, height } => child
                .min_size(measure, available.clamp_height(*height))
                .clamp_height(*height),
            LayoutKind::MinWidth { child, width } => {
                let size = child.min_size(measure, available);
                Size::new(size.width.max(*width), size.height)
            }
            LayoutKind::MinHeight { child, height } => {
                let size = child.min_size(measure, available);
                Size::new(size.width, size.height.max(*height))
            }
            LayoutKind::Border { child, .. } => child
                .min_size(measure, available.resize(-2, -2))
                .resize(2, 2),
            LayoutKind::InteractionArea { child, .. } => child.min_size(measure, available),
            LayoutKind::VScroll { child, .. } => {
                Size::new(child.min_size(measure, available).width, 0)
            }
        }
    }

    /// Produce draw commands filling `bounds`, memoising hot node kinds.
    pub fn render(&self, frame: &Frame, bounds: Bounds) -> RenderResult {
        match self.cache_kind() {
            Some(kind) => cache::render_cached(
                kind,
                (self.node.hash, frame.cache_hash(), bounds),
                || self.render_uncached(frame, bounds),
            ),
            None => self.render_uncached(frame, bounds),
        }
    }

    fn cache_kind(&self) -> Option<u8> {
        match self.kind() {
            LayoutKind::Text(_) => Some(CACHE_TEXT),
            LayoutKind::VBox { .. } => Some(CACHE_VBOX),
            LayoutKind::HBox { .. } => Some(CACHE_HBOX),
            LayoutKind::Border { .. } => Some(CACHE_BORDER),
            LayoutKind::AdaptiveText { .. } => Some(CACHE_ADAPTIVE),
            LayoutKind::RichText(_) => Some(CACHE_RICH),
            _ => None,
        }
    }

    fn render_uncached(&self, frame: &Frame, bounds: Bounds) -> RenderResult {
        match self.kind() {
            LayoutKind::Nothing => RenderResult::new(),
            LayoutKind::Text(s) => {
                let mut result = RenderResult::new();
                for (y, line) in s.split('\n').enumerate() {
                    result.draw_string_line(
                        frame,
                        line,
                        frame.default_style,
                        bounds.position + Coordinate::new(0, y as i32),
                    );
                }
                result
            }
            LayoutKind::HBar(glyph) => {
                let mut result = RenderResult::new();
                result.draw_fill(
                    frame,
                    Pixel::new(glyph.clone(), frame.default_style),
                    Bounds::new(bounds.width, 1, bounds.position),
                );
                result
            }
            LayoutKind::VBar(glyph) => {
                let mut result = RenderResult::new();
                result.draw_fill(
                    frame,
                    Pixel::new(glyph.clone(), frame.default_style),
                    Bounds::new(1, bounds.height, bounds.position),
                );
                result
            }
            LayoutKind::RichText(span) => rich::render_rich(span, frame, bounds),
            LayoutKind::AdaptiveText {
                span,
                justify,
                soft_hyphen,
            } => rich::render_adaptive(span, *justify, soft_hyphen, frame, bounds),
            LayoutKind::StaticBox(children) => {
                let mut result = RenderResult::new();
                for child in children {
                    result.merge(child.render(frame, bounds));
                }
                result
            }
            LayoutKind::VBox { children, at_y } => {
                containers::render_vbox(children, *at_y, frame, bounds)
            }
            LayoutKind::HBox { children, at_x } => {
                containers::render_hbox(children, *at_x, frame, bounds)
            }
            LayoutKind::VBoxFlex(children) => {
                containers::render_flex(children, frame, bounds, containers::FlexAxis::Vert)
            }
            LayoutKind::HBoxFlex(children) => {
                containers::render_flex(children, frame, bounds, containers::FlexAxis::Horiz)
            }
            LayoutKind::HBoxFlexWrap(children) => {
                containers::render_flex_wrap(children, frame, bounds)
            }
            LayoutKind::PushRule { child, rule } => child.render(&frame.with_rule(*rule), bounds),
            LayoutKind::ChromeRule { child, rule } => {
                child.render(&frame.saving_style().with_rule(*rule), bounds)
            }
            LayoutKind::ChromeReset(child) => child.render(&frame.restoring_style(), bounds),
            LayoutKind::BgChar { child, glyph } => {
                let mut result = RenderResult::new();
                result.draw_fill(frame, Pixel::new(glyph.clone(), frame.default_style), bounds);
                result.merge(child.render(frame, bounds));
                result
            }
            LayoutKind::Shrink { child, x, y } => {
                wrappers::render_shrink(child, *x, *y, frame, bounds)
            }
            LayoutKind::Center(child) => wrappers::render_center(child, frame, bounds),
            LayoutKind::Padding {
                child,
                top,
                bottom,
                left,
                right,
            } => child.render(frame, bounds.resize_sides(-top, -bottom, -left, -right)),
            LayoutKind::Offset { child, x, y } => {
                let inner = Bounds::new(
                    bounds.width - x,
                    bounds.height - y,
                    bounds.position + Coordinate::new(*x, *y),
                );
                child.render(frame, inner)
            }
            LayoutKind::ClampWidth { child, width } => {
                let inner = Bounds::new(bounds.width.min(*width), bounds.height, bounds.position);
                child.render(frame, inner)
            }
            LayoutKind::ClampHeight { child, height } => {
                let inner = Bounds::new(bounds.width, bounds.height.min(*height), bounds.position);
                child.render(frame, inner)
            }
            LayoutKind::MinWidth { child, .. } | LayoutKind::MinHeight { child, .. } => {
                child.render(frame, bounds)
            }
            LayoutKind::Border { child, style } => {
                border::render_border(child, *style, frame, bounds)
            }
            LayoutKind::InteractionArea { child, id } => {
                interact::render_interaction_area(child, id, frame, bounds)
            }
            LayoutKind::VScroll {
                child,
                id,
                selected,
                offset,
                delta,
            } => interact::render_v_scroll(child, id, selected, *offset, *delta, frame, bounds),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::UNBOUNDED;
    use crate::text::display_width;

    fn unbounded() -> Size {
        Size::new(UNBOUNDED, UNBOUNDED)
    }

    #[test]
    fn test_structural_hash_equal_for_equal_trees() {
        let a = vbox([text("foo"), text("bar")]);
        let b = vbox([text("foo"), text("bar")]);
        assert_eq!(a.structural_hash(), b.structural_hash());
        assert_eq!(a, b);

        let c = vbox([text("foo"), text("baz")]);
        assert_ne!(a.structural_hash(), c.structural_hash());
        assert_ne!(a, c);
    }

    #[test]
    fn test_text_min_size() {
        let layout = text("foo\nlonger");
        assert_eq!(layout.min_size(display_width, unbounded()), Size::new(6, 2));
        assert_eq!(text("").min_size(display_width, unbounded()), Size::new(0, 1));
    }

    #[test]
    fn test_nothing_min_size_is_zero() {
        assert_eq!(nothing().min_size(display_width, unbounded()), Size::ZERO);
        assert_eq!(empty(), nothing());
    }

    #[test]
    fn test_bar_min_sizes() {
        assert_eq!(hbar("-").min_size(display_width, unbounded()), Size::new(0, 1));
        assert_eq!(vbar("|").min_size(display_width, unbounded()), Size::new(1, 0));
    }

    #[test]
    fn test_wrapper_min_size_passthrough() {
        // Styling and shrink wrappers leave min-size untouched.
        let base = text("hello");
        let expected = base.min_size(display_width, unbounded());
        assert_eq!(
            base.clone().shrink().min_size(display_width, unbounded()),
            expected
        );
        assert_eq!(
            base.clone().center().min_size(display_width, unbounded()),
            expected
        );
        assert_eq!(base.clone().bold().min_size(display_width, unbounded()), expected);
    }

    #[test]
    fn test_padding_and_border_min_size() {
        let base = text("x");
        assert_eq!(
            base.clone().padding().min_size(display_width, unbounded()),
            Size::new(3, 1)
        );
        assert_eq!(
            base.border().min_size(display_width, unbounded()),
            Size::new(3, 3)
        );
    }

    #[test]
    fn test_clamp_and_min_wrappers() {
        let base = text("hello world");
        assert_eq!(
            base.clone().clamp_width(4).min_size(display_width, unbounded()),
            Size::new(4, 1)
        );
        assert_eq!(
            base.min_height(5).min_size(display_width, unbounded()),
            Size::new(11, 5)
        );
        assert_eq!(
            nothing().min_width(7).min_size(display_width, unbounded()),
            Size::new(7, 0)
        );
    }

    #[test]
    fn test_static_box_min_size_is_componentwise_max() {
        let layout = static_box([text("abc"), text("x\ny\nz")]);
        assert_eq!(layout.min_size(display_width, unbounded()), Size::new(3, 3));
    }
}
