//! Styling, size, and position wrappers, exposed as builder methods so
//! composition reads left to right: `text("hi").center().border()`.

use crate::draw::{Frame, RenderResult};
use crate::geometry::{Bounds, Coordinate};
use crate::nav::InteractibleId;
use crate::style::{Attr, Color, StyleRule};

use super::{BorderStyle, FlexChild, Layout, LayoutKind};

impl Layout {
    // =========================================================================
    // Styling
    // =========================================================================

    /// Render the child with `default_style.apply(rule)`. Nested pushes
    /// accumulate left to right.
    pub fn push_rule(self, rule: StyleRule) -> Self {
        Self::from_kind(LayoutKind::PushRule { child: self, rule })
    }

    pub fn fg(self, color: Color) -> Self {
        self.push_rule(StyleRule::fg(color))
    }

    pub fn bg(self, color: Color) -> Self {
        self.push_rule(StyleRule::bg(color))
    }

    pub fn bold(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::BOLD))
    }

    pub fn italic(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::ITALIC))
    }

    pub fn dim(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::DIM))
    }

    pub fn reverse(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::REVERSE))
    }

    pub fn underline(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::UNDERLINE))
    }

    pub fn strike_through(self) -> Self {
        self.push_rule(StyleRule::adding(Attr::STRIKE_THROUGH))
    }

    /// Apply `rule` to the chrome a wrapper adds, not to this layout's
    /// own inherited style. The wrapper built by `chrome` sees the rule;
    /// this layout is forced back to the pre-rule default first.
    pub fn styled(self, rule: StyleRule, chrome: impl FnOnce(Layout) -> Layout) -> Self {
        let child = Self::from_kind(LayoutKind::ChromeReset(self));
        Self::from_kind(LayoutKind::ChromeRule {
            child: chrome(child),
            rule,
        })
    }

    /// Fill the box with `glyph` underneath the child.
    pub fn bg_char(self, glyph: impl Into<String>) -> Self {
        Self::from_kind(LayoutKind::BgChar {
            child: self,
            glyph: glyph.into(),
        })
    }

    /// Paint the background color under the whole box.
    pub fn bg_fill(self) -> Self {
        self.bg_char(" ")
    }

    // =========================================================================
    // Size and position
    // =========================================================================

    /// Render into a box of the child's own min-size on both axes,
    /// anchored at the box position.
    pub fn shrink(self) -> Self {
        Self::from_kind(LayoutKind::Shrink {
            child: self,
            x: true,
            y: true,
        })
    }

    pub fn shrink_x(self) -> Self {
        Self::from_kind(LayoutKind::Shrink {
            child: self,
            x: true,
            y: false,
        })
    }

    pub fn shrink_y(self) -> Self {
        Self::from_kind(LayoutKind::Shrink {
            child: self,
            x: false,
            y: true,
        })
    }

    /// Centre the child's min-size inside the box on both axes.
    pub fn center(self) -> Self {
        Self::from_kind(LayoutKind::Center(self))
    }

    pub fn custom_padding(self, top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self::from_kind(LayoutKind::Padding {
            child: self,
            top,
            bottom,
            left,
            right,
        })
    }

    /// One column of padding left and right.
    pub fn padding(self) -> Self {
        self.custom_padding(0, 0, 1, 1)
    }

    /// Shift the child by `(x, y)` inside the box; the box shrinks so
    /// the shifted content stays within the original rectangle.
    pub fn offset(self, x: i32, y: i32) -> Self {
        Self::from_kind(LayoutKind::Offset { child: self, x, y })
    }

    pub fn clamp_width(self, width: i32) -> Self {
        Self::from_kind(LayoutKind::ClampWidth { child: self, width })
    }

    pub fn clamp_height(self, height: i32) -> Self {
        Self::from_kind(LayoutKind::ClampHeight {
            child: self,
            height,
        })
    }

    pub fn min_width(self, width: i32) -> Self {
        Self::from_kind(LayoutKind::MinWidth { child: self, width })
    }

    pub fn min_height(self, height: i32) -> Self {
        Self::from_kind(LayoutKind::MinHeight {
            child: self,
            height,
        })
    }

    // =========================================================================
    // Chrome and interaction
    // =========================================================================

    /// Draw a one-cell rounded border around the child.
    pub fn border(self) -> Self {
        self.custom_border(BorderStyle::default())
    }

    /// Draw a one-cell border with an explicit glyph set.
    pub fn custom_border(self, style: BorderStyle) -> Self {
        Self::from_kind(LayoutKind::Border { child: self, style })
    }

    /// Apply a wrapper function, keeping composition left to right.
    pub fn pipe(self, wrapper: impl FnOnce(Self) -> Self) -> Self {
        wrapper(self)
    }

    /// Register this subtree as a focusable, hit-testable region.
    pub fn interaction_area(self, id: InteractibleId) -> Self {
        Self::from_kind(LayoutKind::InteractionArea { child: self, id })
    }

    // =========================================================================
    // Flex tagging
    // =========================================================================

    /// Tag for flex containers: grow 1, shrink 1, no reserved basis.
    pub fn flex(self) -> FlexChild {
        self.flex_custom(1, 1, false)
    }

    pub fn flex_custom(self, grow: u32, shrink: u32, basis: bool) -> FlexChild {
        FlexChild {
            layout: self,
            grow,
            shrink,
            basis,
        }
    }
}

// =============================================================================
// Render helpers
// =============================================================================

pub(crate) fn render_shrink(
    child: &Layout,
    x: bool,
    y: bool,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let min = child.min_size(frame.measure, bounds.size());
    let inner = Bounds::new(
        if x { min.width.min(bounds.width) } else { bounds.width },
        if y { min.height.min(bounds.height) } else { bounds.height },
        bounds.position,
    );
    child.render(frame, inner)
}

pub(crate) fn render_center(child: &Layout, frame: &Frame, bounds: Bounds) -> RenderResult {
    let min = child.min_size(frame.measure, bounds.size());
    let width = min.width.min(bounds.width);
    let height = min.height.min(bounds.height);
    let left = ((bounds.width - width) / 2).max(0);
    let top = ((bounds.height - height) / 2).max(0);
    let inner = Bounds::new(
        width,
        height,
        bounds.position + Coordinate::new(left, top),
    );
    child.render(frame, inner)
}

// =============================================================================
// Tests
// =============================================================================
