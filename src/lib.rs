//! # weft-tui
//!
//! Immediate-mode terminal layout and render engine.
//!
//! A frame is a pure function: the host builds a [`Layout`] tree, the
//! engine turns it into draw commands, a backend encodes them. Nothing
//! is retained between frames except the navigation state the host
//! carries and the render memoisation caches.
//!
//! ```text
//! Layout tree → render (Frame, Box) → RenderResult → raster grid → backend bytes
//!                                   ↘ nav_ids / hit areas → NavState::update
//! ```
//!
//! ## Modules
//!
//! - [`layout`] - layout values: primitives, containers, wrappers
//! - [`text`] - rich-text spans, grouping, and wrapping
//! - [`draw`] - draw commands, the render frame, the result accumulator
//! - [`raster`] - pixel grid and wide-char repair
//! - [`nav`] - interactible identities and the focus state machine
//! - [`input`] - canonical input events over crossterm
//! - [`backend`] - ANSI, HTML, and direct-terminal encoders

pub mod backend;
pub mod cache;
pub mod draw;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod nav;
pub mod raster;
pub mod style;
pub mod text;

// Re-export the everyday surface.
pub use draw::{CreatedWith, DrawCommand, Frame, Pixel, PixelKind, RenderResult, StateUpdate};
pub use geometry::{Bounds, Coordinate, Size, UNBOUNDED};
pub use input::InputEvent;
pub use layout::interact::v_scroll;
pub use layout::{
    adaptive_text, adaptive_text_hyphenated, border::border_with_title, empty, hbar, hbox,
    hbox_at, hbox_flex, hbox_flex_wrap, nothing, rich_text, static_box, text, vbar, vbox,
    vbox_at, vbox_flex, BorderStyle, FlexChild, Layout,
};
pub use nav::{Axis, IdPart, InteractibleId, NavAction, NavState, StateKind, StateValue};
pub use raster::PixelGrid;
pub use style::{Attr, Color, ComputedStyle, Palette, StyleRule};
pub use text::wrap::Justify;
pub use text::{display_width, Span, SpanNode};

use tracing::trace;

/// Render a layout into a screen of `dims` with default styling and no
/// mouse. The returned result carries the metadata backends require.
pub fn render_to_result(dims: Size, layout: &Layout) -> RenderResult {
    render_with(dims, layout, ComputedStyle::default(), None)
}

/// [`render_to_result`] with an explicit inherited style and mouse
/// position.
pub fn render_with(
    dims: Size,
    layout: &Layout,
    default_style: ComputedStyle,
    mouse: Option<Coordinate>,
) -> RenderResult {
    let frame = Frame::new(dims, default_style, mouse, display_width);
    let mut result = layout.render(&frame, Bounds::from_size(dims));
    result.created_with = Some(CreatedWith {
        measure: display_width,
        screen: dims,
    });
    trace!(
        width = dims.width,
        height = dims.height,
        commands = result.commands.len(),
        interactibles = result.nav_ids.len(),
        "frame rendered"
    );
    result
}

// =============================================================================
// Tests
// =============================================================================
