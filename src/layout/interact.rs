//! Interaction areas and scroll containers.

use crate::draw::{Frame, RenderResult, StateUpdate};
use crate::geometry::{Bounds, Coordinate, Size, UNBOUNDED};
use crate::nav::{InteractibleId, NavState, StateKind, StateValue};

use super::{Layout, LayoutKind};

/// A vertically scrolling viewport.
///
/// The scroll offset is persistent state under `(id, Int)`, read here
/// and written back via a state update each frame. `delta` is the
/// host-decoded wheel movement for this frame. When the selected
/// interactible sits outside the visible band the offset is adjusted to
/// bring it into view; the adjustment lands on the next frame.
pub fn v_scroll(child: Layout, id: InteractibleId, nav: &NavState, delta: i32) -> Layout {
    let offset = nav
        .try_state(&id, StateKind::Int)
        .and_then(StateValue::as_int)
        .unwrap_or(0) as i32;
    Layout::from_kind(LayoutKind::VScroll {
        child,
        id,
        selected: nav.selected().clone(),
        offset,
        delta,
    })
}

pub(crate) fn render_interaction_area(
    child: &Layout,
    id: &InteractibleId,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let mut result = RenderResult::new();
    result.nav_ids.push(id.clone());
    result.hit_areas.push((id.clone(), bounds));
    if let Some(mouse) = frame.mouse {
        if frame.view.intersect(bounds).contains(mouse) {
            result.next_interactible = Some(id.clone());
        }
    }
    // Delegate last: an inner hovered area overrides ours on merge.
    result.merge(child.render(frame, bounds));
    result
}

pub(crate) fn render_v_scroll(
    child: &Layout,
    id: &InteractibleId,
    selected: &InteractibleId,
    offset: i32,
    delta: i32,
    frame: &Frame,
    bounds: Bounds,
) -> RenderResult {
    let content = child.min_size(frame.measure, Size::new(bounds.width, UNBOUNDED));
    let max_scroll = (content.height - bounds.height).max(0);
    let mut at = (offset + delta).clamp(0, max_scroll);

    let inner_frame = frame.clipped_to(bounds);
    let child_bounds = Bounds::new(
        bounds.width,
        content.height,
        bounds.position + Coordinate::new(0, -at),
    );
    let child_result = child.render(&inner_frame, child_bounds);

    // Keep the active interactible in view: hit areas are recorded at
    // their on-screen positions under the current offset.
    let active = child_result
        .hit_areas
        .iter()
        .filter(|(area_id, _)| area_id.is_prefix_of(selected))
        .map(|(_, area)| *area)
        .last();
    if let Some(area) = active {
        if area.y() < bounds.y() {
            at += area.y() - bounds.y();
        } else if area.bottom() > bounds.bottom() {
            at += area.y() - bounds.y() - bounds.height + area.height;
        }
        at = at.clamp(0, max_scroll);
    }

    let mut result = RenderResult::new();
    result.merge(child_result);
    result.state_updates.push(StateUpdate {
        id: id.clone(),
        value: StateValue::Int(at as i64),
    });
    result
}

// =============================================================================
// Tests
// =============================================================================
