//! The per-frame focus state machine.
//!
//! [`NavState`] is immutable: each frame the host calls [`NavState::update`]
//! with the previous frame's render result, the decoded input, and the
//! flat list of interactible IDs the frame declared. The result is the
//! next state.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::{InteractibleId, NavAction, StateKind, StateValue};
use crate::draw::RenderResult;
use crate::geometry::Coordinate;

/// Immutable navigation state carried across frames.
#[derive(Debug, Clone, Default)]
pub struct NavState {
    mouse: Option<Coordinate>,
    last_action: Option<NavAction>,
    selected: InteractibleId,
    persistent_state: FxHashMap<(InteractibleId, StateKind), StateValue>,
    persistent_selected_child: FxHashMap<InteractibleId, InteractibleId>,
}

impl NavState {
    /// The empty starting state: nothing selected, no persistent values.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn selected(&self) -> &InteractibleId {
        &self.selected
    }

    #[inline]
    pub fn last_action(&self) -> Option<NavAction> {
        self.last_action
    }

    #[inline]
    pub fn mouse_position(&self) -> Option<Coordinate> {
        self.mouse
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True iff `id` is a prefix of the selected ID.
    pub fn is_active(&self, id: &InteractibleId) -> bool {
        id.is_prefix_of(&self.selected)
    }

    /// True iff `id` is active and the last action was Select.
    pub fn is_selected(&self, id: &InteractibleId) -> bool {
        self.last_action == Some(NavAction::Select) && self.is_active(id)
    }

    /// True iff `id` is a prefix of some remembered persistent selection.
    pub fn was_active(&self, id: &InteractibleId) -> bool {
        self.persistent_selected_child
            .values()
            .any(|remembered| id.is_prefix_of(remembered))
    }

    /// Look up a persistent value scoped to `(id, kind)`.
    pub fn try_state(&self, id: &InteractibleId, kind: StateKind) -> Option<&StateValue> {
        self.persistent_state.get(&(id.clone(), kind))
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Fold one frame of input into the next state.
    ///
    /// - `result` carries the previous frame's `SetState` updates and the
    ///   mouse-hover `NextInteractible`.
    /// - `nav_ids` is the flat, ordered list of interactible IDs the
    ///   frame declared.
    ///
    /// When `nav_ids` is empty the selection is left as it was, so an ID
    /// that disappears for a frame can be re-adopted; a state that starts
    /// empty stays at [`InteractibleId::EMPTY`]. A non-empty `nav_ids`
    /// that no longer contains the selection falls back to `nav_ids[0]`.
    pub fn update(
        &self,
        result: &RenderResult,
        action: Option<NavAction>,
        nav_ids: &[InteractibleId],
        mouse: Option<Coordinate>,
    ) -> Self {
        let mut persistent_state = self.persistent_state.clone();
        for update in &result.state_updates {
            persistent_state.insert(
                (update.id.clone(), update.value.kind()),
                update.value.clone(),
            );
        }

        let mut selected = self.selected.clone();
        if let Some(act) = action {
            if act.axis().is_some() && !nav_ids.is_empty() {
                selected = if nav_ids.contains(&selected) {
                    keyboard_navigate(
                        &selected,
                        act,
                        nav_ids,
                        &self.persistent_selected_child,
                    )
                } else {
                    nav_ids[0].clone()
                };
            }
        }

        // Mouse wins when the previous frame recorded a hover.
        if let Some(hovered) = &result.next_interactible {
            selected = hovered.clone();
        }

        if !nav_ids.is_empty() && !nav_ids.contains(&selected) {
            selected = nav_ids[0].clone();
        }

        let mut persistent_selected_child = self.persistent_selected_child.clone();
        if selected != self.selected {
            // Every persistent ancestor remembers the current descendant,
            // so leaving the subtree freezes the memory at the exit point.
            for depth in 0..selected.depth() {
                if selected.parts()[depth].persistent {
                    persistent_selected_child
                        .insert(selected.truncate(depth + 1), selected.clone());
                }
            }
        }

        if selected != self.selected {
            debug!(?action, from = ?self.selected, to = ?selected, "nav selection moved");
        }

        Self {
            mouse,
            last_action: action,
            selected,
            persistent_state,
            persistent_selected_child,
        }
    }
}

// =============================================================================
// Directional search
// =============================================================================

/// Walk the flat ID list one step at a time from the origin, skipping
/// candidates whose mutual parent with the origin lies on the wrong axis,
/// then apply the parent re-entry rules to the first hit.
fn keyboard_navigate(
    origin: &InteractibleId,
    action: NavAction,
    nav_ids: &[InteractibleId],
    remembered: &FxHashMap<InteractibleId, InteractibleId>,
) -> InteractibleId {
    let Some(dir) = action.axis() else {
        return origin.clone();
    };
    let backwards = action.backwards();
    let Some(start) = nav_ids.iter().position(|id| id == origin) else {
        return origin.clone();
    };

    let mut index = start as isize;
    loop {
        index += if backwards { -1 } else { 1 };
        if index < 0 || index >= nav_ids.len() as isize {
            return origin.clone();
        }
        let candidate = &nav_ids[index as usize];
        if origin.mutual_parent(candidate).direction() != Some(dir) {
            continue;
        }
        return reenter(origin, candidate, backwards, nav_ids, remembered);
    }
}

/// Parent re-entry: for each ancestor of the candidate between the mutual
/// parent and the candidate itself, honor persistent memory and
/// first-child defaults.
fn reenter(
    origin: &InteractibleId,
    candidate: &InteractibleId,
    backwards: bool,
    nav_ids: &[InteractibleId],
    remembered: &FxHashMap<InteractibleId, InteractibleId>,
) -> InteractibleId {
    let mutual_depth = origin.mutual_parent(candidate).depth();
    for depth in mutual_depth..candidate.depth().saturating_sub(1) {
        let part = candidate.parts()[depth];
        let prefix = candidate.truncate(depth + 1);
        if part.persistent {
            if let Some(previous) = remembered.get(&prefix) {
                if nav_ids.contains(previous) {
                    return previous.clone();
                }
            }
        }
        if part.first_child_default && backwards {
            let container = candidate.truncate(depth);
            let first = nav_ids.iter().find(|id| {
                container.is_prefix_of(id)
                    && id.parts().get(depth).map(|p| p.local_id) == Some(0)
            });
            if let Some(first) = first {
                return first.clone();
            }
        }
    }
    candidate.clone()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::StateUpdate;
    use crate::nav::{Axis, IdPart};

    fn empty_result() -> RenderResult {
        RenderResult::new()
    }

    /// Two sibling containers under a shared root: a vertical one holding
    /// `v0, v1` and a horizontal one holding `h0, h1`.
    fn crossed_axes() -> (Vec<InteractibleId>, InteractibleId, InteractibleId) {
        let vert_parent = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let horiz_parent = InteractibleId::root(IdPart::new(Axis::Horiz, 1));
        let v0 = vert_parent.child(Axis::Vert, 0);
        let v1 = vert_parent.child(Axis::Vert, 1);
        let h0 = horiz_parent.child(Axis::Horiz, 0);
        let h1 = horiz_parent.child(Axis::Horiz, 1);
        (vec![v0.clone(), h0, h1, v1.clone()], v0, v1)
    }

    #[test]
    fn test_directional_nav_skips_crossing_axis() {
        let (nav_ids, v0, v1) = crossed_axes();
        let mut state = NavState::new();
        // First directional action adopts nav_ids[0].
        state = state.update(&empty_result(), Some(NavAction::Down), &nav_ids, None);
        assert_eq!(state.selected(), &v0);
        // Down from v0 must skip h0/h1 and land on v1.
        state = state.update(&empty_result(), Some(NavAction::Down), &nav_ids, None);
        assert_eq!(state.selected(), &v1);
        // And back up.
        state = state.update(&empty_result(), Some(NavAction::Up), &nav_ids, None);
        assert_eq!(state.selected(), &v0);
    }

    #[test]
    fn test_nav_never_leaves_declared_ids() {
        let (nav_ids, v0, _) = crossed_axes();
        let mut state = NavState::new();
        for action in [
            NavAction::Down,
            NavAction::Up,
            NavAction::Up,
            NavAction::Left,
            NavAction::Right,
        ] {
            state = state.update(&empty_result(), Some(action), &nav_ids, None);
            assert!(nav_ids.contains(state.selected()));
        }
        // Up past the start is a no-op.
        assert_eq!(state.selected(), &v0);
    }

    #[test]
    fn test_persistent_parent_restores_last_selected_child() {
        // root -> [ above, persistent P -> [c0, c1, c2], below ]
        let root = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let above = root.child(Axis::Vert, 0);
        let parent = root.child_part(IdPart::new(Axis::Vert, 1).persistent());
        let c0 = parent.child(Axis::Vert, 0);
        let c1 = parent.child(Axis::Vert, 1);
        let c2 = parent.child(Axis::Vert, 2);
        let below = root.child(Axis::Vert, 2);
        let nav_ids = vec![
            above.clone(),
            c0.clone(),
            c1.clone(),
            c2.clone(),
            below.clone(),
        ];

        // Walk all the way down through P and out the bottom.
        let mut state = NavState::new();
        for _ in 0..5 {
            state = state.update(&empty_result(), Some(NavAction::Down), &nav_ids, None);
        }
        assert_eq!(state.selected(), &below);
        assert!(state.was_active(&parent));

        // Re-entry lands on c2, the child selected when focus left P.
        state = state.update(&empty_result(), Some(NavAction::Up), &nav_ids, None);
        assert_eq!(state.selected(), &c2);

        // Moving inside P updates the memory: leave from c0 upwards and
        // come back; the restore point followed the selection.
        for _ in 0..3 {
            state = state.update(&empty_result(), Some(NavAction::Up), &nav_ids, None);
        }
        assert_eq!(state.selected(), &above);
        state = state.update(&empty_result(), Some(NavAction::Down), &nav_ids, None);
        assert_eq!(state.selected(), &c0);
    }

    #[test]
    fn test_first_child_default_on_backwards_entry() {
        let root = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let parent = root.child_part(IdPart::new(Axis::Vert, 0).first_child_default());
        let c0 = parent.child(Axis::Vert, 0);
        let c1 = parent.child(Axis::Vert, 1);
        let below = root.child(Axis::Vert, 1);
        let nav_ids = vec![c0.clone(), c1.clone(), below.clone()];

        // Walk down and out of the container.
        let mut state = NavState::new();
        for _ in 0..3 {
            state = state.update(&empty_result(), Some(NavAction::Down), &nav_ids, None);
        }
        assert_eq!(state.selected(), &below);

        // Moving back up enters the container at its first child, not c1.
        state = state.update(&empty_result(), Some(NavAction::Up), &nav_ids, None);
        assert_eq!(state.selected(), &c0);
    }

    #[test]
    fn test_fallback_to_first_when_selection_vanishes() {
        let root = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let a = root.child(Axis::Vert, 0);
        let b = root.child(Axis::Vert, 1);
        let mut state = NavState::new().update(
            &empty_result(),
            Some(NavAction::Down),
            &[a.clone(), b.clone()],
            None,
        );
        assert_eq!(state.selected(), &a);

        // a disappears; selection falls back to the new first id.
        state = state.update(&empty_result(), None, &[b.clone()], None);
        assert_eq!(state.selected(), &b);

        // Empty declaration keeps the previous selection.
        state = state.update(&empty_result(), None, &[], None);
        assert_eq!(state.selected(), &b);
    }

    #[test]
    fn test_empty_state_with_empty_ids_stays_empty() {
        let state = NavState::new().update(&empty_result(), Some(NavAction::Down), &[], None);
        assert_eq!(state.selected(), &InteractibleId::EMPTY);
    }

    #[test]
    fn test_mouse_hover_wins_over_keyboard() {
        let (nav_ids, _, v1) = crossed_axes();
        let mut hover = empty_result();
        hover.next_interactible = Some(v1.clone());
        let state = NavState::new().update(&hover, Some(NavAction::Down), &nav_ids, None);
        assert_eq!(state.selected(), &v1);
    }

    #[test]
    fn test_set_state_merges_into_persistent_state() {
        let id = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let mut result = empty_result();
        result.state_updates.push(StateUpdate {
            id: id.clone(),
            value: StateValue::Int(7),
        });
        let state = NavState::new().update(&result, None, &[], None);
        assert_eq!(
            state.try_state(&id, StateKind::Int),
            Some(&StateValue::Int(7))
        );
        assert_eq!(state.try_state(&id, StateKind::Flag), None);

        // Later updates overwrite per (id, kind).
        let mut result = empty_result();
        result.state_updates.push(StateUpdate {
            id: id.clone(),
            value: StateValue::Int(9),
        });
        let state = state.update(&result, None, &[], None);
        assert_eq!(
            state.try_state(&id, StateKind::Int),
            Some(&StateValue::Int(9))
        );
    }

    #[test]
    fn test_is_active_is_prefix_test() {
        let root = InteractibleId::root(IdPart::new(Axis::Vert, 0));
        let leaf = root.child(Axis::Vert, 1).child(Axis::Horiz, 0);
        let mut hover = empty_result();
        hover.next_interactible = Some(leaf.clone());
        let state = NavState::new().update(&hover, None, &[leaf.clone()], None);

        assert!(state.is_active(&leaf));
        assert!(state.is_active(&root));
        assert!(state.is_active(&root.child(Axis::Vert, 1)));
        assert!(!state.is_active(&root.child(Axis::Vert, 0)));

        // is_selected requires the Select action.
        assert!(!state.is_selected(&leaf));
        let state = state.update(&empty_result(), Some(NavAction::Select), &[leaf.clone()], None);
        assert!(state.is_selected(&leaf));
    }
}
