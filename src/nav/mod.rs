//! Navigation: hierarchical interactible identifiers and focus state.
//!
//! Interactibles are identified by a path of [`IdPart`]s. The path
//! mirrors the container tree: each part records the axis its node is
//! arranged along, a local index among siblings, and the re-entry
//! behavior of the subtree (persistent selection, first-child default).
//!
//! [`NavState`](state::NavState) folds one frame of input into the next
//! focus state; see [`state`] for the update algorithm.

pub mod state;

pub use state::NavState;

// =============================================================================
// Axis and actions
// =============================================================================

/// The arrangement axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Vert,
    Horiz,
}

/// A navigation input decoded from a key or mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Select,
    Up,
    Down,
    Left,
    Right,
}

impl NavAction {
    /// The axis a directional action moves along. None for Select.
    pub const fn axis(self) -> Option<Axis> {
        match self {
            Self::Up | Self::Down => Some(Axis::Vert),
            Self::Left | Self::Right => Some(Axis::Horiz),
            Self::Select => None,
        }
    }

    /// True for the actions that walk the interactible list backwards.
    pub const fn backwards(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

// =============================================================================
// Interactible identifiers
// =============================================================================

/// One path element of an interactible identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdPart {
    /// Axis this node is arranged along among its siblings.
    pub direction: Axis,
    /// Index among siblings.
    pub local_id: u32,
    /// Restore the last selected descendant when focus re-enters.
    pub persistent: bool,
    /// When re-entered moving backwards, land on the first child.
    pub first_child_default: bool,
}

impl IdPart {
    pub const fn new(direction: Axis, local_id: u32) -> Self {
        Self {
            direction,
            local_id,
            persistent: false,
            first_child_default: false,
        }
    }

    pub const fn persistent(mut self) -> Self {
        self.persistent = true;
        self
    }

    pub const fn first_child_default(mut self) -> Self {
        self.first_child_default = true;
        self
    }
}

/// An ordered path of [`IdPart`]s identifying one interactible.
///
/// IDs form a tree: `child` appends a part, the shared prefix of two IDs
/// is their mutual parent, and an ID's direction is its last part's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InteractibleId {
    parts: Vec<IdPart>,
}

impl InteractibleId {
    /// The empty identity; the root of every ID tree.
    pub const EMPTY: Self = Self { parts: Vec::new() };

    /// A single-part ID.
    pub fn root(part: IdPart) -> Self {
        Self { parts: vec![part] }
    }

    /// Append a plain part.
    pub fn child(&self, direction: Axis, local_id: u32) -> Self {
        self.child_part(IdPart::new(direction, local_id))
    }

    /// Append a fully specified part.
    pub fn child_part(&self, part: IdPart) -> Self {
        let mut parts = self.parts.clone();
        parts.push(part);
        Self { parts }
    }

    #[inline]
    pub fn parts(&self) -> &[IdPart] {
        &self.parts
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The last part's direction. None for the empty ID.
    pub fn direction(&self) -> Option<Axis> {
        self.parts.last().map(|p| p.direction)
    }

    /// The first `depth` parts.
    pub fn truncate(&self, depth: usize) -> Self {
        Self {
            parts: self.parts[..depth.min(self.parts.len())].to_vec(),
        }
    }

    /// Drop the last part.
    pub fn parent(&self) -> Self {
        self.truncate(self.depth().saturating_sub(1))
    }

    /// True when `self` is a (non-strict) prefix of `other`.
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.parts.len() >= self.parts.len() && other.parts[..self.parts.len()] == self.parts[..]
    }

    /// The shared prefix: the mutual parent of the two IDs.
    pub fn mutual_parent(&self, other: &Self) -> Self {
        let shared = self
            .parts
            .iter()
            .zip(other.parts.iter())
            .take_while(|(a, b)| a == b)
            .count();
        self.truncate(shared)
    }
}

// =============================================================================
// Scoped state
// =============================================================================

/// Discriminant for per-interactible persistent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Int,
    Text,
    Flag,
}

/// A persistent value scoped to one interactible.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateValue {
    Int(i64),
    Text(String),
    Flag(bool),
}

impl StateValue {
    pub const fn kind(&self) -> StateKind {
        match self {
            Self::Int(_) => StateKind::Int,
            Self::Text(_) => StateKind::Text,
            Self::Flag(_) => StateKind::Flag,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
