//! Geometry primitives for the layout engine.
//!
//! Everything on screen is addressed on an integer character grid:
//! - [`Coordinate`] is a grid position,
//! - [`Size`] is a width/height pair,
//! - [`Bounds`] is a rectangle placed on the grid.
//!
//! Intersections may produce non-positive dimensions. That is not an
//! error: empty geometry is representable and downstream draw producers
//! clip or skip it.

use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Sentinel for "no budget on this axis" in availability hints.
///
/// Half of `i32::MAX` so that additions during layout cannot overflow.
pub const UNBOUNDED: i32 = i32::MAX / 2;

// =============================================================================
// Coordinate
// =============================================================================

/// An integer grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Coordinate {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// =============================================================================
// Size
// =============================================================================

/// A width/height pair. Non-negative dimensions expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Grow (or shrink, with negative deltas) both axes.
    pub fn resize(self, dw: i32, dh: i32) -> Self {
        Self::new(self.width + dw, self.height + dh)
    }

    /// Componentwise max. Idempotent and commutative.
    pub fn union(self, other: Self) -> Self {
        Self::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Componentwise min.
    pub fn clamp(self, other: Self) -> Self {
        Self::new(self.width.min(other.width), self.height.min(other.height))
    }

    /// Cap only the width.
    pub fn clamp_width(self, width: i32) -> Self {
        Self::new(self.width.min(width), self.height)
    }

    /// Cap only the height.
    pub fn clamp_height(self, height: i32) -> Self {
        Self::new(self.width, self.height.min(height))
    }
}

// =============================================================================
// Bounds
// =============================================================================

/// A rectangle placed on the grid.
///
/// The contained region is half-open: `[x, x+width) x [y, y+height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub width: i32,
    pub height: i32,
    pub position: Coordinate,
}

impl Bounds {
    pub const fn new(width: i32, height: i32, position: Coordinate) -> Self {
        Self {
            width,
            height,
            position,
        }
    }

    /// A rectangle of `size` at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(size.width, size.height, Coordinate::ORIGIN)
    }

    #[inline]
    pub const fn x(&self) -> i32 {
        self.position.x
    }

    #[inline]
    pub const fn y(&self) -> i32 {
        self.position.y
    }

    /// One past the rightmost contained column.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.position.x + self.width
    }

    /// One past the bottommost contained row.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.position.y + self.height
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when either dimension is non-positive.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Grow each side outward by the given amount (negative shrinks).
    ///
    /// Growing the top or left side shifts the position up/left.
    pub fn resize_sides(self, top: i32, bottom: i32, left: i32, right: i32) -> Self {
        Self::new(
            self.width + left + right,
            self.height + top + bottom,
            Coordinate::new(self.position.x - left, self.position.y - top),
        )
    }

    /// Minimum enclosing rectangle of the two. Commutative.
    pub fn union(self, other: Self) -> Self {
        let x = self.x().min(other.x());
        let y = self.y().min(other.y());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(right - x, bottom - y, Coordinate::new(x, y))
    }

    /// Overlap of the two rectangles. Commutative.
    ///
    /// May yield non-positive dimensions; the result is exact and callers
    /// treat it as empty.
    pub fn intersect(self, other: Self) -> Self {
        let x = self.x().max(other.x());
        let y = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Self::new(right - x, bottom - y, Coordinate::new(x, y))
    }

    /// Translate by the given offset.
    pub fn offset(self, by: Coordinate) -> Self {
        Self::new(self.width, self.height, self.position + by)
    }

    /// Half-open point-inside test.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.x() && point.x < self.right() && point.y >= self.y() && point.y < self.bottom()
    }
}

// =============================================================================
// Tests
// =============================================================================
