//! Physical pixel geometry for the carousel engine.
//!
//! The engine lays its three slots out in physical pixels and compares scroll
//! offsets against slot edges, so every value here is an exact integer.
//!
//! # Key Types
//!
//! - [`Px`] - a single pixel coordinate, negative values allowed for
//!   overscroll
//! - [`PxSize`] - width and height of a viewport or slot
//! - [`PxRect`] - a positioned rectangle used for slot frames and the visible
//!   viewport
//!
//! # Coordinate System
//!
//! Origin at the leading top corner of the scroll content, x grows toward the
//! trailing edge, y grows downward.
//!
//! # Example
//!
//! ```
//! use tessera_carousel::px::{Px, PxRect};
//!
//! let slot = PxRect::new(Px(20), Px(0), Px(60), Px(100));
//! let viewport = PxRect::new(Px(70), Px(0), Px(100), Px(100));
//! assert!(slot.intersects(&viewport));
//!
//! // Touching edges do not count as an overlap.
//! let far = PxRect::new(Px(80), Px(0), Px(100), Px(100));
//! assert!(!slot.intersects(&far));
//! ```

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A physical pixel coordinate value.
///
/// Supports negative values so that overscrolled offsets can be reported
/// as-is by the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` from an i32 value.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw i32 value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Converts to f32 for hosts that animate in floating point.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Converts from f32, truncating toward zero and saturating at the i32
    /// range.
    ///
    /// ```
    /// use tessera_carousel::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(70.9), Px(70));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        // `as` saturates for out-of-range floats.
        Self(value as i32)
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self {
        Self(self.0 * rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Width and height in physical pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxSize {
    /// Extent along the scroll axis.
    pub width: Px,
    /// Extent across the scroll axis.
    pub height: Px,
}

impl PxSize {
    /// A zero-sized extent.
    pub const ZERO: Self = Self {
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new size.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }
}

/// A rectangle in physical pixel space, positioned by its top-left corner.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PxRect {
    /// Leading edge.
    pub x: Px,
    /// Top edge.
    pub y: Px,
    /// Width of the rectangle.
    pub width: Px,
    /// Height of the rectangle.
    pub height: Px,
}

impl PxRect {
    /// A zero rectangle at the origin.
    pub const ZERO: Self = Self::new(Px::ZERO, Px::ZERO, Px::ZERO, Px::ZERO);

    /// Creates a new rectangle.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the size of this rectangle.
    pub fn size(&self) -> PxSize {
        PxSize::new(self.width, self.height)
    }

    /// Trailing edge, exclusive.
    pub fn right(&self) -> Px {
        self.x + self.width
    }

    /// Bottom edge, exclusive.
    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// Gets the overlap of this rectangle with another.
    ///
    /// Edges are half-open, so rectangles that only touch, or overlap with
    /// zero area, return `None`.
    ///
    /// ```
    /// use tessera_carousel::px::{Px, PxRect};
    ///
    /// let a = PxRect::new(Px(0), Px(0), Px(100), Px(100));
    /// let b = PxRect::new(Px(50), Px(50), Px(100), Px(100));
    /// assert_eq!(
    ///     a.intersection(&b),
    ///     Some(PxRect::new(Px(50), Px(50), Px(50), Px(50)))
    /// );
    /// ```
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x1 < x2 && y1 < y2 {
            Some(Self::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Whether the two rectangles share a non-empty area.
    pub fn intersects(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, x: Px, y: Px) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
