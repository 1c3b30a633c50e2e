// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Overlap tests and quadrant geometry.
//!
//! All tests use closed intervals: shapes that merely touch are reported as overlapping.
//! Inputs are assumed to be free of NaNs.

use kurbo::{Circle, Rect};

bitflags::bitflags! {
    /// A set of quadrants of a node boundary.
    ///
    /// Returned by [`Node::overlapping_quadrants`](crate::Node::overlapping_quadrants) to
    /// describe which children a footprint touches.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Quadrants: u8 {
        /// Maximum x, minimum y.
        const TOP_RIGHT    = 0b0000_0001;
        /// Minimum x, minimum y.
        const TOP_LEFT     = 0b0000_0010;
        /// Minimum x, maximum y.
        const BOTTOM_LEFT  = 0b0000_0100;
        /// Maximum x, maximum y.
        const BOTTOM_RIGHT = 0b0000_1000;
    }
}

impl Quadrants {
    /// Iterate the quadrants in this set in child order.
    pub fn quadrants(self) -> impl Iterator<Item = Quadrant> {
        Quadrant::ALL
            .into_iter()
            .filter(move |q| self.contains(q.flag()))
    }
}

/// One quadrant of a rectangle, using kurbo's y-down convention.
///
/// The declaration order is the order children are stored and visited in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Maximum x, minimum y.
    TopRight,
    /// Minimum x, minimum y.
    TopLeft,
    /// Minimum x, maximum y.
    BottomLeft,
    /// Maximum x, maximum y.
    BottomRight,
}

impl Quadrant {
    /// All quadrants in child order.
    pub const ALL: [Self; 4] = [
        Self::TopRight,
        Self::TopLeft,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this quadrant's child within a split node.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The single-quadrant set for this quadrant.
    pub const fn flag(self) -> Quadrants {
        match self {
            Self::TopRight => Quadrants::TOP_RIGHT,
            Self::TopLeft => Quadrants::TOP_LEFT,
            Self::BottomLeft => Quadrants::BOTTOM_LEFT,
            Self::BottomRight => Quadrants::BOTTOM_RIGHT,
        }
    }

    /// The part of `parent` covered by this quadrant.
    ///
    /// The four quadrants of a rectangle share their inner edges and tile it exactly.
    pub fn of(self, parent: Rect) -> Rect {
        let c = parent.center();
        match self {
            Self::TopRight => Rect::new(c.x, parent.y0, parent.x1, c.y),
            Self::TopLeft => Rect::new(parent.x0, parent.y0, c.x, c.y),
            Self::BottomLeft => Rect::new(parent.x0, c.y, c.x, parent.y1),
            Self::BottomRight => Rect::new(c.x, c.y, parent.x1, parent.y1),
        }
    }
}

/// Whether two rectangles overlap, edges included.
#[inline]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Axis-aligned bounds of a disc.
#[inline]
pub fn disc_bounds(disc: Circle) -> Rect {
    let Circle { center, radius } = disc;
    Rect::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    )
}

/// Conservative rectangle/disc overlap.
///
/// Compares the disc's horizontal and vertical spans against the rectangle independently,
/// which is the same as testing the disc's bounding box. A disc near a corner of `rect`
/// can be reported as overlapping even though the circle itself misses the corner;
/// a disc that truly overlaps is never missed.
#[inline]
pub fn rect_overlaps_disc(rect: Rect, disc: Circle) -> bool {
    rects_overlap(rect, disc_bounds(disc))
}
