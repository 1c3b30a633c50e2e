// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only view of an object that the quadtree indexes.

use alloc::rc::Rc;
#[cfg(target_has_atomic = "ptr")]
use alloc::sync::Arc;

use kurbo::{Circle, Point};

/// Stable identifier of an indexed object.
///
/// Must be unique among live objects and must not change while the object is indexed.
pub type ObjectId = u64;

/// Capability the quadtree needs from the objects it indexes.
///
/// The tree stores handles implementing this trait, never the objects themselves.
/// Implementations are provided for `&T`, `Rc<T>` and `Arc<T>`, so the host object
/// model keeps ownership. With borrowed handles the borrow checker enforces that an
/// object outlives its residency in the tree.
///
/// The tree reads `position` and `radius` when it inserts and queries. Move an object by
/// removing it, updating it, and inserting it again.
pub trait SpatialObject {
    /// Stable identifier.
    fn id(&self) -> ObjectId;

    /// Center of the footprint.
    fn position(&self) -> Point;

    /// Non-negative bounding radius.
    fn radius(&self) -> f64;

    /// The disc covered by this object.
    fn footprint(&self) -> Circle {
        Circle::new(self.position(), self.radius())
    }
}

impl<T: SpatialObject + ?Sized> SpatialObject for &T {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn position(&self) -> Point {
        (**self).position()
    }

    fn radius(&self) -> f64 {
        (**self).radius()
    }
}

impl<T: SpatialObject + ?Sized> SpatialObject for Rc<T> {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn position(&self) -> Point {
        (**self).position()
    }

    fn radius(&self) -> f64 {
        (**self).radius()
    }
}

#[cfg(target_has_atomic = "ptr")]
impl<T: SpatialObject + ?Sized> SpatialObject for Arc<T> {
    fn id(&self) -> ObjectId {
        (**self).id()
    }

    fn position(&self) -> Point {
        (**self).position()
    }

    fn radius(&self) -> f64 {
        (**self).radius()
    }
}

/// A plain circular body: identifier, center, and radius.
///
/// Useful when the caller keeps its own object table and only needs the index
/// to hand back identifiers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    /// Stable identifier.
    pub id: ObjectId,
    /// Center of the body.
    pub position: Point,
    /// Bounding radius.
    pub radius: f64,
}

impl Body {
    /// Create a body.
    pub const fn new(id: ObjectId, position: Point, radius: f64) -> Self {
        Self {
            id,
            position,
            radius,
        }
    }

    /// The same body centered at `position`.
    #[must_use]
    pub const fn moved_to(self, position: Point) -> Self {
        Self { position, ..self }
    }
}

impl SpatialObject for Body {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn radius(&self) -> f64 {
        self.radius
    }
}
