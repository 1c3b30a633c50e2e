// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree nodes: resident storage and the split policy.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use kurbo::{Circle, Rect};

use crate::geom::{Quadrant, Quadrants, rect_overlaps_disc, rects_overlap};
use crate::object::{ObjectId, SpatialObject};

/// A node of a [`QuadTree`](crate::QuadTree).
///
/// A node is a leaf until an insertion leaves it holding more than its capacity, at which
/// point it splits into four children covering its quadrants (see [`Quadrant`]). Residents are
/// keyed by [`ObjectId`]; an object whose footprint straddles quadrant edges is resident
/// in every child it overlaps.
///
/// Internal nodes normally hold no residents. The exception is an object that overlaps
/// none of the children, such as one lying outside the tree boundary; it stays with the
/// internal node and is counted in [`TreeStats::misplaced`](crate::TreeStats::misplaced).
pub struct Node<O> {
    boundary: Rect,
    capacity: usize,
    level: u32,
    residents: HashMap<ObjectId, O>,
    children: Option<Box<[Self; 4]>>,
}

impl<O> Node<O> {
    pub(crate) fn new(boundary: Rect, capacity: usize, level: u32) -> Self {
        Self {
            boundary,
            capacity,
            level,
            residents: HashMap::new(),
            children: None,
        }
    }

    /// Area covered by this node.
    pub fn boundary(&self) -> Rect {
        self.boundary
    }

    /// Resident count above which this node splits.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Depth of this node; the root is level 0.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// True if the node has not split.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// The four children in [`Quadrant::ALL`] order, or `None` for a leaf.
    pub fn children(&self) -> Option<&[Self; 4]> {
        self.children.as_deref()
    }

    /// The child covering `quadrant`, or `None` for a leaf.
    pub fn child(&self, quadrant: Quadrant) -> Option<&Self> {
        self.children().map(|c| &c[quadrant.index()])
    }

    /// Number of objects resident in this node itself, excluding descendants.
    pub fn len(&self) -> usize {
        self.residents.len()
    }

    /// True if this node itself holds no residents.
    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }

    /// Whether `id` is resident in this node itself.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.residents.contains_key(&id)
    }

    /// The handle stored for `id` in this node itself.
    pub fn get(&self, id: ObjectId) -> Option<&O> {
        self.residents.get(&id)
    }

    /// Objects resident in this node itself, in no particular order.
    pub fn residents(&self) -> impl Iterator<Item = &O> + '_ {
        self.residents.values()
    }

    /// Quadrants of this node's boundary that `disc` overlaps.
    ///
    /// Uses the conservative test of [`rect_overlaps_disc`]. Meaningful for leaves too:
    /// it names the children the disc would be placed in if the node split.
    pub fn overlapping_quadrants(&self, disc: Circle) -> Quadrants {
        quadrants_of(self.boundary, disc)
    }

    /// Drop every resident and every descendant, leaving an empty leaf.
    pub(crate) fn clear(&mut self) {
        self.residents.clear();
        self.children = None;
    }

    /// Remove `id` from the first node holding it, visiting this node and then each
    /// child subtree in order. Other residencies of the same object are left alone.
    pub(crate) fn remove_first(&mut self, id: ObjectId) -> bool {
        if self.residents.remove(&id).is_some() {
            return true;
        }
        self.children
            .as_mut()
            .is_some_and(|children| children.iter_mut().any(|c| c.remove_first(id)))
    }

    /// Remove `id` from every node in this subtree. Returns the number of residencies dropped.
    pub(crate) fn remove_all(&mut self, id: ObjectId) -> usize {
        let mut removed = usize::from(self.residents.remove(&id).is_some());
        if let Some(children) = &mut self.children {
            removed += children.iter_mut().map(|c| c.remove_all(id)).sum::<usize>();
        }
        removed
    }

    /// First node in this subtree, in the same order as [`Node::remove_first`], holding `id`.
    pub(crate) fn find(&self, id: ObjectId) -> Option<&Self> {
        if self.contains(id) {
            return Some(self);
        }
        self.children
            .as_ref()?
            .iter()
            .find_map(|c| c.find(id))
    }
}

impl<O: SpatialObject> Node<O> {
    /// Append residents whose center lies in `rect`, pruning subtrees whose boundary misses it.
    pub(crate) fn query_range<'a>(&'a self, rect: Rect, out: &mut Vec<&'a O>) {
        if !rects_overlap(self.boundary, rect) {
            return;
        }
        out.extend(
            self.residents
                .values()
                .filter(|o| rect.contains(o.position())),
        );
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_range(rect, out);
            }
        }
    }

    /// Append every resident of every node whose boundary overlaps `probe`.
    pub(crate) fn query_near<'a>(&'a self, probe: Circle, out: &mut Vec<&'a O>) {
        if !rect_overlaps_disc(self.boundary, probe) {
            return;
        }
        out.extend(self.residents.values());
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query_near(probe, out);
            }
        }
    }
}

impl<O: SpatialObject + Clone> Node<O> {
    /// Place `object` in every leaf of this subtree whose boundary overlaps its footprint,
    /// splitting leaves that overflow.
    pub(crate) fn insert(&mut self, object: O, max_depth: u32) {
        let id = object.id();
        let footprint = object.footprint();
        debug_assert!(
            footprint.radius >= 0.0,
            "object {id} has a negative radius"
        );

        if let Some(children) = &mut self.children {
            let quadrants = quadrants_of(self.boundary, footprint);
            if quadrants.is_empty() {
                tracing::warn!(
                    id,
                    level = self.level,
                    boundary = ?self.boundary,
                    "object overlaps no child; keeping it in the internal node"
                );
                self.residents.insert(id, object);
                return;
            }
            for q in quadrants.quadrants() {
                children[q.index()].insert(object.clone(), max_depth);
            }
            return;
        }

        match self.residents.entry(id) {
            Entry::Occupied(_) => return,
            Entry::Vacant(slot) => {
                slot.insert(object);
            }
        }
        if self.should_split(max_depth) {
            self.split();
        }
    }

    fn should_split(&self, max_depth: u32) -> bool {
        self.is_leaf() && self.residents.len() > self.capacity && self.level < max_depth
    }

    /// Create the four children and move every resident into each child it overlaps.
    ///
    /// A resident overlapping no child stays in this node. Children may receive more than
    /// `capacity` residents; such a child splits on the next insertion into it.
    fn split(&mut self) {
        debug_assert!(self.is_leaf(), "only leaves split");
        let boundary = self.boundary;
        let level = self.level + 1;
        let capacity = self.capacity;
        let mut children =
            Box::new(Quadrant::ALL.map(|q| Self::new(q.of(boundary), capacity, level)));

        let residents = core::mem::take(&mut self.residents);
        let redistributed = residents.len();
        for (id, object) in residents {
            let quadrants = quadrants_of(boundary, object.footprint());
            if quadrants.is_empty() {
                self.residents.insert(id, object);
                continue;
            }
            for q in quadrants.quadrants() {
                children[q.index()].residents.insert(id, object.clone());
            }
        }

        tracing::trace!(
            level = self.level,
            boundary = ?boundary,
            redistributed,
            "split node"
        );
        if !self.residents.is_empty() {
            tracing::warn!(
                level = self.level,
                boundary = ?boundary,
                misplaced = self.residents.len(),
                "split left residents outside every child"
            );
        }

        self.children = Some(children);
    }
}

impl<O> Debug for Node<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Node")
            .field("boundary", &self.boundary)
            .field("level", &self.level)
            .field("capacity", &self.capacity)
            .field("residents", &self.residents.len())
            .field("leaf", &self.is_leaf())
            .finish_non_exhaustive()
    }
}

fn quadrants_of(boundary: Rect, disc: Circle) -> Quadrants {
    Quadrant::ALL
        .into_iter()
        .filter(|q| rect_overlaps_disc(q.of(boundary), disc))
        .fold(Quadrants::empty(), |set, q| set | q.flag())
}
