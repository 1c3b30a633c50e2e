// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`QuadTree`] driver: mutation, queries, and diagnostics.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Circle, Rect};

use crate::config::{ConfigError, QuadTreeConfig};
use crate::node::Node;
use crate::object::{ObjectId, SpatialObject};

/// Dynamic quadtree over radius-bounded objects.
///
/// See the [crate documentation](crate) for the residency and removal rules.
pub struct QuadTree<O> {
    root: Node<O>,
    max_depth: u32,
}

impl<O> QuadTree<O> {
    /// Create an empty tree covering `boundary`.
    ///
    /// A leaf splits when an insertion into it leaves more than `capacity` residents,
    /// unless it is already at `max_depth`. A split moves residents down one level only. `boundary` is normalized so that `x0 <= x1` and `y0 <= y1`.
    /// Debug builds assert that the boundary is finite with positive area;
    /// use [`QuadTree::from_config`] to validate instead.
    pub fn new(boundary: Rect, capacity: usize, max_depth: u32) -> Self {
        debug_assert!(
            boundary.is_finite() && boundary.area() != 0.0,
            "quadtree boundary must be finite with positive area"
        );
        Self {
            root: Node::new(boundary.abs(), capacity, 0),
            max_depth,
        }
    }

    /// Create an empty tree from validated parameters.
    pub fn from_config(config: &QuadTreeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config.boundary, config.capacity, config.max_depth))
    }

    /// The root node.
    pub fn root(&self) -> &Node<O> {
        &self.root
    }

    /// World bounds covered by the root.
    pub fn boundary(&self) -> Rect {
        self.root.boundary()
    }

    /// Node capacity shared by every node.
    pub fn capacity(&self) -> usize {
        self.root.capacity()
    }

    /// Deepest level a node can reach; nodes at this level never split.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Remove `id` from the first node that holds it.
    ///
    /// Nodes are searched depth first, each node before its children and children in
    /// [`Quadrant::ALL`](crate::Quadrant::ALL) order. The search stops at the first
    /// match, so an object resident in several nodes keeps its other residencies and can
    /// still be returned by queries. Use [`QuadTree::purge`] to drop every residency.
    ///
    /// Returns `true` if a residency was removed. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.root.remove_first(id)
    }

    /// Remove every residency of `id`. Returns how many nodes held it.
    pub fn purge(&mut self, id: ObjectId) -> usize {
        let removed = self.root.remove_all(id);
        if removed > 1 {
            tracing::debug!(id, removed, "purged object from several nodes");
        }
        removed
    }

    /// The first node holding `id`, searched in the same order as [`QuadTree::remove`].
    pub fn find_node_containing(&self, id: ObjectId) -> Option<&Node<O>> {
        self.root.find(id)
    }

    /// Drop every residency and every node below the root.
    ///
    /// The objects themselves are untouched; only the tree's handles are released.
    pub fn clear(&mut self) {
        if tracing::enabled!(tracing::Level::DEBUG)
            && (!self.root.is_leaf() || !self.root.is_empty())
        {
            let stats = self.stats();
            tracing::debug!(
                nodes = stats.nodes,
                residencies = stats.residencies,
                "clearing quadtree"
            );
        }
        self.root.clear();
    }

    /// Every node, depth first: each node before its children, children in quadrant order.
    ///
    /// Intended for drawing node boundaries and other diagnostics.
    pub fn nodes(&self) -> Nodes<'_, O> {
        Nodes {
            stack: vec![&self.root],
        }
    }

    /// Structural summary of the tree.
    pub fn stats(&self) -> TreeStats {
        self.nodes().fold(TreeStats::default(), |mut s, n| {
            s.nodes += 1;
            s.max_level = s.max_level.max(n.level());
            s.residencies += n.len();
            if n.is_leaf() {
                s.leaves += 1;
            } else {
                s.misplaced += n.len();
            }
            s
        })
    }
}

impl<O: SpatialObject + Clone> QuadTree<O> {
    /// Insert `object` into every leaf whose boundary overlaps its footprint.
    ///
    /// Inserting an id that a target leaf already holds leaves that leaf unchanged. Objects
    /// outside the tree boundary are still kept, in the deepest node that has no overlapping
    /// child (possibly the root); keep objects inside the configured bounds.
    pub fn insert(&mut self, object: O) {
        self.root.insert(object, self.max_depth);
    }
}

impl<O: SpatialObject> QuadTree<O> {
    /// Objects whose center lies in `rect`.
    ///
    /// Containment is half open: the minimum edges of `rect` are inside, the maximum
    /// edges are not. An object resident in several visited nodes is yielded once per
    /// residency.
    pub fn query_range(&self, rect: Rect) -> impl Iterator<Item = &O> + '_ {
        let mut out = Vec::new();
        self.query_range_into(rect, &mut out);
        out.into_iter()
    }

    /// Append the results of [`QuadTree::query_range`] to `out`.
    pub fn query_range_into<'a>(&'a self, rect: Rect, out: &mut Vec<&'a O>) {
        self.root.query_range(rect, out);
    }

    /// Broad-phase candidates for `probe`: every resident of every node whose boundary
    /// overlaps the probe's bounding box.
    ///
    /// No distance filtering is applied and duplicates are kept, one per residency.
    /// Callers run their own narrow-phase test and deduplicate by id if needed.
    pub fn query_near(&self, probe: Circle) -> impl Iterator<Item = &O> + '_ {
        let mut out = Vec::new();
        self.query_near_into(probe, &mut out);
        out.into_iter()
    }

    /// Append the results of [`QuadTree::query_near`] to `out`.
    pub fn query_near_into<'a>(&'a self, probe: Circle, out: &mut Vec<&'a O>) {
        self.root.query_near(probe, out);
    }
}

impl<O> Debug for QuadTree<O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let stats = self.stats();
        f.debug_struct("QuadTree")
            .field("boundary", &self.boundary())
            .field("capacity", &self.capacity())
            .field("max_depth", &self.max_depth)
            .field("nodes", &stats.nodes)
            .field("residencies", &stats.residencies)
            .finish_non_exhaustive()
    }
}

/// Depth-first iterator over the nodes of a [`QuadTree`], from [`QuadTree::nodes`].
pub struct Nodes<'a, O> {
    stack: Vec<&'a Node<O>>,
}

impl<'a, O> Iterator for Nodes<'a, O> {
    type Item = &'a Node<O>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

impl<O> Debug for Nodes<'_, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Nodes")
            .field("pending", &self.stack.len())
            .finish()
    }
}

/// Structural summary returned by [`QuadTree::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total nodes, root included.
    pub nodes: usize,
    /// Nodes without children.
    pub leaves: usize,
    /// Deepest level present.
    pub max_level: u32,
    /// Sum of resident counts over all nodes. An object counts once per node holding it.
    pub residencies: usize,
    /// Residents held by internal nodes, i.e. objects that overlapped no child.
    pub misplaced: usize,
}
