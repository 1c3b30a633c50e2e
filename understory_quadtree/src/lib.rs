// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_quadtree --heading-base-level=0

//! Understory Quadtree: a dynamic quadtree broad phase for circular objects.
//!
//! The tree partitions a fixed rectangular world into quadrants and keeps handles to
//! externally owned objects, each described by a stable id, a center, and a bounding radius.
//! It is meant for proximity and collision candidate search over many moving objects.
//!
//! - Insert objects; a leaf splits into four children when an insertion overflows it, down
//!   to a depth limit.
//! - An object is resident in every leaf its footprint overlaps, so one object may live in
//!   several nodes at once.
//! - Query by rectangle ([`QuadTree::query_range`], filtered by object center) or by disc
//!   ([`QuadTree::query_near`], unfiltered broad-phase candidates).
//! - Move an object by removing it and inserting it again.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Circle, Point, Rect};
//! use understory_quadtree::{Body, QuadTree};
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0), 2, 4);
//! tree.insert(Body::new(1, Point::new(10.0, 10.0), 1.0));
//! tree.insert(Body::new(2, Point::new(12.0, 12.0), 1.0));
//! tree.insert(Body::new(3, Point::new(90.0, 90.0), 1.0));
//!
//! // Broad phase: everything sharing a node with the probe.
//! let mut near: Vec<_> = tree
//!     .query_near(Circle::new(Point::new(11.0, 11.0), 2.0))
//!     .map(|b| b.id)
//!     .collect();
//! near.sort_unstable();
//! assert_eq!(near, [1, 2]);
//!
//! // Range queries test the object center.
//! let hits: Vec<_> = tree.query_range(Rect::new(80.0, 80.0, 100.0, 100.0)).collect();
//! assert_eq!(hits.len(), 1);
//! ```
//!
//! ## Removal and duplicates
//!
//! Residency is not exclusive, and neither query deduplicates: an object resident in
//! several visited nodes is reported once per residency. Callers that need unique results
//! deduplicate by [`ObjectId`].
//!
//! [`QuadTree::remove`] drops only the *first* residency found in a depth-first search.
//! An object that straddled a quadrant edge keeps its other residencies and stays visible
//! to queries. [`QuadTree::purge`] drops every residency; prefer it when moving objects
//! that may straddle edges.
//!
//! ```rust
//! use kurbo::{Circle, Point, Rect};
//! use understory_quadtree::{Body, QuadTree};
//!
//! let mut tree = QuadTree::new(Rect::new(0.0, 0.0, 100.0, 100.0), 1, 3);
//! tree.insert(Body::new(1, Point::new(10.0, 10.0), 1.0));
//! tree.insert(Body::new(2, Point::new(50.0, 50.0), 5.0));
//!
//! let probe = Circle::new(Point::new(50.0, 50.0), 1.0);
//! assert_eq!(tree.query_near(probe).filter(|b| b.id == 2).count(), 4);
//!
//! tree.remove(2);
//! assert_eq!(tree.query_near(probe).filter(|b| b.id == 2).count(), 3);
//!
//! assert_eq!(tree.purge(2), 3);
//! assert_eq!(tree.query_near(probe).filter(|b| b.id == 2).count(), 0);
//! ```
//!
//! ## Geometry
//!
//! Coordinates use [`kurbo`] types with its y-down convention. Node and footprint
//! overlap uses closed intervals and compares a disc's bounding box against node
//! boundaries (see [`rect_overlaps_disc`]), so it may over-include near corners but
//! never misses a true overlap. This crate assumes coordinates are free of NaNs.
//!
//! Objects outside the world bounds are kept rather than rejected, in the deepest node
//! with no overlapping child. They are reported by [`TreeStats::misplaced`] and logged
//! through [`tracing`].

#![no_std]

extern crate alloc;

mod config;
mod geom;
mod node;
mod object;
mod tree;

pub use config::{ConfigError, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH, QuadTreeConfig};
pub use geom::{Quadrant, Quadrants, disc_bounds, rect_overlaps_disc, rects_overlap};
pub use node::Node;
pub use object::{Body, ObjectId, SpatialObject};
pub use tree::{Nodes, QuadTree, TreeStats};
