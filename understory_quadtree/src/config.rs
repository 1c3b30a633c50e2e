// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction parameters for [`QuadTree`](crate::QuadTree).

use kurbo::Rect;

/// Depth limit used by [`QuadTreeConfig::default`].
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Node capacity used by [`QuadTreeConfig::default`].
pub const DEFAULT_CAPACITY: usize = 4;

/// Parameters of a [`QuadTree`](crate::QuadTree).
///
/// All three values are fixed for the lifetime of the tree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadTreeConfig {
    /// World bounds covered by the root node.
    pub boundary: Rect,
    /// Residents a leaf may hold before it tries to split.
    pub capacity: usize,
    /// Deepest level a node can reach; nodes at this level never split. The root is level 0.
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            boundary: Rect::new(0.0, 0.0, 1024.0, 1024.0),
            capacity: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl QuadTreeConfig {
    /// Set the world bounds.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: Rect) -> Self {
        self.boundary = boundary;
        self
    }

    /// Set the node capacity.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the depth limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Check that the parameters describe a usable tree.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.boundary.is_finite() {
            return Err(ConfigError::NonFiniteBoundary);
        }
        if self.boundary.area() == 0.0 {
            return Err(ConfigError::EmptyBoundary);
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// Rejected [`QuadTreeConfig`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A boundary coordinate is infinite or NaN.
    #[error("quadtree boundary has a non-finite coordinate")]
    NonFiniteBoundary,
    /// The boundary has no area.
    #[error("quadtree boundary has zero area")]
    EmptyBoundary,
    /// Nodes must be able to hold at least one resident.
    #[error("quadtree node capacity must be at least 1")]
    ZeroCapacity,
}
