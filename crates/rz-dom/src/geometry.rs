//! Geometry APIs
//!
//! Rect and per-element measured geometry. A geometry change feeds
//! native resize observations on the node.

use crate::{DomTree, NodeId};

/// Rect - measured element geometry
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Empty rect at the origin
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

impl DomTree {
    /// Replace a node's measured geometry. An actual change queues a
    /// notification for every native resize observation on the node.
    pub fn set_geometry(&mut self, node: NodeId, rect: Rect) {
        let previous = self.geometry.insert(node, rect);
        if previous != Some(rect) {
            self.resize_obs.queue_for(node);
        }
    }

    /// Measure a node's current bounding rect (ZERO when never laid out)
    pub fn bounding_rect(&self, node: NodeId) -> Rect {
        self.geometry.get(&node).copied().unwrap_or(Rect::ZERO)
    }
}
