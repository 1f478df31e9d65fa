//! rz DOM - Document Object Model
//!
//! Memory-efficient DOM tree with shadow roots, element geometry,
//! mutation observation, and window/document event targets. This is
//! the host substrate the resize-detection core observes.

mod environment;
mod events;
mod geometry;
mod mutation;
mod node;
mod shadow;
mod tree;

pub use environment::{Environment, ResizeObservationId, ResizeObserverSupport};
pub use events::{HostEventKind, ListenerId};
pub use geometry::Rect;
pub use mutation::{MutationKind, MutationObserverId, MutationRecord, ObserveOptions};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use shadow::ShadowRootMode;
pub use tree::{DomError, DomResult, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this is the sentinel
    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
