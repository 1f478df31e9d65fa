//! Shadow DOM
//!
//! Shadow root attachment and default-slot assignment. A shadow root
//! is a detached node linked to its host through the tree's host map;
//! subtree scans and containment walks never cross into it implicitly.

use crate::{DomError, DomResult, DomTree, Node, NodeData, NodeId};

/// Shadow root mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowRootMode {
    #[default]
    Open,
    Closed,
}

impl DomTree {
    /// Attach a shadow root to a host element
    pub fn attach_shadow(&mut self, host: NodeId, mode: ShadowRootMode) -> DomResult<NodeId> {
        if !self.get(host).ok_or(DomError::NotFound)?.is_element() {
            return Err(DomError::InvalidNodeType);
        }
        if self.shadow.contains_key(&host) {
            return Err(DomError::ShadowAlreadyAttached);
        }
        let root = self.alloc(Node {
            parent: NodeId::NONE,
            children: Vec::new(),
            data: NodeData::ShadowRoot { host, mode },
        });
        self.shadow.insert(host, root);
        Ok(root)
    }

    /// The host's shadow root, if one is attached
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.shadow.get(&host).copied()
    }

    /// The host of a shadow root node
    pub fn shadow_host(&self, root: NodeId) -> Option<NodeId> {
        match self.get(root)?.data {
            NodeData::ShadowRoot { host, .. } => Some(host),
            _ => None,
        }
    }

    /// Nodes assigned to the host's default slot: its flattened light
    /// children
    pub fn assigned_nodes(&self, host: NodeId) -> Vec<NodeId> {
        self.children(host).to_vec()
    }
}
