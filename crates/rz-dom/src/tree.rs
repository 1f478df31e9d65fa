//! DOM Tree (arena-based allocation)
//!
//! Core structure operations: create, append, remove, containment.
//! Structural mutations feed the mutation-observation log and the
//! slot-change queue.

use std::collections::HashMap;

use crate::environment::ResizeObservations;
use crate::events::EventTargets;
use crate::geometry::Rect;
use crate::mutation::{MutationKind, MutationLog, MutationRecord};
use crate::{Node, NodeData, NodeId};

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child of the given parent
    #[error("Node is not a child")]
    NotAChild,
    /// Host already has a shadow root
    #[error("Shadow root already attached")]
    ShadowAlreadyAttached,
}

/// Arena-based DOM tree plus the host surfaces the resize engine
/// observes: geometry, mutation log, event targets, and native resize
/// observations
#[derive(Debug, Default)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    /// host element -> shadow root node
    pub(crate) shadow: HashMap<NodeId, NodeId>,
    pub(crate) geometry: HashMap<NodeId, Rect>,
    pub(crate) mutation: MutationLog,
    pub(crate) events: EventTargets,
    pub(crate) resize_obs: ResizeObservations,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Light children of a node (shadow content is never included)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Check containment by parent-walk. Shadow roots have no parent,
    /// so containment never crosses an encapsulation boundary.
    pub fn contains(&self, root: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while !current.is_none() {
            if current == root {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// A node and all its light descendants, depth-first. Does not
    /// descend into shadow roots.
    pub fn light_subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if self.get(id).is_none() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Append a child node, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest);
        }

        let old_parent = self.nodes[child.index()].parent;
        if !old_parent.is_none() {
            self.remove_child(old_parent, child)?;
        }

        self.nodes[parent.index()].children.push(child);
        self.nodes[child.index()].parent = parent;

        self.record_mutation(MutationRecord {
            kind: MutationKind::ChildList,
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        self.notify_slot_change(parent);
        Ok(())
    }

    /// Remove a child node, leaving it detached
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return Err(DomError::NotFound);
        }
        let children = &mut self.nodes[parent.index()].children;
        let Some(pos) = children.iter().position(|&c| c == child) else {
            return Err(DomError::NotAChild);
        };
        children.remove(pos);
        self.nodes[child.index()].parent = NodeId::NONE;

        self.record_mutation(MutationRecord {
            kind: MutationKind::ChildList,
            target: parent,
            added: Vec::new(),
            removed: vec![child],
        });
        self.notify_slot_change(parent);
        Ok(())
    }

    /// Set an element attribute
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let element = self
            .get_mut(node)
            .ok_or(DomError::NotFound)?
            .as_element_mut()
            .ok_or(DomError::InvalidNodeType)?;
        element.set_attr(name, value);

        self.record_mutation(MutationRecord {
            kind: MutationKind::Attributes,
            target: node,
            added: Vec::new(),
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Replace a text node's content
    pub fn set_text(&mut self, node: NodeId, content: impl Into<String>) -> DomResult<()> {
        match &mut self.get_mut(node).ok_or(DomError::NotFound)?.data {
            NodeData::Text(t) => *t = content.into(),
            _ => return Err(DomError::InvalidNodeType),
        }

        self.record_mutation(MutationRecord {
            kind: MutationKind::CharacterData,
            target: node,
            added: Vec::new(),
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Queue a slot-change delivery when a shadow host's light child
    /// list (its default slot assignment) changed
    fn notify_slot_change(&mut self, parent: NodeId) {
        if self.shadow.contains_key(&parent) {
            self.events.queue_slot_change(parent);
        }
    }
}
