//! Mutation observation primitive
//!
//! Generic subtree mutation observation. Record routing walks a
//! target's ancestor chain, and shadow roots have no parent, so a
//! subtree observer on a light root cannot see inside descendant
//! shadow roots. That blindness is what the recursive shadow tracker
//! exists to work around.

use std::collections::HashMap;

use crate::{DomTree, NodeId};

/// Mutation observer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MutationObserverId(pub(crate) u32);

/// What an observation listens for
#[derive(Debug, Clone, Copy)]
pub struct ObserveOptions {
    pub subtree: bool,
    pub attributes: bool,
    pub child_list: bool,
    pub character_data: bool,
}

impl ObserveOptions {
    /// Full-subtree coverage: attributes, child list, and text
    pub fn full_subtree() -> Self {
        Self {
            subtree: true,
            attributes: true,
            child_list: true,
            character_data: true,
        }
    }
}

/// Mutation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    ChildList,
    Attributes,
    CharacterData,
}

/// One observed mutation
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// The mutated node (the parent, for child-list changes)
    pub target: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
}

#[derive(Debug)]
struct Observation {
    root: NodeId,
    options: ObserveOptions,
    queue: Vec<MutationRecord>,
}

/// Registry of live mutation observations
#[derive(Debug, Default)]
pub(crate) struct MutationLog {
    next: u32,
    observations: HashMap<MutationObserverId, Observation>,
}

impl DomTree {
    /// Register a mutation observation rooted at `root`
    pub fn observe(&mut self, root: NodeId, options: ObserveOptions) -> MutationObserverId {
        let id = MutationObserverId(self.mutation.next);
        self.mutation.next += 1;
        self.mutation.observations.insert(
            id,
            Observation {
                root,
                options,
                queue: Vec::new(),
            },
        );
        tracing::trace!(?root, subtree = options.subtree, "mutation observation registered");
        id
    }

    /// Disconnect an observation; further mutations are structurally
    /// invisible to it
    pub fn disconnect(&mut self, id: MutationObserverId) {
        self.mutation.observations.remove(&id);
    }

    /// Drain an observation's pending records
    pub fn take_records(&mut self, id: MutationObserverId) -> Vec<MutationRecord> {
        self.mutation
            .observations
            .get_mut(&id)
            .map(|o| std::mem::take(&mut o.queue))
            .unwrap_or_default()
    }

    /// Number of live observations (test observability)
    pub fn observer_count(&self) -> usize {
        self.mutation.observations.len()
    }

    /// Route a record to every observation whose scope covers the
    /// target. The ancestor walk stops where parents end, which
    /// includes every shadow-root boundary.
    pub(crate) fn record_mutation(&mut self, record: MutationRecord) {
        let mut scope = Vec::new();
        let mut current = record.target;
        while !current.is_none() {
            scope.push(current);
            current = match self.get(current) {
                Some(n) => n.parent,
                None => break,
            };
        }

        for observation in self.mutation.observations.values_mut() {
            let wants_kind = match record.kind {
                MutationKind::ChildList => observation.options.child_list,
                MutationKind::Attributes => observation.options.attributes,
                MutationKind::CharacterData => observation.options.character_data,
            };
            if !wants_kind {
                continue;
            }
            let in_scope = if observation.options.subtree {
                scope.contains(&observation.root)
            } else {
                observation.root == record.target
            };
            if in_scope {
                observation.queue.push(record.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShadowRootMode;

    #[test]
    fn test_subtree_observation() {
        let mut dom = DomTree::new();
        let root = dom.create_element("div");
        let child = dom.create_element("span");
        dom.append_child(root, child).unwrap();

        let id = dom.observe(root, ObserveOptions::full_subtree());
        let grandchild = dom.create_text("hi");
        dom.append_child(child, grandchild).unwrap();

        let records = dom.take_records(id);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, MutationKind::ChildList);
        assert_eq!(records[0].target, child);
        assert_eq!(records[0].added, vec![grandchild]);
        assert!(dom.take_records(id).is_empty());
    }

    #[test]
    fn test_non_subtree_observation_sees_root_only() {
        let mut dom = DomTree::new();
        let root = dom.create_element("div");
        let child = dom.create_element("span");
        dom.append_child(root, child).unwrap();

        let id = dom.observe(
            root,
            ObserveOptions {
                subtree: false,
                ..ObserveOptions::full_subtree()
            },
        );
        let a = dom.create_element("p");
        dom.append_child(child, a).unwrap();
        assert!(dom.take_records(id).is_empty());

        let b = dom.create_element("p");
        dom.append_child(root, b).unwrap();
        assert_eq!(dom.take_records(id).len(), 1);
    }

    #[test]
    fn test_observation_blind_across_shadow_boundary() {
        let mut dom = DomTree::new();
        let root = dom.create_element("div");
        let widget = dom.create_element("my-widget");
        dom.append_child(root, widget).unwrap();
        let shadow = dom.attach_shadow(widget, ShadowRootMode::Open).unwrap();

        let id = dom.observe(root, ObserveOptions::full_subtree());
        let inner = dom.create_element("span");
        dom.append_child(shadow, inner).unwrap();

        assert!(dom.take_records(id).is_empty());
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let mut dom = DomTree::new();
        let root = dom.create_element("div");
        let id = dom.observe(root, ObserveOptions::full_subtree());
        dom.disconnect(id);

        let child = dom.create_element("span");
        dom.append_child(root, child).unwrap();
        assert!(dom.take_records(id).is_empty());
        assert_eq!(dom.observer_count(), 0);
    }
}
