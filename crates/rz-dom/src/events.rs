//! Window/document event targets
//!
//! Per-listener delivery queues for the host-level events the resize
//! strategies subscribe to, plus slot-change listeners on shadow
//! hosts. Listeners are registered per monitor instance and removed
//! exactly on teardown; nothing is globally deduplicated.

use std::collections::HashMap;

use crate::{DomTree, NodeId};

/// Window/document level event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEventKind {
    /// Window resize
    Resize,
    /// Document transition completion
    TransitionEnd,
    /// Pointer movement
    MouseMove,
    /// Touch movement
    TouchMove,
}

/// Listener identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u32);

#[derive(Debug)]
enum ListenTo {
    Host(HostEventKind),
    SlotChange(NodeId),
}

#[derive(Debug)]
struct Listener {
    target: ListenTo,
    pending: usize,
}

/// Registry of live event listeners
#[derive(Debug, Default)]
pub(crate) struct EventTargets {
    next: u32,
    listeners: HashMap<ListenerId, Listener>,
}

impl EventTargets {
    fn add(&mut self, target: ListenTo) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.listeners.insert(
            id,
            Listener {
                target,
                pending: 0,
            },
        );
        id
    }

    pub(crate) fn queue_slot_change(&mut self, host: NodeId) {
        for listener in self.listeners.values_mut() {
            if matches!(listener.target, ListenTo::SlotChange(h) if h == host) {
                listener.pending += 1;
            }
        }
    }
}

impl DomTree {
    /// Subscribe to a window/document event
    pub fn add_event_listener(&mut self, kind: HostEventKind) -> ListenerId {
        self.events.add(ListenTo::Host(kind))
    }

    /// Subscribe to slot-change on a shadow host's default slot
    pub fn add_slot_listener(&mut self, host: NodeId) -> ListenerId {
        self.events.add(ListenTo::SlotChange(host))
    }

    /// Remove a listener; pending deliveries are dropped with it
    pub fn remove_event_listener(&mut self, id: ListenerId) {
        self.events.listeners.remove(&id);
    }

    /// Dispatch a host event, queueing one delivery per subscribed
    /// listener
    pub fn dispatch_event(&mut self, kind: HostEventKind) {
        for listener in self.events.listeners.values_mut() {
            if matches!(listener.target, ListenTo::Host(k) if k == kind) {
                listener.pending += 1;
            }
        }
    }

    /// Drain a listener's pending delivery count
    pub fn take_events(&mut self, id: ListenerId) -> usize {
        self.events
            .listeners
            .get_mut(&id)
            .map(|l| std::mem::take(&mut l.pending))
            .unwrap_or(0)
    }

    /// Number of live listeners (test observability)
    pub fn listener_count(&self) -> usize {
        self.events.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShadowRootMode;

    #[test]
    fn test_dispatch_and_drain() {
        let mut dom = DomTree::new();
        let resize = dom.add_event_listener(HostEventKind::Resize);
        let motion = dom.add_event_listener(HostEventKind::MouseMove);

        dom.dispatch_event(HostEventKind::Resize);
        dom.dispatch_event(HostEventKind::Resize);

        assert_eq!(dom.take_events(resize), 2);
        assert_eq!(dom.take_events(resize), 0);
        assert_eq!(dom.take_events(motion), 0);
    }

    #[test]
    fn test_removed_listener_receives_nothing() {
        let mut dom = DomTree::new();
        let resize = dom.add_event_listener(HostEventKind::Resize);
        dom.remove_event_listener(resize);

        dom.dispatch_event(HostEventKind::Resize);
        assert_eq!(dom.take_events(resize), 0);
        assert_eq!(dom.listener_count(), 0);
    }

    #[test]
    fn test_slot_change_on_shadow_host() {
        let mut dom = DomTree::new();
        let host = dom.create_element("my-widget");
        dom.attach_shadow(host, ShadowRootMode::Open).unwrap();
        let slot = dom.add_slot_listener(host);

        let child = dom.create_element("div");
        dom.append_child(host, child).unwrap();
        assert_eq!(dom.take_events(slot), 1);

        dom.remove_child(host, child).unwrap();
        assert_eq!(dom.take_events(slot), 1);
    }

    #[test]
    fn test_no_slot_change_without_shadow() {
        let mut dom = DomTree::new();
        let plain = dom.create_element("div");
        let slot = dom.add_slot_listener(plain);

        let child = dom.create_element("span");
        dom.append_child(plain, child).unwrap();
        assert_eq!(dom.take_events(slot), 0);
    }
}
