//! Resize-aware element
//!
//! Thin lifecycle wrapper around the monitor: a host element with an
//! open shadow root and default slot, eager baseline capture at
//! insertion, and strategy installation deferred until after the first
//! render pass.

use rz_dom::{DomResult, DomTree, Environment, NodeId, ShadowRootMode};

use crate::{Capabilities, ResizeMonitor, ResizeNotification};

/// The `rz-resize-aware` host element
#[derive(Debug)]
pub struct ResizeAwareElement {
    node: NodeId,
    position_aware: bool,
    monitor: Option<ResizeMonitor>,
    init_queued: bool,
}

impl ResizeAwareElement {
    /// Create the host element with its shadow root and default slot
    pub fn new(dom: &mut DomTree, position_aware: bool) -> DomResult<Self> {
        let node = dom.create_element("rz-resize-aware");
        dom.attach_shadow(node, ShadowRootMode::Open)?;
        Ok(Self {
            node,
            position_aware,
            monitor: None,
            init_queued: false,
        })
    }

    /// The host element node
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The monitor, once the element has been connected
    pub fn monitor(&self) -> Option<&ResizeMonitor> {
        self.monitor.as_ref()
    }

    /// Insertion into the live tree: classify the environment (the
    /// shim marker is only readable now), capture the baseline
    /// eagerly, and queue the deferred initialization.
    pub fn connected(&mut self, dom: &DomTree, env: &Environment) {
        let caps = Capabilities::detect(env);
        let mut monitor = ResizeMonitor::new(caps, self.node, self.position_aware);
        monitor.capture_baseline(dom);
        self.monitor = Some(monitor);
        self.init_queued = true;
    }

    /// The one-shot callback after the first render pass: install the
    /// strategy. No retry if the host never delivers it.
    pub fn render_complete(&mut self, dom: &mut DomTree) {
        if !self.init_queued {
            return;
        }
        self.init_queued = false;
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.attach(dom);
        }
    }

    /// Removal from the live tree: tear the strategy down
    pub fn disconnected(&mut self, dom: &mut DomTree) {
        self.init_queued = false;
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.detach(dom);
        }
    }

    /// Process pending deliveries for the installed strategy
    pub fn poll(&mut self, dom: &mut DomTree) {
        if let Some(monitor) = self.monitor.as_mut() {
            monitor.poll(dom);
        }
    }

    /// Drain emitted resize notifications
    pub fn take_notifications(&mut self) -> Vec<ResizeNotification> {
        self.monitor
            .as_mut()
            .map(ResizeMonitor::take_notifications)
            .unwrap_or_default()
    }
}
