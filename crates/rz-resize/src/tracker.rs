//! Recursive shadow tree tracker
//!
//! Subtree mutation observation cannot see across shadow boundaries,
//! so every boundary in the observed subtree gets its own observation,
//! recursively. Boundary-crossing is the only recursive step; ordinary
//! descendants are walked iteratively, which keeps live observations
//! proportional to the number of boundaries, not node count.

use std::collections::HashMap;

use rz_dom::{DomTree, MutationObserverId, NodeId, ObserveOptions};

/// One tracked root and its nested trackers, keyed by boundary host
#[derive(Debug)]
pub struct ShadowTreeTracker {
    root: NodeId,
    observer: MutationObserverId,
    tracked: HashMap<NodeId, ShadowTreeTracker>,
    has_textarea: bool,
}

/// Outcome of one batch-processing pass
#[derive(Debug, Clone, Copy, Default)]
pub struct TrackerPass {
    /// Mutation batches surfaced, across this tracker and its nested
    /// trackers
    pub batches: usize,
    /// The resizable-textarea aggregate flipped somewhere in the pass
    pub textarea_changed: bool,
}

impl ShadowTreeTracker {
    /// Instrument `root` with full-subtree observation and descend to
    /// instrument every already-present shadow boundary
    pub fn new(dom: &mut DomTree, root: NodeId) -> Self {
        let observer = dom.observe(root, ObserveOptions::full_subtree());
        let mut tracker = Self {
            root,
            observer,
            tracked: HashMap::new(),
            has_textarea: false,
        };
        tracker.track_boundaries(dom, root);
        tracker.has_textarea = tracker.scan_for_textarea(dom);
        tracing::debug!(?root, boundaries = tracker.tracked.len(), "shadow tracker installed");
        tracker
    }

    /// The root this tracker instruments
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether any resizable textarea exists in this tracker's scope
    /// or any nested tracker's
    pub fn has_textarea(&self) -> bool {
        self.has_textarea
    }

    /// Number of directly tracked boundaries (test observability)
    pub fn tracked_count(&self) -> usize {
        self.tracked.len()
    }

    /// Process pending mutation records. Per batch: instrument
    /// boundaries found under added nodes, destroy trackers whose
    /// boundary left the root's containment, then surface the batch.
    /// Reconciliation completes before the caller may remeasure.
    pub fn process_pending(&mut self, dom: &mut DomTree) -> TrackerPass {
        let records = dom.take_records(self.observer);
        let mut pass = TrackerPass {
            batches: usize::from(!records.is_empty()),
            textarea_changed: false,
        };

        for record in &records {
            for &added in &record.added {
                self.track_boundaries(dom, added);
            }
        }

        let stale: Vec<NodeId> = self
            .tracked
            .keys()
            .copied()
            .filter(|&host| !dom.contains(self.root, host))
            .collect();
        for host in stale {
            if let Some(nested) = self.tracked.remove(&host) {
                nested.destroy(dom);
            }
        }

        for nested in self.tracked.values_mut() {
            let nested_pass = nested.process_pending(dom);
            pass.batches += nested_pass.batches;
            pass.textarea_changed |= nested_pass.textarea_changed;
        }

        let has_textarea = self.scan_for_textarea(dom);
        if has_textarea != self.has_textarea {
            self.has_textarea = has_textarea;
            pass.textarea_changed = true;
        }
        pass
    }

    /// Disconnect this tracker's observation and recursively destroy
    /// every nested tracker
    pub fn destroy(mut self, dom: &mut DomTree) {
        dom.disconnect(self.observer);
        for (_, nested) in self.tracked.drain() {
            nested.destroy(dom);
        }
    }

    /// Walk the light subtree under `node` and spawn a nested tracker
    /// on each un-instrumented shadow boundary
    fn track_boundaries(&mut self, dom: &mut DomTree, node: NodeId) {
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(shadow) = dom.shadow_root(current) {
                if !self.tracked.contains_key(&current) {
                    let nested = ShadowTreeTracker::new(dom, shadow);
                    self.tracked.insert(current, nested);
                }
            }
            stack.extend(dom.children(current).iter().copied());
        }
    }

    /// Resizable textarea anywhere in scope: own light subtree or any
    /// nested tracker's aggregate
    fn scan_for_textarea(&self, dom: &DomTree) -> bool {
        let own = dom.light_subtree(self.root).into_iter().any(|id| {
            dom.get(id)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.is_resizable_textarea())
        });
        own || self.tracked.values().any(|t| t.has_textarea)
    }
}
