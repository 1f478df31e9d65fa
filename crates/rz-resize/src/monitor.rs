//! Change monitor
//!
//! Owns the active detection strategy, the last known geometry, and
//! the change comparison. One monitor observes one element; the
//! strategy is selected once per attach and fully torn down before any
//! replacement is installed.

use rz_dom::{
    DomTree, HostEventKind, ListenerId, MutationObserverId, NodeId, ObserveOptions, Rect,
    ResizeObservationId,
};

use crate::safari::SafariWorkaround;
use crate::tracker::ShadowTreeTracker;
use crate::{Capabilities, Strategy};

/// Change notification payload: the previously recorded geometry and
/// the fresh measurement that replaced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeNotification {
    pub previous: Rect,
    pub current: Rect,
}

/// Everything needed to reverse the installed strategy's side effects.
/// Taking the value out is the one-shot teardown; it can never run
/// twice.
#[derive(Debug)]
enum ActiveStrategy {
    Native {
        observation: ResizeObservationId,
    },
    Polyfill {
        resize: ListenerId,
        transition: ListenerId,
        observer: MutationObserverId,
    },
    Manual(ManualWatch),
}

#[derive(Debug)]
struct ManualWatch {
    resize: ListenerId,
    transition: ListenerId,
    slot: ListenerId,
    trackers: Vec<ShadowTreeTracker>,
}

/// Per-element resize monitor
#[derive(Debug)]
pub struct ResizeMonitor {
    element: NodeId,
    position_aware: bool,
    caps: Capabilities,
    last_rect: Rect,
    baseline_set: bool,
    active: Option<ActiveStrategy>,
    workaround: SafariWorkaround,
    notifications: Vec<ResizeNotification>,
}

impl ResizeMonitor {
    /// Create a detached monitor for one element
    pub fn new(caps: Capabilities, element: NodeId, position_aware: bool) -> Self {
        Self {
            element,
            position_aware,
            caps,
            last_rect: Rect::ZERO,
            baseline_set: false,
            active: None,
            workaround: SafariWorkaround::default(),
            notifications: Vec::new(),
        }
    }

    /// The observed element
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The strategy currently installed, if attached
    pub fn strategy(&self) -> Option<Strategy> {
        self.active.as_ref().map(|active| match active {
            ActiveStrategy::Native { .. } => Strategy::NativeObserver,
            ActiveStrategy::Polyfill { .. } => Strategy::ShadowPolyfillFallback,
            ActiveStrategy::Manual(_) => Strategy::ManualSubtreeWatch,
        })
    }

    /// Whether the Safari textarea workaround is polling
    pub fn is_safari_polling(&self) -> bool {
        self.workaround.is_polling()
    }

    /// Capture the element's current geometry as the comparison
    /// baseline. Called eagerly at insertion, before strategy
    /// installation completes.
    pub fn capture_baseline(&mut self, dom: &DomTree) {
        self.last_rect = dom.bounding_rect(self.element);
        self.baseline_set = true;
    }

    /// Install the detection strategy. Any live strategy is torn down
    /// first, then one immediate measurement catches geometry set
    /// before attachment completed.
    pub fn attach(&mut self, dom: &mut DomTree) {
        self.detach(dom);
        if !self.baseline_set {
            self.capture_baseline(dom);
        }

        let strategy = Strategy::select(&self.caps);
        tracing::debug!(element = ?self.element, ?strategy, "installing resize strategy");

        self.active = Some(match strategy {
            Strategy::NativeObserver => ActiveStrategy::Native {
                observation: dom.observe_resize(self.element),
            },
            Strategy::ShadowPolyfillFallback => ActiveStrategy::Polyfill {
                resize: dom.add_event_listener(HostEventKind::Resize),
                transition: dom.add_event_listener(HostEventKind::TransitionEnd),
                observer: dom.observe(self.element, ObserveOptions::full_subtree()),
            },
            Strategy::ManualSubtreeWatch => ActiveStrategy::Manual(ManualWatch {
                resize: dom.add_event_listener(HostEventKind::Resize),
                transition: dom.add_event_listener(HostEventKind::TransitionEnd),
                slot: dom.add_slot_listener(self.element),
                trackers: Vec::new(),
            }),
        });

        // Some engines do not signal slot assignment for parse-time
        // content, so the tracker set is derived once at installation.
        if matches!(self.active, Some(ActiveStrategy::Manual(_))) {
            self.rederive_trackers(dom);
        }

        self.check_for_change(dom);
    }

    /// Reverse every side effect of the installed strategy. No-op when
    /// already detached.
    pub fn detach(&mut self, dom: &mut DomTree) {
        if let Some(active) = self.active.take() {
            match active {
                ActiveStrategy::Native { observation } => dom.unobserve_resize(observation),
                ActiveStrategy::Polyfill {
                    resize,
                    transition,
                    observer,
                } => {
                    dom.remove_event_listener(resize);
                    dom.remove_event_listener(transition);
                    dom.disconnect(observer);
                }
                ActiveStrategy::Manual(manual) => {
                    dom.remove_event_listener(manual.resize);
                    dom.remove_event_listener(manual.transition);
                    dom.remove_event_listener(manual.slot);
                    for tracker in manual.trackers {
                        tracker.destroy(dom);
                    }
                }
            }
            tracing::debug!(element = ?self.element, "resize strategy torn down");
        }
        self.workaround.set_polling(dom, false);
    }

    /// Measure and compare against the baseline. Width/height always
    /// count; x/y only when position-aware. Strict per-field
    /// inequality, no tolerance. A change pushes exactly one
    /// notification and replaces the baseline.
    pub fn check_for_change(&mut self, dom: &DomTree) -> bool {
        let current = dom.bounding_rect(self.element);
        let changed = current.width != self.last_rect.width
            || current.height != self.last_rect.height
            || (self.position_aware
                && (current.x != self.last_rect.x || current.y != self.last_rect.y));
        if changed {
            self.notifications.push(ResizeNotification {
                previous: self.last_rect,
                current,
            });
            self.last_rect = current;
        }
        changed
    }

    /// Drain emitted notifications
    pub fn take_notifications(&mut self) -> Vec<ResizeNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Process pending deliveries for the installed strategy. Each
    /// qualifying event triggers one measurement; tracked-set
    /// reconciliation always completes before its remeasurement.
    pub fn poll(&mut self, dom: &mut DomTree) {
        enum Pending {
            Native(ResizeObservationId),
            Polyfill(ListenerId, ListenerId, MutationObserverId),
            Manual,
        }

        let pending = match self.active.as_ref() {
            None => return,
            Some(ActiveStrategy::Native { observation }) => Pending::Native(*observation),
            Some(ActiveStrategy::Polyfill {
                resize,
                transition,
                observer,
            }) => Pending::Polyfill(*resize, *transition, *observer),
            Some(ActiveStrategy::Manual(_)) => Pending::Manual,
        };

        match pending {
            Pending::Native(observation) => {
                for _ in 0..dom.take_resize_notifications(observation) {
                    self.check_for_change(dom);
                }
            }
            Pending::Polyfill(resize, transition, observer) => {
                let mut checks = dom.take_events(resize) + dom.take_events(transition);
                if !dom.take_records(observer).is_empty() {
                    checks += 1;
                }
                for _ in 0..checks {
                    self.check_for_change(dom);
                }
            }
            Pending::Manual => self.poll_manual(dom),
        }
    }

    fn poll_manual(&mut self, dom: &mut DomTree) {
        let (resize, transition, slot) = match self.active.as_ref() {
            Some(ActiveStrategy::Manual(manual)) => (manual.resize, manual.transition, manual.slot),
            _ => return,
        };

        let mut checks = dom.take_events(resize) + dom.take_events(transition);

        // Slot reassignment invalidates the whole tracker set
        if dom.take_events(slot) > 0 {
            self.rederive_trackers(dom);
        }

        let mut textarea_changed = false;
        if let Some(ActiveStrategy::Manual(manual)) = self.active.as_mut() {
            for tracker in manual.trackers.iter_mut() {
                let pass = tracker.process_pending(dom);
                checks += pass.batches;
                textarea_changed |= pass.textarea_changed;
            }
        }
        if textarea_changed {
            self.refresh_workaround(dom);
        }

        for _ in 0..checks {
            self.check_for_change(dom);
        }

        for _ in 0..self.workaround.take_pointer_events(dom) {
            self.check_for_change(dom);
        }
    }

    /// Destroy all live trackers and rebuild one per currently slotted
    /// node, then check immediately: content present at parse time
    /// never produces a slot-change signal on some engines.
    fn rederive_trackers(&mut self, dom: &mut DomTree) {
        let element = self.element;
        if let Some(ActiveStrategy::Manual(manual)) = self.active.as_mut() {
            for tracker in manual.trackers.drain(..) {
                tracker.destroy(dom);
            }
            manual.trackers = dom
                .assigned_nodes(element)
                .into_iter()
                .map(|node| ShadowTreeTracker::new(dom, node))
                .collect();
        }
        self.check_for_change(dom);
        self.refresh_workaround(dom);
    }

    /// Recompute the aggregated textarea signal and move the Safari
    /// workaround state machine accordingly
    fn refresh_workaround(&mut self, dom: &mut DomTree) {
        if !self.caps.is_safari {
            return;
        }
        let has_textarea = match self.active.as_ref() {
            Some(ActiveStrategy::Manual(manual)) => {
                manual.trackers.iter().any(|t| t.has_textarea())
            }
            _ => false,
        };
        self.workaround.set_polling(dom, has_textarea);
    }
}
