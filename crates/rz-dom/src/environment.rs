//! Host environment
//!
//! What a runtime advertises about itself: its identification string,
//! its resize-observation primitive (if any) and that primitive's
//! reported source text, and whether the component model runs under
//! the shady-DOM structural shim. Also carries the native resize
//! observation registry fed by geometry changes.

use std::collections::HashMap;

use crate::{DomTree, NodeId};

/// Host environment description, inspected once by capability
/// detection
#[derive(Debug, Clone)]
pub struct Environment {
    /// Identification string (user agent)
    pub user_agent: String,
    /// The advertised resize-observation primitive, if any
    pub resize_observer: Option<ResizeObserverSupport>,
    /// Component model runs under the shady-DOM structural shim
    pub shady_dom: bool,
}

impl Environment {
    /// Chromium-family runtime with a native resize observer
    pub fn chromium() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
            resize_observer: Some(ResizeObserverSupport::native()),
            shady_dom: false,
        }
    }

    /// Safari-family runtime without a resize observer
    pub fn safari() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                         AppleWebKit/605.1.15 (KHTML, like Gecko) Version/12.0 Safari/605.1.15"
                .to_string(),
            resize_observer: None,
            shady_dom: false,
        }
    }

    /// Runtime with neither a resize observer nor native shadow DOM,
    /// running the structural shim.
    ///
    /// Under the shim, components have no real encapsulation: their
    /// "shadow" content is rendered as ordinary light children, which
    /// is why one subtree observer covers it. `attach_shadow` still
    /// builds a genuinely opaque boundary in this model; shimmed
    /// content must be authored as light DOM.
    pub fn shady_polyfill() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:60.0) \
                         Gecko/20100101 Firefox/60.0"
                .to_string(),
            resize_observer: None,
            shady_dom: true,
        }
    }

    /// Runtime advertising nothing useful
    pub fn bare() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:115.0) \
                         Gecko/20100101 Firefox/115.0"
                .to_string(),
            resize_observer: None,
            shady_dom: false,
        }
    }
}

/// An advertised resize-observation primitive
#[derive(Debug, Clone)]
pub struct ResizeObserverSupport {
    source: String,
}

impl ResizeObserverSupport {
    /// A true native implementation
    pub fn native() -> Self {
        Self {
            source: "function ResizeObserver() { [native code] }".to_string(),
        }
    }

    /// A user-supplied polyfill (its source is ordinary script text)
    pub fn polyfill() -> Self {
        Self {
            source: "function ResizeObserver(callback) { this._cb = callback; }".to_string(),
        }
    }

    /// Build from arbitrary reported source text
    pub fn from_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// The primitive's reported source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// A true native implementation carries the native marker in its
    /// source representation
    pub fn is_native(&self) -> bool {
        self.source.contains("[native code]")
    }
}

/// Native resize observation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResizeObservationId(pub(crate) u32);

#[derive(Debug)]
struct ResizeObservation {
    node: NodeId,
    pending: usize,
}

/// Registry of live native resize observations
#[derive(Debug, Default)]
pub(crate) struct ResizeObservations {
    next: u32,
    observations: HashMap<ResizeObservationId, ResizeObservation>,
}

impl ResizeObservations {
    pub(crate) fn queue_for(&mut self, node: NodeId) {
        for observation in self.observations.values_mut() {
            if observation.node == node {
                observation.pending += 1;
            }
        }
    }
}

impl DomTree {
    /// Subscribe the native resize observer to a node
    pub fn observe_resize(&mut self, node: NodeId) -> ResizeObservationId {
        let id = ResizeObservationId(self.resize_obs.next);
        self.resize_obs.next += 1;
        self.resize_obs
            .observations
            .insert(id, ResizeObservation { node, pending: 0 });
        id
    }

    /// Unsubscribe a native resize observation
    pub fn unobserve_resize(&mut self, id: ResizeObservationId) {
        self.resize_obs.observations.remove(&id);
    }

    /// Drain pending notifications for an observation
    pub fn take_resize_notifications(&mut self, id: ResizeObservationId) -> usize {
        self.resize_obs
            .observations
            .get_mut(&id)
            .map(|o| std::mem::take(&mut o.pending))
            .unwrap_or(0)
    }

    /// Number of live native resize observations (test observability)
    pub fn resize_observation_count(&self) -> usize {
        self.resize_obs.observations.len()
    }
}
