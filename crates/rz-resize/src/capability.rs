//! Capability detection
//!
//! One-time classification of the host environment into the three
//! flags strategy selection needs. Pure inspection, no side effects,
//! no error path: an inconclusive environment reads as all-false and
//! degrades to the weakest strategy.

use rz_dom::Environment;

/// Detected host capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// A resize-observation primitive exists and is a true native
    /// implementation, not a user-supplied polyfill
    pub has_native_resize_observer: bool,
    /// The component model runs under the shady-DOM structural shim.
    /// The shim's presence marker only exists after the first
    /// lifecycle attachment, so detection runs at initialization time,
    /// never in a constructor.
    pub using_shady_dom: bool,
    /// Safari-family identification without a Chromium marker
    pub is_safari: bool,
}

impl Capabilities {
    /// Classify a host environment
    pub fn detect(env: &Environment) -> Self {
        let has_native_resize_observer = env
            .resize_observer
            .as_ref()
            .is_some_and(|support| support.is_native());

        let is_safari =
            env.user_agent.contains("Safari/") && !env.user_agent.contains("Chrome/");

        Self {
            has_native_resize_observer,
            using_shady_dom: env.shady_dom,
            is_safari,
        }
    }
}
