//! Detection strategy selection
//!
//! Three mutually exclusive strategies, chosen exactly once per
//! monitor initialization. The choice is a pure priority function of
//! the capability flags.

use crate::Capabilities;

/// The selected detection mechanism
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Subscribe the native resize observer directly on the element
    NativeObserver,
    /// Window resize + transition-end + one non-recursive subtree
    /// mutation observer; the shady shim makes shadow content visible
    /// to it
    ShadowPolyfillFallback,
    /// Window resize + transition-end + one recursive shadow tracker
    /// per slotted node
    ManualSubtreeWatch,
}

impl Strategy {
    /// Priority selection: native observer first, shim-assisted
    /// fallback second, manual watch last
    pub fn select(caps: &Capabilities) -> Strategy {
        if caps.has_native_resize_observer {
            Strategy::NativeObserver
        } else if caps.using_shady_dom {
            Strategy::ShadowPolyfillFallback
        } else {
            Strategy::ManualSubtreeWatch
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps(native: bool, shady: bool, safari: bool) -> Capabilities {
        Capabilities {
            has_native_resize_observer: native,
            using_shady_dom: shady,
            is_safari: safari,
        }
    }

    #[test]
    fn test_selection_priority() {
        assert_eq!(
            Strategy::select(&caps(true, false, false)),
            Strategy::NativeObserver
        );
        // Native wins even when the shim is also present
        assert_eq!(
            Strategy::select(&caps(true, true, true)),
            Strategy::NativeObserver
        );
        assert_eq!(
            Strategy::select(&caps(false, true, false)),
            Strategy::ShadowPolyfillFallback
        );
        assert_eq!(
            Strategy::select(&caps(false, false, false)),
            Strategy::ManualSubtreeWatch
        );
        // Safari-family never affects the selection itself
        assert_eq!(
            Strategy::select(&caps(false, false, true)),
            Strategy::ManualSubtreeWatch
        );
    }
}
