//! Safari textarea workaround
//!
//! Safari's mutation observer does not report textarea resizes caused
//! by the user dragging the resize handle. Hit-testing the handle is
//! unreliable because the textarea lags behind the cursor, so while a
//! resizable textarea exists in the observed subtree we re-check on
//! every pointer/touch movement instead of on a timer.

use rz_dom::{DomTree, HostEventKind, ListenerId};

/// Two-state polling augmentation: Off, or Polling with a pair of
/// pointer-motion listeners installed
#[derive(Debug, Default)]
pub(crate) struct SafariWorkaround {
    listeners: Option<(ListenerId, ListenerId)>,
}

impl SafariWorkaround {
    /// Whether the workaround is currently polling
    pub(crate) fn is_polling(&self) -> bool {
        self.listeners.is_some()
    }

    /// Enter or leave the polling state. Re-entering the current state
    /// is a no-op, so listeners are never attached or detached twice.
    pub(crate) fn set_polling(&mut self, dom: &mut DomTree, polling: bool) {
        if polling == self.is_polling() {
            return;
        }
        if polling {
            let mouse = dom.add_event_listener(HostEventKind::MouseMove);
            let touch = dom.add_event_listener(HostEventKind::TouchMove);
            self.listeners = Some((mouse, touch));
            tracing::debug!("safari textarea workaround: polling");
        } else if let Some((mouse, touch)) = self.listeners.take() {
            dom.remove_event_listener(mouse);
            dom.remove_event_listener(touch);
            tracing::debug!("safari textarea workaround: off");
        }
    }

    /// Drain pending pointer/touch deliveries
    pub(crate) fn take_pointer_events(&mut self, dom: &mut DomTree) -> usize {
        match self.listeners {
            Some((mouse, touch)) => dom.take_events(mouse) + dom.take_events(touch),
            None => 0,
        }
    }
}
