//! rz Resize - resize-aware change detection
//!
//! Detects size (and optionally position) changes of an element where
//! no single native primitive exists for it. Classifies the host
//! environment once, picks one of three detection strategies, and for
//! the weakest strategy recursively instruments every shadow boundary
//! in the observed subtree so mutations behind encapsulation still
//! surface.

mod capability;
mod element;
mod monitor;
mod safari;
mod strategy;
mod tracker;

pub use capability::Capabilities;
pub use element::ResizeAwareElement;
pub use monitor::{ResizeMonitor, ResizeNotification};
pub use strategy::Strategy;
pub use tracker::{ShadowTreeTracker, TrackerPass};
