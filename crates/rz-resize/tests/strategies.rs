//! End-to-end strategy scenarios: one per detection regime, plus the
//! Safari textarea workaround cycle.

use rz_dom::{DomTree, Environment, HostEventKind, Rect, ShadowRootMode};
use rz_resize::{ResizeAwareElement, Strategy};

/// Opt-in log output for debugging test runs (RUST_LOG=debug)
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn connected_element(
    dom: &mut DomTree,
    env: &Environment,
    position_aware: bool,
) -> ResizeAwareElement {
    init_tracing();
    let mut element = ResizeAwareElement::new(dom, position_aware).unwrap();
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    element.connected(dom, env);
    element.render_complete(dom);
    element.take_notifications();
    element
}

#[test]
fn native_observer_reports_resize() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::chromium(), false);
    assert_eq!(
        element.monitor().unwrap().strategy(),
        Some(Strategy::NativeObserver)
    );

    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 150.0, 50.0));
    element.poll(&mut dom);

    let notes = element.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].previous, Rect::from_xywh(0.0, 0.0, 100.0, 50.0));
    assert_eq!(notes[0].current, Rect::from_xywh(0.0, 0.0, 150.0, 50.0));

    // Exact repeat measures nothing new
    element.poll(&mut dom);
    assert!(element.take_notifications().is_empty());
}

#[test]
fn position_move_only_counts_when_aware() {
    let mut dom = DomTree::new();
    let mut unaware = connected_element(&mut dom, &Environment::chromium(), false);
    dom.set_geometry(unaware.node(), Rect::from_xywh(20.0, 0.0, 100.0, 50.0));
    unaware.poll(&mut dom);
    assert!(unaware.take_notifications().is_empty());

    let mut aware = connected_element(&mut dom, &Environment::chromium(), true);
    dom.set_geometry(aware.node(), Rect::from_xywh(20.0, 0.0, 100.0, 50.0));
    aware.poll(&mut dom);
    assert_eq!(aware.take_notifications().len(), 1);
}

#[test]
fn shady_fallback_reacts_to_window_resize_and_mutations() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::shady_polyfill(), false);
    assert_eq!(
        element.monitor().unwrap().strategy(),
        Some(Strategy::ShadowPolyfillFallback)
    );

    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 80.0));
    dom.dispatch_event(HostEventKind::Resize);
    element.poll(&mut dom);
    assert_eq!(element.take_notifications().len(), 1);

    // The shim surfaces shadow content as ordinary subtree content, so
    // a plain child mutation is enough to trigger a re-measurement
    let child = dom.create_element("span");
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 95.0));
    dom.append_child(element.node(), child).unwrap();
    element.poll(&mut dom);
    assert_eq!(element.take_notifications().len(), 1);
}

#[test]
fn shady_fallback_covers_shim_flattened_content_only() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::shady_polyfill(), false);

    // Shimmed component: its would-be shadow content lives in the
    // light tree, so the single subtree observer sees it
    let widget = dom.create_element("my-widget");
    dom.append_child(element.node(), widget).unwrap();
    element.poll(&mut dom);
    element.take_notifications();

    let flattened = dom.create_element("span");
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 70.0));
    dom.append_child(widget, flattened).unwrap();
    element.poll(&mut dom);
    assert_eq!(element.take_notifications().len(), 1);

    // A genuinely attached shadow root stays opaque: no tracker
    // recursion exists in this strategy, so nothing re-measures
    let other = dom.create_element("native-widget");
    dom.append_child(element.node(), other).unwrap();
    let shadow = dom.attach_shadow(other, ShadowRootMode::Open).unwrap();
    element.poll(&mut dom);
    element.take_notifications();

    let hidden = dom.create_element("div");
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 85.0));
    dom.append_child(shadow, hidden).unwrap();
    element.poll(&mut dom);
    assert!(element.take_notifications().is_empty());
}

#[test]
fn manual_watch_sees_mutation_two_shadow_levels_deep() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::bare(), false);
    assert_eq!(
        element.monitor().unwrap().strategy(),
        Some(Strategy::ManualSubtreeWatch)
    );

    // Slot in a widget that nests another widget behind two shadow
    // boundaries
    let outer = dom.create_element("outer-widget");
    let outer_shadow = dom.attach_shadow(outer, ShadowRootMode::Open).unwrap();
    let inner = dom.create_element("inner-widget");
    let inner_shadow = dom.attach_shadow(inner, ShadowRootMode::Open).unwrap();
    dom.append_child(outer_shadow, inner).unwrap();
    dom.append_child(element.node(), outer).unwrap();
    element.poll(&mut dom);
    element.take_notifications();

    // A mutation behind both boundaries still drives a re-measurement
    let leaf = dom.create_element("div");
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 120.0));
    dom.append_child(inner_shadow, leaf).unwrap();
    element.poll(&mut dom);

    assert_eq!(element.take_notifications().len(), 1);
}

#[test]
fn manual_watch_rederives_trackers_on_slot_change() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::bare(), false);

    let first = dom.create_element("div");
    dom.append_child(element.node(), first).unwrap();
    element.poll(&mut dom);
    element.take_notifications();

    // The newly slotted node is instrumented: mutations under it count
    let grandchild = dom.create_element("span");
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 130.0, 50.0));
    dom.append_child(first, grandchild).unwrap();
    element.poll(&mut dom);
    assert_eq!(element.take_notifications().len(), 1);

    // Unslotting it tears its instrumentation down again
    dom.remove_child(element.node(), first).unwrap();
    element.poll(&mut dom);
    element.take_notifications();
    assert_eq!(dom.observer_count(), 0);
}

#[test]
fn safari_workaround_cycles_with_textarea_presence() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::safari(), false);
    assert_eq!(
        element.monitor().unwrap().strategy(),
        Some(Strategy::ManualSubtreeWatch)
    );
    assert!(!element.monitor().unwrap().is_safari_polling());

    // A resizable textarea appears inside the slotted subtree
    let wrapper = dom.create_element("div");
    dom.append_child(element.node(), wrapper).unwrap();
    element.poll(&mut dom);
    let textarea = dom.create_element("textarea");
    dom.append_child(wrapper, textarea).unwrap();
    element.poll(&mut dom);
    assert!(element.monitor().unwrap().is_safari_polling());

    // While polling, pointer motion drives re-measurement
    element.take_notifications();
    dom.set_geometry(element.node(), Rect::from_xywh(0.0, 0.0, 100.0, 70.0));
    dom.dispatch_event(HostEventKind::MouseMove);
    element.poll(&mut dom);
    assert_eq!(element.take_notifications().len(), 1);

    // Removing the textarea turns the workaround back off
    dom.remove_child(wrapper, textarea).unwrap();
    element.poll(&mut dom);
    assert!(!element.monitor().unwrap().is_safari_polling());
}

#[test]
fn non_safari_never_polls() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::bare(), false);

    let textarea = dom.create_element("textarea");
    dom.append_child(element.node(), textarea).unwrap();
    element.poll(&mut dom);

    assert!(!element.monitor().unwrap().is_safari_polling());
}

#[test]
fn disconnect_leaves_no_live_subscriptions() {
    let mut dom = DomTree::new();
    let mut element = connected_element(&mut dom, &Environment::safari(), false);

    let textarea = dom.create_element("textarea");
    dom.append_child(element.node(), textarea).unwrap();
    element.poll(&mut dom);
    assert!(element.monitor().unwrap().is_safari_polling());

    element.disconnected(&mut dom);
    element.disconnected(&mut dom);

    assert_eq!(dom.listener_count(), 0);
    assert_eq!(dom.observer_count(), 0);
    assert_eq!(dom.resize_observation_count(), 0);
}
