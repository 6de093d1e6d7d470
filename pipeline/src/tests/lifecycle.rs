use super::*;
use crate::backend::Backend;
use crate::render::overlay::TapTarget;
use crate::render::RenderedId;

#[test]
fn removal_dismisses_on_both_backends() {
    let h = Harness::new();
    h.pipeline.on_posted(&chat("k", "x"), &config(BackendPreference::Native));
    h.pipeline.on_removed("k");
    h.pipeline.on_removed("k");
    h.pipeline.on_removed("never-posted");
    let cancels = h.log().iter().filter(|l| l.starts_with("cancel")).count();
    assert_eq!(cancels, 1);
    let native = h.pipeline.coordinator().registry().get(Backend::Native).unwrap();
    assert_eq!(native.rendered_count(), 0);
}

#[test]
fn overlay_dismiss_by_rendered_id() {
    let h = Harness::new();
    let Some(id) = h.pipeline.on_posted(&chat("k", "x"), &config(BackendPreference::Overlay)) else {
        panic!("not rendered");
    };
    h.pipeline.coordinator().dismiss_by_rendered_id(id);
    h.queue.drain();
    assert_eq!(h.overlay_children(), 0);
    assert_eq!(
        h.log(),
        ["add container", "add 1 enter", "update 1 exit", "remove 1", "remove container"]
    );
}

#[test]
fn clear_all_empties_everything() {
    let h = Harness::new();
    h.pipeline.on_posted(&chat("a", "x"), &config(BackendPreference::Native));
    h.pipeline.clear_all();
    h.queue.drain();
    let native = h.pipeline.coordinator().registry().get(Backend::Native).unwrap();
    assert_eq!(native.rendered_count(), 0);
    assert!(matches!(
        h.pipeline.on_posted(&chat("b", "x"), &config(BackendPreference::Native)),
        Some(RenderedId::Native(_))
    ));
}

#[test]
fn tap_is_routed_through_the_queue() {
    let h = Harness::new();
    h.pipeline.on_posted(&chat("k", "x"), &config(BackendPreference::Overlay));
    h.pipeline.on_overlay_tap(1, TapTarget::Action(3));
    assert_eq!(h.queue.drain(), 2);
}
