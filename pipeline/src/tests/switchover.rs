use super::*;
use crate::backend::Backend;

#[test]
fn native_ids_are_cancelled_before_any_overlay_post() {
    let h = Harness::new();
    let native = config(BackendPreference::Native);
    h.pipeline.on_posted(&chat("a", "x"), &native);
    h.pipeline.on_posted(&chat("b", "y"), &native);

    let overlay = config(BackendPreference::Overlay);
    h.pipeline.on_posted(&chat("c", "z"), &overlay);
    h.queue.drain();

    let log = h.log();
    let cancels: Vec<usize> = log
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("cancel"))
        .map(|(i, _)| i)
        .collect();
    let first_add = log.iter().position(|l| l.starts_with("add")).unwrap();
    assert_eq!(cancels.len(), 2);
    assert!(cancels.iter().all(|&i| i < first_add), "{log:?}");
    assert_eq!(h.pipeline.current_backend(), Backend::Overlay);
    assert_eq!(h.overlay_children(), 1);
}

#[test]
fn overlay_to_native_clears_the_window() {
    let h = Harness::new();
    h.pipeline.on_posted(&chat("a", "x"), &config(BackendPreference::Overlay));
    h.queue.drain();
    assert_eq!(h.overlay_children(), 1);

    h.pipeline.on_posted(&chat("b", "y"), &config(BackendPreference::Native));
    h.queue.drain();
    assert_eq!(h.overlay_children(), 0);
    assert!(!h.queue.with_window(|w| w.has_container()));
    assert_eq!(h.pipeline.current_backend(), Backend::Native);
}

#[test]
fn config_change_switches_without_a_post() {
    let h = Harness::new();
    h.pipeline.on_posted(&chat("a", "x"), &config(BackendPreference::Native));
    let backend = h.pipeline.on_config_changed(&config(BackendPreference::Disabled));
    assert_eq!(backend, Backend::Disabled);
    assert!(h.log().iter().any(|l| l.starts_with("cancel")));
    assert_eq!(h.pipeline.on_posted(&chat("b", "y"), &config(BackendPreference::Disabled)), None);
}
