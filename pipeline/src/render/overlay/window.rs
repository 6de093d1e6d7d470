//! Overlay window state, owned by the UI queue.
//!
//! One floating container holds a child view per island. The container is
//! attached lazily on the first child and detached with the last one.

use std::collections::HashMap;

use super::{Animation, IslandView, TapTarget, ViewId, ViewSpec};
use crate::platform::WindowSurface;

struct Child {
    key: String,
    view: IslandView,
    leaving: bool,
}

pub struct OverlayWindow {
    surface: Box<dyn WindowSurface>,
    container_attached: bool,
    children: HashMap<u64, Child>,
}

impl OverlayWindow {
    pub fn new(surface: Box<dyn WindowSurface>) -> Self {
        Self {
            surface,
            container_attached: false,
            children: HashMap::new(),
        }
    }

    pub fn has_container(&self) -> bool {
        self.container_attached
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Source key bound to child `id`.
    pub fn key_of(&self, id: u64) -> Option<&str> {
        self.children.get(&id).map(|c| c.key.as_str())
    }

    /// Attach or rebind child `id`. New children animate in; existing ones
    /// flash.
    pub fn show(&mut self, id: u64, key: &str, view: IslandView) {
        if !self.ensure_container() {
            return;
        }

        let spec = ViewSpec::island(id, Some(view.clone()), None);
        if let Some(child) = self.children.get_mut(&id) {
            let spec = ViewSpec {
                animation: Some(Animation::flash()),
                ..spec
            };
            match self.surface.update_view_layout(&spec) {
                Ok(()) => {
                    child.view = view;
                    child.leaving = false;
                }
                Err(e) => tracing::warn!(key, id, error = %e, "Failed to update overlay island"),
            }
            return;
        }

        let spec = ViewSpec {
            animation: Some(Animation::enter()),
            ..spec
        };
        match self.surface.add_view(&spec) {
            Ok(()) => {
                self.children.insert(
                    id,
                    Child {
                        key: key.to_string(),
                        view,
                        leaving: false,
                    },
                );
            }
            Err(e) => {
                tracing::warn!(key, id, error = %e, "Failed to add overlay island");
                self.release_container_if_empty();
            }
        }
    }

    /// Start the exit animation of child `id`. The child stays attached
    /// until [`OverlayWindow::remove`].
    pub fn begin_exit(&mut self, id: u64) {
        let Some(child) = self.children.get_mut(&id) else {
            return;
        };
        child.leaving = true;
        let spec = ViewSpec::island(id, None, Some(Animation::exit()));
        if let Err(e) = self.surface.update_view_layout(&spec) {
            tracing::debug!(id, error = %e, "Exit animation failed");
        }
    }

    /// Detach child `id`, and the container with the last child. Children
    /// re-shown since their exit started are kept.
    pub fn remove(&mut self, id: u64) {
        if !self.children.get(&id).is_some_and(|c| c.leaving) {
            return;
        }
        self.detach(id);
        self.release_container_if_empty();
    }

    /// Detach everything immediately.
    pub fn clear(&mut self) {
        let ids: Vec<u64> = self.children.keys().copied().collect();
        for id in ids {
            self.detach(id);
        }
        self.release_container_if_empty();
    }

    /// Fire the trigger behind a tap. Returns whether anything was fired.
    pub fn tap(&self, id: u64, target: TapTarget) -> bool {
        let Some(child) = self.children.get(&id) else {
            return false;
        };
        let trigger = match target {
            TapTarget::Root => child.view.content.content_trigger.as_ref(),
            TapTarget::Action(i) => child
                .view
                .content
                .actions
                .get(i)
                .and_then(|a| a.trigger.as_ref()),
        };
        match trigger {
            Some(trigger) => {
                trigger.fire();
                true
            }
            None => false,
        }
    }

    fn detach(&mut self, id: u64) {
        if self.children.remove(&id).is_none() {
            return;
        }
        let spec = ViewSpec::island(id, None, None);
        if let Err(e) = self.surface.remove_view(&spec) {
            tracing::warn!(id, error = %e, "Failed to remove overlay island");
        }
    }

    fn ensure_container(&mut self) -> bool {
        if self.container_attached {
            return true;
        }
        match self.surface.add_view(&ViewSpec::container()) {
            Ok(()) => {
                self.container_attached = true;
                tracing::debug!("Overlay container attached");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to attach overlay container");
                false
            }
        }
    }

    fn release_container_if_empty(&mut self) {
        if !self.container_attached || !self.children.is_empty() {
            return;
        }
        if let Err(e) = self.surface.remove_view(&ViewSpec::container()) {
            tracing::warn!(error = %e, "Failed to remove overlay container");
        }
        self.container_attached = false;
        tracing::debug!("Overlay container detached");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::platform::{ActionTrigger, PlatformError, TriggerHandle};
    use crate::render::overlay::testing::{RecordingSurface, view};

    struct Counter(Arc<AtomicUsize>);

    impl ActionTrigger for Counter {
        fn send(&self) -> Result<(), PlatformError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Err(PlatformError::TriggerCancelled)
        }
    }

    fn window() -> (OverlayWindow, Arc<std::sync::Mutex<Vec<String>>>) {
        let surface = RecordingSurface::default();
        let log = surface.log.clone();
        (OverlayWindow::new(Box::new(surface)), log)
    }

    #[test]
    fn container_follows_children() {
        let (mut w, log) = window();
        w.show(1, "a", view("A"));
        w.show(2, "b", view("B"));
        assert!(w.has_container());
        w.begin_exit(1);
        w.remove(1);
        assert!(w.has_container());
        w.begin_exit(2);
        w.remove(2);
        assert!(!w.has_container());
        assert_eq!(
            *log.lock().unwrap(),
            [
                "add container",
                "add 1 enter",
                "add 2 enter",
                "update 1 exit",
                "remove 1",
                "update 2 exit",
                "remove 2",
                "remove container",
            ]
        );
    }

    #[test]
    fn repeat_show_flashes() {
        let (mut w, log) = window();
        w.show(1, "a", view("A"));
        w.show(1, "a", view("A2"));
        assert_eq!(w.child_count(), 1);
        assert_eq!(log.lock().unwrap().last().unwrap(), "update 1 flash");
    }

    #[test]
    fn remove_without_exit_is_ignored() {
        let (mut w, _) = window();
        w.show(1, "a", view("A"));
        w.remove(1);
        assert_eq!(w.child_count(), 1);
        w.remove(42);
    }

    #[test]
    fn failed_add_releases_container() {
        let surface = RecordingSurface {
            fail_island_adds: true,
            ..RecordingSurface::default()
        };
        let mut w = OverlayWindow::new(Box::new(surface));
        w.show(1, "a", view("A"));
        assert_eq!(w.child_count(), 0);
        assert!(!w.has_container());
    }

    #[test]
    fn tap_fires_best_effort() {
        let (mut w, _) = window();
        let hits = Arc::new(AtomicUsize::new(0));
        let mut v = view("A");
        v.content.content_trigger = Some(TriggerHandle::new(Counter(hits.clone())));
        w.show(1, "a", v);
        assert!(w.tap(1, TapTarget::Root));
        assert!(!w.tap(1, TapTarget::Action(0)));
        assert!(!w.tap(9, TapTarget::Root));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clear_detaches_everything() {
        let (mut w, _) = window();
        w.show(1, "a", view("A"));
        w.show(2, "b", view("B"));
        w.clear();
        assert_eq!(w.child_count(), 0);
        assert!(!w.has_container());
        assert_eq!(w.key_of(1), None);
    }
}
