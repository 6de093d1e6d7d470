//! Backend selection and routing.

use std::sync::Mutex;

use super::{RenderPayload, RenderedId, RendererRegistry, lock};
use crate::backend::{Backend, BackendPreference, BackendResolver};
use crate::config::RenderConfig;
use crate::notification::{IslandType, NotificationEvent};

/// Routes posts to the active backend and keeps switchovers clean: the
/// outgoing backend is cleared before the incoming one receives anything.
pub struct RendererCoordinator {
    resolver: BackendResolver,
    registry: RendererRegistry,
    current: Mutex<Backend>,
}

impl RendererCoordinator {
    pub fn new(resolver: BackendResolver, registry: RendererRegistry) -> Self {
        Self {
            resolver,
            registry,
            current: Mutex::new(Backend::Disabled),
        }
    }

    pub fn current(&self) -> Backend {
        *lock(&self.current)
    }

    pub fn registry(&self) -> &RendererRegistry {
        &self.registry
    }

    /// Re-resolve the backend for `preference`, clearing the outgoing one on
    /// change. Returns the active backend.
    pub fn refresh_backend(&self, preference: BackendPreference) -> Backend {
        let target = self.resolver.resolve(preference);
        let mut current = lock(&self.current);
        if *current == target {
            return target;
        }

        let outgoing = *current;
        if let Some(renderer) = self.registry.get(outgoing) {
            renderer.clear_all();
        }
        *current = target;
        tracing::info!(from = ?outgoing, to = ?target, "Switched island backend");
        target
    }

    /// Refresh the backend, then post through it. `payload` builds the
    /// backend-specific payload once the backend is known; it is not called
    /// when rendering is disabled.
    pub fn post(
        &self,
        preference: BackendPreference,
        key: &str,
        event: &NotificationEvent,
        island_type: IslandType,
        config: &RenderConfig,
        payload: impl FnOnce(Backend) -> RenderPayload,
    ) -> Option<RenderedId> {
        let backend = self.refresh_backend(preference);
        let Some(renderer) = self.registry.get(backend) else {
            tracing::debug!(key, ?backend, "No renderer for backend, skipping post");
            return None;
        };
        renderer.post(key, event, island_type, config, payload(backend))
    }

    /// Dismiss `key` on every backend.
    pub fn dismiss(&self, key: &str) {
        for renderer in self.registry.all() {
            renderer.dismiss(key);
        }
    }

    pub fn dismiss_by_rendered_id(&self, id: RenderedId) {
        for renderer in self.registry.all() {
            renderer.dismiss_by_rendered_id(id);
        }
    }

    pub fn clear_all(&self) {
        for renderer in self.registry.all() {
            renderer.clear_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::platform::{CapabilityProbe, PlatformError};
    use crate::render::Renderer;

    /// Renderer that logs every call into a shared log.
    struct Fake {
        backend: Backend,
        log: Arc<Mutex<Vec<String>>>,
        keys: Mutex<Vec<String>>,
    }

    impl Fake {
        fn new(backend: Backend, log: Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                backend,
                log,
                keys: Mutex::new(Vec::new()),
            })
        }

        fn record(&self, what: String) {
            self.log.lock().unwrap().push(format!("{:?} {what}", self.backend));
        }
    }

    impl Renderer for Fake {
        fn backend(&self) -> Backend {
            self.backend
        }

        fn post(
            &self,
            key: &str,
            _event: &NotificationEvent,
            _island_type: IslandType,
            _config: &RenderConfig,
            payload: RenderPayload,
        ) -> Option<RenderedId> {
            self.record(format!("post {key} {}", payload.kind()));
            let mut keys = self.keys.lock().unwrap();
            if !keys.iter().any(|k| k == key) {
                keys.push(key.to_string());
            }
            Some(RenderedId::Overlay(keys.len() as u64))
        }

        fn dismiss(&self, key: &str) {
            self.record(format!("dismiss {key}"));
            self.keys.lock().unwrap().retain(|k| k != key);
        }

        fn dismiss_by_rendered_id(&self, id: RenderedId) {
            self.record(format!("dismiss_id {id:?}"));
        }

        fn clear_all(&self) {
            self.record("clear".to_string());
            self.keys.lock().unwrap().clear();
        }

        fn rendered_count(&self) -> usize {
            self.keys.lock().unwrap().len()
        }
    }

    struct Probe {
        native: AtomicBool,
    }

    impl CapabilityProbe for Probe {
        fn native_supported(&self) -> Result<bool, PlatformError> {
            Ok(self.native.load(Ordering::SeqCst))
        }

        fn overlay_permitted(&self) -> Result<bool, PlatformError> {
            Ok(true)
        }
    }

    struct Setup {
        coordinator: RendererCoordinator,
        native: Arc<Fake>,
        overlay: Arc<Fake>,
        log: Arc<Mutex<Vec<String>>>,
    }

    fn setup() -> Setup {
        let log = Arc::new(Mutex::new(Vec::new()));
        let native = Fake::new(Backend::Native, log.clone());
        let overlay = Fake::new(Backend::Overlay, log.clone());
        let mut registry = RendererRegistry::new();
        registry.register(native.clone()).register(overlay.clone());
        let resolver = BackendResolver::new(Arc::new(Probe {
            native: AtomicBool::new(true),
        }));
        Setup {
            coordinator: RendererCoordinator::new(resolver, registry),
            native,
            overlay,
            log,
        }
    }

    fn payload(backend: Backend) -> RenderPayload {
        match backend {
            Backend::Native => RenderPayload::Island(crate::descriptor::IslandDescriptor::new(
                IslandType::Standard,
                "t",
            )),
            _ => RenderPayload::Overlay(crate::render::OverlayStyle {
                highlight: island_image::Color::WHITE,
                shape: island_image::IconShape::Circle,
                padding: 0,
            }),
        }
    }

    fn post(s: &Setup, pref: BackendPreference, key: &str) -> Option<RenderedId> {
        let event = NotificationEvent::new(key, "com.example.app");
        s.coordinator.post(
            pref,
            key,
            &event,
            IslandType::Standard,
            &RenderConfig::default(),
            payload,
        )
    }

    #[test]
    fn starts_disabled() {
        let s = setup();
        assert_eq!(s.coordinator.current(), Backend::Disabled);
    }

    #[test]
    fn switch_clears_outgoing_before_incoming_post() {
        let s = setup();
        post(&s, BackendPreference::Auto, "a");
        post(&s, BackendPreference::Auto, "b");
        assert_eq!(s.native.rendered_count(), 2);

        post(&s, BackendPreference::Overlay, "c");
        assert_eq!(s.coordinator.current(), Backend::Overlay);
        assert_eq!(s.native.rendered_count(), 0);
        assert_eq!(s.overlay.rendered_count(), 1);
        assert_eq!(
            *s.log.lock().unwrap(),
            [
                "Native post a island",
                "Native post b island",
                "Native clear",
                "Overlay post c overlay",
            ]
        );
    }

    #[test]
    fn disabled_posts_nothing() {
        let s = setup();
        post(&s, BackendPreference::Auto, "a");
        let mut called = false;
        let event = NotificationEvent::new("b", "com.example.app");
        let id = s.coordinator.post(
            BackendPreference::Disabled,
            "b",
            &event,
            IslandType::Standard,
            &RenderConfig::default(),
            |b| {
                called = true;
                payload(b)
            },
        );
        assert_eq!(id, None);
        assert!(!called);
        assert_eq!(s.coordinator.current(), Backend::Disabled);
        assert_eq!(s.native.rendered_count(), 0);
    }

    #[test]
    fn dismissals_broadcast_to_both() {
        let s = setup();
        post(&s, BackendPreference::Auto, "a");
        s.log.lock().unwrap().clear();
        s.coordinator.dismiss("a");
        s.coordinator.dismiss_by_rendered_id(RenderedId::Native(7));
        s.coordinator.clear_all();
        let log = s.log.lock().unwrap();
        for line in [
            "Native dismiss a",
            "Overlay dismiss a",
            "Native dismiss_id Native(7)",
            "Overlay dismiss_id Native(7)",
            "Native clear",
            "Overlay clear",
        ] {
            assert!(log.iter().any(|l| l == line), "missing {line}");
        }
    }

    #[test]
    fn same_backend_does_not_clear() {
        let s = setup();
        post(&s, BackendPreference::Auto, "a");
        assert_eq!(s.coordinator.refresh_backend(BackendPreference::Native), Backend::Native);
        assert_eq!(s.native.rendered_count(), 1);
    }
}
