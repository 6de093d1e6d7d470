//! Render contract, payloads and the two backends behind it.

pub mod coordinator;
pub mod native;
pub mod overlay;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use island_image::{Color, IconShape};

use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::descriptor::IslandDescriptor;
use crate::notification::{IslandType, NotificationEvent};

pub use coordinator::RendererCoordinator;
pub use native::NativeRenderer;
pub use overlay::OverlayRenderer;

/// Backend-specific input for [`Renderer::post`].
#[derive(Debug, Clone)]
pub enum RenderPayload {
    /// Translated descriptor, for the native backend.
    Island(IslandDescriptor),
    /// Resolved styling, for the overlay backend.
    Overlay(OverlayStyle),
}

impl RenderPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Island(_) => "island",
            Self::Overlay(_) => "overlay",
        }
    }
}

/// Theme values the overlay applies to its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayStyle {
    pub highlight: Color,
    pub shape: IconShape,
    pub padding: u8,
}

/// Backend-specific handle to an on-screen instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderedId {
    Native(i32),
    Overlay(u64),
}

/// One rendering backend.
///
/// `post` is idempotent per source key: a second post updates the existing
/// instance. `dismiss` and `dismiss_by_rendered_id` are no-ops for unknown
/// keys or ids. None of these fail; surface errors are logged and swallowed.
pub trait Renderer: Send + Sync {
    fn backend(&self) -> Backend;

    fn post(
        &self,
        key: &str,
        event: &NotificationEvent,
        island_type: IslandType,
        config: &RenderConfig,
        payload: RenderPayload,
    ) -> Option<RenderedId>;

    fn dismiss(&self, key: &str);

    fn dismiss_by_rendered_id(&self, id: RenderedId);

    fn clear_all(&self);

    /// Number of tracked instances.
    fn rendered_count(&self) -> usize;
}

/// Backend id → renderer.
#[derive(Clone, Default)]
pub struct RendererRegistry {
    renderers: HashMap<Backend, Arc<dyn Renderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `renderer` under its own backend id, replacing any previous
    /// one.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) -> &mut Self {
        self.renderers.insert(renderer.backend(), renderer);
        self
    }

    pub fn get(&self, backend: Backend) -> Option<&Arc<dyn Renderer>> {
        self.renderers.get(&backend)
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Renderer>> {
        self.renderers.values()
    }
}

/// Lock, recovering the data from a poisoned mutex.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
