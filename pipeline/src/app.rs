//! Pipeline entry point for the host.
//!
//! The host's notification source calls [`IslandPipeline::on_posted`] and
//! [`IslandPipeline::on_removed`]; preference changes go through
//! [`IslandPipeline::on_config_changed`].

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::backend::{Backend, BackendResolver};
use crate::config::PipelineConfig;
use crate::extract::ContentExtractor;
use crate::notification::{NotificationEvent, classify};
use crate::platform::{AppMetadata, CapabilityProbe, DeviceLock, NotificationSink};
use crate::render::overlay::{TapTarget, UiQueue};
use crate::render::{
    NativeRenderer, OverlayRenderer, OverlayStyle, RenderPayload, RenderedId, RendererCoordinator,
    RendererRegistry,
};
use crate::style::{BrandColorCache, StyleResolver};
use crate::translate::{self, TranslateContext};

/// Host-provided collaborators.
#[derive(Clone)]
pub struct Collaborators {
    pub metadata: Arc<dyn AppMetadata>,
    pub sink: Arc<dyn NotificationSink>,
    pub probe: Arc<dyn CapabilityProbe>,
    pub device: Arc<dyn DeviceLock>,
    /// Queue owning the overlay window, e.g. a started `TokioUiQueue`.
    pub ui_queue: Arc<dyn UiQueue>,
}

/// Shared pipeline handle. Cheap to clone.
#[derive(Clone)]
pub struct IslandPipeline {
    inner: Arc<PipelineInner>,
}

struct PipelineInner {
    style: StyleResolver,
    coordinator: RendererCoordinator,
    overlay: OverlayRenderer,
}

impl IslandPipeline {
    pub fn new(collaborators: Collaborators) -> Self {
        Self::with_cache(collaborators, Arc::new(BrandColorCache::new()))
    }

    /// Build with an existing brand-color cache.
    pub fn with_cache(collaborators: Collaborators, cache: Arc<BrandColorCache>) -> Self {
        let Collaborators {
            metadata,
            sink,
            probe,
            device,
            ui_queue,
        } = collaborators;

        let style = StyleResolver::with_cache(metadata.clone(), cache);
        let overlay = OverlayRenderer::new(ui_queue, ContentExtractor::new(metadata), device);
        let mut registry = RendererRegistry::new();
        registry
            .register(Arc::new(NativeRenderer::new(sink)))
            .register(Arc::new(overlay.clone()));
        let coordinator = RendererCoordinator::new(BackendResolver::new(probe), registry);

        Self {
            inner: Arc::new(PipelineInner {
                style,
                coordinator,
                overlay,
            }),
        }
    }

    pub fn style(&self) -> &StyleResolver {
        &self.inner.style
    }

    pub fn coordinator(&self) -> &RendererCoordinator {
        &self.inner.coordinator
    }

    pub fn current_backend(&self) -> Backend {
        self.inner.coordinator.current()
    }

    /// A notification was posted or updated.
    pub fn on_posted(
        &self,
        event: &NotificationEvent,
        config: &PipelineConfig,
    ) -> Option<RenderedId> {
        self.on_posted_at(event, config, Utc::now())
    }

    /// [`IslandPipeline::on_posted`] with an explicit clock.
    pub fn on_posted_at(
        &self,
        event: &NotificationEvent,
        config: &PipelineConfig,
        now: DateTime<Utc>,
    ) -> Option<RenderedId> {
        let island_type = classify(event);
        let render = config.render_for(&event.app_id);
        let style = &self.inner.style;
        tracing::debug!(
            key = %event.key,
            app_id = %event.app_id,
            island_type = island_type.as_str(),
            "Notification posted"
        );

        self.inner.coordinator.post(
            config.backend,
            &event.key,
            event,
            island_type,
            &render,
            |backend| match backend {
                Backend::Native => {
                    let ctx = TranslateContext {
                        style,
                        theme: &config.theme,
                        render: &render,
                        default_highlight: config.default_highlight,
                        now,
                    };
                    RenderPayload::Island(translate::translate(island_type, event, &ctx))
                }
                Backend::Overlay | Backend::Disabled => RenderPayload::Overlay(OverlayStyle {
                    highlight: style.resolve_color(
                        &config.theme,
                        &event.app_id,
                        config.default_highlight,
                    ),
                    shape: style.resolve_shape(&config.theme, &event.app_id),
                    padding: style.resolve_padding(&config.theme, &event.app_id),
                }),
            },
        )
    }

    /// A notification was removed by its source.
    pub fn on_removed(&self, key: &str) {
        self.inner.coordinator.dismiss(key);
    }

    /// Preferences changed: apply a backend change now rather than on the
    /// next post.
    pub fn on_config_changed(&self, config: &PipelineConfig) -> Backend {
        self.inner.coordinator.refresh_backend(config.backend)
    }

    /// The user tapped an overlay island.
    pub fn on_overlay_tap(&self, id: u64, target: TapTarget) {
        self.inner.overlay.tap(id, target);
    }

    pub fn clear_all(&self) {
        self.inner.coordinator.clear_all();
    }
}
