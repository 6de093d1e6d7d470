//! Overlay backend: islands drawn as views in one floating window.
//!
//! The source-key → holder map is updated on the calling thread; every
//! window mutation is enqueued on a [`UiQueue`] and runs serially on its
//! owner.

pub mod queue;
pub mod window;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{OverlayStyle, RenderPayload, RenderedId, Renderer, lock};
use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::extract::{ContentExtractor, OverlayContent};
use crate::notification::{IslandType, NotificationEvent};
use crate::platform::DeviceLock;

pub use queue::{ManualUiQueue, TokioUiQueue, UiOp, UiQueue};
pub use window::OverlayWindow;

pub const ENTER_DURATION: Duration = Duration::from_millis(180);
pub const FLASH_DURATION: Duration = Duration::from_millis(140);
pub const EXIT_DURATION: Duration = Duration::from_millis(150);

/// Starting opacity of the update flash.
pub const FLASH_FROM_ALPHA: f32 = 0.85;

/// Distance the island rises while entering, in density-independent pixels.
pub const ENTER_RISE_DP: f32 = 24.0;

/// Animation handed to the surface with a view operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    /// Fade in from transparent while rising by `rise_dp`.
    Enter { duration: Duration, rise_dp: f32 },
    /// Quick fade from `from_alpha` back to opaque.
    Flash { duration: Duration, from_alpha: f32 },
    /// Fade out.
    Exit { duration: Duration },
}

impl Animation {
    pub fn enter() -> Self {
        Self::Enter {
            duration: ENTER_DURATION,
            rise_dp: ENTER_RISE_DP,
        }
    }

    pub fn flash() -> Self {
        Self::Flash {
            duration: FLASH_DURATION,
            from_alpha: FLASH_FROM_ALPHA,
        }
    }

    pub fn exit() -> Self {
        Self::Exit {
            duration: EXIT_DURATION,
        }
    }

    pub fn duration(&self) -> Duration {
        match *self {
            Self::Enter { duration, .. }
            | Self::Flash { duration, .. }
            | Self::Exit { duration } => duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewId {
    Container,
    Island(u64),
}

/// Content bound into one island view.
#[derive(Debug, Clone)]
pub struct IslandView {
    pub content: OverlayContent,
    pub style: OverlayStyle,
}

/// A view operation's target and payload.
#[derive(Debug, Clone)]
pub struct ViewSpec {
    pub id: ViewId,
    pub parent: Option<ViewId>,
    /// Present on add and rebind.
    pub island: Option<IslandView>,
    pub animation: Option<Animation>,
}

impl ViewSpec {
    pub fn container() -> Self {
        Self {
            id: ViewId::Container,
            parent: None,
            island: None,
            animation: None,
        }
    }

    pub fn island(id: u64, island: Option<IslandView>, animation: Option<Animation>) -> Self {
        Self {
            id: ViewId::Island(id),
            parent: Some(ViewId::Container),
            island,
            animation,
        }
    }
}

/// Where the user tapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapTarget {
    Root,
    Action(usize),
}

struct ViewHolder {
    id: u64,
    /// Bumped on every post; stale timeouts compare against it.
    generation: u64,
}

struct OverlayShared {
    holders: Mutex<HashMap<String, ViewHolder>>,
    queue: Arc<dyn UiQueue>,
    extractor: ContentExtractor,
    device: Arc<dyn DeviceLock>,
    next_id: AtomicU64,
}

/// Renders islands into a floating overlay window.
#[derive(Clone)]
pub struct OverlayRenderer {
    shared: Arc<OverlayShared>,
}

impl OverlayRenderer {
    pub fn new(
        queue: Arc<dyn UiQueue>,
        extractor: ContentExtractor,
        device: Arc<dyn DeviceLock>,
    ) -> Self {
        Self {
            shared: Arc::new(OverlayShared {
                holders: Mutex::new(HashMap::new()),
                queue,
                extractor,
                device,
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Overlay id currently bound to `key`.
    pub fn id_for(&self, key: &str) -> Option<u64> {
        lock(&self.shared.holders).get(key).map(|h| h.id)
    }

    /// Forward a tap on island `id` to the UI owner, which fires the trigger.
    pub fn tap(&self, id: u64, target: TapTarget) {
        self.shared.queue.submit(Box::new(move |w| {
            if !w.tap(id, target) {
                tracing::debug!(id, ?target, "Tap with nothing to fire");
            }
        }));
    }
}

impl OverlayShared {
    fn dismiss(&self, key: &str) {
        let Some(holder) = lock(&self.holders).remove(key) else {
            return;
        };
        let id = holder.id;
        tracing::debug!(key, id, "Dismissing overlay island");
        self.queue.submit(Box::new(move |w| w.begin_exit(id)));
        self.queue
            .submit_after(EXIT_DURATION, Box::new(move |w| w.remove(id)));
    }

    /// Timeout fired: dismiss unless the key was reposted since.
    fn expire(&self, key: &str, generation: u64) {
        let current = lock(&self.holders).get(key).map(|h| h.generation);
        if current == Some(generation) {
            tracing::debug!(key, "Overlay island timed out");
            self.dismiss(key);
        }
    }
}

impl Renderer for OverlayRenderer {
    fn backend(&self) -> Backend {
        Backend::Overlay
    }

    fn post(
        &self,
        key: &str,
        event: &NotificationEvent,
        island_type: IslandType,
        config: &RenderConfig,
        payload: RenderPayload,
    ) -> Option<RenderedId> {
        let RenderPayload::Overlay(style) = payload else {
            tracing::warn!(key, payload = payload.kind(), "Overlay renderer got a foreign payload");
            return None;
        };
        let shared = &self.shared;

        let locked = shared.device.is_locked();
        if locked && !config.show_on_lockscreen {
            tracing::debug!(key, "Device locked and lock-screen display off");
            shared.dismiss(key);
            return None;
        }
        let Some(content) =
            shared
                .extractor
                .extract(event, island_type, locked, config.show_on_lockscreen)
        else {
            shared.dismiss(key);
            return None;
        };

        let (id, generation) = {
            let mut holders = lock(&shared.holders);
            let holder = holders.entry(key.to_string()).or_insert_with(|| ViewHolder {
                id: shared.next_id.fetch_add(1, Ordering::Relaxed),
                generation: 0,
            });
            holder.generation += 1;
            (holder.id, holder.generation)
        };

        let view = IslandView { content, style };
        let owned_key = key.to_string();
        shared
            .queue
            .submit(Box::new(move |w| w.show(id, &owned_key, view)));

        if let Some(timeout) = config.timeout {
            let weak = Arc::downgrade(shared);
            let key = key.to_string();
            shared.queue.submit_after(
                timeout,
                Box::new(move |_| {
                    if let Some(shared) = weak.upgrade() {
                        shared.expire(&key, generation);
                    }
                }),
            );
        }

        Some(RenderedId::Overlay(id))
    }

    fn dismiss(&self, key: &str) {
        self.shared.dismiss(key);
    }

    fn dismiss_by_rendered_id(&self, id: RenderedId) {
        let RenderedId::Overlay(id) = id else { return };
        let key = lock(&self.shared.holders)
            .iter()
            .find(|(_, h)| h.id == id)
            .map(|(k, _)| k.clone());
        if let Some(key) = key {
            self.shared.dismiss(&key);
        }
    }

    fn clear_all(&self) {
        let count = {
            let mut holders = lock(&self.shared.holders);
            let count = holders.len();
            holders.clear();
            count
        };
        if count > 0 {
            tracing::info!(count, "Clearing overlay islands");
        }
        self.shared.queue.submit(Box::new(|w| w.clear()));
    }

    fn rendered_count(&self) -> usize {
        lock(&self.shared.holders).len()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};

    use island_image::{Color, IconShape};

    use super::*;
    use crate::platform::{PlatformError, WindowSurface};

    /// Records surface calls as short strings, optionally into a log shared
    /// with other fakes.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub log: Arc<Mutex<Vec<String>>>,
        /// Every island bound on add or rebind, in order.
        pub bound: Arc<Mutex<Vec<IslandView>>>,
        pub fail_island_adds: bool,
    }

    impl RecordingSurface {
        pub fn with_log(log: Arc<Mutex<Vec<String>>>) -> Self {
            Self {
                log,
                ..Self::default()
            }
        }

        fn record(&self, op: &str, view: &ViewSpec) {
            let target = match view.id {
                ViewId::Container => "container".to_string(),
                ViewId::Island(id) => id.to_string(),
            };
            let line = match view.animation {
                Some(Animation::Enter { .. }) => format!("{op} {target} enter"),
                Some(Animation::Flash { .. }) => format!("{op} {target} flash"),
                Some(Animation::Exit { .. }) => format!("{op} {target} exit"),
                None => format!("{op} {target}"),
            };
            self.log.lock().unwrap().push(line);
            if let Some(island) = &view.island {
                self.bound.lock().unwrap().push(island.clone());
            }
        }
    }

    impl WindowSurface for RecordingSurface {
        fn add_view(&mut self, view: &ViewSpec) -> Result<(), PlatformError> {
            if self.fail_island_adds && view.id != ViewId::Container {
                return Err(PlatformError::Surface("add rejected".into()));
            }
            self.record("add", view);
            Ok(())
        }

        fn update_view_layout(&mut self, view: &ViewSpec) -> Result<(), PlatformError> {
            self.record("update", view);
            Ok(())
        }

        fn remove_view(&mut self, view: &ViewSpec) -> Result<(), PlatformError> {
            self.record("remove", view);
            Ok(())
        }
    }

    pub fn style() -> OverlayStyle {
        OverlayStyle {
            highlight: Color(0xFF34_82F6),
            shape: IconShape::Circle,
            padding: 20,
        }
    }

    pub fn view(title: &str) -> IslandView {
        IslandView {
            content: OverlayContent {
                app_label: "App".into(),
                title: title.into(),
                text: String::new(),
                icon: None,
                actions: Vec::new(),
                progress: None,
                island_type: IslandType::Standard,
                redacted: false,
                content_trigger: None,
                content_hash: String::new(),
            },
            style: style(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use image::{Rgba, RgbaImage};

    use super::testing::*;
    use super::*;
    use crate::platform::{AppMetadata, Bitmap, IconRef, PlatformError};

    struct Meta;

    impl AppMetadata for Meta {
        fn label(&self, _app_id: &str) -> Result<String, PlatformError> {
            Ok("Chat".into())
        }

        fn launcher_icon(&self, _app_id: &str) -> Result<Bitmap, PlatformError> {
            Ok(Arc::new(RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]))))
        }

        fn load_icon(&self, _icon: &IconRef) -> Result<Bitmap, PlatformError> {
            Err(PlatformError::NotFound("icon".into()))
        }
    }

    #[derive(Default)]
    struct Lock(AtomicBool);

    impl DeviceLock for Lock {
        fn is_locked(&self) -> bool {
            self.0.load(Ordering::SeqCst)
        }
    }

    struct Harness {
        renderer: OverlayRenderer,
        queue: Arc<ManualUiQueue>,
        lock: Arc<Lock>,
        log: Arc<Mutex<Vec<String>>>,
    }

    fn harness() -> Harness {
        let surface = RecordingSurface::default();
        let log = surface.log.clone();
        let queue = Arc::new(ManualUiQueue::new(OverlayWindow::new(Box::new(surface))));
        let lock = Arc::new(Lock::default());
        let renderer = OverlayRenderer::new(
            queue.clone(),
            ContentExtractor::new(Arc::new(Meta)),
            lock.clone(),
        );
        Harness {
            renderer,
            queue,
            lock,
            log,
        }
    }

    fn post(h: &Harness, key: &str, config: &RenderConfig) -> Option<RenderedId> {
        let mut event = NotificationEvent::new(key, "com.example.chat");
        event.title = Some("Alice".into());
        h.renderer.post(
            key,
            &event,
            IslandType::Standard,
            config,
            RenderPayload::Overlay(style()),
        )
    }

    #[test]
    fn post_is_enqueued_not_inline() {
        let h = harness();
        let id = post(&h, "k", &RenderConfig::default());
        assert_eq!(id, Some(RenderedId::Overlay(1)));
        assert!(h.log.lock().unwrap().is_empty());
        h.queue.drain();
        assert_eq!(*h.log.lock().unwrap(), ["add container", "add 1 enter"]);
    }

    #[test]
    fn repost_flashes_same_view() {
        let h = harness();
        let a = post(&h, "k", &RenderConfig::default());
        h.queue.drain();
        let b = post(&h, "k", &RenderConfig::default());
        h.queue.drain();
        assert_eq!(a, b);
        assert_eq!(h.renderer.rendered_count(), 1);
        assert_eq!(h.queue.with_window(|w| w.child_count()), 1);
        assert_eq!(h.log.lock().unwrap().last().unwrap(), "update 1 flash");
    }

    #[test]
    fn dismiss_animates_then_removes() {
        let h = harness();
        post(&h, "k", &RenderConfig::default());
        h.renderer.dismiss("k");
        h.renderer.dismiss("unknown");
        assert_eq!(h.renderer.rendered_count(), 0);
        h.queue.drain_immediate();
        assert_eq!(h.queue.pending_delayed(), 1);
        assert_eq!(h.queue.with_window(|w| w.child_count()), 1);
        h.queue.drain();
        assert!(!h.queue.with_window(|w| w.has_container()));
        assert_eq!(
            *h.log.lock().unwrap(),
            ["add container", "add 1 enter", "update 1 exit", "remove 1", "remove container"]
        );
    }

    #[test]
    fn locked_without_lockscreen_display_dismisses() {
        let h = harness();
        post(&h, "k", &RenderConfig::default());
        h.lock.0.store(true, Ordering::SeqCst);
        let config = RenderConfig {
            show_on_lockscreen: false,
            ..RenderConfig::default()
        };
        assert_eq!(post(&h, "k", &config), None);
        assert_eq!(h.renderer.rendered_count(), 0);
        h.queue.drain();
        assert_eq!(h.queue.with_window(|w| w.child_count()), 0);
    }

    #[test]
    fn timeout_dismisses_unless_reposted() {
        let h = harness();
        let config = RenderConfig {
            timeout: Some(Duration::from_secs(5)),
            ..RenderConfig::default()
        };
        post(&h, "a", &config);
        post(&h, "b", &config);
        // Reposting "b" makes its first timeout stale.
        post(&h, "b", &config);
        h.queue.drain();
        assert_eq!(h.renderer.rendered_count(), 0);
        assert!(!h.queue.with_window(|w| w.has_container()));
    }

    #[test]
    fn dismiss_by_rendered_id_and_clear_all() {
        let h = harness();
        let Some(a) = post(&h, "a", &RenderConfig::default()) else { panic!("not posted") };
        post(&h, "b", &RenderConfig::default());
        post(&h, "c", &RenderConfig::default());
        h.renderer.dismiss_by_rendered_id(RenderedId::Native(1));
        assert_eq!(h.renderer.rendered_count(), 3);
        h.renderer.dismiss_by_rendered_id(a);
        assert_eq!(h.renderer.rendered_count(), 2);
        h.renderer.clear_all();
        assert_eq!(h.renderer.rendered_count(), 0);
        h.queue.drain();
        assert_eq!(h.queue.with_window(|w| w.child_count()), 0);
        assert!(!h.queue.with_window(|w| w.has_container()));
    }

    #[test]
    fn foreign_payload_is_rejected() {
        let h = harness();
        let event = NotificationEvent::new("k", "com.example.chat");
        let payload = RenderPayload::Island(crate::descriptor::IslandDescriptor::new(
            IslandType::Standard,
            "x",
        ));
        let id = h.renderer.post(
            "k",
            &event,
            IslandType::Standard,
            &RenderConfig::default(),
            payload,
        );
        assert_eq!(id, None);
        assert_eq!(h.queue.drain(), 0);
    }

    #[tokio::test]
    async fn burst_of_dismissals_leaves_window_empty() {
        let queue = Arc::new(TokioUiQueue::start(OverlayWindow::new(Box::new(
            RecordingSurface::default(),
        ))));
        let renderer = OverlayRenderer::new(
            queue.clone(),
            ContentExtractor::new(Arc::new(Meta)),
            Arc::new(Lock::default()),
        );
        let mut event = NotificationEvent::new("k", "com.example.chat");
        event.title = Some("Alice".into());

        // Nothing runs on the worker until this task yields, so every op
        // below is queued at once.
        let keys: Vec<String> = (0..400).map(|i| format!("k{i}")).collect();
        for key in &keys {
            let config = RenderConfig::default();
            let payload = RenderPayload::Overlay(style());
            renderer.post(key, &event, IslandType::Standard, &config, payload);
        }
        for key in &keys {
            renderer.dismiss(key);
        }
        assert_eq!(renderer.rendered_count(), 0);

        let (tx, rx) = tokio::sync::oneshot::channel();
        queue.submit_after(
            EXIT_DURATION * 3,
            Box::new(move |w| {
                let _ = tx.send((w.child_count(), w.has_container()));
            }),
        );
        assert_eq!(rx.await.unwrap(), (0, false));
    }

    #[test]
    fn animation_values() {
        assert_eq!(Animation::enter().duration(), Duration::from_millis(180));
        assert_eq!(Animation::flash().duration(), Duration::from_millis(140));
        assert_eq!(Animation::exit().duration(), Duration::from_millis(150));
    }
}
