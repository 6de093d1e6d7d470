//! Overlay content extraction.
//!
//! Builds a neutral, redaction-aware snapshot of a notification for the
//! overlay backend. Every metadata or icon lookup failure degrades to a
//! default instead of failing the extraction.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::notification::{Category, IslandType, NotificationEvent, Visibility, extras};
use crate::platform::{AppMetadata, Bitmap, IconRef, TriggerHandle};

/// Body shown instead of private content on a locked device.
pub const REDACTED_TEXT: &str = "Contents hidden";

/// Maximum number of buttons shown by the overlay.
pub const MAX_OVERLAY_ACTIONS: usize = 3;

#[derive(Debug, Clone)]
pub struct OverlayAction {
    pub title: String,
    pub trigger: Option<TriggerHandle>,
}

/// Snapshot bound into one overlay view.
#[derive(Debug, Clone)]
pub struct OverlayContent {
    pub app_label: String,
    pub title: String,
    pub text: String,
    pub icon: Option<Bitmap>,
    pub actions: Vec<OverlayAction>,
    /// Percent in `0..=100`.
    pub progress: Option<u8>,
    pub island_type: IslandType,
    pub redacted: bool,
    pub content_trigger: Option<TriggerHandle>,
    /// Digest of the visible fields, for skipping redundant rebinds.
    pub content_hash: String,
}

#[derive(Clone)]
pub struct ContentExtractor {
    metadata: Arc<dyn AppMetadata>,
}

impl ContentExtractor {
    pub fn new(metadata: Arc<dyn AppMetadata>) -> Self {
        Self { metadata }
    }

    /// App label, falling back to the app id.
    pub fn app_label(&self, app_id: &str) -> String {
        self.metadata.label_or_id(app_id)
    }

    /// Extract overlay content.
    ///
    /// On a locked device a non-public notification is redacted to the app
    /// label and a placeholder; if lock-screen display is off entirely,
    /// nothing is shown (`None`).
    pub fn extract(
        &self,
        event: &NotificationEvent,
        island_type: IslandType,
        locked: bool,
        show_on_lockscreen: bool,
    ) -> Option<OverlayContent> {
        let app_label = self.app_label(&event.app_id);
        let must_redact = locked && event.visibility != Visibility::Public;

        if must_redact && !show_on_lockscreen {
            tracing::debug!(key = %event.key, "Suppressing private notification on lock screen");
            return None;
        }

        let content = if must_redact {
            OverlayContent {
                title: app_label.clone(),
                text: REDACTED_TEXT.to_string(),
                icon: self.metadata.try_launcher_icon(&event.app_id),
                actions: Vec::new(),
                progress: None,
                island_type,
                redacted: true,
                content_trigger: event.content_trigger.clone(),
                content_hash: String::new(),
                app_label,
            }
        } else {
            let actions = event
                .actions
                .iter()
                .filter(|a| !a.title.trim().is_empty())
                .take(MAX_OVERLAY_ACTIONS)
                .map(|a| OverlayAction {
                    title: a.title.clone(),
                    trigger: a.trigger.clone(),
                })
                .collect();

            OverlayContent {
                title: event
                    .title_text()
                    .map(str::to_string)
                    .unwrap_or_else(|| app_label.clone()),
                text: event.body_text().unwrap_or_default().to_string(),
                icon: self.resolve_icon(event),
                actions,
                progress: event.progress.percent(),
                island_type,
                redacted: false,
                content_trigger: event.content_trigger.clone(),
                content_hash: String::new(),
                app_label,
            }
        };

        Some(with_hash(content))
    }

    /// First icon that loads: picture, caller avatar (calls only), large
    /// icon, legacy large-icon extra, small icon, launcher icon.
    pub fn resolve_icon(&self, event: &NotificationEvent) -> Option<Bitmap> {
        let is_call = event.is_category(&Category::Call);
        let avatar = is_call
            .then(|| event.extras.person(extras::CALL_PERSON))
            .flatten()
            .and_then(|p| p.icon.as_ref());

        let candidates: [Option<&IconRef>; 5] = [
            event.extras.icon(extras::PICTURE),
            avatar,
            event.large_icon.as_ref(),
            event.extras.icon(extras::LARGE_ICON),
            event.small_icon.as_ref(),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|icon| self.metadata.try_load_icon(icon))
            .or_else(|| self.metadata.try_launcher_icon(&event.app_id))
    }
}

fn with_hash(mut content: OverlayContent) -> OverlayContent {
    content.content_hash = content_hash(&content);
    content
}

/// Digest of label, title, text, type, progress, redaction flag and
/// action titles, in that order.
pub fn content_hash(content: &OverlayContent) -> String {
    let mut hasher = Sha256::new();
    let mut field = |s: &str| {
        hasher.update(s.as_bytes());
        hasher.update([0x1f]);
    };
    field(&content.app_label);
    field(&content.title);
    field(&content.text);
    field(content.island_type.as_str());
    field(&content.progress.map(|p| p.to_string()).unwrap_or_default());
    field(if content.redacted { "1" } else { "0" });
    for action in &content.actions {
        field(&action.title);
    }
    hex::encode(hasher.finalize())
}
