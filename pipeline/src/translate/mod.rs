//! Type translators: notification + render config + theme → descriptor.
//!
//! Each translator is a pure mapping. Resource and action keys are
//! namespaced by a hash of the notification key so repeated translations
//! of different notifications never collide.

pub mod call;
pub mod media;
pub mod navigation;
pub mod progress;
pub mod standard;
pub mod timer;

use chrono::{DateTime, Utc};
use island_image::Color;
use sha2::{Digest, Sha256};

use crate::config::{RenderConfig, ThemeConfig};
use crate::descriptor::{IslandAction, IslandDescriptor};
use crate::notification::{IslandType, NotificationAction, NotificationEvent, extras};
use crate::platform::{Bitmap, IconRef};
use crate::style::StyleResolver;

/// Tint for buttons that ignore the theme.
pub const NEUTRAL_TINT: Color = Color(0xFF8E_8E93);

/// Inputs shared by every translator.
#[derive(Clone, Copy)]
pub struct TranslateContext<'a> {
    pub style: &'a StyleResolver,
    pub theme: &'a ThemeConfig,
    pub render: &'a RenderConfig,
    pub default_highlight: Color,
    pub now: DateTime<Utc>,
}

/// Translate `event` with the translator for `island_type`.
pub fn translate(
    island_type: IslandType,
    event: &NotificationEvent,
    ctx: &TranslateContext<'_>,
) -> IslandDescriptor {
    let descriptor = match island_type {
        IslandType::Standard => standard::translate(event, ctx),
        IslandType::Call => call::translate(event, ctx),
        IslandType::Media => media::translate(event, ctx),
        IslandType::Navigation => navigation::translate(event, ctx),
        IslandType::Progress => progress::translate(event, ctx),
        IslandType::Timer => timer::translate(event, ctx),
    };
    tracing::debug!(
        key = %event.key,
        island_type = island_type.as_str(),
        actions = descriptor.actions.len(),
        resources = descriptor.resources.len(),
        "Translated notification"
    );
    descriptor
}

/// Key prefix derived from the notification's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace(String);

impl Namespace {
    pub fn of(event: &NotificationEvent) -> Self {
        let digest = Sha256::digest(event.key.as_bytes());
        Self(hex::encode(&digest[..4]))
    }

    pub fn resource(&self, name: &str) -> String {
        format!("{}_{name}", self.0)
    }

    pub fn action(&self, index: usize) -> String {
        format!("{}_action_{index}", self.0)
    }
}

impl TranslateContext<'_> {
    pub fn app_label(&self, app_id: &str) -> String {
        self.style.metadata().label_or_id(app_id)
    }

    pub fn load_icon(&self, icon: &IconRef) -> Option<Bitmap> {
        self.style.metadata().try_load_icon(icon)
    }

    pub fn launcher_icon(&self, app_id: &str) -> Option<Bitmap> {
        self.style.metadata().try_launcher_icon(app_id)
    }

    /// Summary icon: large icon, legacy large-icon extra, small icon,
    /// launcher icon.
    pub fn summary_icon(&self, event: &NotificationEvent) -> Option<Bitmap> {
        [
            event.large_icon.as_ref(),
            event.extras.icon(extras::LARGE_ICON),
            event.small_icon.as_ref(),
        ]
        .into_iter()
        .flatten()
        .find_map(|icon| self.load_icon(icon))
        .or_else(|| self.launcher_icon(&event.app_id))
    }

    pub fn highlight(&self, app_id: &str) -> Color {
        self.style
            .resolve_color(self.theme, app_id, self.default_highlight)
    }
}

/// Descriptor with title, highlight, flags and the summary icon filled in.
pub(crate) fn base_descriptor(
    island_type: IslandType,
    event: &NotificationEvent,
    ctx: &TranslateContext<'_>,
    ns: &Namespace,
) -> IslandDescriptor {
    let title = event
        .title_text()
        .map(str::to_string)
        .unwrap_or_else(|| ctx.app_label(&event.app_id));
    let mut d = IslandDescriptor::new(island_type, title);
    d.highlight = Some(ctx.highlight(&event.app_id));
    d.flags = ctx.render.display_flags();
    if let Some(icon) = ctx.summary_icon(event) {
        let key = d.add_resource(ns.resource("icon"), icon);
        d.summary.icon = Some(key.clone());
        d.expanded.left.image = Some(key);
    }
    d
}

/// Button with theme styling: a matching keyword style wins, otherwise the
/// given defaults. The action's own icon, if any, is composited onto the
/// resolved shape.
#[allow(clippy::too_many_arguments)]
pub(crate) fn themed_action(
    d: &mut IslandDescriptor,
    ctx: &TranslateContext<'_>,
    event: &NotificationEvent,
    ns: &Namespace,
    index: usize,
    action: &NotificationAction,
    default_background: Color,
    default_tint: Color,
) -> IslandAction {
    let app_id = &event.app_id;
    let style = ctx
        .style
        .resolve_action_style(ctx.theme, app_id, &action.title)
        .unwrap_or_default();
    let background = style.background.unwrap_or(default_background);
    let tint = style.tint.unwrap_or(default_tint);
    let shape = style
        .shape
        .as_deref()
        .and_then(island_image::IconShape::from_id)
        .unwrap_or_else(|| ctx.style.resolve_shape(ctx.theme, app_id));
    let padding = style
        .padding
        .unwrap_or_else(|| ctx.style.resolve_padding(ctx.theme, app_id));

    let icon = composite_action_icon(d, ctx, ns, index, action, tint, background, shape, padding);
    IslandAction {
        key: ns.action(index),
        title: action.title.clone(),
        icon,
        trigger: action.trigger.clone(),
        background: Some(background),
        tint: Some(tint),
    }
}

/// Tint the action's icon onto a shaped background and store it.
#[allow(clippy::too_many_arguments)]
pub(crate) fn composite_action_icon(
    d: &mut IslandDescriptor,
    ctx: &TranslateContext<'_>,
    ns: &Namespace,
    index: usize,
    action: &NotificationAction,
    tint: Color,
    background: Color,
    shape: island_image::IconShape,
    padding: u8,
) -> Option<String> {
    let source = action.icon.as_ref().and_then(|i| ctx.load_icon(i))?;
    let composed = ctx.style.action_icon(&source, tint, background, shape, padding)?;
    Some(d.add_resource(ns.resource(&format!("action_icon_{index}")), composed))
}

/// Join non-blank parts with a middle dot.
pub(crate) fn join_parts(parts: &[Option<&str>]) -> Option<String> {
    let joined = parts
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" · ");
    (!joined.is_empty()).then_some(joined)
}
