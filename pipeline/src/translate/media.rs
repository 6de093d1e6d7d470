//! Media islands: album art, a palette-derived color triad and up to three
//! text-only transport buttons.

use std::sync::Arc;

use island_image::{Color, Palette, round_corners};

use super::{Namespace, TranslateContext, base_descriptor};
use crate::descriptor::{IslandAction, IslandDescriptor};
use crate::notification::{IslandType, NotificationEvent, extras};
use crate::platform::Bitmap;

pub const MAX_MEDIA_ACTIONS: usize = 3;

/// Corner radius of the album art, as a fraction of its shorter side.
const ART_CORNER_RADIUS: f32 = 0.2;

/// Colors for the expanded island when the art yields no usable palette.
pub const FALLBACK_TRIAD: ColorTriad = ColorTriad {
    container: Color(0xFF1C_1C1E),
    title: Color::WHITE,
    body: Color(0xB3FF_FFFF),
};

/// Container background plus readable title and body colors on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTriad {
    pub container: Color,
    pub title: Color,
    pub body: Color,
}

impl ColorTriad {
    /// Dominant swatch, else vibrant, else muted.
    pub fn from_palette(palette: &Palette) -> Option<Self> {
        let swatch = palette.dominant.or(palette.vibrant).or(palette.muted)?;
        Some(Self {
            container: swatch.color,
            title: swatch.title_text_color(),
            body: swatch.body_text_color(),
        })
    }
}

/// Album art: large icon, legacy large-icon extra, then the app icon.
fn album_art(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> Option<Bitmap> {
    [event.large_icon.as_ref(), event.extras.icon(extras::LARGE_ICON)]
        .into_iter()
        .flatten()
        .find_map(|icon| ctx.load_icon(icon))
        .or_else(|| ctx.launcher_icon(&event.app_id))
}

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Media, event, ctx, &ns);

    let art = album_art(event, ctx);
    let triad = art
        .as_deref()
        .and_then(|img| ColorTriad::from_palette(&Palette::from_image(img)))
        .unwrap_or(FALLBACK_TRIAD);

    if let Some(art) = art {
        let rounded = Arc::new(round_corners(&art, ART_CORNER_RADIUS));
        let key = d.add_resource(ns.resource("art"), rounded);
        d.summary.icon = Some(key.clone());
        d.expanded.left.image = Some(key);
    }

    let artist = event.body_text().or_else(|| event.sub_text()).map(str::to_string);
    d.summary.subtitle = artist.clone();
    d.container = Some(triad.container);
    d.expanded.left.title = Some(d.summary.title.clone());
    d.expanded.left.content = artist;
    d.expanded.left.title_color = Some(triad.title);
    d.expanded.left.content_color = Some(triad.body);

    d.actions = event
        .actions
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.title.trim().is_empty())
        .take(MAX_MEDIA_ACTIONS)
        .map(|(i, action)| IslandAction {
            key: ns.action(i),
            title: action.title.clone(),
            icon: None,
            trigger: action.trigger.clone(),
            background: Some(Color::TRANSPARENT),
            tint: Some(triad.title),
        })
        .collect();
    d
}
