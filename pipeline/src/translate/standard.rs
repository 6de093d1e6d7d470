//! Standard islands: title, one line of content, plain buttons.

use island_image::{Color, IconShape};

use super::{
    NEUTRAL_TINT, Namespace, TranslateContext, base_descriptor, composite_action_icon, join_parts,
};
use crate::descriptor::{IslandAction, IslandDescriptor};
use crate::notification::{IslandType, NotificationEvent};

/// Content shown for media-style notifications rendered as standard.
pub const NOW_PLAYING: &str = "Now playing";

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Standard, event, ctx, &ns);

    let content = content_line(event);
    d.summary.subtitle = content.clone();
    d.expanded.left.title = Some(d.summary.title.clone());
    d.expanded.left.content = content;

    // Buttons here ignore the theme: transparent with a neutral tint.
    let actions = event
        .actions
        .iter()
        .enumerate()
        .filter(|(_, a)| !a.title.trim().is_empty())
        .map(|(i, action)| {
            let icon = composite_action_icon(
                &mut d,
                ctx,
                &ns,
                i,
                action,
                NEUTRAL_TINT,
                Color::TRANSPARENT,
                IconShape::None,
                0,
            );
            IslandAction {
                key: ns.action(i),
                title: action.title.clone(),
                icon,
                trigger: action.trigger.clone(),
                background: Some(Color::TRANSPARENT),
                tint: Some(NEUTRAL_TINT),
            }
        })
        .collect::<Vec<_>>();
    d.actions = actions;
    d
}

/// Media → placeholder; any subtext (calls included) joins the text;
/// otherwise the plain text.
fn content_line(event: &NotificationEvent) -> Option<String> {
    if event.is_media_style() {
        return Some(NOW_PLAYING.to_string());
    }
    match event.sub_text() {
        Some(sub) => join_parts(&[event.body_text(), Some(sub)]),
        None => event.body_text().map(str::to_string),
    }
}
