//! Progress islands: a bar while running, a tick once finished.

use std::sync::Arc;

use island_image::tick;
use keywords::KeywordKind;

use super::{Namespace, TranslateContext, base_descriptor, themed_action};
use crate::descriptor::{IslandDescriptor, ProgressSpec};
use crate::notification::{IslandType, NotificationEvent};

pub const FINISHED: &str = "Finished";

const TICK_SIZE: u32 = 96;

/// Percent reached 100, or the text says so in one of the known languages.
pub fn is_finished(event: &NotificationEvent) -> bool {
    if event.progress.percent().is_some_and(|p| p >= 100) {
        return true;
    }
    let kw = keywords::builtin();
    [event.body_text(), event.title_text(), event.sub_text()]
        .into_iter()
        .flatten()
        .any(|t| kw.matches(KeywordKind::Finished, t))
}

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Progress, event, ctx, &ns);
    let finished = is_finished(event);
    let highlight = d.highlight.unwrap_or(ctx.default_highlight);

    d.expanded.left.title = Some(d.summary.title.clone());
    if finished {
        let key = d.add_resource(ns.resource("tick"), Arc::new(tick(TICK_SIZE, highlight)));
        d.summary.icon = Some(key.clone());
        d.expanded.left.image = Some(key);
        d.summary.subtitle = Some(FINISHED.to_string());
        d.expanded.left.content = Some(FINISHED.to_string());
    } else {
        let percent = (!event.progress.indeterminate)
            .then(|| event.progress.percent())
            .flatten();
        let content = event
            .body_text()
            .map(str::to_string)
            .or_else(|| percent.map(|p| format!("{p}%")));
        d.summary.subtitle = content.clone();
        d.expanded.left.content = content;
        d.progress = percent.map(|percent| ProgressSpec {
            percent,
            color: Some(highlight),
        });
    }

    let mut actions = Vec::new();
    for (i, action) in event.actions.iter().enumerate() {
        if action.title.trim().is_empty() {
            continue;
        }
        actions.push(themed_action(
            &mut d,
            ctx,
            event,
            &ns,
            i,
            action,
            island_image::Color::TRANSPARENT,
            highlight,
        ));
    }
    d.actions = actions;
    d
}
