//! Timer islands: a running countdown or stopwatch anchored at `when`.

use super::{Namespace, TranslateContext, base_descriptor, themed_action};
use crate::descriptor::{IslandDescriptor, TimerKind, TimerSpec};
use crate::notification::{IslandType, NotificationEvent};

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Timer, event, ctx, &ns);

    let timer = TimerSpec::new(event.when.unwrap_or(ctx.now), ctx.now);
    let label = match timer.kind {
        TimerKind::CountDown => "Remaining",
        TimerKind::CountUp => "Elapsed",
    };
    d.summary.subtitle = event
        .body_text()
        .map(str::to_string)
        .or_else(|| Some(label.to_string()));
    d.expanded.left.title = Some(d.summary.title.clone());
    d.expanded.left.content = d.summary.subtitle.clone();
    d.timer = Some(timer);

    let highlight = d.highlight.unwrap_or(ctx.default_highlight);
    let mut actions = Vec::new();
    for (i, action) in event.actions.iter().enumerate() {
        if !action.title.trim().is_empty() {
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
    }
    d.actions = actions;
    d
}
