//! Call islands: incoming (decline / answer) or ongoing (speaker / decline
//! with an elapsed-time chronometer).

use island_image::Color;
use keywords::KeywordKind;

use super::{Namespace, TranslateContext, base_descriptor, composite_action_icon};
use crate::descriptor::{IslandAction, IslandDescriptor, TimerSpec};
use crate::notification::{IslandType, NotificationAction, NotificationEvent, extras};

pub const INCOMING_CALL: &str = "Incoming call";
pub const ONGOING_CALL: &str = "Ongoing call";

/// Background of the speaker button.
const SPEAKER_BACKGROUND: Color = Color(0x33FF_FFFF);

/// What each call button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallRole {
    Answer,
    Decline,
    Speaker,
}

/// Indices of the classified buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallButtons {
    pub answer: Option<usize>,
    pub decline: Option<usize>,
    pub speaker: Option<usize>,
}

impl CallButtons {
    /// Classify actions by their localized titles. When no title matches,
    /// falls back to position: first = decline, second = answer.
    pub fn classify(actions: &[NotificationAction]) -> Self {
        let kw = keywords::builtin();
        let mut buttons = Self::default();
        for (i, action) in actions.iter().enumerate() {
            let kind = kw.classify(
                &action.title,
                &[KeywordKind::Decline, KeywordKind::Answer, KeywordKind::Speaker],
            );
            let slot = match kind {
                Some(KeywordKind::Answer) => &mut buttons.answer,
                Some(KeywordKind::Decline) => &mut buttons.decline,
                Some(KeywordKind::Speaker) => &mut buttons.speaker,
                _ => continue,
            };
            slot.get_or_insert(i);
        }

        if buttons == Self::default() {
            buttons.decline = (!actions.is_empty()).then_some(0);
            buttons.answer = (actions.len() > 1).then_some(1);
            tracing::debug!(count = actions.len(), "No call keywords matched, using positions");
        }
        buttons
    }
}

/// Whether the call is still ringing: no chronometer and an answer button.
pub fn is_incoming(event: &NotificationEvent, buttons: &CallButtons) -> bool {
    !event.shows_chronometer() && buttons.answer.is_some()
}

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Call, event, ctx, &ns);

    if let Some(avatar) = event
        .extras
        .person(extras::CALL_PERSON)
        .and_then(|p| p.icon.as_ref())
        .and_then(|icon| ctx.load_icon(icon))
    {
        let key = d.add_resource(ns.resource("avatar"), avatar);
        d.summary.icon = Some(key.clone());
        d.expanded.left.image = Some(key);
    }
    if event.title_text().is_none()
        && let Some(name) = event
            .extras
            .person(extras::CALL_PERSON)
            .and_then(|p| p.name.clone())
    {
        d.summary.title = name;
    }

    let buttons = CallButtons::classify(&event.actions);
    let incoming = is_incoming(event, &buttons);
    let order: [(Option<usize>, CallRole); 2] = if incoming {
        [(buttons.decline, CallRole::Decline), (buttons.answer, CallRole::Answer)]
    } else {
        [(buttons.speaker, CallRole::Speaker), (buttons.decline, CallRole::Decline)]
    };

    d.expanded.left.title = Some(d.summary.title.clone());
    if incoming {
        d.summary.subtitle = Some(INCOMING_CALL.to_string());
        d.expanded.left.content = Some(INCOMING_CALL.to_string());
    } else {
        let base = event.when.unwrap_or(ctx.now);
        let timer = TimerSpec::new(base, ctx.now);
        d.summary.subtitle = Some(format_elapsed(-timer.offset_millis));
        d.expanded.left.content = Some(ONGOING_CALL.to_string());
        d.timer = Some(timer);
    }

    let style = ctx.style.resolve_call_style(ctx.theme, &event.app_id);
    let mut actions = Vec::new();
    for (index, role) in order {
        let Some(index) = index else { continue };
        let Some(action) = event.actions.get(index) else { continue };
        let (background, shape) = match role {
            CallRole::Answer => (style.answer_color, style.answer_shape),
            CallRole::Decline => (style.decline_color, style.decline_shape),
            CallRole::Speaker => (
                SPEAKER_BACKGROUND,
                ctx.style.resolve_shape(ctx.theme, &event.app_id),
            ),
        };
        let padding = ctx.style.resolve_padding(ctx.theme, &event.app_id);
        let icon = composite_action_icon(
            &mut d,
            ctx,
            &ns,
            index,
            action,
            Color::WHITE,
            background,
            shape,
            padding,
        );
        actions.push(IslandAction {
            key: ns.action(index),
            title: action.title.clone(),
            icon,
            trigger: action.trigger.clone(),
            background: Some(background),
            tint: Some(Color::WHITE),
        });
    }
    d.actions = actions;
    d
}

/// `m:ss`, or `h:mm:ss` past an hour. Negative input clamps to zero.
pub fn format_elapsed(millis: i64) -> String {
    let total = millis.max(0) / 1000;
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
