//! Navigation islands: pulls a distance, a turn instruction and an ETA out
//! of free-form turn-by-turn text.

use std::sync::LazyLock;

use regex::Regex;

use super::{Namespace, TranslateContext, base_descriptor};
use crate::descriptor::{ImageTextSlot, IslandDescriptor, ProgressSpec};
use crate::notification::{IslandType, NotificationEvent};

/// Instruction shown when no text qualifies.
pub const GENERIC_INSTRUCTION: &str = "Navigation";

/// Leading "<number> <unit>" distance.
static RE_DISTANCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(\d+(?:[.,]\d+)?\s*",
        r"(?:(?:kilomet(?:er|re)s?|met(?:er|re)s?|miles?|feet|foot|yards?|km|mi|ft|yd|m)\b",
        r"|公里|千米|米))",
    ))
    .unwrap()
});

/// Clock time or a duration.
static RE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\d{1,2}:\d{2}(?:\s*[ap]m\b)?",
        r"|\d+\s*(?:hours?|hrs?|h|minutes?|mins?|min)\b",
        r"|\d+\s*(?:小时|分钟|分)",
    ))
    .unwrap()
});

/// Parsed navigation text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directions {
    pub distance: Option<String>,
    pub instruction: String,
    pub eta: Option<String>,
}

impl Directions {
    /// Scan big text, title, text and subtext in that order.
    pub fn parse(event: &NotificationEvent) -> Self {
        let fields = [
            event.big_text(),
            event.title_text(),
            event.body_text(),
            event.sub_text(),
        ];

        let mut distance = None;
        let mut instruction = None;
        let mut distance_field = None;
        for (i, field) in fields.iter().enumerate() {
            let Some(text) = field else { continue };
            let Some(caps) = RE_DISTANCE.captures(text) else {
                continue;
            };
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            distance = Some(value.as_str().trim().to_string());
            distance_field = Some(i);
            let rest = trim_separators(&text[whole.end()..]);
            if !rest.is_empty() && !is_only_time(rest) {
                instruction = Some(rest.to_string());
            }
            break;
        }

        let instruction = instruction
            .or_else(|| {
                fields
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| Some(*i) != distance_field)
                    .filter_map(|(_, f)| f.map(trim_separators))
                    .find(|t| !t.is_empty() && !is_only_time(t))
                    .map(str::to_string)
            })
            .unwrap_or_else(|| GENERIC_INSTRUCTION.to_string());

        let eta = [event.sub_text(), event.body_text()]
            .into_iter()
            .flatten()
            .find_map(|t| RE_TIME.find(t))
            .map(|m| m.as_str().trim().to_string());

        Self {
            distance,
            instruction,
            eta,
        }
    }
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c: char| {
        c.is_whitespace() || matches!(c, '·' | '•' | '-' | '–' | '—' | ',' | '.' | ':' | ';' | '|')
    })
}

fn is_only_time(s: &str) -> bool {
    RE_TIME
        .find(s)
        .is_some_and(|m| m.start() == 0 && m.end() == s.len())
}

pub fn translate(event: &NotificationEvent, ctx: &TranslateContext<'_>) -> IslandDescriptor {
    let ns = Namespace::of(event);
    let mut d = base_descriptor(IslandType::Navigation, event, ctx, &ns);
    let directions = Directions::parse(event);

    match &directions.distance {
        Some(distance) => {
            d.summary.title = distance.clone();
            d.summary.subtitle = Some(directions.instruction.clone());
        }
        None => {
            d.summary.title = directions.instruction.clone();
            d.summary.subtitle = directions.eta.clone();
        }
    }
    d.expanded.left.title = Some(directions.instruction.clone());
    d.expanded.left.content = directions.distance.clone();
    d.expanded.right = directions.eta.clone().map(|eta| ImageTextSlot {
        title: Some(eta),
        ..ImageTextSlot::default()
    });

    if event.progress.max > 0 {
        d.progress = event.progress.percent().map(|percent| ProgressSpec {
            percent,
            color: d.highlight,
        });
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Progress;
    use crate::translate::test_support::*;

    fn nav(title: Option<&str>, text: Option<&str>, sub: Option<&str>) -> NotificationEvent {
        let mut e = event("0|com.example.maps|1");
        e.app_id = "com.example.maps".into();
        e.title = title.map(Into::into);
        e.text = text.map(Into::into);
        e.sub_text = sub.map(Into::into);
        e
    }

    #[test]
    fn distance_and_instruction_from_title() {
        let e = nav(Some("200 m · Turn left onto Main St"), Some("Main St"), Some("12:45 ETA"));
        let dir = Directions::parse(&e);
        assert_eq!(dir.distance.as_deref(), Some("200 m"));
        assert_eq!(dir.instruction, "Turn left onto Main St");
        assert_eq!(dir.eta.as_deref(), Some("12:45"));
    }

    #[test]
    fn distance_with_only_time_falls_back_to_another_field() {
        let e = nav(Some("Head north"), Some("350 m · 2 min"), None);
        let dir = Directions::parse(&e);
        assert_eq!(dir.distance.as_deref(), Some("350 m"));
        assert_eq!(dir.instruction, "Head north");
        assert_eq!(dir.eta.as_deref(), Some("2 min"));
    }

    #[test]
    fn decimal_and_cjk_units() {
        let e = nav(Some("1.5 km, keep right"), None, None);
        assert_eq!(Directions::parse(&e).distance.as_deref(), Some("1.5 km"));
        let e = nav(Some("500米 左转"), None, Some("5分钟"));
        let dir = Directions::parse(&e);
        assert_eq!(dir.distance.as_deref(), Some("500米"));
        assert_eq!(dir.instruction, "左转");
        assert_eq!(dir.eta.as_deref(), Some("5分钟"));
    }

    #[test]
    fn spelled_out_units_are_distances() {
        let e = nav(Some("5 miles ahead"), None, None);
        let dir = Directions::parse(&e);
        assert_eq!(dir.distance.as_deref(), Some("5 miles"));
        assert_eq!(dir.instruction, "ahead");
        let e = nav(Some("300 meters, turn left"), None, None);
        assert_eq!(Directions::parse(&e).distance.as_deref(), Some("300 meters"));
        let e = nav(Some("2 kilometres to exit"), None, None);
        assert_eq!(Directions::parse(&e).distance.as_deref(), Some("2 kilometres"));
    }

    #[test]
    fn durations_are_not_distances() {
        let e = nav(Some("2 mins to go"), None, None);
        assert_eq!(Directions::parse(&e).distance, None);
        let e = nav(Some("5 months"), None, None);
        assert_eq!(Directions::parse(&e).distance, None);
    }

    #[test]
    fn nothing_qualifies() {
        let e = nav(None, Some("10 min"), None);
        let dir = Directions::parse(&e);
        assert_eq!(dir.instruction, GENERIC_INSTRUCTION);
        assert_eq!(dir.distance, None);
        assert_eq!(dir.eta.as_deref(), Some("10 min"));
    }

    #[test]
    fn descriptor_layout_and_progress() {
        let f = Fixture::new();
        let mut e = nav(Some("200 m Turn right"), None, Some("3 min"));
        let d = translate(&e, &f.ctx());
        assert_eq!(d.summary.title, "200 m");
        assert_eq!(d.summary.subtitle.as_deref(), Some("Turn right"));
        assert_eq!(d.expanded.right.as_ref().unwrap().title.as_deref(), Some("3 min"));
        assert!(d.progress.is_none());

        e.progress = Progress {
            current: 1,
            max: 4,
            indeterminate: false,
        };
        let d = translate(&e, &f.ctx());
        assert_eq!(d.progress.unwrap().percent, 25);
        assert_eq!(d.progress.unwrap().color, d.highlight);
    }
}
