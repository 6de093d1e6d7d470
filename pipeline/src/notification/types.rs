//! Notification type definitions.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::{IconRef, TriggerHandle};

/// Well-known extras keys.
pub mod extras {
    pub const TITLE: &str = "android.title";
    pub const TEXT: &str = "android.text";
    pub const SUB_TEXT: &str = "android.subText";
    pub const BIG_TEXT: &str = "android.bigText";
    pub const PICTURE: &str = "android.picture";
    pub const LARGE_ICON: &str = "android.largeIcon";
    pub const TEMPLATE: &str = "android.template";
    pub const SHOW_CHRONOMETER: &str = "android.showChronometer";
    pub const CHRONOMETER_COUNT_DOWN: &str = "android.chronometerCountDown";
    pub const CALL_PERSON: &str = "android.callPerson";
    pub const PEOPLE: &str = "android.people.list";
}

/// One value stored in a notification's extras.
#[derive(Debug, Clone)]
pub enum Extra {
    Text(String),
    Bool(bool),
    Int(i64),
    Icon(IconRef),
    Person(Person),
    People(Vec<Person>),
}

/// A person attached to a notification (caller, sender).
#[derive(Debug, Clone, Default)]
pub struct Person {
    pub name: Option<String>,
    pub icon: Option<IconRef>,
}

/// Free-form extras bag with typed accessors.
#[derive(Debug, Clone, Default)]
pub struct Extras(HashMap<String, Extra>);

impl Extras {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Extra) -> &mut Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Extra> {
        self.0.get(key)
    }

    /// Non-blank text value.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(Extra::Text(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(Extra::Bool(true)))
    }

    pub fn icon(&self, key: &str) -> Option<&IconRef> {
        match self.0.get(key) {
            Some(Extra::Icon(icon)) => Some(icon),
            _ => None,
        }
    }

    pub fn person(&self, key: &str) -> Option<&Person> {
        match self.0.get(key) {
            Some(Extra::Person(p)) => Some(p),
            Some(Extra::People(list)) => list.first(),
            _ => None,
        }
    }
}

/// Lock-screen visibility declared by the posting app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Secret,
}

/// Notification category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Call,
    Navigation,
    Progress,
    Transport,
    Alarm,
    Stopwatch,
    Message,
    Other(String),
}

impl Category {
    pub fn from_str_category(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "call" => Self::Call,
            "navigation" => Self::Navigation,
            "progress" => Self::Progress,
            "transport" => Self::Transport,
            "alarm" => Self::Alarm,
            "stopwatch" => Self::Stopwatch,
            "msg" | "message" => Self::Message,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Progress as reported by the notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub current: i64,
    pub max: i64,
    pub indeterminate: bool,
}

impl Progress {
    /// Integer percent in `0..=100`, or `None` when `max <= 0` or
    /// `current < 0`.
    pub fn percent(&self) -> Option<u8> {
        if self.max <= 0 || self.current < 0 {
            return None;
        }
        let pct = (self.current as f64 * 100.0 / self.max as f64).round();
        Some(pct.clamp(0.0, 100.0) as u8)
    }
}

/// One notification action button.
#[derive(Debug, Clone)]
pub struct NotificationAction {
    pub title: String,
    pub trigger: Option<TriggerHandle>,
    pub icon: Option<IconRef>,
    pub has_remote_input: bool,
}

impl NotificationAction {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            trigger: None,
            icon: None,
            has_remote_input: false,
        }
    }
}

/// A posted notification, as handed over by the notification source.
#[derive(Debug, Clone, Default)]
pub struct NotificationEvent {
    /// Stable identity of the source notification.
    pub key: String,
    pub app_id: String,
    pub title: Option<String>,
    pub text: Option<String>,
    pub sub_text: Option<String>,
    pub big_text: Option<String>,
    pub visibility: Visibility,
    /// Base timestamp (`when`), used for chronometers and timers.
    pub when: Option<DateTime<Utc>>,
    pub progress: Progress,
    pub actions: Vec<NotificationAction>,
    pub category: Option<Category>,
    pub small_icon: Option<IconRef>,
    pub large_icon: Option<IconRef>,
    pub content_trigger: Option<TriggerHandle>,
    pub extras: Extras,
}

impl NotificationEvent {
    pub fn new(key: impl Into<String>, app_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    pub fn is_category(&self, category: &Category) -> bool {
        self.category.as_ref() == Some(category)
    }

    /// Title, falling back to the title extra.
    pub fn title_text(&self) -> Option<&str> {
        non_blank(self.title.as_deref()).or_else(|| self.extras.text(extras::TITLE))
    }

    /// Body text, falling back to the raw text extra.
    pub fn body_text(&self) -> Option<&str> {
        non_blank(self.text.as_deref()).or_else(|| self.extras.text(extras::TEXT))
    }

    pub fn sub_text(&self) -> Option<&str> {
        non_blank(self.sub_text.as_deref()).or_else(|| self.extras.text(extras::SUB_TEXT))
    }

    pub fn big_text(&self) -> Option<&str> {
        non_blank(self.big_text.as_deref()).or_else(|| self.extras.text(extras::BIG_TEXT))
    }

    /// The style template name, e.g. `Notification$MediaStyle`.
    pub fn template(&self) -> Option<&str> {
        self.extras.text(extras::TEMPLATE)
    }

    pub fn is_media_style(&self) -> bool {
        self.template().is_some_and(|t| t.contains("MediaStyle"))
    }

    pub fn is_call_style(&self) -> bool {
        self.template().is_some_and(|t| t.contains("CallStyle"))
    }

    pub fn shows_chronometer(&self) -> bool {
        self.extras.flag(extras::SHOW_CHRONOMETER)
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Which translator renders a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IslandType {
    Standard,
    Call,
    Media,
    Navigation,
    Progress,
    Timer,
}

impl IslandType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Call => "call",
            Self::Media => "media",
            Self::Navigation => "navigation",
            Self::Progress => "progress",
            Self::Timer => "timer",
        }
    }
}
