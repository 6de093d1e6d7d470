//! Backend-agnostic island description.
//!
//! Rebuilt on every post and never persisted.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use island_image::Color;

use crate::notification::IslandType;
use crate::platform::{Bitmap, TriggerHandle};

/// What to show for one notification.
#[derive(Debug, Clone)]
pub struct IslandDescriptor {
    pub island_type: IslandType,
    pub summary: Summary,
    pub expanded: Expanded,
    pub progress: Option<ProgressSpec>,
    pub actions: Vec<IslandAction>,
    pub highlight: Option<Color>,
    /// Background of the expanded island, when derived from content.
    pub container: Option<Color>,
    pub timer: Option<TimerSpec>,
    pub flags: DisplayFlags,
    /// Image key → bitmap. Keys referenced by the slots above.
    pub resources: BTreeMap<String, Bitmap>,
}

impl IslandDescriptor {
    pub fn new(island_type: IslandType, title: impl Into<String>) -> Self {
        Self {
            island_type,
            summary: Summary {
                icon: None,
                title: title.into(),
                subtitle: None,
            },
            expanded: Expanded::default(),
            progress: None,
            actions: Vec::new(),
            highlight: None,
            container: None,
            timer: None,
            flags: DisplayFlags::default(),
            resources: BTreeMap::new(),
        }
    }

    /// Store a bitmap and return its key.
    pub fn add_resource(&mut self, key: String, bitmap: Bitmap) -> String {
        self.resources.insert(key.clone(), bitmap);
        key
    }
}

/// Collapsed (pill) content.
#[derive(Debug, Clone, Default)]
pub struct Summary {
    pub icon: Option<String>,
    pub title: String,
    pub subtitle: Option<String>,
}

/// Expanded content: two image+text slots.
#[derive(Debug, Clone, Default)]
pub struct Expanded {
    pub left: ImageTextSlot,
    pub right: Option<ImageTextSlot>,
}

#[derive(Debug, Clone, Default)]
pub struct ImageTextSlot {
    pub image: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub title_color: Option<Color>,
    pub content_color: Option<Color>,
}

/// Progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSpec {
    pub percent: u8,
    pub color: Option<Color>,
}

/// One island button.
#[derive(Debug, Clone)]
pub struct IslandAction {
    pub key: String,
    pub title: String,
    pub icon: Option<String>,
    pub trigger: Option<TriggerHandle>,
    pub background: Option<Color>,
    pub tint: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    CountDown,
    CountUp,
}

/// A running timer. `offset_millis` is `base - now`: positive while a
/// countdown still has time left, negative for elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSpec {
    pub kind: TimerKind,
    pub base: DateTime<Utc>,
    pub offset_millis: i64,
}

impl TimerSpec {
    pub fn new(base: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let offset_millis = (base - now).num_milliseconds();
        let kind = if offset_millis > 0 {
            TimerKind::CountDown
        } else {
            TimerKind::CountUp
        };
        Self {
            kind,
            base,
            offset_millis,
        }
    }
}

/// Timing, floating and shade behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags {
    /// Pop the island out as a floating banner.
    pub float: bool,
    /// Also keep an entry in the notification shade.
    pub shade: bool,
    /// Auto-dismiss hint.
    pub timeout: Option<Duration>,
}
