//! Picks the translator for a notification.

use super::types::{Category, IslandType, NotificationEvent};

/// Classify an event into the island type that will render it.
///
/// Call and media styles win over everything else; a running chronometer
/// makes a timer; any determinate or indeterminate progress makes a progress
/// island.
pub fn classify(event: &NotificationEvent) -> IslandType {
    if event.is_category(&Category::Call) || event.is_call_style() {
        return IslandType::Call;
    }
    if event.is_media_style() {
        return IslandType::Media;
    }
    if event.is_category(&Category::Navigation) {
        return IslandType::Navigation;
    }
    if event.shows_chronometer() && event.when.is_some_and(|w| w.timestamp_millis() != 0) {
        return IslandType::Timer;
    }
    if event.progress.max > 0 || event.progress.indeterminate {
        return IslandType::Progress;
    }
    IslandType::Standard
}
