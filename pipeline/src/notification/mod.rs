//! Incoming notification model and classification.
//!
//! Events are ephemeral: they are consumed per call and never stored.

pub mod classify;
pub mod types;

pub use classify::classify;
pub use types::{
    Category, Extra, Extras, IslandType, NotificationAction, NotificationEvent, Person, Progress,
    Visibility, extras,
};
