//! Notification → island rendering pipeline.
//!
//! Classifies incoming notifications, translates them into backend-agnostic
//! island descriptors under a cascading theme, and renders them through
//! either the system's native island surface or a floating overlay window.

pub mod app;
pub mod backend;
pub mod config;
pub mod descriptor;
pub mod extract;
pub mod logging;
pub mod notification;
pub mod platform;
pub mod render;
pub mod style;
pub mod translate;

#[cfg(test)]
mod tests;

pub use app::{Collaborators, IslandPipeline};
pub use backend::{Backend, BackendPreference, BackendResolver};
pub use config::{PipelineConfig, RenderConfig, ThemeConfig};
pub use descriptor::IslandDescriptor;
pub use notification::{IslandType, NotificationEvent};
pub use render::{RenderPayload, RenderedId, Renderer};
