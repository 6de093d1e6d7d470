//! Configuration management: defaults, validation, loading from the
//! host's preference store, and the theme model.

pub mod defaults;
pub mod manager;
pub mod pipeline_config;
pub mod store;
pub mod theme;
pub mod validation;

pub use manager::SettingsManager;
pub use pipeline_config::{PipelineConfig, RenderConfig, RenderOverride};
pub use store::{MemoryPreferenceStore, PreferenceStore};
pub use theme::{ActionStyle, AppTheme, CallStyle, GlobalTheme, KeywordAction, ThemeConfig};
