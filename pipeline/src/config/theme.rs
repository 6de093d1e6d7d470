//! Theme configuration: a global style plus per-app overrides.
//!
//! Stored as JSON (camelCase). Per-app fields are all optional; an absent
//! field inherits from the global style.

use std::collections::HashMap;

use island_image::Color;
use serde::{Deserialize, Serialize};

/// Complete theme: global style and per-app overrides keyed by app id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeConfig {
    pub global: GlobalTheme,
    pub apps: HashMap<String, AppTheme>,
}

impl ThemeConfig {
    pub fn app(&self, app_id: &str) -> Option<&AppTheme> {
        self.apps.get(app_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalTheme {
    pub highlight_color: Option<Color>,
    /// Derive the highlight from each app's icon.
    pub use_app_colors: bool,
    pub icon_shape: Option<String>,
    pub icon_padding: Option<u8>,
    pub call: CallStyle,
    /// Keyword → button style, checked in order.
    pub actions: Vec<KeywordAction>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppTheme {
    pub highlight_color: Option<Color>,
    pub use_app_colors: Option<bool>,
    pub icon_shape: Option<String>,
    pub icon_padding: Option<u8>,
    pub call: CallStyle,
    pub actions: Vec<KeywordAction>,
}

/// Answer / decline button styling for call islands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallStyle {
    pub answer_color: Option<Color>,
    pub decline_color: Option<Color>,
    pub answer_shape: Option<String>,
    pub decline_shape: Option<String>,
}

/// Button styling applied when an action title contains `keyword`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KeywordAction {
    pub keyword: String,
    #[serde(flatten)]
    pub style: ActionStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionStyle {
    pub background: Option<Color>,
    pub tint: Option<Color>,
    pub shape: Option<String>,
    pub padding: Option<u8>,
}
