//! Runtime pipeline configuration loaded from the preference store.

use std::collections::HashMap;
use std::time::Duration;

use island_image::Color;
use serde::{Deserialize, Serialize};

use super::defaults::*;
use super::manager::SettingsManager;
use super::store::PreferenceStore;
use super::theme::ThemeConfig;
use crate::backend::BackendPreference;
use crate::descriptor::DisplayFlags;

/// Fallback highlight when neither the theme nor the settings give one.
pub const FALLBACK_HIGHLIGHT: Color = Color(0xFF34_82F6);

/// Per-notification render settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub float: bool,
    pub shade: bool,
    pub timeout: Option<Duration>,
    pub show_on_lockscreen: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            float: true,
            shade: true,
            timeout: None,
            show_on_lockscreen: true,
        }
    }
}

impl RenderConfig {
    pub fn display_flags(&self) -> DisplayFlags {
        DisplayFlags {
            float: self.float,
            shade: self.shade,
            timeout: self.timeout,
        }
    }
}

/// Per-app render override; absent fields inherit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOverride {
    pub float: Option<bool>,
    pub shade: Option<bool>,
    /// Seconds; `0` disables auto-dismiss for this app.
    pub timeout_secs: Option<u64>,
}

/// Typed snapshot of everything the pipeline reads from preferences.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub backend: BackendPreference,
    pub render: RenderConfig,
    pub app_render: HashMap<String, RenderOverride>,
    pub theme: ThemeConfig,
    pub default_highlight: Color,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend: BackendPreference::Auto,
            render: RenderConfig::default(),
            app_render: HashMap::new(),
            theme: ThemeConfig::default(),
            default_highlight: FALLBACK_HIGHLIGHT,
        }
    }
}

impl PipelineConfig {
    /// Load configuration through the settings manager.
    pub async fn load<S: PreferenceStore>(sm: &SettingsManager<S>) -> Result<Self, anyhow::Error> {
        let backend =
            BackendPreference::from_str_setting(&sm.get_valid_setting(RENDERER_BACKEND).await?);
        let show_on_lockscreen = sm.get_valid_setting(LOCKSCREEN_ENABLED).await? == "true";
        let float = sm.get_valid_setting(ISLAND_FLOAT).await? == "true";
        let shade = sm.get_valid_setting(ISLAND_SHADE).await? == "true";
        let timeout = timeout_from_secs(
            sm.get_valid_setting(ISLAND_TIMEOUT_SECS)
                .await?
                .parse()
                .unwrap_or(0),
        );
        let default_highlight =
            Color::parse_hex(&sm.get_valid_setting(DEFAULT_HIGHLIGHT_COLOR).await?)
                .unwrap_or(FALLBACK_HIGHLIGHT);

        let theme = parse_json_or_default::<ThemeConfig>(
            THEME_CONFIG,
            &sm.get_valid_setting(THEME_CONFIG).await?,
        );
        let app_render = parse_json_or_default::<HashMap<String, RenderOverride>>(
            APP_RENDER_CONFIG,
            &sm.get_valid_setting(APP_RENDER_CONFIG).await?,
        );

        Ok(Self {
            backend,
            render: RenderConfig {
                float,
                shade,
                timeout,
                show_on_lockscreen,
            },
            app_render,
            theme,
            default_highlight,
        })
    }

    /// Render settings for one app: per-app overrides over the global ones.
    pub fn render_for(&self, app_id: &str) -> RenderConfig {
        let mut config = self.render;
        if let Some(o) = self.app_render.get(app_id) {
            if let Some(float) = o.float {
                config.float = float;
            }
            if let Some(shade) = o.shade {
                config.shade = shade;
            }
            if let Some(secs) = o.timeout_secs {
                config.timeout = timeout_from_secs(secs);
            }
        }
        config
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_json_or_default<T: serde::de::DeserializeOwned + Default>(key: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!(key, error = %e, "Malformed JSON setting, using default");
        T::default()
    })
}
