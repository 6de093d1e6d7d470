//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

type DefTuple = (&'static str, &'static str, &'static str);

pub const RENDERER_BACKEND: &str = "RENDERER_BACKEND";
pub const LOCKSCREEN_ENABLED: &str = "LOCKSCREEN_ENABLED";
pub const ISLAND_FLOAT: &str = "ISLAND_FLOAT";
pub const ISLAND_SHADE: &str = "ISLAND_SHADE";
pub const ISLAND_TIMEOUT_SECS: &str = "ISLAND_TIMEOUT_SECS";
pub const DEFAULT_HIGHLIGHT_COLOR: &str = "DEFAULT_HIGHLIGHT_COLOR";
pub const THEME_CONFIG: &str = "THEME_CONFIG";
pub const APP_RENDER_CONFIG: &str = "APP_RENDER_CONFIG";

const DEFS: &[DefTuple] = &[
    (
        RENDERER_BACKEND,
        "auto",
        "Rendering backend: auto, native, overlay or disabled",
    ),
    (
        LOCKSCREEN_ENABLED,
        "true",
        "Show islands while the device is locked (private content is redacted)",
    ),
    (ISLAND_FLOAT, "true", "Pop new islands out as floating banners"),
    (
        ISLAND_SHADE,
        "true",
        "Keep a copy of each island in the notification shade",
    ),
    (
        ISLAND_TIMEOUT_SECS,
        "0",
        "Auto-dismiss islands after this many seconds (0 = never)",
    ),
    (
        DEFAULT_HIGHLIGHT_COLOR,
        "#FF3482F6",
        "Highlight color used when no theme color applies",
    ),
    (THEME_CONFIG, "{}", "Global and per-app theme overrides (JSON)"),
    (
        APP_RENDER_CONFIG,
        "{}",
        "Per-app float/shade/timeout overrides (JSON)",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
