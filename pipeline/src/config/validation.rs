//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

use super::defaults::*;

static RE_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        RENDERER_BACKEND => {
            if !["auto", "native", "overlay", "disabled"].contains(&value) {
                return Err("must be auto, native, overlay, or disabled".into());
            }
        }
        ISLAND_TIMEOUT_SECS => validate_int_range(value, 0, 600)?,
        DEFAULT_HIGHLIGHT_COLOR => {
            if !RE_COLOR.is_match(value) {
                return Err("must be #RRGGBB or #AARRGGBB".into());
            }
        }
        THEME_CONFIG | APP_RENDER_CONFIG => validate_json_object(value)?,
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn validate_json_object(value: &str) -> Result<(), String> {
    match serde_json::from_str::<serde_json::Value>(value) {
        Ok(serde_json::Value::Object(_)) => Ok(()),
        Ok(_) => Err("must be a JSON object".into()),
        Err(e) => Err(format!("invalid JSON: {e}")),
    }
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, LOCKSCREEN_ENABLED | ISLAND_FLOAT | ISLAND_SHADE)
}
