//! SettingsManager: store-backed settings with defaults and validation.

use super::defaults::DEFAULT_SETTINGS;
use super::store::PreferenceStore;
use super::validation::validate_setting;

/// Wraps a [`PreferenceStore`] to provide defaulted, validated reads.
pub struct SettingsManager<S> {
    store: S,
}

impl<S: PreferenceStore> SettingsManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get a setting value. Falls back to the default if the store has none.
    pub async fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        if let Some(val) = self.store.get(key).await {
            return Ok(val);
        }
        if let Some(def) = DEFAULT_SETTINGS.get(key) {
            return Ok(def.default.to_string());
        }
        anyhow::bail!("setting not found: {key}");
    }

    /// Get a setting value, replacing an invalid stored value by the default.
    pub async fn get_valid_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        let value = self.get_setting(key).await?;
        match validate_setting(key, &value) {
            Ok(()) => Ok(value),
            Err(e) => {
                let def = DEFAULT_SETTINGS
                    .get(key)
                    .ok_or_else(|| anyhow::anyhow!("unknown setting key: {key}"))?;
                tracing::warn!(key, error = %e, "Invalid setting value, using default");
                Ok(def.default.to_string())
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
