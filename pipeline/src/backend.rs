//! Backend selection.
//!
//! Maps the user's renderer preference plus the device's capabilities to
//! the backend that will actually render islands.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::platform::CapabilityProbe;

/// A concrete rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Native,
    Overlay,
    #[default]
    Disabled,
}

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    #[default]
    Auto,
    Native,
    Overlay,
    Disabled,
}

impl BackendPreference {
    pub fn from_str_setting(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "native" => Self::Native,
            "overlay" => Self::Overlay,
            "disabled" | "off" => Self::Disabled,
            _ => Self::Auto,
        }
    }
}

/// Resolves a [`BackendPreference`] against the device's capabilities.
#[derive(Clone)]
pub struct BackendResolver {
    probe: Arc<dyn CapabilityProbe>,
}

impl BackendResolver {
    pub fn new(probe: Arc<dyn CapabilityProbe>) -> Self {
        Self { probe }
    }

    /// Pick the backend for `preference`.
    ///
    /// An explicit choice falls back to the other backend when unavailable;
    /// `Auto` prefers native. Probe failures count as "unsupported".
    pub fn resolve(&self, preference: BackendPreference) -> Backend {
        let native = || self.native_available();
        let overlay = || self.overlay_available();

        match preference {
            BackendPreference::Disabled => Backend::Disabled,
            BackendPreference::Native | BackendPreference::Auto => {
                if native() {
                    Backend::Native
                } else if overlay() {
                    Backend::Overlay
                } else {
                    Backend::Disabled
                }
            }
            BackendPreference::Overlay => {
                if overlay() {
                    Backend::Overlay
                } else if native() {
                    Backend::Native
                } else {
                    Backend::Disabled
                }
            }
        }
    }

    fn native_available(&self) -> bool {
        self.probe.native_supported().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Native capability probe failed");
            false
        })
    }

    fn overlay_available(&self) -> bool {
        self.probe.overlay_permitted().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Overlay permission probe failed");
            false
        })
    }
}
