//! Collaborator contracts supplied by the host.
//!
//! Everything that touches the device lives behind these traits: app
//! metadata lookup, the system notification sink, the floating-window
//! surface, capability probes and action triggers. Every call may fail with
//! [`PlatformError`]; the pipeline swallows those failures and substitutes a
//! safe default.

use std::fmt;
use std::sync::Arc;

use image::RgbaImage;

use crate::descriptor::IslandDescriptor;
use crate::render::overlay::ViewSpec;

/// Decoded bitmap shared between descriptors, views and caches.
pub type Bitmap = Arc<RgbaImage>;

/// Failure reported by a host collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlatformError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Surface error: {0}")]
    Surface(String),

    #[error("Trigger was cancelled")]
    TriggerCancelled,

    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Reference to an icon that may still need loading.
#[derive(Clone)]
pub enum IconRef {
    /// Already decoded.
    Bitmap(Bitmap),
    /// A drawable resource inside an app package.
    Resource { package: String, id: i32 },
}

impl fmt::Debug for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap(b) => write!(f, "IconRef::Bitmap({}x{})", b.width(), b.height()),
            Self::Resource { package, id } => write!(f, "IconRef::Resource({package}#{id})"),
        }
    }
}

/// App label and icon lookups.
pub trait AppMetadata: Send + Sync {
    /// Human-readable app name.
    fn label(&self, app_id: &str) -> Result<String, PlatformError>;

    /// The app's launcher icon.
    fn launcher_icon(&self, app_id: &str) -> Result<Bitmap, PlatformError>;

    /// Resolve an icon reference to pixels.
    fn load_icon(&self, icon: &IconRef) -> Result<Bitmap, PlatformError>;

    /// Label, falling back to the app id when missing or blank.
    fn label_or_id(&self, app_id: &str) -> String {
        match self.label(app_id) {
            Ok(label) if !label.trim().is_empty() => label,
            Ok(_) => app_id.to_string(),
            Err(e) => {
                tracing::debug!(app_id, error = %e, "Label lookup failed");
                app_id.to_string()
            }
        }
    }

    /// [`AppMetadata::load_icon`] with failures logged and dropped. Inline
    /// bitmaps are returned as is.
    fn try_load_icon(&self, icon: &IconRef) -> Option<Bitmap> {
        if let IconRef::Bitmap(b) = icon {
            return Some(b.clone());
        }
        self.load_icon(icon)
            .inspect_err(|e| tracing::debug!(icon = ?icon, error = %e, "Icon load failed"))
            .ok()
    }

    fn try_launcher_icon(&self, app_id: &str) -> Option<Bitmap> {
        self.launcher_icon(app_id)
            .inspect_err(|e| tracing::debug!(app_id, error = %e, "Launcher icon lookup failed"))
            .ok()
    }
}

/// Something that can be fired when the user taps an island or a button.
pub trait ActionTrigger: Send + Sync {
    fn send(&self) -> Result<(), PlatformError>;
}

/// Shared handle to an [`ActionTrigger`].
#[derive(Clone)]
pub struct TriggerHandle(Arc<dyn ActionTrigger>);

impl TriggerHandle {
    pub fn new(trigger: impl ActionTrigger + 'static) -> Self {
        Self(Arc::new(trigger))
    }

    /// Fire the trigger. Failures are logged and swallowed.
    pub fn fire(&self) {
        if let Err(e) = self.0.send() {
            tracing::debug!(error = %e, "Trigger send failed");
        }
    }

    /// Whether two handles refer to the same trigger.
    pub fn same_as(&self, other: &TriggerHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TriggerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TriggerHandle(..)")
    }
}

/// What the native backend hands to the system for one island.
#[derive(Debug, Clone)]
pub struct NativeEnvelope {
    pub app_id: String,
    pub descriptor: IslandDescriptor,
}

/// System notification sink used by the native backend.
pub trait NotificationSink: Send + Sync {
    /// Post or update the notification with this id.
    fn notify(&self, id: i32, envelope: &NativeEnvelope) -> Result<(), PlatformError>;

    fn cancel(&self, id: i32) -> Result<(), PlatformError>;
}

/// Floating-window surface used by the overlay backend.
///
/// Only ever called from the overlay UI queue.
pub trait WindowSurface: Send {
    fn add_view(&mut self, view: &ViewSpec) -> Result<(), PlatformError>;

    fn update_view_layout(&mut self, view: &ViewSpec) -> Result<(), PlatformError>;

    fn remove_view(&mut self, view: &ViewSpec) -> Result<(), PlatformError>;
}

/// Device lock-state query.
pub trait DeviceLock: Send + Sync {
    fn is_locked(&self) -> bool;
}

/// Probes deciding which backends can run on this device.
pub trait CapabilityProbe: Send + Sync {
    /// Whether the vendor island feature is available.
    fn native_supported(&self) -> Result<bool, PlatformError>;

    /// Whether the app may draw floating windows.
    fn overlay_permitted(&self) -> Result<bool, PlatformError>;
}
