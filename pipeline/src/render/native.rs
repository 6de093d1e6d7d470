//! Native backend: islands are posted through the system notification sink.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};

use super::{RenderPayload, RenderedId, Renderer, lock};
use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::notification::{IslandType, NotificationEvent};
use crate::platform::{NativeEnvelope, NotificationSink};

/// Renders descriptors as system notifications.
///
/// Each source key gets a stable id derived from its hash; reposting under
/// that id makes the system update the notification in place.
pub struct NativeRenderer {
    sink: Arc<dyn NotificationSink>,
    ids: Mutex<HashMap<String, i32>>,
}

impl NativeRenderer {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            sink,
            ids: Mutex::new(HashMap::new()),
        }
    }

    /// Tracked id for `key`, if any.
    pub fn id_for(&self, key: &str) -> Option<i32> {
        lock(&self.ids).get(key).copied()
    }

    fn cancel(&self, key: &str, id: i32) {
        if let Err(e) = self.sink.cancel(id) {
            tracing::warn!(key, id, error = %e, "Failed to cancel native island");
        }
    }
}

/// Non-negative id from the first four bytes of the key's SHA-256.
pub fn stable_id(key: &str) -> i32 {
    let digest = Sha256::digest(key.as_bytes());
    let raw = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (raw & 0x7FFF_FFFF) as i32
}

impl Renderer for NativeRenderer {
    fn backend(&self) -> Backend {
        Backend::Native
    }

    fn post(
        &self,
        key: &str,
        event: &NotificationEvent,
        _island_type: IslandType,
        _config: &RenderConfig,
        payload: RenderPayload,
    ) -> Option<RenderedId> {
        let RenderPayload::Island(descriptor) = payload else {
            tracing::warn!(key, payload = payload.kind(), "Native renderer got a foreign payload");
            return None;
        };

        let (id, fresh) = {
            let mut ids = lock(&self.ids);
            match ids.get(key) {
                Some(&id) => (id, false),
                None => {
                    // Probe past collisions with other live keys.
                    let mut id = stable_id(key);
                    while ids.values().any(|&v| v == id) {
                        id = id.checked_add(1).unwrap_or(0);
                    }
                    ids.insert(key.to_string(), id);
                    (id, true)
                }
            }
        };

        let envelope = NativeEnvelope {
            app_id: event.app_id.clone(),
            descriptor,
        };
        match self.sink.notify(id, &envelope) {
            Ok(()) => {
                tracing::debug!(key, id, "Posted native island");
                Some(RenderedId::Native(id))
            }
            Err(e) => {
                tracing::warn!(key, id, error = %e, "Failed to post native island");
                if fresh {
                    lock(&self.ids).remove(key);
                }
                None
            }
        }
    }

    fn dismiss(&self, key: &str) {
        let removed = lock(&self.ids).remove(key);
        if let Some(id) = removed {
            self.cancel(key, id);
        }
    }

    fn dismiss_by_rendered_id(&self, id: RenderedId) {
        let RenderedId::Native(id) = id else { return };
        let key = lock(&self.ids)
            .iter()
            .find(|&(_, &v)| v == id)
            .map(|(k, _)| k.clone());
        if let Some(key) = key {
            self.dismiss(&key);
        }
    }

    fn clear_all(&self) {
        let drained: Vec<(String, i32)> = lock(&self.ids).drain().collect();
        if !drained.is_empty() {
            tracing::info!(count = drained.len(), "Clearing native islands");
        }
        for (key, id) in drained {
            self.cancel(&key, id);
        }
    }

    fn rendered_count(&self) -> usize {
        lock(&self.ids).len()
    }
}
