//! Read-only preference source supplied by the host.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;

/// Asynchronous key/value preference source.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> impl Future<Output = Option<String>> + Send;
}

/// In-memory store, for hosts that push preferences in and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: &str, value: impl Into<String>) {
        self.values.write().await.insert(key.to_string(), value.into());
    }

    pub async fn remove(&self, key: &str) {
        self.values.write().await.remove(key);
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }
}
