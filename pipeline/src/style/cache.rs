//! Memoized brand colors.
//!
//! Entries live until [`BrandColorCache::clear`]; the key space is bounded by
//! the number of installed apps, so there is no eviction. Failed extractions
//! are memoized too, so a broken icon is not decoded on every post.

use std::collections::HashMap;
use std::sync::Mutex;

use island_image::Color;

/// App id → extracted brand color (`None` = nothing usable).
#[derive(Debug, Default)]
pub struct BrandColorCache {
    entries: Mutex<HashMap<String, Option<Color>>>,
}

impl BrandColorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value for `app_id`; the outer `None` means "not computed yet".
    pub fn get(&self, app_id: &str) -> Option<Option<Color>> {
        let Ok(entries) = self.entries.lock() else {
            return None;
        };
        entries.get(app_id).copied()
    }

    pub fn insert(&self, app_id: &str, color: Option<Color>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(app_id.to_string(), color);
        }
    }

    /// Return the cached value or compute, store and return it.
    ///
    /// `compute` runs without the lock held; if two callers race, both
    /// compute and the last write wins (the results are identical).
    pub fn get_or_compute(
        &self,
        app_id: &str,
        compute: impl FnOnce() -> Option<Color>,
    ) -> Option<Color> {
        if let Some(cached) = self.get(app_id) {
            return cached;
        }
        let color = compute();
        self.insert(app_id, color);
        color
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |e| e.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let Ok(mut entries) = self.entries.lock() else {
            return 0;
        };
        let cleared = entries.len();
        entries.clear();
        cleared
    }
}
