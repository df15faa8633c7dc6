//! Shared LRU caching for fonts and rasterized glyphs
//!
//! Loading a font file and rasterizing an outline are the two expensive steps
//! of a render. Both results are immutable, so a [`SharedCache`] can hand them
//! to any number of render calls at once. Caching never changes output.

use lru::LruCache;
use parking_lot::RwLock;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one rasterized glyph mask
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct GlyphCacheKey {
    /// Which font this glyph comes from
    pub font_id: String,
    /// The glyph within the font
    pub glyph_id: u32,
    /// Pixel size it was rasterized at
    pub size: u32,
}

/// Snapshot of how a cache is doing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(512) {
    Some(v) => v,
    None => unreachable!(),
};

/// A thread-safe LRU cache with hit accounting
pub struct SharedCache<K: Hash + Eq, V: Clone> {
    cache: RwLock<LruCache<K, V>>,
    capacity: NonZeroUsize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> SharedCache<K, V> {
    /// Create a cache holding at most `capacity` entries (0 picks a default)
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_CAPACITY);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        // LRU lookups reorder entries, so even reads take the write lock
        let found = self.cache.write().get(key).cloned();
        let counter = if found.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, key: K, value: V) {
        self.cache.write().put(key, value);
    }

    /// Return the cached value or build, store and return a new one
    ///
    /// Failed builds are not cached. The lock is not held while building, so
    /// two racing callers may both build; the later insert wins.
    pub fn get_or_try_insert_with<E>(
        &self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = build()?;
        self.insert(key, value.clone());
        Ok(value)
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.read().len(),
            capacity: self.capacity.get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<K: Hash + Eq, V: Clone> Default for SharedCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY.get())
    }
}
