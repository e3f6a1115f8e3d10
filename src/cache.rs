//! Bounded per-kind render memoisation.
//!
//! Rendering is pure: the result is a function of the layout node, the
//! frame, and the box. Hot node kinds memoise renders in a thread-local
//! LRU keyed by `(node_hash, frame_hash, box)` so unchanged subtrees
//! cost a hash lookup across frames. Caches are process-local and
//! per-thread; independent engines on different threads never contend.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::draw::RenderResult;
use crate::geometry::Bounds;

/// Entries kept per node kind.
const RENDER_CACHE_CAPACITY: usize = 128;

// =============================================================================
// LRU
// =============================================================================

/// A small bounded LRU. Recency is a monotonic tick; eviction scans for
/// the stalest entry, which is fine at this capacity.
#[derive(Debug)]
pub struct LruCache<K, V> {
    capacity: usize,
    tick: u64,
    entries: FxHashMap<K, (V, u64)>,
}

impl<K: std::hash::Hash + Eq + Clone, V> LruCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            tick: 0,
            entries: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(key).map(|(value, seen)| {
            *seen = tick;
            &*value
        })
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.tick += 1;
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            if let Some(stalest) = self
                .entries
                .iter()
                .min_by_key(|(_, (_, seen))| *seen)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&stalest);
            }
        }
        self.entries.insert(key, (value, self.tick));
    }
}

// =============================================================================
// Render cache
// =============================================================================

/// Cache key: structural node hash, frame hash, target box.
pub type RenderKey = (u64, u64, Bounds);

thread_local! {
    static RENDER_CACHE: RefCell<FxHashMap<u8, LruCache<RenderKey, RenderResult>>> =
        RefCell::new(FxHashMap::default());
}

/// Look up a render by key, computing and storing it on a miss.
pub fn render_cached(kind: u8, key: RenderKey, compute: impl FnOnce() -> RenderResult) -> RenderResult {
    let hit = RENDER_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        cache
            .entry(kind)
            .or_insert_with(|| LruCache::new(RENDER_CACHE_CAPACITY))
            .get(&key)
            .cloned()
    });
    if let Some(result) = hit {
        return result;
    }
    let result = compute();
    RENDER_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        cache
            .entry(kind)
            .or_insert_with(|| LruCache::new(RENDER_CACHE_CAPACITY))
            .insert(key, result.clone());
    });
    result
}

/// Drop every cached render on this thread.
pub fn clear_render_cache() {
    RENDER_CACHE.with(|cache| cache.borrow_mut().clear());
}

// =============================================================================
// Tests
// =============================================================================
