//! Reference-counted decode cache keyed by asset address.
//!
//! Each decoded graph is held under explicit reference counts with explicit
//! invalidation. Installing a clone retains the entry; disposing the clone
//! (or discarding a superseded in-flight load) releases it. An entry is only
//! dropped by [`AssetCache::invalidate`], never by implicit collection, so
//! re-selecting a recent asset is a cache hit until the host evicts it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::SceneGraph;

struct CacheEntry {
    graph: Arc<SceneGraph>,
    refs: usize,
}

/// Decode cache with explicit reference counting and invalidation.
#[derive(Default)]
pub struct AssetCache {
    entries: FxHashMap<String, CacheEntry>,
}

impl AssetCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decoded graph under `address` with a reference count of zero.
    /// Replaces any previous entry for the same address.
    pub fn insert(&mut self, address: &str, graph: Arc<SceneGraph>) {
        let _ = self
            .entries
            .insert(address.to_owned(), CacheEntry { graph, refs: 0 });
    }

    /// Look up `address` and bump its reference count.
    #[must_use]
    pub fn retain(&mut self, address: &str) -> Option<Arc<SceneGraph>> {
        self.entries.get_mut(address).map(|entry| {
            entry.refs += 1;
            Arc::clone(&entry.graph)
        })
    }

    /// Peek at `address` without touching its reference count.
    #[must_use]
    pub fn get(&self, address: &str) -> Option<Arc<SceneGraph>> {
        self.entries.get(address).map(|e| Arc::clone(&e.graph))
    }

    /// Drop one reference to `address`. Returns the remaining count.
    pub fn release(&mut self, address: &str) -> usize {
        match self.entries.get_mut(address) {
            Some(entry) => {
                entry.refs = entry.refs.saturating_sub(1);
                entry.refs
            }
            None => 0,
        }
    }

    /// Remove `address` from the cache. Refuses (returning `false`) while
    /// references are still outstanding.
    pub fn invalidate(&mut self, address: &str) -> bool {
        match self.entries.get(address) {
            Some(entry) if entry.refs == 0 => {
                let _ = self.entries.remove(address);
                true
            }
            Some(entry) => {
                log::warn!(
                    "refusing to invalidate {address}: {} outstanding refs",
                    entry.refs
                );
                false
            }
            None => false,
        }
    }

    /// Current reference count for `address` (0 when absent).
    #[must_use]
    pub fn ref_count(&self, address: &str) -> usize {
        self.entries.get(address).map_or(0, |e| e.refs)
    }

    /// Number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Arc<SceneGraph> {
        Arc::new(SceneGraph::default())
    }

    #[test]
    fn test_retain_release_cycle() {
        let mut cache = AssetCache::new();
        cache.insert("a.glb", graph());
        assert_eq!(cache.ref_count("a.glb"), 0);

        assert!(cache.retain("a.glb").is_some());
        assert!(cache.retain("a.glb").is_some());
        assert_eq!(cache.ref_count("a.glb"), 2);

        assert_eq!(cache.release("a.glb"), 1);
        assert_eq!(cache.release("a.glb"), 0);
        // Release never underflows.
        assert_eq!(cache.release("a.glb"), 0);
    }

    #[test]
    fn test_invalidate_refuses_while_referenced() {
        let mut cache = AssetCache::new();
        cache.insert("a.glb", graph());
        let _held = cache.retain("a.glb");

        assert!(!cache.invalidate("a.glb"));
        assert_eq!(cache.len(), 1);

        let _ = cache.release("a.glb");
        assert!(cache.invalidate("a.glb"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_retain_missing_address() {
        let mut cache = AssetCache::new();
        assert!(cache.retain("missing.glb").is_none());
        assert!(!cache.invalidate("missing.glb"));
    }
}
