//! Named, versioned response caches.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::request::Response;
use crate::routes::CacheStrategy;

/// Versioned cache names. Bumping the version makes activation discard
/// every cache written by older versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheNames {
    version: u32,
}

impl CacheNames {
    pub fn new(version: u32) -> Self {
        Self { version }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn static_cache(&self) -> String {
        format!("img2gcode-static-v{}", self.version)
    }

    pub fn dynamic_cache(&self) -> String {
        format!("img2gcode-dynamic-v{}", self.version)
    }

    pub fn assets_cache(&self) -> String {
        format!("img2gcode-assets-v{}", self.version)
    }

    pub fn all(&self) -> [String; 3] {
        [self.static_cache(), self.dynamic_cache(), self.assets_cache()]
    }

    /// The cache a strategy writes into.
    pub fn for_strategy(&self, strategy: CacheStrategy) -> String {
        match strategy {
            CacheStrategy::CacheFirst => self.static_cache(),
            CacheStrategy::NetworkFirst => self.dynamic_cache(),
            CacheStrategy::StaleWhileRevalidate => self.assets_cache(),
        }
    }
}

impl Default for CacheNames {
    fn default() -> Self {
        Self::new(1)
    }
}

type Entries = HashMap<String, Response>;

/// Cache storage shared between the worker and its background refreshes.
#[derive(Debug, Clone, Default)]
pub struct CacheStorage {
    caches: Arc<RwLock<BTreeMap<String, Entries>>>,
}

impl CacheStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the cache if it does not exist yet.
    pub fn open(&self, name: &str) {
        self.caches.write().entry(name.to_string()).or_default();
    }

    pub fn has(&self, name: &str) -> bool {
        self.caches.read().contains_key(name)
    }

    /// Cache names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.caches.read().keys().cloned().collect()
    }

    pub fn delete(&self, name: &str) -> bool {
        self.caches.write().remove(name).is_some()
    }

    pub fn put(&self, name: &str, url: &str, response: Response) {
        self.caches
            .write()
            .entry(name.to_string())
            .or_default()
            .insert(url.to_string(), response);
    }

    pub fn lookup(&self, name: &str, url: &str) -> Option<Response> {
        self.caches.read().get(name)?.get(url).cloned()
    }

    /// First hit across all caches, in name order.
    pub fn lookup_any(&self, url: &str) -> Option<Response> {
        self.caches
            .read()
            .values()
            .find_map(|entries| entries.get(url).cloned())
    }

    pub fn len(&self, name: &str) -> usize {
        self.caches.read().get(name).map_or(0, HashMap::len)
    }
}
