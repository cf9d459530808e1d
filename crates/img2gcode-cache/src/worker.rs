//! The offline worker: install, activate and fetch handling.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::error::CacheResult;
use crate::request::{Destination, Method, Request, Response};
use crate::routes::{CacheStrategy, RouteTable};
use crate::storage::{CacheNames, CacheStorage};

/// Page served for navigations while offline.
pub const OFFLINE_PAGE: &str = "/offline.html";

pub const DEFAULT_PRECACHE: &[&str] = &[
    "/",
    "/index.html",
    OFFLINE_PAGE,
    "/css/styles.css",
    "/js/app.js",
    "/manifest.json",
];

const IMAGE_PLACEHOLDER: &str = concat!(
    r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="150" viewBox="0 0 200 150">"##,
    r##"<rect width="200" height="150" fill="#eeeeee"/>"##,
    r##"<text x="100" y="80" text-anchor="middle" font-family="sans-serif" font-size="14" fill="#888888">Image unavailable</text>"##,
    "</svg>"
);

/// Source of fresh responses.
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &Request) -> CacheResult<Response>;
}

/// Outcome of precaching at install time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub cached: Vec<String>,
    pub failed: Vec<String>,
}

impl InstallReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct OfflineWorker {
    network: Arc<dyn Network>,
    storage: CacheStorage,
    names: CacheNames,
    routes: RouteTable,
    precache: Vec<String>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl OfflineWorker {
    pub fn new(network: Arc<dyn Network>) -> Self {
        Self {
            network,
            storage: CacheStorage::new(),
            names: CacheNames::default(),
            routes: RouteTable::default(),
            precache: DEFAULT_PRECACHE.iter().map(|s| s.to_string()).collect(),
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn with_storage(mut self, storage: CacheStorage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_names(mut self, names: CacheNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_precache<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.precache = urls.into_iter().map(Into::into).collect();
        self
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    pub fn names(&self) -> &CacheNames {
        &self.names
    }

    /// Fetches the precache list into the static cache. A failed asset is
    /// reported and skipped.
    pub async fn install(&self) -> InstallReport {
        let cache = self.names.static_cache();
        self.storage.open(&cache);
        let mut report = InstallReport::default();
        for url in &self.precache {
            match self.network.fetch(&Request::get(url.as_str())).await {
                Ok(response) if response.is_ok() => {
                    self.storage.put(&cache, url, response);
                    report.cached.push(url.clone());
                }
                Ok(response) => {
                    tracing::warn!("Precache of {} returned {}", url, response.status);
                    report.failed.push(url.clone());
                }
                Err(e) => {
                    tracing::warn!("Precache failed: {}", e);
                    report.failed.push(url.clone());
                }
            }
        }
        tracing::info!(
            "Installed {} (cached {}, failed {})",
            cache,
            report.cached.len(),
            report.failed.len()
        );
        report
    }

    /// Deletes caches that do not belong to the current version and
    /// returns their names.
    pub async fn activate(&self) -> Vec<String> {
        let current = self.names.all();
        let stale: Vec<String> = self
            .storage
            .names()
            .into_iter()
            .filter(|name| !current.contains(name))
            .collect();
        for name in &stale {
            self.storage.delete(name);
            tracing::info!("Deleted old cache {}", name);
        }
        stale
    }

    /// Answers a request, or returns `None` when the request is not ours
    /// to handle (non-GET or non-HTTP schemes).
    pub async fn handle_fetch(&self, request: &Request) -> Option<Response> {
        if request.method != Method::Get || !request.is_http() {
            tracing::trace!("Passing through {:?} {}", request.method, request.url);
            return None;
        }

        let strategy = self.routes.strategy_for(request.path());
        tracing::debug!("{} -> {}", request.url, strategy);
        let response = match strategy {
            CacheStrategy::CacheFirst => self.cache_first(request).await,
            CacheStrategy::NetworkFirst => self.network_first(request).await,
            CacheStrategy::StaleWhileRevalidate => self.stale_while_revalidate(request).await,
        };
        Some(response.unwrap_or_else(|| self.fallback(request)))
    }

    /// Background revalidations not yet known to have finished.
    pub fn pending_revalidations(&self) -> usize {
        self.pending.lock().len()
    }

    /// Waits for background revalidations started so far.
    pub async fn settle(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.pending.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Revalidation task failed: {}", e);
            }
        }
    }

    async fn cache_first(&self, request: &Request) -> Option<Response> {
        if let Some(hit) = self.lookup(request) {
            return Some(hit);
        }
        let cache = self.names.static_cache();
        self.fetch_and_store(request, &cache).await
    }

    async fn network_first(&self, request: &Request) -> Option<Response> {
        let cache = self.names.dynamic_cache();
        match self.fetch_and_store(request, &cache).await {
            Some(response) => Some(response),
            None => self.lookup(request),
        }
    }

    async fn stale_while_revalidate(&self, request: &Request) -> Option<Response> {
        let cache = self.names.assets_cache();
        match self.storage.lookup(&cache, &request.url) {
            Some(stale) => {
                let network = Arc::clone(&self.network);
                let storage = self.storage.clone();
                let request = request.clone();
                let handle = tokio::spawn(async move {
                    match network.fetch(&request).await {
                        Ok(fresh) if fresh.is_ok() => storage.put(&cache, &request.url, fresh),
                        Ok(fresh) => {
                            tracing::debug!("Revalidate {} got {}", request.url, fresh.status)
                        }
                        Err(e) => tracing::debug!("Revalidate failed: {}", e),
                    }
                });
                let mut pending = self.pending.lock();
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
                Some(stale)
            }
            None => self.fetch_and_store(request, &cache).await,
        }
    }

    /// Cached copy keyed by full URL, then by path for precached entries.
    fn lookup(&self, request: &Request) -> Option<Response> {
        self.storage
            .lookup_any(&request.url)
            .or_else(|| self.storage.lookup_any(request.path()))
    }

    /// Network response, stored when successful. `None` only when the
    /// network itself failed.
    async fn fetch_and_store(&self, request: &Request, cache: &str) -> Option<Response> {
        match self.network.fetch(request).await {
            Ok(response) => {
                if response.is_ok() {
                    self.storage.put(cache, &request.url, response.clone());
                }
                Some(response)
            }
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        }
    }

    fn fallback(&self, request: &Request) -> Response {
        if request.is_navigation() {
            if let Some(page) = self.storage.lookup_any(OFFLINE_PAGE) {
                return page;
            }
        }
        if request.destination == Destination::Image {
            return Response::new(503, "image/svg+xml", IMAGE_PLACEHOLDER);
        }
        Response::text(503, "Offline - content not available")
    }
}

impl std::fmt::Debug for OfflineWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineWorker")
            .field("names", &self.names)
            .field("routes", &self.routes.len())
            .field("precache", &self.precache)
            .finish()
    }
}
