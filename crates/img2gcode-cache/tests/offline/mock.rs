use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use img2gcode_cache::{CacheError, CacheResult, Network, Request, Response};
use parking_lot::Mutex;

/// Network double serving canned responses and counting calls.
#[derive(Default)]
pub struct MockNetwork {
    responses: Mutex<HashMap<String, Response>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

impl MockNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serve(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .insert(url.to_string(), Response::ok("text/plain", body));
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for MockNetwork {
    async fn fetch(&self, request: &Request) -> CacheResult<Response> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(CacheError::network(&request.url, "offline"));
        }
        Ok(self
            .responses
            .lock()
            .get(&request.url)
            .cloned()
            .unwrap_or_else(|| Response::text(404, "not found")))
    }
}
