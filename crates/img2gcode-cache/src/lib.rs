//! # img2gcode Cache
//!
//! Offline layer in front of the network. Each GET request is routed to a
//! caching strategy by URL pattern:
//! - cache-first for static application assets
//! - stale-while-revalidate for fonts and images
//! - network-first for API/JSON requests and everything else
//!
//! Caches are versioned by name; activating a worker drops caches left
//! over from older versions.

pub mod error;
pub mod request;
pub mod routes;
pub mod storage;
pub mod worker;

pub use error::{CacheError, CacheResult};
pub use request::{Destination, Method, Request, Response};
pub use routes::{CacheStrategy, RouteTable};
pub use storage::{CacheNames, CacheStorage};
pub use worker::{InstallReport, Network, OfflineWorker, DEFAULT_PRECACHE, OFFLINE_PAGE};
