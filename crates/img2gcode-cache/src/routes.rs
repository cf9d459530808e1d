//! URL pattern routing to caching strategies.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CacheResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStrategy {
    /// Serve from cache; go to the network only on a miss.
    CacheFirst,
    /// Try the network; fall back to the cache when it fails.
    NetworkFirst,
    /// Serve the cached copy immediately and refresh it in the background.
    StaleWhileRevalidate,
}

impl std::fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CacheStrategy::CacheFirst => "cache-first",
            CacheStrategy::NetworkFirst => "network-first",
            CacheStrategy::StaleWhileRevalidate => "stale-while-revalidate",
        };
        f.write_str(name)
    }
}

const STATIC_PATTERN: &str = r"/(static|js|css|fonts|images)/|\.(js|css)$";
const ASSET_PATTERN: &str = r"(?i)\.(woff2?|ttf|otf|eot|png|jpe?g|gif|svg|webp|ico)$";
const API_PATTERN: &str = r"^/api/|\.json$";

/// Ordered list of path patterns; the first match wins.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(Regex, CacheStrategy)>,
    fallback: CacheStrategy,
}

impl RouteTable {
    /// Empty table that routes everything to `fallback`.
    pub fn new(fallback: CacheStrategy) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    pub fn route(mut self, pattern: &str, strategy: CacheStrategy) -> CacheResult<Self> {
        self.routes.push((Regex::new(pattern)?, strategy));
        Ok(self)
    }

    pub fn strategy_for(&self, path: &str) -> CacheStrategy {
        self.routes
            .iter()
            .find(|(re, _)| re.is_match(path))
            .map(|(_, strategy)| *strategy)
            .unwrap_or(self.fallback)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        static DEFAULT_ROUTES: OnceLock<RouteTable> = OnceLock::new();
        DEFAULT_ROUTES
            .get_or_init(|| {
                let compile = |p: &str| Regex::new(p).expect("invalid route pattern");
                RouteTable {
                    routes: vec![
                        (compile(STATIC_PATTERN), CacheStrategy::CacheFirst),
                        (compile(ASSET_PATTERN), CacheStrategy::StaleWhileRevalidate),
                        (compile(API_PATTERN), CacheStrategy::NetworkFirst),
                    ],
                    fallback: CacheStrategy::NetworkFirst,
                }
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes() {
        let routes = RouteTable::default();
        assert_eq!(routes.strategy_for("/js/app.js"), CacheStrategy::CacheFirst);
        assert_eq!(routes.strategy_for("/main.css"), CacheStrategy::CacheFirst);
        assert_eq!(routes.strategy_for("/fonts/roboto.woff2"), CacheStrategy::CacheFirst);
        assert_eq!(
            routes.strategy_for("/uploads/photo.JPG"),
            CacheStrategy::StaleWhileRevalidate
        );
        assert_eq!(routes.strategy_for("/api/projects"), CacheStrategy::NetworkFirst);
        assert_eq!(routes.strategy_for("/manifest.json"), CacheStrategy::NetworkFirst);
        assert_eq!(routes.strategy_for("/"), CacheStrategy::NetworkFirst);
    }

    #[test]
    fn test_custom_table() {
        let routes = RouteTable::new(CacheStrategy::CacheFirst)
            .route(r"^/live/", CacheStrategy::NetworkFirst)
            .unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes.strategy_for("/live/feed"), CacheStrategy::NetworkFirst);
        assert_eq!(routes.strategy_for("/other"), CacheStrategy::CacheFirst);
        assert!(RouteTable::new(CacheStrategy::CacheFirst)
            .route("(unclosed", CacheStrategy::CacheFirst)
            .is_err());
    }
}
