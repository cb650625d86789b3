//! Cache configuration

use std::time::Duration;

/// How long an invalidation marker suppresses reads.
pub const DEFAULT_INVALIDATION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Configuration for the recommendation cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Marker TTL. A marker younger than this makes every read for its
    /// (user, kind) return `None`; once it lapses the cache counts as
    /// valid again, whether or not anything was regenerated.
    pub invalidation_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            invalidation_ttl: DEFAULT_INVALIDATION_TTL,
        }
    }
}

impl CacheConfig {
    /// Create a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invalidation marker TTL.
    pub fn with_invalidation_ttl(mut self, ttl: Duration) -> Self {
        self.invalidation_ttl = ttl;
        self
    }
}
