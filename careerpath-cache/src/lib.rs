//! Recommendation cache with explicit invalidation markers.
//!
//! This crate sits between the calling application (dashboard/report
//! views) and two collaborators it never owns: the persistent store
//! ([`careerpath_store::CacheStore`]) and the recommendation generator
//! ([`careerpath_core::RecommendationGenerator`]).
//!
//! # Design Philosophy
//!
//! Cached rows carry no expiry of their own. Staleness is governed entirely
//! by per-(user, kind) invalidation markers written on profile or grade
//! mutations; a marker suppresses reads for 24 hours and then lapses. The
//! cache never raises store errors to its callers: reads normalize every
//! failure to `None` ("must regenerate"), writes and invalidations are
//! best-effort and logged. Regeneration is always a safe fallback, so
//! callers get one uniform miss signal instead of an error channel.
//!
//! # Example
//!
//! ```ignore
//! let cache = RecommendationCache::with_defaults(Arc::new(store));
//!
//! match cache.career_recommendations(user_id).await {
//!     Some(rows) => render(rows),
//!     None => {
//!         let items = generator.career_recommendations(&ctx).await?;
//!         let rows = cache.save_career_recommendations(user_id, items).await;
//!         render(rows);
//!     }
//! }
//! ```

pub mod cache;
pub mod config;
pub mod service;
pub mod validity;

pub use cache::RecommendationCache;
pub use config::CacheConfig;
pub use service::CachedRecommendationService;
pub use validity::{marker_expired, CacheStatus};
