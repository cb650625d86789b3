//! Marker expiry arithmetic and the per-key cache state.
//!
//! Pure decision logic, separated from the store round-trips in
//! [`crate::cache`] so the TTL boundary can be tested without I/O.

use careerpath_core::{InvalidationMarker, Timestamp};
use std::time::Duration;

/// Per-(user, kind) cache state.
///
/// `Invalidated` wins over row presence: a live marker hides rows that are
/// still physically stored. Once the marker lapses those rows reappear
/// as-is, regenerated or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// No live marker; reads serve cached rows if any exist.
    Fresh,
    /// Marker younger than the TTL; reads return `None` regardless of
    /// stored rows.
    Invalidated,
    /// No rows written (or all cleared); reads return `None`.
    Empty,
}

/// Whether a marker has lapsed as of `now`.
///
/// A marker suppresses reads for exactly the TTL and then silently stops
/// counting, even if nothing was regenerated in the interim. That mirrors
/// the deployed behavior and is load-bearing for the dashboard's refresh
/// flow; see DESIGN.md before "fixing" it to invalidate-until-next-write.
pub fn marker_expired(marker: &InvalidationMarker, ttl: Duration, now: Timestamp) -> bool {
    let ttl = match chrono::Duration::from_std(ttl) {
        Ok(ttl) => ttl,
        // TTL out of chrono range: the marker can never lapse.
        Err(_) => return false,
    };
    now.signed_duration_since(marker.invalidated_at) >= ttl
}
