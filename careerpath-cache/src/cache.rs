//! The recommendation cache proper: validity gate, typed accessors, and
//! invalidation orchestration.

use std::sync::Arc;

use careerpath_core::{
    CacheKind, CareerDetail, CareerRecommendation, CourseRecommendationSet,
    GeneratedRecommendation, InvalidationMarker, UserId,
};
use careerpath_store::{tables, CacheStore};
use chrono::Utc;

use crate::config::CacheConfig;
use crate::validity::{marker_expired, CacheStatus};

/// Cache over one injected [`CacheStore`] backend.
///
/// Every public operation swallows store errors: reads return `None`,
/// writes and invalidations log and continue. The only signal callers get
/// is "payload" or "regenerate"; see the crate docs for why.
pub struct RecommendationCache<S: CacheStore> {
    store: Arc<S>,
    config: CacheConfig,
}

impl<S: CacheStore> RecommendationCache<S> {
    /// Create a new cache over a store backend.
    pub fn new(store: Arc<S>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    /// Create a new cache with the default 24h invalidation TTL.
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, CacheConfig::default())
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a reference to the store backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ========================================================================
    // VALIDITY GATE
    // ========================================================================

    /// Whether the cache for (user, kind) may serve reads.
    ///
    /// True when no marker exists or the marker has outlived the TTL. A
    /// failed marker lookup counts as invalid (fail closed): serving
    /// possibly-stale rows is worse than one redundant regeneration.
    pub async fn is_valid(&self, user_id: UserId, kind: CacheKind) -> bool {
        match self.store.invalidation_marker(user_id, kind).await {
            Ok(None) => true,
            Ok(Some(marker)) => {
                marker_expired(&marker, self.config.invalidation_ttl, Utc::now())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    cache_kind = %kind,
                    "validity check failed, treating cache as invalid"
                );
                false
            }
        }
    }

    /// Per-key cache state, for diagnostics and the dashboard's staleness
    /// badge. A live marker wins over row presence.
    pub async fn status(&self, user_id: UserId, kind: CacheKind) -> CacheStatus {
        if !self.is_valid(user_id, kind).await {
            return CacheStatus::Invalidated;
        }

        let present = match kind {
            CacheKind::CareerRecommendations => self
                .store
                .recommendations_for_user(user_id)
                .await
                .map(|rows| !rows.is_empty()),
            CacheKind::CareerDetails => self.store.has_career_details(user_id).await,
            CacheKind::CourseRecommendations => self
                .store
                .course_recommendations(user_id)
                .await
                .map(|set| set.is_some()),
        };

        match present {
            Ok(true) => CacheStatus::Fresh,
            Ok(false) => CacheStatus::Empty,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    cache_kind = %kind,
                    "presence check failed, reporting cache as empty"
                );
                CacheStatus::Empty
            }
        }
    }

    // ========================================================================
    // INVALIDATION
    // ========================================================================

    /// Mark one cache kind invalid for a user.
    ///
    /// Upserts the (user, kind) marker with the current timestamp; reads
    /// return `None` until the TTL lapses. Best-effort: a failed upsert is
    /// logged and the caller proceeds.
    pub async fn invalidate(&self, user_id: UserId, kind: CacheKind, reason: &str) {
        let marker = InvalidationMarker::new(user_id, kind, reason);
        if let Err(e) = self.store.upsert_invalidation_marker(&marker).await {
            tracing::error!(
                error = %e,
                user_id = %user_id,
                cache_kind = %kind,
                reason,
                "failed to write invalidation marker"
            );
        }
    }

    /// Mark all cache kinds invalid for a user, sequentially. A failure on
    /// one kind does not stop the others.
    pub async fn invalidate_all(&self, user_id: UserId, reason: &str) {
        for kind in CacheKind::ALL {
            self.invalidate(user_id, kind, reason).await;
        }
    }

    /// Delete every cached row and every marker for a user, concurrently.
    ///
    /// Account-reset path. Partial failure is logged per table with no
    /// rollback; calling this twice is a no-op the second time.
    pub async fn clear_all(&self, user_id: UserId) {
        let (recs, details, courses, markers) = tokio::join!(
            self.store.delete_recommendations(user_id),
            self.store.delete_career_details(user_id),
            self.store.delete_course_recommendations(user_id),
            self.store.delete_invalidation_markers(user_id),
        );

        for (table, result) in [
            (tables::CAREER_RECOMMENDATIONS, recs),
            (tables::CAREER_DETAILS, details),
            (tables::COURSE_RECOMMENDATIONS, courses),
            (tables::INVALIDATION_MARKERS, markers),
        ] {
            if let Err(e) = result {
                tracing::error!(error = %e, user_id = %user_id, table, "clear_all delete failed");
            }
        }
    }

    // ========================================================================
    // CAREER RECOMMENDATIONS
    // ========================================================================

    /// Cached career recommendations for a user, best match first.
    ///
    /// `None` means regenerate, whether the cache was invalidated, never
    /// written, or the store failed. The validity check short-circuits
    /// before any payload read so stale rows are never served.
    pub async fn career_recommendations(
        &self,
        user_id: UserId,
    ) -> Option<Vec<CareerRecommendation>> {
        if !self.is_valid(user_id, CacheKind::CareerRecommendations).await {
            return None;
        }

        match self.store.recommendations_for_user(user_id).await {
            Ok(rows) if rows.is_empty() => None,
            Ok(rows) => Some(rows),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    cache_kind = %CacheKind::CareerRecommendations,
                    "cache read failed"
                );
                None
            }
        }
    }

    /// Replace a user's cached career recommendations with a fresh
    /// generator payload.
    ///
    /// Deletes the existing rows, then bulk-inserts the mapped ones; the
    /// two steps are separate store calls with no transaction. Insert is
    /// skipped when the delete fails, so a failed replace never leaves
    /// old and new rows interleaved. Does not clear an active invalidation
    /// marker: reads stay `None` until the marker lapses.
    ///
    /// Returns the canonical rows so the caller can use the fresh payload
    /// even when persistence failed.
    pub async fn save_career_recommendations(
        &self,
        user_id: UserId,
        items: Vec<GeneratedRecommendation>,
    ) -> Vec<CareerRecommendation> {
        let rows: Vec<CareerRecommendation> = items
            .into_iter()
            .map(|item| item.into_recommendation(user_id))
            .collect();

        if let Err(e) = self.store.delete_recommendations(user_id).await {
            tracing::error!(
                error = %e,
                user_id = %user_id,
                "failed to delete old recommendations, skipping insert"
            );
            return rows;
        }

        if let Err(e) = self.store.insert_recommendations(&rows).await {
            tracing::error!(error = %e, user_id = %user_id, "failed to insert recommendations");
        }

        rows
    }

    // ========================================================================
    // CAREER DETAILS
    // ========================================================================

    /// Cached detail payload for (user, career name). Same `None`
    /// normalization as [`Self::career_recommendations`].
    pub async fn career_detail(
        &self,
        user_id: UserId,
        career_name: &str,
    ) -> Option<CareerDetail> {
        if !self.is_valid(user_id, CacheKind::CareerDetails).await {
            return None;
        }

        match self.store.career_detail(user_id, career_name).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    cache_kind = %CacheKind::CareerDetails,
                    career_name,
                    "cache read failed"
                );
                None
            }
        }
    }

    /// Upsert the detail payload for (user, career name). Best-effort;
    /// does not clear an active invalidation marker.
    pub async fn save_career_detail(
        &self,
        user_id: UserId,
        career_name: &str,
        detail: serde_json::Value,
    ) -> CareerDetail {
        let row = CareerDetail::new(user_id, career_name, detail);
        if let Err(e) = self.store.upsert_career_detail(&row).await {
            tracing::error!(
                error = %e,
                user_id = %user_id,
                career_name,
                "failed to save career detail"
            );
        }
        row
    }

    // ========================================================================
    // COURSE RECOMMENDATIONS
    // ========================================================================

    /// Cached course recommendations for a user. Same `None` normalization
    /// as [`Self::career_recommendations`].
    pub async fn course_recommendations(
        &self,
        user_id: UserId,
    ) -> Option<CourseRecommendationSet> {
        if !self.is_valid(user_id, CacheKind::CourseRecommendations).await {
            return None;
        }

        match self.store.course_recommendations(user_id).await {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    user_id = %user_id,
                    cache_kind = %CacheKind::CourseRecommendations,
                    "cache read failed"
                );
                None
            }
        }
    }

    /// Upsert the course recommendation list for a user. Best-effort;
    /// does not clear an active invalidation marker.
    pub async fn save_course_recommendations(
        &self,
        user_id: UserId,
        courses: Vec<serde_json::Value>,
    ) -> CourseRecommendationSet {
        let set = CourseRecommendationSet::new(user_id, courses);
        if let Err(e) = self.store.upsert_course_recommendations(&set).await {
            tracing::error!(error = %e, user_id = %user_id, "failed to save course recommendations");
        }
        set
    }
}

impl<S: CacheStore> Clone for RecommendationCache<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}
