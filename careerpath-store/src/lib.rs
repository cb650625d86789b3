//! CareerPath Store - Store Trait and In-Memory Backend
//!
//! Defines the table-oriented store abstraction the recommendation cache is
//! written against, plus an in-memory implementation. A hosted-Postgres
//! backend implements the same trait in the deployment repo; everything in
//! this workspace goes through [`CacheStore`].
//!
//! Consistency model: single-row upserts are atomic, multi-row sequences
//! (the cache's delete-then-insert for career recommendations) are not.
//! The trait deliberately exposes delete and bulk insert as separate calls
//! so the cache layer owns that sequencing.

use async_trait::async_trait;
use careerpath_core::{
    CacheKind, CareerDetail, CareerRecommendation, CourseRecommendationSet, InvalidationMarker,
    StoreError, StoreResult, UserId,
};
use std::collections::HashMap;
use std::sync::RwLock;

/// Logical table names, shared by backends for keying and error reporting.
pub mod tables {
    pub const CAREER_RECOMMENDATIONS: &str = "career_recommendations_cache";
    pub const CAREER_DETAILS: &str = "career_details_cache";
    pub const COURSE_RECOMMENDATIONS: &str = "course_recommendations_cache";
    pub const INVALIDATION_MARKERS: &str = "cache_invalidation_markers";
}

// ============================================================================
// STORE TRAIT
// ============================================================================

/// Table-oriented persistent store for cached recommendation rows and
/// invalidation markers.
///
/// Implementations must be thread-safe. Every method is a single logical
/// store round-trip; none of them compose multiple tables.
#[async_trait]
pub trait CacheStore: Send + Sync {
    // === Career recommendations ===

    /// All cached career recommendation rows for a user, ordered by
    /// descending match percentage.
    async fn recommendations_for_user(
        &self,
        user_id: UserId,
    ) -> StoreResult<Vec<CareerRecommendation>>;

    /// Delete every career recommendation row for a user.
    async fn delete_recommendations(&self, user_id: UserId) -> StoreResult<()>;

    /// Bulk-insert career recommendation rows.
    async fn insert_recommendations(&self, rows: &[CareerRecommendation]) -> StoreResult<()>;

    // === Career details ===

    /// Cached detail payload for (user, career name), if any.
    async fn career_detail(
        &self,
        user_id: UserId,
        career_name: &str,
    ) -> StoreResult<Option<CareerDetail>>;

    /// Upsert a detail row keyed by (user, career name). Last write wins.
    async fn upsert_career_detail(&self, detail: &CareerDetail) -> StoreResult<()>;

    /// Whether any detail row exists for a user, across career names.
    async fn has_career_details(&self, user_id: UserId) -> StoreResult<bool>;

    /// Delete every career detail row for a user.
    async fn delete_career_details(&self, user_id: UserId) -> StoreResult<()>;

    // === Course recommendations ===

    /// Cached course recommendation set for a user, if any.
    async fn course_recommendations(
        &self,
        user_id: UserId,
    ) -> StoreResult<Option<CourseRecommendationSet>>;

    /// Upsert the single course recommendation row for a user.
    async fn upsert_course_recommendations(
        &self,
        set: &CourseRecommendationSet,
    ) -> StoreResult<()>;

    /// Delete the course recommendation row for a user.
    async fn delete_course_recommendations(&self, user_id: UserId) -> StoreResult<()>;

    // === Invalidation markers ===

    /// The live invalidation marker for (user, cache kind), if any.
    async fn invalidation_marker(
        &self,
        user_id: UserId,
        kind: CacheKind,
    ) -> StoreResult<Option<InvalidationMarker>>;

    /// Upsert the marker for (user, cache kind). At most one live marker
    /// per key; a repeat upsert refreshes the timestamp and reason.
    async fn upsert_invalidation_marker(&self, marker: &InvalidationMarker) -> StoreResult<()>;

    /// Delete every invalidation marker for a user, across all kinds.
    async fn delete_invalidation_markers(&self, user_id: UserId) -> StoreResult<()>;
}

// ============================================================================
// IN-MEMORY STORE
// ============================================================================

/// In-memory store backed by one `RwLock<HashMap>` per logical table.
///
/// Per-row operations are atomic under the table lock; there is no
/// cross-table coordination, matching the consistency model real backends
/// provide.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    recommendations: RwLock<HashMap<UserId, Vec<CareerRecommendation>>>,
    details: RwLock<HashMap<(UserId, String), CareerDetail>>,
    courses: RwLock<HashMap<UserId, CourseRecommendationSet>>,
    markers: RwLock<HashMap<(UserId, CacheKind), InvalidationMarker>>,
}

impl InMemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of career recommendation rows across all users.
    pub fn recommendation_count(&self) -> usize {
        self.recommendations
            .read()
            .map(|t| t.values().map(Vec::len).sum())
            .unwrap_or(0)
    }

    /// Count of live invalidation markers across all users.
    pub fn marker_count(&self) -> usize {
        self.markers.read().map(|t| t.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CacheStore for InMemoryStore {
    async fn recommendations_for_user(
        &self,
        user_id: UserId,
    ) -> StoreResult<Vec<CareerRecommendation>> {
        let table = self
            .recommendations
            .read()
            .map_err(|_| StoreError::LockPoisoned)?;
        let mut rows = table.get(&user_id).cloned().unwrap_or_default();
        rows.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        Ok(rows)
    }

    async fn delete_recommendations(&self, user_id: UserId) -> StoreResult<()> {
        let mut table = self
            .recommendations
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        table.remove(&user_id);
        Ok(())
    }

    async fn insert_recommendations(&self, rows: &[CareerRecommendation]) -> StoreResult<()> {
        let mut table = self
            .recommendations
            .write()
            .map_err(|_| StoreError::LockPoisoned)?;
        for row in rows {
            table.entry(row.user_id).or_default().push(row.clone());
        }
        Ok(())
    }

    async fn career_detail(
        &self,
        user_id: UserId,
        career_name: &str,
    ) -> StoreResult<Option<CareerDetail>> {
        let table = self.details.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(table.get(&(user_id, career_name.to_string())).cloned())
    }

    async fn upsert_career_detail(&self, detail: &CareerDetail) -> StoreResult<()> {
        let mut table = self.details.write().map_err(|_| StoreError::LockPoisoned)?;
        table.insert(
            (detail.user_id, detail.career_name.clone()),
            detail.clone(),
        );
        Ok(())
    }

    async fn has_career_details(&self, user_id: UserId) -> StoreResult<bool> {
        let table = self.details.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(table.keys().any(|(uid, _)| *uid == user_id))
    }

    async fn delete_career_details(&self, user_id: UserId) -> StoreResult<()> {
        let mut table = self.details.write().map_err(|_| StoreError::LockPoisoned)?;
        table.retain(|(uid, _), _| *uid != user_id);
        Ok(())
    }

    async fn course_recommendations(
        &self,
        user_id: UserId,
    ) -> StoreResult<Option<CourseRecommendationSet>> {
        let table = self.courses.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(table.get(&user_id).cloned())
    }

    async fn upsert_course_recommendations(
        &self,
        set: &CourseRecommendationSet,
    ) -> StoreResult<()> {
        let mut table = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        table.insert(set.user_id, set.clone());
        Ok(())
    }

    async fn delete_course_recommendations(&self, user_id: UserId) -> StoreResult<()> {
        let mut table = self.courses.write().map_err(|_| StoreError::LockPoisoned)?;
        table.remove(&user_id);
        Ok(())
    }

    async fn invalidation_marker(
        &self,
        user_id: UserId,
        kind: CacheKind,
    ) -> StoreResult<Option<InvalidationMarker>> {
        let table = self.markers.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(table.get(&(user_id, kind)).cloned())
    }

    async fn upsert_invalidation_marker(&self, marker: &InvalidationMarker) -> StoreResult<()> {
        let mut table = self.markers.write().map_err(|_| StoreError::LockPoisoned)?;
        table.insert((marker.user_id, marker.cache_kind), marker.clone());
        Ok(())
    }

    async fn delete_invalidation_markers(&self, user_id: UserId) -> StoreResult<()> {
        let mut table = self.markers.write().map_err(|_| StoreError::LockPoisoned)?;
        table.retain(|(uid, _), _| *uid != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerpath_core::{new_user_id, reasons};
    use chrono::Utc;
    use serde_json::json;

    fn make_recommendation(user_id: UserId, name: &str, pct: i32) -> CareerRecommendation {
        CareerRecommendation {
            user_id,
            career_name: name.to_string(),
            match_percentage: pct,
            description: format!("{} description", name),
            salary_range: "KSh 50,000 - 150,000".to_string(),
            education_path: "Diploma or degree".to_string(),
            growth_outlook: "Growing".to_string(),
            rationale: "Profile fit".to_string(),
            cached_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_recommendations_ordered_by_match_desc() {
        let store = InMemoryStore::new();
        let user = new_user_id();

        store
            .insert_recommendations(&[
                make_recommendation(user, "Teacher", 60),
                make_recommendation(user, "Engineer", 90),
                make_recommendation(user, "Pilot", 75),
            ])
            .await
            .unwrap();

        let rows = store.recommendations_for_user(user).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.career_name.as_str()).collect();
        assert_eq!(names, ["Engineer", "Pilot", "Teacher"]);
    }

    #[tokio::test]
    async fn test_recommendations_scoped_per_user() {
        let store = InMemoryStore::new();
        let user_a = new_user_id();
        let user_b = new_user_id();

        store
            .insert_recommendations(&[make_recommendation(user_a, "Engineer", 90)])
            .await
            .unwrap();

        assert!(store
            .recommendations_for_user(user_b)
            .await
            .unwrap()
            .is_empty());

        store.delete_recommendations(user_b).await.unwrap();
        assert_eq!(store.recommendation_count(), 1);
    }

    #[tokio::test]
    async fn test_career_detail_upsert_last_write_wins() {
        let store = InMemoryStore::new();
        let user = new_user_id();

        store
            .upsert_career_detail(&CareerDetail::new(user, "Engineer", json!({"v": 1})))
            .await
            .unwrap();
        store
            .upsert_career_detail(&CareerDetail::new(user, "Engineer", json!({"v": 2})))
            .await
            .unwrap();

        let detail = store.career_detail(user, "Engineer").await.unwrap().unwrap();
        assert_eq!(detail.detail, json!({"v": 2}));
    }

    #[tokio::test]
    async fn test_delete_career_details_only_for_user() {
        let store = InMemoryStore::new();
        let user_a = new_user_id();
        let user_b = new_user_id();

        store
            .upsert_career_detail(&CareerDetail::new(user_a, "Engineer", json!({})))
            .await
            .unwrap();
        store
            .upsert_career_detail(&CareerDetail::new(user_b, "Engineer", json!({})))
            .await
            .unwrap();

        store.delete_career_details(user_a).await.unwrap();

        assert!(store.career_detail(user_a, "Engineer").await.unwrap().is_none());
        assert!(store.career_detail(user_b, "Engineer").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_course_recommendations_round_trip() {
        let store = InMemoryStore::new();
        let user = new_user_id();

        assert!(store.course_recommendations(user).await.unwrap().is_none());

        let set = CourseRecommendationSet::new(user, vec![json!({"course": "BSc CS"})]);
        store.upsert_course_recommendations(&set).await.unwrap();

        let stored = store.course_recommendations(user).await.unwrap().unwrap();
        assert_eq!(stored.courses.len(), 1);

        store.delete_course_recommendations(user).await.unwrap();
        assert!(store.course_recommendations(user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_marker_upsert_refreshes_existing() {
        let store = InMemoryStore::new();
        let user = new_user_id();

        let first = InvalidationMarker::new(
            user,
            CacheKind::CareerRecommendations,
            reasons::PROFILE_UPDATED,
        );
        store.upsert_invalidation_marker(&first).await.unwrap();

        let second = InvalidationMarker::new(
            user,
            CacheKind::CareerRecommendations,
            reasons::GRADES_UPDATED,
        );
        store.upsert_invalidation_marker(&second).await.unwrap();

        assert_eq!(store.marker_count(), 1);
        let marker = store
            .invalidation_marker(user, CacheKind::CareerRecommendations)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(marker.reason, "grades_updated");
        assert!(marker.invalidated_at >= first.invalidated_at);
    }

    #[tokio::test]
    async fn test_delete_markers_covers_all_kinds() {
        let store = InMemoryStore::new();
        let user = new_user_id();

        for kind in CacheKind::ALL {
            store
                .upsert_invalidation_marker(&InvalidationMarker::new(
                    user,
                    kind,
                    reasons::MANUAL_REFRESH,
                ))
                .await
                .unwrap();
        }
        assert_eq!(store.marker_count(), 3);

        store.delete_invalidation_markers(user).await.unwrap();
        assert_eq!(store.marker_count(), 0);
    }
}
