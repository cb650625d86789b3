//! Entity types for cached recommendation rows

use crate::enums::CacheKind;
use crate::{Timestamp, UserId};
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// CACHE ROW SHAPES
// ============================================================================

/// One cached career recommendation row, keyed by (user, career_name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub user_id: UserId,
    pub career_name: String,
    /// Profile fit in percent, 0-100 as produced by the generator.
    pub match_percentage: i32,
    pub description: String,
    pub salary_range: String,
    pub education_path: String,
    pub growth_outlook: String,
    /// Why the generator recommended this career for this profile.
    pub rationale: String,
    pub cached_at: Timestamp,
}

/// One cached career detail row, keyed by (user, career_name). The detail
/// payload is whatever nested structure the generator produced; the cache
/// never looks inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerDetail {
    pub user_id: UserId,
    pub career_name: String,
    pub detail: serde_json::Value,
    pub cached_at: Timestamp,
}

impl CareerDetail {
    pub fn new(user_id: UserId, career_name: impl Into<String>, detail: serde_json::Value) -> Self {
        Self {
            user_id,
            career_name: career_name.into(),
            detail,
            cached_at: Utc::now(),
        }
    }
}

/// The cached course recommendations for a user: one row per user holding
/// an ordered list of opaque course descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecommendationSet {
    pub user_id: UserId,
    pub courses: Vec<serde_json::Value>,
    pub cached_at: Timestamp,
}

impl CourseRecommendationSet {
    pub fn new(user_id: UserId, courses: Vec<serde_json::Value>) -> Self {
        Self {
            user_id,
            courses,
            cached_at: Utc::now(),
        }
    }
}

// ============================================================================
// INVALIDATION MARKER
// ============================================================================

/// Invalidation marker, keyed by (user, cache kind). At most one live marker
/// per key; a repeat invalidation overwrites it and refreshes the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidationMarker {
    pub user_id: UserId,
    pub cache_kind: CacheKind,
    pub invalidated_at: Timestamp,
    /// Free-text mutation cause, e.g. "profile_updated". Display only.
    pub reason: String,
}

impl InvalidationMarker {
    /// Create a marker stamped with the current time.
    pub fn new(user_id: UserId, cache_kind: CacheKind, reason: impl Into<String>) -> Self {
        Self {
            user_id,
            cache_kind,
            invalidated_at: Utc::now(),
            reason: reason.into(),
        }
    }
}

// ============================================================================
// LOOSE GENERATOR PAYLOAD
// ============================================================================

/// One career item as the generator emits it. Field names vary across
/// prompt revisions (`title` vs `name`, `matchPercentage` vs `value`), so
/// every field is optional and aliased; [`into_recommendation`] maps the
/// item into the canonical row shape with absent fields stored empty.
///
/// [`into_recommendation`]: GeneratedRecommendation::into_recommendation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratedRecommendation {
    #[serde(alias = "name")]
    pub title: Option<String>,
    #[serde(rename = "matchPercentage", alias = "value", alias = "match_percentage")]
    pub match_percentage: Option<i32>,
    pub description: Option<String>,
    #[serde(rename = "salaryRange", alias = "salary", alias = "salary_range")]
    pub salary_range: Option<String>,
    #[serde(alias = "educationPath", alias = "education_path")]
    pub education: Option<String>,
    #[serde(alias = "growthOutlook", alias = "growth_outlook")]
    pub growth: Option<String>,
    #[serde(alias = "rationale", alias = "whyRecommended")]
    pub reason: Option<String>,
}

impl GeneratedRecommendation {
    /// Map this loose item into a canonical cache row for `user_id`,
    /// stamped with the current time.
    pub fn into_recommendation(self, user_id: UserId) -> CareerRecommendation {
        CareerRecommendation {
            user_id,
            career_name: self.title.unwrap_or_default(),
            match_percentage: self.match_percentage.unwrap_or(0),
            description: self.description.unwrap_or_default(),
            salary_range: self.salary_range.unwrap_or_default(),
            education_path: self.education.unwrap_or_default(),
            growth_outlook: self.growth.unwrap_or_default(),
            rationale: self.reason.unwrap_or_default(),
            cached_at: Utc::now(),
        }
    }
}
