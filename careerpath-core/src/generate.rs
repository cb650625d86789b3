//! Generator provider boundary
//!
//! The cache itself never calls the generator; only the read-through
//! service in `careerpath-cache` does, and only after the cache has
//! signalled "must regenerate".

use crate::entities::GeneratedRecommendation;
use crate::error::CareerPathResult;
use crate::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Profile context handed to the generator: the student's profile and
/// grade data, already assembled by the calling application. Both payloads
/// are opaque to this subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContext {
    pub user_id: UserId,
    pub profile: serde_json::Value,
    pub grades: serde_json::Value,
}

impl ProfileContext {
    pub fn new(user_id: UserId, profile: serde_json::Value, grades: serde_json::Value) -> Self {
        Self {
            user_id,
            profile,
            grades,
        }
    }
}

/// Recommendation generator provider.
///
/// Implementations are expected to apply their own request timeouts; the
/// cache layer places none of its own on top.
#[async_trait]
pub trait RecommendationGenerator: Send + Sync {
    /// Generate the ranked career list for a profile.
    async fn career_recommendations(
        &self,
        context: &ProfileContext,
    ) -> CareerPathResult<Vec<GeneratedRecommendation>>;

    /// Generate the detail payload for one named career.
    async fn career_detail(
        &self,
        context: &ProfileContext,
        career_name: &str,
    ) -> CareerPathResult<serde_json::Value>;

    /// Generate the ordered course descriptor list for a profile.
    async fn course_recommendations(
        &self,
        context: &ProfileContext,
    ) -> CareerPathResult<Vec<serde_json::Value>>;
}
