//! Read-through composition of the cache and the generator.
//!
//! This is the calling-application flow packaged as one type: check the
//! cache, invoke the generator on a miss, persist the fresh payload
//! best-effort, hand it back. The cache alone never calls the generator.

use std::sync::Arc;

use careerpath_core::{
    CareerDetail, CareerPathResult, CareerRecommendation, CourseRecommendationSet,
    ProfileContext, RecommendationGenerator,
};
use careerpath_store::CacheStore;

use crate::cache::RecommendationCache;

/// Cache-fronted recommendation service.
///
/// Store failures stay invisible here (the cache swallows them), but
/// generator failures propagate: a miss that cannot be regenerated has no
/// safe fallback.
pub struct CachedRecommendationService<S: CacheStore, G: RecommendationGenerator> {
    cache: RecommendationCache<S>,
    generator: Arc<G>,
}

impl<S: CacheStore, G: RecommendationGenerator> CachedRecommendationService<S, G> {
    /// Create a new service over a cache and a generator provider.
    pub fn new(cache: RecommendationCache<S>, generator: Arc<G>) -> Self {
        Self { cache, generator }
    }

    /// Get a reference to the underlying cache, for invalidation calls
    /// from profile and grade mutation handlers.
    pub fn cache(&self) -> &RecommendationCache<S> {
        &self.cache
    }

    /// Career recommendations for a profile: cached rows when valid,
    /// otherwise regenerated and saved.
    pub async fn career_recommendations(
        &self,
        context: &ProfileContext,
    ) -> CareerPathResult<Vec<CareerRecommendation>> {
        if let Some(rows) = self.cache.career_recommendations(context.user_id).await {
            return Ok(rows);
        }

        let items = self.generator.career_recommendations(context).await?;
        Ok(self
            .cache
            .save_career_recommendations(context.user_id, items)
            .await)
    }

    /// Detail payload for one career: cached when valid, otherwise
    /// regenerated and saved.
    pub async fn career_detail(
        &self,
        context: &ProfileContext,
        career_name: &str,
    ) -> CareerPathResult<CareerDetail> {
        if let Some(detail) = self.cache.career_detail(context.user_id, career_name).await {
            return Ok(detail);
        }

        let payload = self.generator.career_detail(context, career_name).await?;
        Ok(self
            .cache
            .save_career_detail(context.user_id, career_name, payload)
            .await)
    }

    /// Course recommendations for a profile: cached when valid, otherwise
    /// regenerated and saved.
    pub async fn course_recommendations(
        &self,
        context: &ProfileContext,
    ) -> CareerPathResult<CourseRecommendationSet> {
        if let Some(set) = self.cache.course_recommendations(context.user_id).await {
            return Ok(set);
        }

        let courses = self.generator.course_recommendations(context).await?;
        Ok(self
            .cache
            .save_course_recommendations(context.user_id, courses)
            .await)
    }
}
