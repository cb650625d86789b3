//! Enum types for CareerPath cache entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cache type discriminator. Each kind maps to one logical table of cached
/// rows and scopes its own invalidation markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheKind {
    CareerRecommendations,
    CareerDetails,
    CourseRecommendations,
}

impl CacheKind {
    /// All cache kinds, in the order bulk invalidation walks them.
    pub const ALL: [CacheKind; 3] = [
        CacheKind::CareerRecommendations,
        CacheKind::CareerDetails,
        CacheKind::CourseRecommendations,
    ];

    /// Stable string form used as the marker row key.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKind::CareerRecommendations => "career_recommendations",
            CacheKind::CareerDetails => "career_details",
            CacheKind::CourseRecommendations => "course_recommendations",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CacheKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "career_recommendations" => Ok(CacheKind::CareerRecommendations),
            "career_details" => Ok(CacheKind::CareerDetails),
            "course_recommendations" => Ok(CacheKind::CourseRecommendations),
            other => Err(format!("unknown cache kind: {}", other)),
        }
    }
}

/// Well-known invalidation reasons. The marker column is free text; these
/// are the values the application actually writes.
pub mod reasons {
    /// Profile mutation (pathway, subjects, interests).
    pub const PROFILE_UPDATED: &str = "profile_updated";
    /// Grade entry added, edited, or removed.
    pub const GRADES_UPDATED: &str = "grades_updated";
    /// User-initiated refresh; the default when no reason is given.
    pub const MANUAL_REFRESH: &str = "manual_refresh";
}
