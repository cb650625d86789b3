//! CareerPath Core - Entity Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains the cache row shapes, the invalidation marker, the
//! loosely-typed generator payloads, the error taxonomy, and the generator
//! provider trait.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod entities;
pub mod enums;
pub mod error;
pub mod generate;

pub use entities::{
    CareerDetail, CareerRecommendation, CourseRecommendationSet, GeneratedRecommendation,
    InvalidationMarker,
};
pub use enums::{reasons, CacheKind};
pub use error::{
    CareerPathError, CareerPathResult, GeneratorError, StoreError, StoreResult,
};
pub use generate::{ProfileContext, RecommendationGenerator};

// ============================================================================
// IDENTITY TYPES
// ============================================================================

/// Student identifier. The upstream auth system issues UUIDs; the cache
/// treats them as opaque keys and never inspects them.
pub type UserId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 UserId (timestamp-sortable), used by tests and
/// account provisioning.
pub fn new_user_id() -> UserId {
    Uuid::now_v7()
}
