//! Error types for CareerPath cache operations

use crate::enums::CacheKind;
use thiserror::Error;

/// Persistent store errors. The cache layer catches every one of these at
/// its public boundary and converts it to a safe default (`None` for reads,
/// a logged no-op for writes).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Query failed on {table}: {reason}")]
    QueryFailed { table: &'static str, reason: String },

    #[error("Insert failed on {table}: {reason}")]
    InsertFailed { table: &'static str, reason: String },

    #[error("Delete failed on {table}: {reason}")]
    DeleteFailed { table: &'static str, reason: String },

    #[error("Upsert failed on {table}: {reason}")]
    UpsertFailed { table: &'static str, reason: String },

    #[error("Store unreachable: {reason}")]
    Unreachable { reason: String },

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Recommendation generator errors. Unlike store errors these propagate to
/// the caller: there is no safe fallback for a failed generation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("No generator provider configured")]
    ProviderNotConfigured,

    #[error("Request to {provider} failed with status {status}: {message}")]
    RequestFailed {
        provider: String,
        status: i32,
        message: String,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Generation for cache kind {kind} failed: {reason}")]
    GenerationFailed { kind: CacheKind, reason: String },
}

/// Master error type for CareerPath operations.
#[derive(Debug, Clone, Error)]
pub enum CareerPathError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for CareerPath operations.
pub type CareerPathResult<T> = Result<T, CareerPathError>;
