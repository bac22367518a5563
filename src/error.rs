//! Error taxonomy for the scoring core and its collaborators.
//!
//! The core itself is total for any well-formed `VideoRecord`: missing
//! optional inputs (transcript, thumbnail, channel info) are handled by
//! per-assessor defaults and malformed timestamp candidates are skipped
//! during extraction. The only request-time failure is an unknown category
//! id, checked before any computation.

use thiserror::Error;

/// Request-time failures of the scoring engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// The category id did not resolve against the registry.
    #[error("unknown category `{0}` (expected heartwarming, motivational or traumatic)")]
    InvalidCategory(String),
}

/// Failures of an upstream video data provider. These never originate in
/// the scoring core; callers surface them before the engine is invoked.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("video `{0}` not found")]
    NotFound(String),

    #[error("provider rejected credentials")]
    Auth,

    #[error("provider rate limit exceeded")]
    RateLimited,

    #[error("transient provider failure: {0}")]
    Transient(#[from] anyhow::Error),
}
