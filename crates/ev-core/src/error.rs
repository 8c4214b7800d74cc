//! Engine error type.
//!
//! The routing pipeline itself never fails: unresolved districts are dropped,
//! failed hazard fetches default to zero, and a missing path is an empty
//! result.  `EvError` covers the two places that *can* fail: configuration
//! validation and lookups of a district the graph does not know.

use thiserror::Error;

/// The top-level error type for `ev-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum EvError {
    #[error("district {0:?} not found")]
    DistrictNotFound(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `ev-*` crates.
pub type EvResult<T> = Result<T, EvError>;
