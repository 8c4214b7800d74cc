//! Collaborator error type.

use thiserror::Error;

/// Failure reported by an external data collaborator (geocoder, weather or
/// seismic feed, shelter directory).
///
/// The graph pipeline never propagates these: enrichment logs them and falls
/// back to a zero reading.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),

    #[error("no data for {lat:.5}, {lon:.5}")]
    NotFound { lat: f64, lon: f64 },

    #[error("source parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SourceResult<T> = Result<T, SourceError>;
