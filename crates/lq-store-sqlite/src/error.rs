//! Error type for `lq-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The request was well-formed but cannot be applied to the stored state.
  #[error("core error: {0}")]
  Core(#[from] lq_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Stored rows break the course → topic → lesson hierarchy.
  #[error("catalog integrity error: {0}")]
  Integrity(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
