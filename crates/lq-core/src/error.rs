//! Error types for `lq-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A profile patch field had the wrong shape (e.g. `xp_delta: "ten"`).
  #[error("invalid input: {0}")]
  InvalidInput(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
