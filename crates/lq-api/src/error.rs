//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a backend error. An [`lq_core::Error`] anywhere in its source
  /// chain is a rejected request and becomes a 400.
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    let mut cause = Some(&e as &(dyn std::error::Error + 'static));
    while let Some(err) = cause {
      if let Some(core) = err.downcast_ref::<lq_core::Error>() {
        return match core {
          lq_core::Error::InvalidInput(m) => Self::BadRequest(m.clone()),
        };
      }
      cause = err.source();
    }
    Self::Store(Box::new(e))
  }
}

impl From<lq_core::Error> for ApiError {
  fn from(e: lq_core::Error) -> Self {
    match e {
      lq_core::Error::InvalidInput(m) => Self::BadRequest(m),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
