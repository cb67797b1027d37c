//! Handlers for `/user/:user_id`.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/user/:user_id` | Creates the profile with defaults if absent |
//! | `POST` | `/user/:user_id` | Body: `{"xp"?, "xp_delta"?, "selected_banner"?, "add_banner"?}` |
//!
//! Both return the merged [`UserProfile`].

use std::sync::Arc;

use axum::{
  Json,
  body::Bytes,
  extract::{Path, State},
};
use lq_core::{
  profile::{ProfilePatch, UserProfile},
  store::LearningStore,
};

use crate::error::ApiError;

/// `GET /user/:user_id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: LearningStore,
{
  let profile = store
    .get_or_create_profile(&user_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(profile))
}

/// `POST /user/:user_id`
///
/// The body is taken raw rather than through `Json` so that clients which
/// omit `Content-Type` (or send no body at all) are still accepted.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(user_id): Path<String>,
  body: Bytes,
) -> Result<Json<UserProfile>, ApiError>
where
  S: LearningStore,
{
  let patch = ProfilePatch::from_json_slice(&body)?;
  let profile = store
    .update_profile(&user_id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(profile))
}
