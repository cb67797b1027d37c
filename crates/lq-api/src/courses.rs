//! Handler for `GET /courses`.

use std::sync::Arc;

use axum::{Json, extract::State};
use lq_core::{catalog::Course, store::LearningStore};
use serde::Serialize;

use crate::error::ApiError;

/// Response envelope: `{"courses": [...]}`.
#[derive(Debug, Serialize)]
pub struct CourseList {
  pub courses: Vec<Course>,
}

/// `GET /courses` — the whole catalog tree, in seed order.
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<CourseList>, ApiError>
where
  S: LearningStore,
{
  let courses = store.list_courses().await.map_err(ApiError::store)?;
  Ok(Json(CourseList { courses }))
}
