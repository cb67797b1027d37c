//! JSON REST API for LingoQuest.
//!
//! Exposes an axum [`Router`] backed by any [`lq_core::store::LearningStore`].
//! There is no auth: the user id in the path is trusted as given.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lq_api::api_router(store.clone()))
//! ```

pub mod courses;
pub mod error;
pub mod users;

use std::sync::Arc;

use axum::{Router, routing::get};
use lq_core::store::LearningStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LearningStore + 'static,
{
  Router::new()
    .route("/courses", get(courses::list::<S>))
    .route("/user/{user_id}", get(users::get_one::<S>).post(users::update::<S>))
    .with_state(store)
}
