//! The `LearningStore` trait and supporting result types.
//!
//! The trait is implemented by storage backends (e.g. `lq-store-sqlite`).
//! Higher layers (`lq-api`, `lq-server`) depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use crate::{
  catalog::Course,
  profile::{ProfilePatch, UserProfile},
};

// ─── Result types ────────────────────────────────────────────────────────────

/// Row counts of the catalog tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
  pub courses: usize,
  pub topics:  usize,
  pub lessons: usize,
}

/// What [`LearningStore::seed_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
  /// The store was empty and now holds the given rows.
  Seeded(CatalogCounts),
  /// At least one course already existed; nothing was written.
  AlreadySeeded,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a LingoQuest store backend.
///
/// The catalog is write-once: it is populated by [`seed_catalog`] and only
/// read afterwards. Profiles are created on first reference and mutated by
/// patches.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
///
/// [`seed_catalog`]: LearningStore::seed_catalog
pub trait LearningStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Catalog ───────────────────────────────────────────────────────────

  /// Write `catalog` if and only if the store holds no course yet.
  ///
  /// The emptiness check and all inserts happen in one transaction: either
  /// the whole tree is committed or nothing is.
  fn seed_catalog(
    &self,
    catalog: Vec<Course>,
  ) -> impl Future<Output = Result<SeedOutcome, Self::Error>> + Send + '_;

  fn catalog_counts(
    &self,
  ) -> impl Future<Output = Result<CatalogCounts, Self::Error>> + Send + '_;

  /// Return the full course → topic → lesson tree in insertion order.
  fn list_courses(
    &self,
  ) -> impl Future<Output = Result<Vec<Course>, Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Return the profile for `user_id`, creating it with defaults first if it
  /// does not exist.
  fn get_or_create_profile<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + 'a;

  /// Apply `patch` to the profile for `user_id` and return the merged state.
  ///
  /// A missing profile is created first, taking `patch.xp` and
  /// `patch.selected_banner` as its initial values.
  fn update_profile<'a>(
    &'a self,
    user_id: &'a str,
    patch: ProfilePatch,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + 'a;
}
