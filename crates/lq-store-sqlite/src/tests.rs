//! Integration tests for `SqliteStore` against an in-memory database.

use lq_core::{
  profile::{DEFAULT_BANNER, ProfilePatch, UserProfile},
  seed::default_catalog,
  store::{CatalogCounts, LearningStore, SeedOutcome},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn seeded() -> SqliteStore {
  let s = store().await;
  s.seed_catalog(default_catalog()).await.unwrap();
  s
}

const FULL: CatalogCounts = CatalogCounts { courses: 4, topics: 20, lessons: 400 };

// ─── Seeding ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn seed_empty_store() {
  let s = store().await;
  assert_eq!(s.catalog_counts().await.unwrap(), CatalogCounts::default());

  let outcome = s.seed_catalog(default_catalog()).await.unwrap();
  assert_eq!(outcome, SeedOutcome::Seeded(FULL));
  assert_eq!(s.catalog_counts().await.unwrap(), FULL);
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
  let s = seeded().await;

  let outcome = s.seed_catalog(default_catalog()).await.unwrap();
  assert_eq!(outcome, SeedOutcome::AlreadySeeded);
  assert_eq!(s.catalog_counts().await.unwrap(), FULL);
}

#[tokio::test]
async fn any_existing_course_blocks_seeding() {
  let s = store().await;
  let mut one = default_catalog();
  one.truncate(1);
  s.seed_catalog(one).await.unwrap();

  let outcome = s.seed_catalog(default_catalog()).await.unwrap();
  assert_eq!(outcome, SeedOutcome::AlreadySeeded);
  assert_eq!(s.catalog_counts().await.unwrap().courses, 1);
}

#[tokio::test]
async fn failed_seed_leaves_store_empty() {
  let s = store().await;
  let mut catalog = default_catalog();
  // Duplicate primary key on the last course aborts the transaction.
  let dup = catalog[0].clone();
  catalog.push(dup);

  assert!(s.seed_catalog(catalog).await.is_err());
  assert_eq!(s.catalog_counts().await.unwrap(), CatalogCounts::default());
}

// ─── Catalog queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn list_courses_on_empty_store_is_empty() {
  let s = store().await;
  assert!(s.list_courses().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_courses_matches_seed_exactly() {
  let s = seeded().await;
  let courses = s.list_courses().await.unwrap();

  assert_eq!(courses.len(), 4);
  assert!(courses.iter().all(|c| c.topics.len() == 5));
  assert!(
    courses
      .iter()
      .flat_map(|c| &c.topics)
      .all(|t| t.lessons.len() == 20)
  );
  assert_eq!(courses, default_catalog());
}

#[tokio::test]
async fn lessons_are_in_ascending_order() {
  let s = seeded().await;
  let courses = s.list_courses().await.unwrap();

  let grammar = &courses[3].topics[3];
  assert_eq!(grammar.key, "grammar");
  let ids: Vec<_> = grammar.lessons.iter().map(|l| l.id.clone()).collect();
  let expected: Vec<_> = (1..=20).map(|n| format!("grammar-{n}")).collect();
  assert_eq!(ids, expected);
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fresh_profile_has_defaults() {
  let s = store().await;
  let profile = s.get_or_create_profile("u1").await.unwrap();
  assert_eq!(profile, UserProfile {
    id:              "u1".into(),
    xp:              0,
    selected_banner: DEFAULT_BANNER.into(),
    owned_banners:   vec![],
  });
}

#[tokio::test]
async fn get_or_create_is_stable() {
  let s = store().await;
  s.update_profile("u1", ProfilePatch { xp: Some(7), ..Default::default() })
    .await
    .unwrap();

  let profile = s.get_or_create_profile("u1").await.unwrap();
  assert_eq!(profile.xp, 7);
}

#[tokio::test]
async fn deltas_accumulate() {
  let s = store().await;
  let delta = |d| ProfilePatch { xp_delta: Some(d), ..Default::default() };

  s.update_profile("u1", delta(10)).await.unwrap();
  let profile = s.update_profile("u1", delta(5)).await.unwrap();
  assert_eq!(profile.xp, 15);
}

#[tokio::test]
async fn absolute_xp_applies_before_delta() {
  let s = store().await;
  s.update_profile("u1", ProfilePatch { xp: Some(40), ..Default::default() })
    .await
    .unwrap();

  let profile = s
    .update_profile("u1", ProfilePatch {
      xp: Some(100),
      xp_delta: Some(3),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(profile.xp, 103);
}

#[tokio::test]
async fn new_profile_takes_initial_values_from_patch() {
  let s = store().await;
  let profile = s
    .update_profile("u2", ProfilePatch {
      xp: Some(50),
      xp_delta: Some(5),
      selected_banner: Some("banner-lvl-2".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(profile.xp, 55);
  assert_eq!(profile.selected_banner, "banner-lvl-2");
}

#[tokio::test]
async fn negative_delta_is_not_clamped() {
  let s = store().await;
  let profile = s
    .update_profile("u1", ProfilePatch { xp_delta: Some(-8), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(profile.xp, -8);
}

#[tokio::test]
async fn overflowing_delta_is_rejected_and_rolled_back() {
  let s = store().await;
  s.update_profile("u1", ProfilePatch { xp: Some(i64::MAX), ..Default::default() })
    .await
    .unwrap();

  let err = s
    .update_profile("u1", ProfilePatch {
      xp_delta: Some(1),
      selected_banner: Some("gold".into()),
      ..Default::default()
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(lq_core::Error::InvalidInput(_))));

  let profile = s.get_or_create_profile("u1").await.unwrap();
  assert_eq!(profile.xp, i64::MAX);
  assert_eq!(profile.selected_banner, DEFAULT_BANNER);
}

#[tokio::test]
async fn failed_patch_leaves_earlier_steps_unapplied() {
  let s = store().await;
  s.update_profile("u1", ProfilePatch { xp: Some(7), ..Default::default() })
    .await
    .unwrap();

  // The absolute xp step succeeds; the delta on top of it overflows.
  s.update_profile("u1", ProfilePatch {
    xp: Some(i64::MAX),
    xp_delta: Some(1),
    add_banner: Some("gold".into()),
    ..Default::default()
  })
  .await
  .unwrap_err();

  let profile = s.get_or_create_profile("u1").await.unwrap();
  assert_eq!(profile.xp, 7);
  assert!(profile.owned_banners.is_empty());
}

#[tokio::test]
async fn failed_patch_does_not_create_the_profile() {
  let s = store().await;
  s.update_profile("u9", ProfilePatch {
    xp: Some(i64::MIN),
    xp_delta: Some(-1),
    ..Default::default()
  })
  .await
  .unwrap_err();

  let profile = s.get_or_create_profile("u9").await.unwrap();
  assert_eq!(profile.xp, 0);
}

#[tokio::test]
async fn adding_a_banner_twice_keeps_one() {
  let s = store().await;
  let add = || ProfilePatch { add_banner: Some("gold".into()), ..Default::default() };

  s.update_profile("u1", add()).await.unwrap();
  let profile = s.update_profile("u1", add()).await.unwrap();
  assert_eq!(profile.owned_banners, ["gold"]);
}

#[tokio::test]
async fn owned_banners_keep_acquisition_order() {
  let s = store().await;
  for banner in ["zeta", "alpha", "mid"] {
    s.update_profile("u1", ProfilePatch {
      add_banner: Some(banner.into()),
      ..Default::default()
    })
    .await
    .unwrap();
  }

  let profile = s.get_or_create_profile("u1").await.unwrap();
  assert_eq!(profile.owned_banners, ["zeta", "alpha", "mid"]);
}

#[tokio::test]
async fn selecting_an_unowned_banner_is_allowed() {
  let s = store().await;
  let profile = s
    .update_profile("u1", ProfilePatch {
      selected_banner: Some("gold".into()),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(profile.selected_banner, "gold");
  assert!(profile.owned_banners.is_empty());
}

#[tokio::test]
async fn empty_patch_creates_profile_without_changes() {
  let s = store().await;
  let profile = s.update_profile("u1", ProfilePatch::default()).await.unwrap();
  assert_eq!(profile, UserProfile {
    id:              "u1".into(),
    xp:              0,
    selected_banner: DEFAULT_BANNER.into(),
    owned_banners:   Vec::new(),
  });
}

#[tokio::test]
async fn banners_are_per_user() {
  let s = store().await;
  s.update_profile("u1", ProfilePatch {
    add_banner: Some("gold".into()),
    ..Default::default()
  })
  .await
  .unwrap();

  let other = s.get_or_create_profile("u2").await.unwrap();
  assert!(other.owned_banners.is_empty());
}
