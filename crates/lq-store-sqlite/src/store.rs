//! [`SqliteStore`] — the SQLite implementation of [`LearningStore`].

use std::path::Path;

use lq_core::{
  catalog::Course,
  profile::{DEFAULT_BANNER, ProfilePatch, UserProfile},
  store::{CatalogCounts, LearningStore, SeedOutcome},
};
use rusqlite::TransactionBehavior;

use crate::{
  Result,
  rows::{RawCourse, RawLesson, RawTopic, RawUser, assemble_catalog},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A LingoQuest store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Read a user row and its owned banners. The row must exist.
fn read_profile(
  conn:    &rusqlite::Connection,
  user_id: &str,
) -> rusqlite::Result<UserProfile> {
  let raw = conn.query_row(
    "SELECT id, COALESCE(xp, 0), COALESCE(selected_banner, ?2)
     FROM users WHERE id = ?1",
    rusqlite::params![user_id, DEFAULT_BANNER],
    |row| {
      Ok(RawUser {
        id:              row.get(0)?,
        xp:              row.get(1)?,
        selected_banner: row.get(2)?,
      })
    },
  )?;

  let mut stmt = conn.prepare(
    "SELECT banner_id FROM owned_banners WHERE user_id = ?1 ORDER BY rowid",
  )?;
  let banners = stmt
    .query_map(rusqlite::params![user_id], |row| row.get(0))?
    .collect::<rusqlite::Result<Vec<String>>>()?;

  Ok(raw.into_profile(banners))
}

// ─── LearningStore impl ──────────────────────────────────────────────────────

impl LearningStore for SqliteStore {
  type Error = crate::Error;

  // ── Catalog ───────────────────────────────────────────────────────────────

  async fn seed_catalog(&self, catalog: Vec<Course>) -> Result<SeedOutcome> {
    let outcome = self
      .conn
      .call(move |conn| {
        // IMMEDIATE takes the write lock before the emptiness check.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing: i64 =
          tx.query_row("SELECT COUNT(*) FROM courses", [], |r| r.get(0))?;
        if existing > 0 {
          return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut counts = CatalogCounts::default();
        {
          let mut insert_course =
            tx.prepare("INSERT INTO courses (id, title) VALUES (?1, ?2)")?;
          let mut insert_topic = tx.prepare(
            "INSERT INTO topics (course_id, key, title) VALUES (?1, ?2, ?3)",
          )?;
          let mut insert_lesson = tx.prepare(
            "INSERT INTO lessons (topic_id, lesson_id, title) VALUES (?1, ?2, ?3)",
          )?;

          for course in &catalog {
            insert_course.execute(rusqlite::params![course.id, course.title])?;
            counts.courses += 1;

            for topic in &course.topics {
              let topic_id = insert_topic
                .insert(rusqlite::params![course.id, topic.key, topic.title])?;
              counts.topics += 1;

              for lesson in &topic.lessons {
                insert_lesson
                  .execute(rusqlite::params![topic_id, lesson.id, lesson.title])?;
                counts.lessons += 1;
              }
            }
          }
        }
        tx.commit()?;

        Ok(SeedOutcome::Seeded(counts))
      })
      .await?;

    tracing::debug!(?outcome, "catalog seed finished");
    Ok(outcome)
  }

  async fn catalog_counts(&self) -> Result<CatalogCounts> {
    let (courses, topics, lessons): (i64, i64, i64) = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT (SELECT COUNT(*) FROM courses),
                  (SELECT COUNT(*) FROM topics),
                  (SELECT COUNT(*) FROM lessons)",
          [],
          |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )?)
      })
      .await?;

    Ok(CatalogCounts {
      courses: courses as usize,
      topics:  topics as usize,
      lessons: lessons as usize,
    })
  }

  async fn list_courses(&self) -> Result<Vec<Course>> {
    let (courses, topics, lessons) = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, title FROM courses ORDER BY rowid")?;
        let courses = stmt
          .query_map([], |row| {
            Ok(RawCourse {
              id:    row.get(0)?,
              title: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt =
          conn.prepare("SELECT id, course_id, key, title FROM topics ORDER BY id")?;
        let topics = stmt
          .query_map([], |row| {
            Ok(RawTopic {
              id:        row.get(0)?,
              course_id: row.get(1)?,
              key:       row.get(2)?,
              title:     row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt =
          conn.prepare("SELECT topic_id, lesson_id, title FROM lessons ORDER BY id")?;
        let lessons = stmt
          .query_map([], |row| {
            Ok(RawLesson {
              topic_id:  row.get(0)?,
              lesson_id: row.get(1)?,
              title:     row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((courses, topics, lessons))
      })
      .await?;

    assemble_catalog(courses, topics, lessons)
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn get_or_create_profile(&self, user_id: &str) -> Result<UserProfile> {
    let user_id = user_id.to_owned();

    let profile = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO users (id) VALUES (?1)",
          rusqlite::params![user_id],
        )?;
        Ok(read_profile(conn, &user_id)?)
      })
      .await?;

    Ok(profile)
  }

  async fn update_profile(
    &self,
    user_id: &str,
    patch:   ProfilePatch,
  ) -> Result<UserProfile> {
    let user_id = user_id.to_owned();
    tracing::debug!(%user_id, ?patch, "applying profile patch");

    // The inner result carries rejections; returning before `commit` drops
    // the transaction, which rolls back every step already applied.
    let profile = self
      .conn
      .call(move |conn| -> tokio_rusqlite::Result<Result<UserProfile>> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // A new row starts from the patch's own values; an existing row is
        // left untouched here.
        tx.execute(
          "INSERT OR IGNORE INTO users (id, xp, selected_banner) VALUES (?1, ?2, ?3)",
          rusqlite::params![
            user_id,
            patch.xp.unwrap_or(0),
            patch.selected_banner.as_deref().unwrap_or(DEFAULT_BANNER),
          ],
        )?;

        if let Some(xp) = patch.xp {
          tx.execute(
            "UPDATE users SET xp = ?1 WHERE id = ?2",
            rusqlite::params![xp, user_id],
          )?;
        }

        // The write lock is held since BEGIN IMMEDIATE, so no other writer
        // can slip in between the read and the update.
        if let Some(delta) = patch.xp_delta {
          let current: i64 = tx.query_row(
            "SELECT COALESCE(xp, 0) FROM users WHERE id = ?1",
            rusqlite::params![user_id],
            |r| r.get(0),
          )?;
          let Some(xp) = current.checked_add(delta) else {
            return Ok(Err(
              lq_core::Error::InvalidInput(format!(
                "xp_delta {delta} overflows xp {current}"
              ))
              .into(),
            ));
          };
          tx.execute(
            "UPDATE users SET xp = ?1 WHERE id = ?2",
            rusqlite::params![xp, user_id],
          )?;
        }

        if let Some(banner) = &patch.selected_banner {
          tx.execute(
            "UPDATE users SET selected_banner = ?1 WHERE id = ?2",
            rusqlite::params![banner, user_id],
          )?;
        }

        if let Some(banner) = &patch.add_banner {
          tx.execute(
            "INSERT OR IGNORE INTO owned_banners (user_id, banner_id) VALUES (?1, ?2)",
            rusqlite::params![user_id, banner],
          )?;
        }

        let profile = read_profile(&tx, &user_id)?;
        tx.commit()?;
        Ok(Ok(profile))
      })
      .await??;

    Ok(profile)
  }
}
