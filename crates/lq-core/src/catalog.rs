//! The course catalog tree: course → topic → lesson.
//!
//! The same types are used to describe the seed data and to report the
//! stored catalog, so a freshly seeded store lists exactly what was seeded.
//! Surrogate row ids never leave the store.

use serde::{Deserialize, Serialize};

/// A top-level learning track, e.g. one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
  /// Stable slug such as `"english"`.
  pub id:     String,
  pub title:  String,
  pub topics: Vec<Topic>,
}

/// A thematic grouping of lessons within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  /// Short slug such as `"survival"`; unique within a course.
  pub key:     String,
  pub title:   String,
  pub lessons: Vec<Lesson>,
}

/// The smallest addressable unit of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
  /// Human-facing slug, `"<topic_key>-<n>"` with `n` starting at 1.
  pub id:    String,
  pub title: String,
}
