//! Flat row types read from the catalog tables, and their assembly into the
//! nested [`Course`] tree.
//!
//! Each table is read in one ordered scan; nesting happens here rather than
//! with one query per parent.

use std::collections::HashMap;

use lq_core::{
  catalog::{Course, Lesson, Topic},
  profile::UserProfile,
};

use crate::{Error, Result};

pub struct RawCourse {
  pub id:    String,
  pub title: String,
}

pub struct RawTopic {
  pub id:        i64,
  pub course_id: String,
  pub key:       String,
  pub title:     String,
}

pub struct RawLesson {
  pub topic_id:  i64,
  pub lesson_id: String,
  pub title:     String,
}

pub struct RawUser {
  pub id:              String,
  pub xp:              i64,
  pub selected_banner: String,
}

impl RawUser {
  pub fn into_profile(self, owned_banners: Vec<String>) -> UserProfile {
    UserProfile {
      id: self.id,
      xp: self.xp,
      selected_banner: self.selected_banner,
      owned_banners,
    }
  }
}

/// Nest topics under courses and lessons under topics, keeping the order of
/// each input.
pub fn assemble_catalog(
  courses: Vec<RawCourse>,
  topics:  Vec<RawTopic>,
  lessons: Vec<RawLesson>,
) -> Result<Vec<Course>> {
  let mut tree: Vec<Course> = courses
    .into_iter()
    .map(|c| Course { id: c.id, title: c.title, topics: Vec::new() })
    .collect();

  let course_pos: HashMap<String, usize> = tree
    .iter()
    .enumerate()
    .map(|(i, c)| (c.id.clone(), i))
    .collect();

  // topic row id -> (course position, topic position)
  let mut topic_pos: HashMap<i64, (usize, usize)> = HashMap::new();

  for raw in topics {
    let ci = *course_pos.get(&raw.course_id).ok_or_else(|| {
      Error::Integrity(format!(
        "topic {} references missing course {:?}",
        raw.id, raw.course_id
      ))
    })?;
    let siblings = &mut tree[ci].topics;
    topic_pos.insert(raw.id, (ci, siblings.len()));
    siblings.push(Topic { key: raw.key, title: raw.title, lessons: Vec::new() });
  }

  for raw in lessons {
    let (ci, ti) = *topic_pos.get(&raw.topic_id).ok_or_else(|| {
      Error::Integrity(format!(
        "lesson {:?} references missing topic {}",
        raw.lesson_id, raw.topic_id
      ))
    })?;
    tree[ci].topics[ti]
      .lessons
      .push(Lesson { id: raw.lesson_id, title: raw.title });
  }

  Ok(tree)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn course(id: &str) -> RawCourse {
    RawCourse { id: id.into(), title: id.to_uppercase() }
  }

  fn topic(id: i64, course_id: &str, key: &str) -> RawTopic {
    RawTopic { id, course_id: course_id.into(), key: key.into(), title: key.into() }
  }

  fn lesson(topic_id: i64, lesson_id: &str) -> RawLesson {
    RawLesson { topic_id, lesson_id: lesson_id.into(), title: lesson_id.into() }
  }

  #[test]
  fn nests_rows_in_input_order() {
    let tree = assemble_catalog(
      vec![course("b"), course("a")],
      vec![topic(1, "b", "x"), topic(2, "a", "y"), topic(3, "b", "z")],
      vec![lesson(3, "z-1"), lesson(1, "x-1"), lesson(3, "z-2")],
    )
    .unwrap();

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].id, "b");
    let keys: Vec<_> = tree[0].topics.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["x", "z"]);
    let z: Vec<_> = tree[0].topics[1].lessons.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(z, ["z-1", "z-2"]);
    assert!(tree[1].topics[0].lessons.is_empty());
  }

  #[test]
  fn orphan_topic_is_an_integrity_error() {
    let err = assemble_catalog(vec![course("a")], vec![topic(1, "nope", "x")], vec![])
      .err()
      .unwrap();
    assert!(matches!(err, Error::Integrity(_)));
  }

  #[test]
  fn orphan_lesson_is_an_integrity_error() {
    let err = assemble_catalog(vec![], vec![], vec![lesson(9, "x-1")])
      .err()
      .unwrap();
    assert!(matches!(err, Error::Integrity(_)));
  }
}
