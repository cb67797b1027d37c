//! The fixed catalog written into an empty store at first boot.
//!
//! Every course carries the same five topics. Each topic has twenty lessons:
//! the first five have curated titles, the rest use a numbered placeholder.

use crate::catalog::{Course, Lesson, Topic};

/// Lessons generated per topic.
pub const LESSONS_PER_TOPIC: usize = 20;

/// `(id, title)` for each seeded course, in seed order.
pub const COURSES: [(&str, &str); 4] = [
  ("english", "Английский язык"),
  ("spanish", "Испанский язык"),
  ("german", "Немецкий язык"),
  ("french", "Французский язык"),
];

/// A topic template shared by all courses.
#[derive(Debug, Clone, Copy)]
pub struct TopicTemplate {
  pub key:     &'static str,
  pub title:   &'static str,
  /// Titles for lessons `1..=5`.
  pub curated: [&'static str; 5],
}

pub const TOPICS: [TopicTemplate; 5] = [
  TopicTemplate {
    key:     "survival",
    title:   "Выживание: приветствия, покупки, кафе",
    curated: [
      "Приветствия и представления",
      "Числа и цены",
      "Заказ в кафе",
      "Покупка билетов",
      "Вежливые фразы",
    ],
  },
  TopicTemplate {
    key:     "daily",
    title:   "Повседневность: дом, работа, расписание",
    curated: [
      "Дом и семья",
      "Работа и профессии",
      "Распорядок дня",
      "Хобби",
      "Еда и готовка",
    ],
  },
  TopicTemplate {
    key:     "travel",
    title:   "Путешествия: транспорт, отели, ситуации",
    curated: [
      "Аэропорт и перелёт",
      "Паспортный контроль",
      "Отель и заселение",
      "Аренда авто",
      "Туристическая информация",
    ],
  },
  TopicTemplate {
    key:     "grammar",
    title:   "Грамматика: времена, модальные, конструкции",
    curated: [
      "Present Simple/Continuous",
      "Past Simple/Continuous",
      "Future forms",
      "Present Perfect",
      "Модальные глаголы",
    ],
  },
  TopicTemplate {
    key:     "communication",
    title:   "Коммуникация: диалоги, small talk, email",
    curated: [
      "Small talk",
      "Знакомства",
      "Выражение мнения",
      "Согласие/несогласие",
      "Проблемы и решения",
    ],
  },
];

impl TopicTemplate {
  /// `"<key>-<n>"`, 1-based.
  pub fn lesson_id(&self, n: usize) -> String { format!("{}-{n}", self.key) }

  pub fn lesson_title(&self, n: usize) -> String {
    match n.checked_sub(1).and_then(|i| self.curated.get(i)) {
      Some(title) => (*title).to_owned(),
      None => format!("Тема {n}"),
    }
  }

  pub fn build(&self) -> Topic {
    Topic {
      key:     self.key.to_owned(),
      title:   self.title.to_owned(),
      lessons: (1..=LESSONS_PER_TOPIC)
        .map(|n| Lesson {
          id:    self.lesson_id(n),
          title: self.lesson_title(n),
        })
        .collect(),
    }
  }
}

/// Build the full seed tree, in seed order.
pub fn default_catalog() -> Vec<Course> {
  COURSES
    .iter()
    .map(|(id, title)| Course {
      id:     (*id).to_owned(),
      title:  (*title).to_owned(),
      topics: TOPICS.iter().map(TopicTemplate::build).collect(),
    })
    .collect()
}
