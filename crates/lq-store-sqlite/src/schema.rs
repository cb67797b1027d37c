//! SQL schema for the LingoQuest SQLite store.
//!
//! Executed at every open. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id              TEXT PRIMARY KEY,
    xp              INTEGER DEFAULT 0,
    selected_banner TEXT DEFAULT 'default-white'
);

-- Set of banners per user; rowid order is acquisition order.
CREATE TABLE IF NOT EXISTS owned_banners (
    user_id   TEXT,
    banner_id TEXT,
    PRIMARY KEY (user_id, banner_id)
);

-- Catalog tables are written once by the seeder and never updated.
CREATE TABLE IF NOT EXISTS courses (
    id    TEXT PRIMARY KEY,
    title TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS topics (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    course_id TEXT NOT NULL REFERENCES courses(id),
    key       TEXT NOT NULL,
    title     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS lessons (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id  INTEGER NOT NULL REFERENCES topics(id),
    lesson_id TEXT NOT NULL,   -- '<topic_key>-<n>', unique within a topic only
    title     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS topics_course_idx ON topics(course_id);
CREATE INDEX IF NOT EXISTS lessons_topic_idx ON lessons(topic_id);

PRAGMA user_version = 1;
";
