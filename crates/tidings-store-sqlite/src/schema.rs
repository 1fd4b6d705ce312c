//! SQL schema for the Tidings SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for later migrations.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- article_url is the natural key; news_item_id never changes once assigned.
CREATE TABLE IF NOT EXISTS news_items (
    news_item_id INTEGER PRIMARY KEY AUTOINCREMENT,
    headline     TEXT NOT NULL,
    summary      TEXT NOT NULL DEFAULT '',
    article_url  TEXT NOT NULL UNIQUE,
    author       TEXT,
    published_at TEXT,             -- ISO 8601 UTC or NULL
    fetched_at   TEXT NOT NULL     -- ISO 8601 UTC, microsecond precision
);

-- At most one chapter per calendar date.
CREATE TABLE IF NOT EXISTS chapters (
    chapter_id         TEXT PRIMARY KEY,
    chapter_date       TEXT NOT NULL UNIQUE,   -- YYYY-MM-DD
    title              TEXT NOT NULL,
    body               TEXT NOT NULL,
    snapshot           TEXT NOT NULL,          -- JSON ConditionsSnapshot
    used_news_item_ids TEXT NOT NULL DEFAULT '[]',
    composed_by        TEXT NOT NULL,          -- 'ai' | 'template'
    context            TEXT NOT NULL,          -- JSON StoryContext
    created_at         TEXT NOT NULL,
    updated_at         TEXT
);

CREATE INDEX IF NOT EXISTS news_fetched_idx ON news_items(fetched_at);

PRAGMA user_version = 1;
";
