//! SQLite schema for the local record store.

/// Single key/value table: each well-known key holds one JSON blob, the
/// local-device analogue of the browser storage the UI used to own.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
