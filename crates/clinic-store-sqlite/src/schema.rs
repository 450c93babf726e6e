//! SQL schema for the clinic SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- `seq` fixes insertion order independently of the PHN, which can change.
CREATE TABLE IF NOT EXISTS patients (
    seq            INTEGER PRIMARY KEY AUTOINCREMENT,
    phn            INTEGER NOT NULL UNIQUE CHECK (phn > 0),
    name           TEXT    NOT NULL,
    birth_date     TEXT    NOT NULL,
    phone          TEXT    NOT NULL,
    email          TEXT    NOT NULL,
    address        TEXT    NOT NULL,
    next_note_code INTEGER NOT NULL DEFAULT 1   -- codes are never reused
);

CREATE TABLE IF NOT EXISTS notes (
    seq         INTEGER PRIMARY KEY AUTOINCREMENT,
    phn         INTEGER NOT NULL
                REFERENCES patients(phn) ON UPDATE CASCADE ON DELETE CASCADE,
    code        INTEGER NOT NULL,
    recorded_at TEXT    NOT NULL,   -- RFC 3339 UTC; store-assigned
    text        TEXT    NOT NULL,
    UNIQUE (phn, code)
);

CREATE INDEX IF NOT EXISTS notes_phn_idx ON notes(phn);

PRAGMA user_version = 1;
";
