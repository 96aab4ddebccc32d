//! SQL schema for the Ward SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// The UNIQUE index on `email` is the uniqueness guarantee: it makes the
/// check-then-write in insert/update atomic under concurrent callers.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS patients (
    patient_id           TEXT PRIMARY KEY,
    name                 TEXT NOT NULL,
    email                TEXT NOT NULL,
    address              TEXT NOT NULL,
    date_of_birth        TEXT NOT NULL,   -- YYYY-MM-DD
    date_of_registration TEXT NOT NULL    -- YYYY-MM-DD
);

CREATE UNIQUE INDEX IF NOT EXISTS patients_email_idx ON patients(email);

PRAGMA user_version = 1;
";
