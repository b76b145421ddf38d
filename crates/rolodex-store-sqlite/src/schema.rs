//! SQL schema for the rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS contact_lists (
    list_id    TEXT PRIMARY KEY,
    list_name  TEXT NOT NULL,
    user_id    TEXT NOT NULL,
    created_at TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- contact_list_id is a weak reference: what happens to contacts when a
-- list goes away is decided at delete time (OnListDelete), not here.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id      TEXT PRIMARY KEY,
    contact_list_id TEXT REFERENCES contact_lists(list_id),
    first_name      TEXT,
    last_name       TEXT,
    preferred_name  TEXT,
    email           TEXT,
    phone           TEXT,
    fax             TEXT,
    address_id      TEXT,
    do_not_contact  INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL
);

-- At most one contact per email address. Phone carries no such index.
CREATE UNIQUE INDEX IF NOT EXISTS contacts_email_idx
    ON contacts(email) WHERE email IS NOT NULL;

CREATE INDEX IF NOT EXISTS contacts_list_idx      ON contacts(contact_list_id);
CREATE INDEX IF NOT EXISTS contact_lists_user_idx ON contact_lists(user_id);

PRAGMA user_version = 1;
";
