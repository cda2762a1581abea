//! SQL schema for the Rollcall SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS employees (
    id              TEXT PRIMARY KEY,
    full_name       TEXT NOT NULL,
    email           TEXT,
    department      TEXT,            -- Department wire name or NULL
    position        TEXT,
    employee_code   TEXT,            -- external code, `employee_id` on the wire
    status          TEXT NOT NULL DEFAULT 'active',
    face_registered INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL    -- RFC 3339 UTC, microsecond precision
);

-- Records outlive their employee, so there is no foreign key.
CREATE TABLE IF NOT EXISTS attendance_records (
    id                  TEXT PRIMARY KEY,
    employee_id         TEXT NOT NULL,
    employee_name       TEXT NOT NULL,
    date                TEXT NOT NULL,   -- YYYY-MM-DD
    check_in_time       TEXT,
    check_out_time      TEXT,
    status              TEXT NOT NULL,   -- not constrained; unknown values survive
    verification_method TEXT NOT NULL DEFAULT 'facial_recognition',
    confidence_score    REAL,
    created_at          TEXT NOT NULL,
    UNIQUE (employee_id, date)
);

-- Single row holding the JSON-encoded settings.
CREATE TABLE IF NOT EXISTS settings (
    id         INTEGER PRIMARY KEY CHECK (id = 1),
    value_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS employees_created_idx ON employees(created_at);
CREATE INDEX IF NOT EXISTS records_date_idx      ON attendance_records(date);
CREATE INDEX IF NOT EXISTS records_created_idx   ON attendance_records(created_at);

PRAGMA user_version = 1;
";
