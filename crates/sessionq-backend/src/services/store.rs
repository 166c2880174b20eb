//! SQLite access for the `sessions` table.
//!
//! Every function takes a borrowed [`Connection`]; the caller owns the connection for the
//! duration of one request and drops it afterwards.

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params_from_iter};

use sessionq::data::Session;

use super::filter::{Column, FilterBuilder};
use crate::errors::StoreError;

pub const TABLE: &str = "sessions";

/// The columns of the documented schema, in [`Session`] field order.
pub const SESSION_COLUMNS: [&str; 15] = [
    "id",
    "session_code",
    "title",
    "description",
    "speaker_name",
    "duration_minutes",
    "session_type",
    "nextstep_link",
    "nextstep_category",
    "index_value",
    "session_level",
    "tags",
    "recorded_status",
    "session_web_link",
    "slidedeck_link",
];

/// Opens a read-only connection to `database` (a path or a `file:` URI).
pub fn open(database: &str) -> Result<Connection, StoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(database, flags)?)
}

/// What [`inspect_schema`] found about the `sessions` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaReport {
    pub has_topic: bool,
}

impl SchemaReport {
    /// Fails when the table cannot serve the `topic` filter.
    pub fn require_topic(&self) -> Result<(), StoreError> {
        if self.has_topic {
            Ok(())
        } else {
            Err(StoreError::MissingColumns(vec![Column::Topic.name().to_string()]))
        }
    }
}

/// Checks that every documented column exists and whether a `topic` column is present.
pub fn inspect_schema(conn: &Connection) -> Result<SchemaReport, StoreError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({TABLE})"))?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    let missing: Vec<String> = SESSION_COLUMNS
        .iter()
        .filter(|column| !present.iter().any(|p| p.eq_ignore_ascii_case(column)))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::MissingColumns(missing));
    }

    Ok(SchemaReport {
        has_topic: present
            .iter()
            .any(|p| p.eq_ignore_ascii_case(Column::Topic.name())),
    })
}

fn select_sessions() -> String {
    format!("SELECT {} FROM {TABLE}", SESSION_COLUMNS.join(", "))
}

fn map_session(row: &Row<'_>) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get(0)?,
        session_code: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        speaker_name: row.get(4)?,
        duration_minutes: row.get(5)?,
        session_type: row.get(6)?,
        nextstep_link: row.get(7)?,
        nextstep_category: row.get(8)?,
        index_value: row.get(9)?,
        session_level: row.get(10)?,
        tags: row.get(11)?,
        recorded_status: row.get(12)?,
        session_web_link: row.get(13)?,
        slidedeck_link: row.get(14)?,
    })
}

pub fn get_by_code(conn: &Connection, code: &str) -> Result<Option<Session>, StoreError> {
    let sql = format!("{} WHERE session_code = ?1 LIMIT 1", select_sessions());
    Ok(conn.query_row(&sql, [code], map_session).optional()?)
}

pub fn query_sessions(
    conn: &Connection,
    filter: &FilterBuilder,
) -> Result<Vec<Session>, StoreError> {
    let clause = filter.render();
    let sql = format!("{}{}", select_sessions(), clause.sql);

    let mut stmt = conn.prepare(&sql)?;
    let sessions = stmt
        .query_map(params_from_iter(clause.params.iter()), map_session)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

pub fn count_all(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |row| {
        row.get(0)
    })?)
}

/// Rows whose `column` holds a non-blank value.
pub fn count_present(conn: &Connection, column: Column) -> Result<i64, StoreError> {
    let sql = format!("SELECT COUNT(*) FROM {TABLE} WHERE {}", column.non_blank());
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

/// Distinct non-blank values of `column`.
pub fn count_distinct(conn: &Connection, column: Column) -> Result<i64, StoreError> {
    let sql = format!(
        "SELECT COUNT(DISTINCT {}) FROM {TABLE} WHERE {}",
        column.name(),
        column.non_blank()
    );
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn total_minutes(conn: &Connection) -> Result<i64, StoreError> {
    let sql = format!("SELECT COALESCE(SUM(duration_minutes), 0) FROM {TABLE}");
    Ok(conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn distinct_values(conn: &Connection, column: Column) -> Result<Vec<String>, StoreError> {
    let sql = format!(
        "SELECT DISTINCT {} FROM {TABLE} WHERE {}",
        column.name(),
        column.non_blank()
    );
    let mut stmt = conn.prepare(&sql)?;
    let values = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(values)
}
