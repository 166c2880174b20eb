//! Test fixtures: a temporary SQLite file seeded with a small, deliberately messy catalog.

use rusqlite::{Connection, params};
use tempfile::TempDir;

use sessionq::data::Session;

const SCHEMA: &str = r#"
CREATE TABLE sessions (
    id INTEGER PRIMARY KEY,
    session_code TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    speaker_name TEXT,
    duration_minutes INTEGER,
    session_type TEXT,
    nextstep_link TEXT,
    nextstep_category TEXT,
    index_value INTEGER,
    session_level TEXT,
    tags TEXT,
    recorded_status TEXT,
    session_web_link TEXT,
    slidedeck_link TEXT
    {topic}
)
"#;

/// (code, title, speaker, minutes, type, category, level, tags, recorded, topic)
type Row = (
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<i64>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
);

const ROWS: [Row; 5] = [
    (
        "BRK101",
        "Building agents with Rust",
        Some("Ada Lovelace, Grace Hopper"),
        Some(90),
        Some("Breakout"),
        Some("Learn Module"),
        Some("Intermediate"),
        Some("AI, Rust"),
        Some("Yes"),
        Some("AI"),
    ),
    (
        "LAB202",
        "Hands-on storage lab",
        Some("Grace Hopper"),
        Some(45),
        Some("Lab"),
        Some(""),
        Some("Advanced"),
        Some("Storage"),
        Some(""),
        Some("Data"),
    ),
    (
        "DEM303",
        "Tracing in production",
        None,
        None,
        Some("Demo"),
        None,
        Some("Intermediate"),
        None,
        None,
        None,
    ),
    (
        "KEY001",
        "Opening keynote",
        Some("   "),
        Some(60),
        Some("Keynote"),
        Some("Learn Path"),
        Some("Foundational"),
        Some("AI, Cloud"),
        Some("Recorded"),
        Some("Keynote"),
    ),
    (
        "BRK150",
        "Safe systems code",
        Some("Ada Lovelace"),
        Some(30),
        Some("Breakout"),
        Some("Learn Module"),
        Some("Advanced"),
        Some("Rust"),
        Some(" "),
        Some("Rust"),
    ),
];

pub struct Fixture {
    _dir: TempDir,
    database: String,
}

impl Fixture {
    /// The seeded catalog, `topic` column included.
    pub fn new() -> Self {
        Self::seeded(true)
    }

    /// The seeded catalog on the documented schema only.
    pub fn without_topic() -> Self {
        Self::seeded(false)
    }

    /// An empty database created from `schema`.
    pub fn with_schema(schema: &str) -> Self {
        let (dir, database) = temp_database();
        let conn = Connection::open(&database).unwrap();
        conn.execute_batch(schema).unwrap();
        Self {
            _dir: dir,
            database,
        }
    }

    fn seeded(with_topic: bool) -> Self {
        let topic = if with_topic { ", topic TEXT" } else { "" };
        let fixture = Self::with_schema(&SCHEMA.replace("{topic}", topic));

        let conn = Connection::open(&fixture.database).unwrap();
        for (index, row) in ROWS.iter().enumerate() {
            let (code, title, speaker, minutes, kind, category, level, tags, recorded, topic) =
                *row;
            conn.execute(
                r#"
                INSERT INTO sessions (session_code, title, description, speaker_name, duration_minutes,
                                      session_type, nextstep_link, nextstep_category, index_value,
                                      session_level, tags, recorded_status, session_web_link, slidedeck_link)
                VALUES (?1, ?2, NULL, ?3, ?4, ?5, NULL, ?6, ?7, ?8, ?9, ?10, NULL, NULL)
                "#,
                params![
                    code,
                    title,
                    speaker,
                    minutes,
                    kind,
                    category,
                    index as i64,
                    level,
                    tags,
                    recorded
                ],
            )
            .unwrap();
            if with_topic {
                conn.execute(
                    "UPDATE sessions SET topic = ?1 WHERE session_code = ?2",
                    params![topic, code],
                )
                .unwrap();
            }
        }

        fixture
    }

    /// Adds `WS606`, whose categorical values are all tabs, newlines and the like.
    pub fn insert_control_whitespace_row(&self) {
        let conn = Connection::open(&self.database).unwrap();
        conn.execute(
            r#"
            INSERT INTO sessions (session_code, title, speaker_name, session_type, nextstep_category,
                                  session_level, tags, recorded_status)
            VALUES ('WS606', 'Whitespace only', char(9), char(12), char(10),
                    char(11), char(13) || char(10), char(9) || ' ')
            "#,
            [],
        )
        .unwrap();
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

fn temp_database() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("sessions.db").to_string_lossy().into_owned();
    (dir, database)
}

/// Session codes of `sessions`, sorted so results compare as sets.
pub fn codes(sessions: Vec<Session>) -> Vec<String> {
    let mut codes: Vec<String> = sessions.into_iter().map(|s| s.session_code).collect();
    codes.sort();
    codes
}
