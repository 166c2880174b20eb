use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::Connection;

use sessionq::data::{Session, SessionFilter, Slicer};

use super::filter::{Column, FilterBuilder};
use super::store;
use crate::errors::StoreError;

/// Read-only queries over the conference session catalog.
///
/// The trait is storage-agnostic; [`SessionServiceSqlite`] is the implementation
/// the server runs with.
///
/// # Examples
///
/// ```rust,ignore
/// async fn dashboard<S: SessionService>(service: &S) -> Result<(), S::Error> {
///     let total = service.count().await?;
///     let hours = service.total_hours().await?;
///     let rust = service
///         .filter(&SessionFilter {
///             tag: Some("Rust".to_string()),
///             ..Default::default()
///         })
///         .await?;
///     println!("{total} sessions, {hours}h, {} about Rust", rust.len());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SessionService {
    /// The error type returned by operations on this service.
    type Error;

    /// Looks a session up by its exact `session_code`.
    ///
    /// Returns `Ok(None)` when no row carries the code. If several rows share it,
    /// whichever one the store yields first is returned.
    async fn get_by_code(&self, code: &str) -> Result<Option<Session>, Self::Error>;

    /// Returns every session, unpaginated.
    async fn list(&self) -> Result<Vec<Session>, Self::Error>;

    /// Returns the sessions matching every non-blank parameter of `filter`.
    ///
    /// Each parameter is a substring match on its column. An empty filter returns
    /// the same rows as [`SessionService::list`].
    async fn filter(&self, filter: &SessionFilter) -> Result<Vec<Session>, Self::Error>;

    async fn count(&self) -> Result<i64, Self::Error>;

    /// Distinct non-blank speaker names.
    async fn count_distinct_speakers(&self) -> Result<i64, Self::Error>;

    /// Sessions with a non-blank learning category.
    async fn count_self_learning(&self) -> Result<i64, Self::Error>;

    /// Sum of all durations in whole hours, remainder truncated.
    async fn total_hours(&self) -> Result<i64, Self::Error>;

    /// Sessions with a non-blank recorded status.
    async fn count_recorded(&self) -> Result<i64, Self::Error>;

    /// Distinct non-blank values feeding one filter dropdown.
    async fn distinct_values(&self, slicer: Slicer) -> Result<Vec<String>, Self::Error>;

    async fn distinct_tags(&self) -> Result<Vec<String>, Self::Error> {
        self.distinct_values(Slicer::Tags).await
    }

    async fn distinct_learning_categories(&self) -> Result<Vec<String>, Self::Error> {
        self.distinct_values(Slicer::LearningCategories).await
    }

    async fn distinct_session_levels(&self) -> Result<Vec<String>, Self::Error> {
        self.distinct_values(Slicer::SessionLevels).await
    }

    async fn distinct_session_types(&self) -> Result<Vec<String>, Self::Error> {
        self.distinct_values(Slicer::SessionTypes).await
    }

    async fn distinct_speaker_names(&self) -> Result<Vec<String>, Self::Error> {
        self.distinct_values(Slicer::SpeakerNames).await
    }
}

pub(crate) fn whole_hours(total_minutes: i64) -> i64 {
    total_minutes / 60
}

/// A [`SessionService`] backed by a SQLite file.
///
/// Each call opens its own read-only connection on the blocking pool and drops it when
/// the query finishes, whatever the outcome. Nothing is cached between calls.
#[derive(Clone)]
pub struct SessionServiceSqlite {
    database: Arc<str>,
}

impl SessionServiceSqlite {
    pub fn new(database: impl Into<Arc<str>>) -> Self {
        Self {
            database: database.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Checks the table layout, see [`store::inspect_schema`].
    pub async fn inspect_schema(&self) -> Result<store::SchemaReport, StoreError> {
        self.with_connection(store::inspect_schema).await
    }

    async fn with_connection<T, F>(&self, query: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let database = self.database.clone();
        tokio::task::spawn_blocking(move || {
            let conn = store::open(&database)?;
            query(&conn)
        })
        .await?
    }
}

#[async_trait]
impl SessionService for SessionServiceSqlite {
    type Error = StoreError;

    async fn get_by_code(&self, code: &str) -> Result<Option<Session>, Self::Error> {
        let code = code.to_string();
        self.with_connection(move |conn| store::get_by_code(conn, &code))
            .await
    }

    async fn list(&self) -> Result<Vec<Session>, Self::Error> {
        self.with_connection(|conn| store::query_sessions(conn, &FilterBuilder::new()))
            .await
    }

    async fn filter(&self, filter: &SessionFilter) -> Result<Vec<Session>, Self::Error> {
        let builder = FilterBuilder::from_filter(filter);
        self.with_connection(move |conn| store::query_sessions(conn, &builder))
            .await
    }

    async fn count(&self) -> Result<i64, Self::Error> {
        self.with_connection(store::count_all).await
    }

    async fn count_distinct_speakers(&self) -> Result<i64, Self::Error> {
        self.with_connection(|conn| store::count_distinct(conn, Column::SpeakerName))
            .await
    }

    async fn count_self_learning(&self) -> Result<i64, Self::Error> {
        self.with_connection(|conn| store::count_present(conn, Column::NextstepCategory))
            .await
    }

    async fn total_hours(&self) -> Result<i64, Self::Error> {
        let minutes = self.with_connection(store::total_minutes).await?;
        Ok(whole_hours(minutes))
    }

    async fn count_recorded(&self) -> Result<i64, Self::Error> {
        self.with_connection(|conn| store::count_present(conn, Column::RecordedStatus))
            .await
    }

    async fn distinct_values(&self, slicer: Slicer) -> Result<Vec<String>, Self::Error> {
        self.with_connection(move |conn| store::distinct_values(conn, Column::from(slicer)))
            .await
    }
}
