use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::review::{format_timestamp, NewReview, ReviewRow};
use crate::supabase::SupabaseStore;

/// Name of the table reviews live in, on every backend.
pub const REVIEWS_TABLE: &str = "reviews";

/// The three calls the application makes against its review table.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Short backend name for diagnostics.
    fn name(&self) -> &'static str;

    /// The `stars` column across all rows.
    async fn fetch_ratings_only(&self) -> Result<Vec<i64>, StoreError>;

    /// Every row as stored, newest `created_at` first, rows without a timestamp last.
    async fn fetch_all_reviews(&self) -> Result<Vec<ReviewRow>, StoreError>;

    async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError>;
}

#[derive(Clone)]
enum Backend {
    Ready(Arc<dyn ReviewStore>),
    Unavailable(String),
}

/// Handle to the review store, built once per process and passed to every request.
///
/// A gateway without a usable store is still a valid value: each call then
/// returns [`StoreError::Unavailable`] so callers can degrade instead of failing.
#[derive(Clone)]
pub struct Gateway {
    backend: Backend,
}

impl Gateway {
    pub fn with_store(store: Arc<dyn ReviewStore>) -> Self {
        Self {
            backend: Backend::Ready(store),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            backend: Backend::Unavailable(reason.into()),
        }
    }

    /// Picks the hosted store when both its URL and key are set, then a local
    /// SQLite file, and otherwise reports the store as unavailable.
    pub async fn connect(config: &StoreConfig) -> Self {
        if let (Some(url), Some(key)) = (&config.url, &config.key) {
            return match SupabaseStore::new(url, key) {
                Ok(store) => {
                    info!(url = %url, "Using hosted review store");
                    Self::with_store(Arc::new(store))
                }
                Err(err) => {
                    warn!(error = %err, "Could not build hosted review store client");
                    Self::unavailable(err.to_string())
                }
            };
        }

        if let Some(path) = &config.sqlite_path {
            return match SqliteStore::open(path).await {
                Ok(store) => {
                    info!(path = %path.display(), "Using local sqlite review store");
                    Self::with_store(Arc::new(store))
                }
                Err(err) => {
                    warn!(error = %err, path = %path.display(), "Could not open sqlite review store");
                    Self::unavailable(err.to_string())
                }
            };
        }

        warn!("Review store URL and access key are not configured");
        Self::unavailable("review store URL and access key are not configured")
    }

    pub fn is_available(&self) -> bool {
        matches!(self.backend, Backend::Ready(_))
    }

    pub fn backend_name(&self) -> &'static str {
        match &self.backend {
            Backend::Ready(store) => store.name(),
            Backend::Unavailable(_) => "none",
        }
    }

    fn store(&self) -> Result<&Arc<dyn ReviewStore>, StoreError> {
        match &self.backend {
            Backend::Ready(store) => Ok(store),
            Backend::Unavailable(reason) => Err(StoreError::Unavailable(reason.clone())),
        }
    }

    pub async fn fetch_ratings_only(&self) -> Result<Vec<i64>, StoreError> {
        self.store()?.fetch_ratings_only().await
    }

    pub async fn fetch_all_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        self.store()?.fetch_all_reviews().await
    }

    pub async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError> {
        self.store()?.insert_review(review).await
    }
}

/// Local review table backed by a single SQLite connection.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub async fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path.as_ref())?;
        debug!(path = %db_path.as_ref().display(), "sqlite connection established");
        Self::from_connection(conn).await
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?).await
    }

    async fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.create_schema().await?;
        Ok(store)
    }

    async fn create_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS reviews (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                stars INTEGER NOT NULL,
                review TEXT NOT NULL,
                improvement TEXT,
                created_at TEXT
            );",
        )
        .map_err(|e| {
            warn!(error = %e, "Failed creating reviews table");
            e
        })?;
        Ok(())
    }
}

fn select_ratings(conn: &Connection) -> rusqlite::Result<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT stars FROM reviews ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect()
}

fn select_reviews(conn: &Connection) -> rusqlite::Result<Vec<ReviewRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, stars, review, improvement, created_at
         FROM reviews
         ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(json!({
            "id": row.get::<_, i64>(0)?,
            "name": row.get::<_, String>(1)?,
            "stars": row.get::<_, i64>(2)?,
            "review": row.get::<_, String>(3)?,
            "improvement": row.get::<_, Option<String>>(4)?,
            "created_at": row.get::<_, Option<String>>(5)?,
        }))
    })?;
    rows.collect()
}

#[async_trait]
impl ReviewStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn fetch_ratings_only(&self) -> Result<Vec<i64>, StoreError> {
        let conn = self.conn.lock().await;
        let ratings = select_ratings(&conn)?;
        debug!(rows = ratings.len(), "Fetched ratings from sqlite");
        Ok(ratings)
    }

    async fn fetch_all_reviews(&self) -> Result<Vec<ReviewRow>, StoreError> {
        let conn = self.conn.lock().await;
        let reviews = select_reviews(&conn)?;
        debug!(rows = reviews.len(), "Fetched reviews from sqlite");
        Ok(reviews)
    }

    async fn insert_review(&self, review: &NewReview) -> Result<(), StoreError> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO reviews (name, stars, review, improvement, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                &review.name,
                review.stars,
                &review.review,
                &review.improvement,
                format_timestamp(&review.created_at),
            ],
        )?;
        debug!(id = conn.last_insert_rowid(), "Inserted review into sqlite");
        Ok(())
    }
}
