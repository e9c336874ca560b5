//! SQLite database layer (embedded, no external dependencies)

use super::SightingStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sighting_types::{timestamp, Sighting};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use std::path::Path;

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file and make sure the schema exists.
    ///
    /// Safe to call on every startup. Fails if the parent directory cannot be
    /// created or written to.
    pub async fn new(database_path: &Path) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path.display());

        let parent = match database_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        tokio::fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create database directory: {}", parent.display())
        })?;

        let test_file = parent.join(".write_test");
        match tokio::fs::write(&test_file, b"test").await {
            Ok(_) => {
                if let Err(e) = tokio::fs::remove_file(&test_file).await {
                    tracing::debug!("Could not remove write test file {}: {}", test_file.display(), e);
                }
                tracing::debug!("Database directory is writable");
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Database directory is not writable: {}: {}",
                    parent.display(),
                    e
                ));
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to SQLite database at: {}",
                    database_path.display()
                )
            })?;

        Self::run_migrations(&pool)
            .await
            .context("Failed to create sightings schema")?;

        tracing::info!("Database initialization complete");

        Ok(Self { pool })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sightings (
                id TEXT PRIMARY KEY,
                created_at_utc TEXT NOT NULL,
                lat REAL NOT NULL,
                lon REAL NOT NULL,
                accuracy_m REAL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_sightings_created_at
            ON sightings (created_at_utc)
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SightingStore for Database {
    async fn count(&self) -> Result<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sightings")
            .fetch_one(&self.pool)
            .await?;

        Ok(u64::try_from(count)?)
    }

    async fn insert(&self, sighting: &Sighting) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sightings (id, created_at_utc, lat, lon, accuracy_m)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&sighting.id)
        .bind(timestamp::format(&sighting.created_at_utc))
        .bind(sighting.lat)
        .bind(sighting.lon)
        .bind(sighting.accuracy_m)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Sighting>> {
        let rows: Vec<SightingRow> = sqlx::query_as(
            r#"
            SELECT id, created_at_utc, lat, lon, accuracy_m
            FROM sightings
            ORDER BY created_at_utc DESC, rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Sighting::try_from).collect()
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct SightingRow {
    id: String,
    created_at_utc: String,
    lat: f64,
    lon: f64,
    accuracy_m: Option<f64>,
}

impl TryFrom<SightingRow> for Sighting {
    type Error = anyhow::Error;

    fn try_from(r: SightingRow) -> Result<Self> {
        let created_at_utc = timestamp::parse(&r.created_at_utc).with_context(|| {
            format!(
                "Invalid created_at_utc {:?} for sighting {}",
                r.created_at_utc, r.id
            )
        })?;

        Ok(Sighting {
            id: r.id,
            created_at_utc,
            lat: r.lat,
            lon: r.lon,
            accuracy_m: r.accuracy_m,
        })
    }
}
