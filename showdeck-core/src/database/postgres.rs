use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use super::traits::ShowStore;
use crate::error::{Result, ShowError};
use crate::show::{Episode, ShowRecord};

/// Rows returned by an unfiltered listing.
const DEFAULT_LIST_LIMIT: i64 = 12;

const SHOW_COLUMNS: &str = "id, name, airs_day_of_week, airs_time, first_aired, \
     genres, network, overview, rating, rating_count, status, poster, episodes";

#[derive(Debug, Clone)]
pub struct PostgresShowStore {
    pool: PgPool,
}

impl PostgresShowStore {
    pub async fn new(connection_string: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL database");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .connect(connection_string)
            .await
            .map_err(|e| {
                ShowError::Internal(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Self::run_migrations(&pool).await?;

        info!("Successfully connected to PostgreSQL");

        Ok(Self { pool })
    }

    /// Wrap an existing pool; the caller is responsible for migrations.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_migrations(pool: &PgPool) -> Result<()> {
        debug!("Running shows table migration");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shows (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                airs_day_of_week TEXT,
                airs_time TEXT,
                first_aired DATE,
                genres JSONB NOT NULL DEFAULT '[]'::jsonb,
                network TEXT,
                overview TEXT,
                rating REAL,
                rating_count INTEGER,
                status TEXT,
                poster TEXT NOT NULL,
                episodes JSONB NOT NULL DEFAULT '[]'::jsonb,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(pool)
        .await
        .map_err(|e| ShowError::Internal(format!("Failed to create shows table: {}", e)))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_genres ON shows USING GIN (genres)")
            .execute(pool)
            .await
            .map_err(|e| ShowError::Internal(format!("Failed to create genres index: {}", e)))?;

        Ok(())
    }

    fn row_to_show(r: PgRow) -> ShowRecord {
        let genres = r
            .try_get::<serde_json::Value, _>("genres")
            .ok()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();
        let episodes: Vec<Episode> = r
            .try_get::<serde_json::Value, _>("episodes")
            .ok()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default();

        ShowRecord {
            id: r.get("id"),
            name: r.get("name"),
            airs_day_of_week: r.try_get("airs_day_of_week").unwrap_or(None),
            airs_time: r.try_get("airs_time").unwrap_or(None),
            first_aired: r.try_get("first_aired").unwrap_or(None),
            genres,
            network: r.try_get("network").unwrap_or(None),
            overview: r.try_get("overview").unwrap_or(None),
            rating: r.try_get("rating").unwrap_or(None),
            rating_count: r
                .try_get::<Option<i32>, _>("rating_count")
                .unwrap_or(None)
                .map(|v| v as u32),
            status: r.try_get("status").unwrap_or(None),
            poster: r.get("poster"),
            episodes,
        }
    }
}

#[async_trait]
impl ShowStore for PostgresShowStore {
    async fn insert(&self, show: &ShowRecord) -> Result<()> {
        let genres = serde_json::to_value(&show.genres)
            .map_err(|e| ShowError::Internal(format!("Failed to serialize genres: {}", e)))?;
        let episodes = serde_json::to_value(&show.episodes)
            .map_err(|e| ShowError::Internal(format!("Failed to serialize episodes: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO shows (
                id, name, airs_day_of_week, airs_time, first_aired,
                genres, network, overview, rating, rating_count,
                status, poster, episodes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&show.id)
        .bind(&show.name)
        .bind(&show.airs_day_of_week)
        .bind(&show.airs_time)
        .bind(show.first_aired)
        .bind(genres)
        .bind(&show.network)
        .bind(&show.overview)
        .bind(show.rating)
        .bind(show.rating_count.map(|v| v as i32))
        .bind(&show.status)
        .bind(&show.poster)
        .bind(episodes)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return ShowError::Conflict(show.name.clone());
                }
            }
            ShowError::Internal(format!("Failed to insert show: {}", e))
        })?;

        debug!("Inserted show {} ({})", show.name, show.id);

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShowRecord>> {
        let row = sqlx::query(&format!("SELECT {} FROM shows WHERE id = $1", SHOW_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| ShowError::Internal(format!("Failed to fetch show: {}", e)))?;

        Ok(row.map(Self::row_to_show))
    }

    async fn find_many(&self, genre: Option<&str>) -> Result<Vec<ShowRecord>> {
        let rows = match genre {
            Some(genre) => {
                sqlx::query(&format!(
                    "SELECT {} FROM shows \
                     WHERE genres @> jsonb_build_array($1::text) ORDER BY name",
                    SHOW_COLUMNS
                ))
                .bind(genre)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!(
                    "SELECT {} FROM shows ORDER BY name LIMIT $1",
                    SHOW_COLUMNS
                ))
                .bind(DEFAULT_LIST_LIMIT)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| ShowError::Internal(format!("Failed to list shows: {}", e)))?;

        Ok(rows.into_iter().map(Self::row_to_show).collect())
    }
}
