use crate::models::{MatchFactors, MatchResult, MatchStatus, Role, StoredMatch};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL client for persisted matches
///
/// Generated matches are written here with a `pending` status. The
/// (startup_id, investor_id) pair is unique, so re-generating matches never
/// duplicates a pair that already exists, whatever its current status.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Persist generated matches as pending
    ///
    /// Pairs that already exist are left untouched. Returns the number of
    /// rows actually inserted.
    pub async fn insert_pending(&self, matches: &[MatchResult]) -> Result<u64, PostgresError> {
        let query = r#"
            INSERT INTO matches (id, startup_id, investor_id, score, factors, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            ON CONFLICT (startup_id, investor_id) DO NOTHING
        "#;

        let mut tx = self.pool.begin().await?;
        let mut created = 0;

        for m in matches {
            let result = sqlx::query(query)
                .bind(uuid::Uuid::new_v4())
                .bind(&m.startup_id)
                .bind(&m.investor_id)
                .bind(i32::from(m.score))
                .bind(Json(m.factors))
                .bind(MatchStatus::Pending)
                .execute(&mut *tx)
                .await?;

            created += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(
            "Persisted {} new matches ({} skipped as existing)",
            created,
            matches.len() as u64 - created
        );

        Ok(created)
    }

    /// List persisted matches for a profile, best score first
    pub async fn list_matches(
        &self,
        role: Role,
        profile_id: &str,
    ) -> Result<Vec<StoredMatch>, PostgresError> {
        let query = match role {
            Role::Startup => r#"
                SELECT id, startup_id, investor_id, score, factors, status, created_at
                FROM matches
                WHERE startup_id = $1
                ORDER BY score DESC, investor_id ASC
            "#,
            Role::Investor => r#"
                SELECT id, startup_id, investor_id, score, factors, status, created_at
                FROM matches
                WHERE investor_id = $1
                ORDER BY score DESC, startup_id ASC
            "#,
        };

        let rows = sqlx::query(query).bind(profile_id).fetch_all(&self.pool).await?;

        let matches: Result<Vec<StoredMatch>, sqlx::Error> = rows
            .iter()
            .map(|row| {
                let factors: Json<MatchFactors> = row.try_get("factors")?;
                Ok(StoredMatch {
                    id: row.try_get("id")?,
                    startup_id: row.try_get("startup_id")?,
                    investor_id: row.try_get("investor_id")?,
                    score: row.try_get("score")?,
                    factors: factors.0,
                    status: row.try_get("status")?,
                    created_at: row.try_get("created_at")?,
                })
            })
            .collect();

        Ok(matches?)
    }

    /// Move a persisted match to a new status
    pub async fn update_status(
        &self,
        match_id: uuid::Uuid,
        status: MatchStatus,
    ) -> Result<StoredMatch, PostgresError> {
        let query = r#"
            UPDATE matches
            SET status = $2
            WHERE id = $1
            RETURNING id, startup_id, investor_id, score, factors, status, created_at
        "#;

        let row = sqlx::query(query)
            .bind(match_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("Match {} not found", match_id)))?;

        let factors: Json<MatchFactors> = row.try_get("factors")?;

        tracing::info!("Match {} moved to {:?}", match_id, status);

        Ok(StoredMatch {
            id: row.try_get("id")?,
            startup_id: row.try_get("startup_id")?,
            investor_id: row.try_get("investor_id")?,
            score: row.try_get("score")?,
            factors: factors.0,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
