//! SQLite-backed storage for workflows, control values and preferences.
//!
//! Entities are stored as JSON documents next to the columns needed for
//! scoping lookups, so the schema stays small while queries remain indexed.

mod control_values;
mod preferences;
mod workflows;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

pub use control_values::SqliteControlValuesRepo;
pub use preferences::SqlitePreferencesRepo;
pub use workflows::SqliteWorkflowRepo;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS workflows (
        id TEXT PRIMARY KEY NOT NULL,
        environment_id TEXT NOT NULL,
        organization_id TEXT NOT NULL,
        workflow_json TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_workflows_environment ON workflows (environment_id, id)",
    r#"
    CREATE TABLE IF NOT EXISTS control_values (
        id TEXT PRIMARY KEY NOT NULL,
        environment_id TEXT NOT NULL,
        organization_id TEXT NOT NULL,
        workflow_id TEXT NOT NULL,
        step_id TEXT NOT NULL,
        level TEXT NOT NULL,
        values_json TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE (environment_id, organization_id, workflow_id, step_id, level)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS preferences (
        environment_id TEXT NOT NULL,
        organization_id TEXT NOT NULL,
        preferences_json TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        PRIMARY KEY (environment_id, organization_id)
    )
    "#,
];

/// Connection pool shared by the SQLite repositories.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `database_url` and apply the schema.
    pub async fn connect(database_url: &str) -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::with_pool(pool).await
    }

    /// Private in-memory database. Limited to one connection so every query
    /// sees the same database.
    pub async fn in_memory() -> Result<Self, RepoError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::database("migrate", e))?;
        }
        tracing::debug!("SQLite schema ensured");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn workflows(&self) -> SqliteWorkflowRepo {
        SqliteWorkflowRepo::new(self.pool.clone())
    }

    pub fn control_values(&self) -> SqliteControlValuesRepo {
        SqliteControlValuesRepo::new(self.pool.clone())
    }

    pub fn preferences(&self) -> SqlitePreferencesRepo {
        SqlitePreferencesRepo::new(self.pool.clone())
    }
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("invalid timestamp '{}': {}", value, e)))
}
