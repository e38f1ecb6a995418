//! SQLite implementation of [`PreferencesRepo`].

use async_trait::async_trait;
use chrono::Utc;
use notiflow_domain::{EnvironmentId, OrganizationId, WorkflowPreferences};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{PreferencesRepo, RepoError};

pub struct SqlitePreferencesRepo {
    pool: SqlitePool,
}

impl SqlitePreferencesRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferencesRepo for SqlitePreferencesRepo {
    async fn find(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    ) -> Result<Option<serde_json::Value>, RepoError> {
        let row = sqlx::query(
            "SELECT preferences_json FROM preferences WHERE environment_id = ? AND organization_id = ?",
        )
        .bind(environment_id.to_string())
        .bind(organization_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("preferences.find", e))?;

        match row {
            Some(row) => {
                let json: String = row
                    .try_get("preferences_json")
                    .map_err(|e| RepoError::database("preferences.find", e))?;
                let value = serde_json::from_str(&json)
                    .map_err(|e| RepoError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn save(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        preferences: &WorkflowPreferences,
    ) -> Result<(), RepoError> {
        let json = serde_json::to_string(preferences)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO preferences (environment_id, organization_id, preferences_json, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(environment_id, organization_id) DO UPDATE SET
                preferences_json = excluded.preferences_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(environment_id.to_string())
        .bind(organization_id.to_string())
        .bind(json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("preferences.save", e))?;

        Ok(())
    }
}
