//! SQLite implementation of [`ControlValuesRepo`].

use std::str::FromStr;

use async_trait::async_trait;
use notiflow_domain::{ControlValues, ControlValuesId};
use sqlx::{Row, SqlitePool};

use super::parse_timestamp;
use crate::infrastructure::ports::{ControlValuesQuery, ControlValuesRepo, RepoError};

pub struct SqliteControlValuesRepo {
    pool: SqlitePool,
}

impl SqliteControlValuesRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ControlValuesRepo for SqliteControlValuesRepo {
    async fn find_first(
        &self,
        query: ControlValuesQuery,
    ) -> Result<Option<ControlValues>, RepoError> {
        // Earliest-updated record wins if a scope ever holds more than one.
        let row = sqlx::query(
            r#"
            SELECT id, values_json, updated_at FROM control_values
            WHERE environment_id = ? AND organization_id = ? AND workflow_id = ?
              AND step_id = ? AND level = ?
            ORDER BY updated_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(query.environment_id.to_string())
        .bind(query.organization_id.to_string())
        .bind(query.workflow_id.to_string())
        .bind(query.step_id.to_string())
        .bind(query.level.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("control_values.find_first", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row
            .try_get("id")
            .map_err(|e| RepoError::database("control_values.find_first", e))?;
        let values_json: String = row
            .try_get("values_json")
            .map_err(|e| RepoError::database("control_values.find_first", e))?;
        let updated_at: String = row
            .try_get("updated_at")
            .map_err(|e| RepoError::database("control_values.find_first", e))?;

        Ok(Some(ControlValues {
            id: ControlValuesId::from_str(&id).map_err(RepoError::serialization)?,
            environment_id: query.environment_id,
            organization_id: query.organization_id,
            workflow_id: query.workflow_id,
            step_id: query.step_id,
            level: query.level,
            values: serde_json::from_str(&values_json)
                .map_err(|e| RepoError::Serialization(e.to_string()))?,
            updated_at: parse_timestamp(&updated_at)?,
        }))
    }

    async fn upsert(&self, values: &ControlValues) -> Result<(), RepoError> {
        let json = serde_json::to_string(&values.values)
            .map_err(|e| RepoError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO control_values
                (id, environment_id, organization_id, workflow_id, step_id, level, values_json, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(environment_id, organization_id, workflow_id, step_id, level) DO UPDATE SET
                values_json = excluded.values_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(values.id.to_string())
        .bind(values.environment_id.to_string())
        .bind(values.organization_id.to_string())
        .bind(values.workflow_id.to_string())
        .bind(values.step_id.to_string())
        .bind(values.level.as_str())
        .bind(json)
        .bind(values.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("control_values.upsert", e))?;

        Ok(())
    }
}
