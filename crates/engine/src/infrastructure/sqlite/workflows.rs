//! SQLite implementation of [`WorkflowRepo`].

use async_trait::async_trait;
use notiflow_domain::{EnvironmentId, Workflow, WorkflowId};
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{RepoError, WorkflowRepo};

pub struct SqliteWorkflowRepo {
    pool: SqlitePool,
}

impl SqliteWorkflowRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowRepo for SqliteWorkflowRepo {
    async fn find_by_id(
        &self,
        environment_id: EnvironmentId,
        id: WorkflowId,
    ) -> Result<Option<Workflow>, RepoError> {
        let row = sqlx::query(
            "SELECT workflow_json FROM workflows WHERE id = ? AND environment_id = ?",
        )
        .bind(id.to_string())
        .bind(environment_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("workflows.find_by_id", e))?;

        match row {
            Some(row) => {
                let json: String = row
                    .try_get("workflow_json")
                    .map_err(|e| RepoError::database("workflows.find_by_id", e))?;
                let workflow = serde_json::from_str(&json)
                    .map_err(|e| RepoError::Serialization(e.to_string()))?;
                Ok(Some(workflow))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, workflow: &Workflow) -> Result<(), RepoError> {
        let json =
            serde_json::to_string(workflow).map_err(|e| RepoError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO workflows (id, environment_id, organization_id, workflow_json, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                workflow_json = excluded.workflow_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(workflow.id.to_string())
        .bind(workflow.environment_id.to_string())
        .bind(workflow.organization_id.to_string())
        .bind(json)
        .bind(workflow.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("workflows.save", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::SqliteStore;
    use chrono::Utc;
    use notiflow_domain::{
        NotificationGroupId, OrganizationId, StepType, WorkflowName, WorkflowStep,
    };

    fn workflow(environment_id: EnvironmentId) -> Workflow {
        Workflow::new(
            environment_id,
            OrganizationId::new(),
            WorkflowName::new("Password Reset").unwrap(),
            NotificationGroupId::new(),
            Utc::now(),
        )
        .with_steps(vec![WorkflowStep::new("Email", StepType::Email)])
    }

    #[tokio::test]
    async fn save_then_find_in_same_environment() {
        let store = SqliteStore::in_memory().await.unwrap();
        let repo = store.workflows();
        let wf = workflow(EnvironmentId::new());

        repo.save(&wf).await.unwrap();
        let found = repo.find_by_id(wf.environment_id, wf.id).await.unwrap();

        assert_eq!(found, Some(wf));
    }

    #[tokio::test]
    async fn find_is_scoped_to_environment() {
        let store = SqliteStore::in_memory().await.unwrap();
        let repo = store.workflows();
        let wf = workflow(EnvironmentId::new());
        repo.save(&wf).await.unwrap();

        let found = repo.find_by_id(EnvironmentId::new(), wf.id).await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_document() {
        let store = SqliteStore::in_memory().await.unwrap();
        let repo = store.workflows();
        let mut wf = workflow(EnvironmentId::new());
        repo.save(&wf).await.unwrap();

        wf.active = true;
        wf.tags = vec!["billing".to_string()];
        repo.save(&wf).await.unwrap();

        let found = repo
            .find_by_id(wf.environment_id, wf.id)
            .await
            .unwrap()
            .unwrap();
        assert!(found.active);
        assert_eq!(found.tags, vec!["billing".to_string()]);
    }
}
