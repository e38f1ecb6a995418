//! Resolve the channel preferences of an environment/organization.

use std::sync::Arc;

use notiflow_domain::{EnvironmentId, OrganizationId, PreferencesSnapshot, WorkflowPreferences};

use crate::infrastructure::ports::{PreferencesRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("No preferences stored for environment {environment_id}")]
    NotFound {
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    },
    #[error("Stored preferences are malformed: {0}")]
    Malformed(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct GetPreferences {
    preferences: Arc<dyn PreferencesRepo>,
}

impl GetPreferences {
    pub fn new(preferences: Arc<dyn PreferencesRepo>) -> Self {
        Self { preferences }
    }

    /// Load the stored preferences, failing when none exist or they cannot be read.
    pub async fn execute(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    ) -> Result<PreferencesSnapshot, PreferencesError> {
        let raw = self
            .preferences
            .find(environment_id, organization_id)
            .await?
            .ok_or(PreferencesError::NotFound {
                environment_id,
                organization_id,
            })?;

        let preferences: WorkflowPreferences = serde_json::from_value(raw)
            .map_err(|e| PreferencesError::Malformed(e.to_string()))?;

        Ok(PreferencesSnapshot::stored(preferences))
    }

    /// Like [`execute`](Self::execute), but never fails: any error is logged
    /// and the default snapshot is returned instead.
    pub async fn safe_execute(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    ) -> PreferencesSnapshot {
        match self.execute(environment_id, organization_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    environment_id = %environment_id,
                    organization_id = %organization_id,
                    "Falling back to default preferences"
                );
                PreferencesSnapshot::default()
            }
        }
    }
}
