//! Repository port traits for database access.

use async_trait::async_trait;
use notiflow_domain::{
    ControlValues, ControlValuesLevel, EnvironmentId, OrganizationId, StepTemplateId, Workflow,
    WorkflowId, WorkflowPreferences,
};

use super::error::RepoError;

// =============================================================================
// Workflows
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkflowRepo: Send + Sync {
    /// Look up a workflow within one environment.
    ///
    /// Returns `Ok(None)` when the id is unknown or belongs to another environment.
    async fn find_by_id(
        &self,
        environment_id: EnvironmentId,
        id: WorkflowId,
    ) -> Result<Option<Workflow>, RepoError>;

    /// Insert or replace a workflow.
    async fn save(&self, workflow: &Workflow) -> Result<(), RepoError>;
}

// =============================================================================
// Control values
// =============================================================================

/// Scope of a control-values lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValuesQuery {
    pub environment_id: EnvironmentId,
    pub organization_id: OrganizationId,
    pub workflow_id: WorkflowId,
    pub step_id: StepTemplateId,
    pub level: ControlValuesLevel,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ControlValuesRepo: Send + Sync {
    /// First record matching the query, if any.
    async fn find_first(
        &self,
        query: ControlValuesQuery,
    ) -> Result<Option<ControlValues>, RepoError>;

    /// Insert a record, replacing any existing one with the same scope.
    async fn upsert(&self, values: &ControlValues) -> Result<(), RepoError>;
}

// =============================================================================
// Preferences
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencesRepo: Send + Sync {
    /// Raw stored preferences document for a tenant.
    ///
    /// Returned unparsed; callers decide how to treat malformed documents.
    async fn find(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
    ) -> Result<Option<serde_json::Value>, RepoError>;

    async fn save(
        &self,
        environment_id: EnvironmentId,
        organization_id: OrganizationId,
        preferences: &WorkflowPreferences,
    ) -> Result<(), RepoError>;
}
