//! Fetch a workflow together with its saved step controls and preferences.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join_all;
use notiflow_domain::{ControlValues, ControlValuesLevel, StepTemplateId, Workflow};
use notiflow_shared::WorkflowResponseDto;

use super::commands::GetWorkflowCommand;
use super::mapper::to_response_workflow_dto;
use super::WorkflowError;
use crate::infrastructure::ports::{ControlValuesQuery, ControlValuesRepo, WorkflowRepo};
use crate::use_cases::preferences::GetPreferences;
use crate::use_cases::session::UserSession;

pub struct GetWorkflow {
    workflows: Arc<dyn WorkflowRepo>,
    control_values: Arc<dyn ControlValuesRepo>,
    preferences: Arc<GetPreferences>,
}

impl GetWorkflow {
    pub fn new(
        workflows: Arc<dyn WorkflowRepo>,
        control_values: Arc<dyn ControlValuesRepo>,
        preferences: Arc<GetPreferences>,
    ) -> Self {
        Self {
            workflows,
            control_values,
            preferences,
        }
    }

    pub async fn execute(
        &self,
        command: GetWorkflowCommand,
    ) -> Result<WorkflowResponseDto, WorkflowError> {
        let user = command.user;
        let workflow = self.load(&user, command).await?;
        let step_controls = self.step_control_values(&user, &workflow).await?;
        let preferences = self
            .preferences
            .safe_execute(user.environment_id, user.organization_id)
            .await;

        tracing::debug!(
            workflow_id = %workflow.id,
            steps = workflow.steps.len(),
            with_values = step_controls.len(),
            "Workflow retrieved"
        );

        Ok(to_response_workflow_dto(
            &workflow,
            &step_controls,
            &preferences,
        ))
    }

    async fn load(
        &self,
        user: &UserSession,
        command: GetWorkflowCommand,
    ) -> Result<Workflow, WorkflowError> {
        self.workflows
            .find_by_id(user.environment_id, command.workflow_id)
            .await?
            .filter(|w| w.belongs_to(user.environment_id))
            .ok_or(WorkflowError::NotFound(command.workflow_id))
    }

    /// Step-level control values keyed by step template id.
    ///
    /// Lookups run concurrently; steps without a record are left out and the
    /// first failing lookup fails the whole call.
    async fn step_control_values(
        &self,
        user: &UserSession,
        workflow: &Workflow,
    ) -> Result<HashMap<StepTemplateId, ControlValues>, WorkflowError> {
        let repo = &self.control_values;
        let lookups = workflow.step_template_ids().map(|step_id| {
            let query = ControlValuesQuery {
                environment_id: user.environment_id,
                organization_id: user.organization_id,
                workflow_id: workflow.id,
                step_id,
                level: ControlValuesLevel::StepControls,
            };
            async move { repo.find_first(query).await.map(|found| (step_id, found)) }
        });

        let results = try_join_all(lookups).await?;

        Ok(results
            .into_iter()
            .filter_map(|(step_id, found)| found.map(|values| (step_id, values)))
            .collect())
    }
}
