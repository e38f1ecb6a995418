//! Create a workflow in the caller's environment.

use std::sync::Arc;

use notiflow_domain::{Description, StepControl, Workflow, WorkflowName};

use super::commands::CreateWorkflowCommand;
use super::WorkflowError;
use crate::infrastructure::ports::{ClockPort, WorkflowRepo};

pub struct CreateWorkflow {
    workflows: Arc<dyn WorkflowRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreateWorkflow {
    pub fn new(workflows: Arc<dyn WorkflowRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { workflows, clock }
    }

    pub async fn execute(&self, command: CreateWorkflowCommand) -> Result<Workflow, WorkflowError> {
        command.check()?;

        let name = WorkflowName::new(command.name)?;
        let notification_group_id = command.notification_group_id.ok_or_else(|| {
            WorkflowError::InvalidInput("notificationGroupId is required".to_string())
        })?;

        let mut workflow = Workflow::new(
            command.user.environment_id,
            command.user.organization_id,
            name,
            notification_group_id,
            self.clock.now(),
        )
        .with_steps(command.steps.into_iter().map(|s| s.into_step()).collect());

        if let Some(description) = command.description {
            workflow.description = Description::new(description)?;
        }
        workflow.tags = command.tags;
        workflow.active = command.active;
        workflow.draft = command.draft.unwrap_or(!command.active);
        workflow.critical = command.critical;
        workflow.workflow_type = command.workflow_type.unwrap_or_default();
        workflow.origin = command.origin.unwrap_or_default();
        workflow.controls = command.controls_schema.map(|schema| StepControl { schema });
        workflow.payload_schema = command.payload_schema;
        workflow.data = command.data;

        self.workflows.save(&workflow).await?;

        tracing::info!(
            workflow_id = %workflow.id,
            environment_id = %workflow.environment_id,
            steps = workflow.steps.len(),
            "Workflow created"
        );

        Ok(workflow)
    }
}
