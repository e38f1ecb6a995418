//! Apply a partial update to an existing workflow.

use std::sync::Arc;

use notiflow_domain::{Description, StepControl, Workflow, WorkflowName};

use super::commands::UpdateWorkflowCommand;
use super::WorkflowError;
use crate::infrastructure::ports::{ClockPort, WorkflowRepo};

pub struct UpdateWorkflow {
    workflows: Arc<dyn WorkflowRepo>,
    clock: Arc<dyn ClockPort>,
}

impl UpdateWorkflow {
    pub fn new(workflows: Arc<dyn WorkflowRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { workflows, clock }
    }

    pub async fn execute(&self, command: UpdateWorkflowCommand) -> Result<Workflow, WorkflowError> {
        command.check()?;
        let workflow_id = command
            .workflow_id
            .ok_or_else(|| WorkflowError::InvalidInput("workflowId is required".to_string()))?;
        let environment_id = command.user.environment_id;

        let mut workflow = self
            .workflows
            .find_by_id(environment_id, workflow_id)
            .await?
            .filter(|w| w.belongs_to(environment_id))
            .ok_or(WorkflowError::NotFound(workflow_id))?;

        if let Some(name) = command.name {
            workflow.name = WorkflowName::new(name)?;
        }
        if let Some(description) = command.description {
            workflow.description = Description::new(description)?;
        }
        if let Some(tags) = command.tags {
            workflow.tags = tags;
        }
        if let Some(active) = command.active {
            workflow.active = active;
        }
        if let Some(critical) = command.critical {
            workflow.critical = critical;
        }
        if let Some(identifier) = command.identifier {
            workflow.trigger_identifier = identifier;
        }
        if let Some(group) = command.notification_group_id {
            workflow.notification_group_id = group;
        }
        if let Some(steps) = command.steps {
            workflow.steps = steps.into_iter().map(|s| s.into_step()).collect();
        }
        if let Some(schema) = command.controls_schema {
            workflow.controls = Some(StepControl { schema });
        }
        if let Some(schema) = command.payload_schema {
            workflow.payload_schema = Some(schema);
        }
        if let Some(data) = command.data {
            workflow.data = Some(data);
        }
        if let Some(workflow_type) = command.workflow_type {
            workflow.workflow_type = workflow_type;
        }
        workflow.touch(self.clock.now());

        self.workflows.save(&workflow).await?;

        tracing::info!(workflow_id = %workflow.id, "Workflow updated");

        Ok(workflow)
    }
}
