//! Validated commands accepted by the workflow use cases.

use notiflow_domain::{
    slugify, MessageFilter, NotificationGroupId, StepControl, StepTemplateId, StepType,
    StepVariant, WorkflowId, WorkflowOrigin, WorkflowStep, WorkflowType,
};
use notiflow_shared::{CreateWorkflowRequest, StepRequest, StepVariantRequest, UpdateWorkflowRequest};
use validator::Validate;

use super::WorkflowError;
use crate::use_cases::session::UserSession;
use crate::use_cases::validation::require_valid_tags;

/// Fetch one workflow with its step control values and tenant preferences.
#[derive(Debug, Clone, Copy)]
pub struct GetWorkflowCommand {
    pub user: UserSession,
    pub workflow_id: WorkflowId,
}

#[derive(Debug, Clone, Validate)]
pub struct CreateWorkflowCommand {
    pub user: UserSession,
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: String,
    #[validate(length(max = 5000, message = "description is too long"))]
    pub description: Option<String>,
    pub tags: Vec<String>,
    #[validate(required(message = "notificationGroupId is required"))]
    pub notification_group_id: Option<NotificationGroupId>,
    #[validate(length(min = 1, message = "at least one step is required"))]
    pub steps: Vec<NotificationStepCommand>,
    pub active: bool,
    pub draft: Option<bool>,
    pub critical: bool,
    pub controls_schema: Option<serde_json::Value>,
    pub payload_schema: Option<serde_json::Value>,
    pub data: Option<serde_json::Value>,
    pub workflow_type: Option<WorkflowType>,
    pub origin: Option<WorkflowOrigin>,
}

impl CreateWorkflowCommand {
    pub fn from_request(user: UserSession, request: CreateWorkflowRequest) -> Self {
        Self {
            user,
            name: request.name,
            description: request.description,
            tags: request.tags,
            notification_group_id: request.notification_group_id.map(NotificationGroupId::from),
            steps: request.steps.into_iter().map(NotificationStepCommand::from).collect(),
            active: request.active,
            draft: request.draft,
            critical: request.critical,
            controls_schema: request.controls_schema,
            payload_schema: request.payload_schema,
            data: request.data,
            workflow_type: request.workflow_type,
            origin: request.origin,
        }
    }

    /// Field rules plus the tag and step checks the derive cannot express.
    pub fn check(&self) -> Result<(), WorkflowError> {
        self.validate()?;
        require_valid_tags(&self.tags)?;
        validate_steps(&self.steps)
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Validate)]
pub struct UpdateWorkflowCommand {
    pub user: UserSession,
    #[validate(required(message = "workflowId is required"))]
    pub workflow_id: Option<WorkflowId>,
    #[validate(length(min = 1, max = 200, message = "name must be 1 to 200 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 5000, message = "description is too long"))]
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub active: Option<bool>,
    pub critical: Option<bool>,
    #[validate(length(min = 1, max = 200, message = "identifier must be 1 to 200 characters"))]
    pub identifier: Option<String>,
    pub notification_group_id: Option<NotificationGroupId>,
    pub steps: Option<Vec<NotificationStepCommand>>,
    pub controls_schema: Option<serde_json::Value>,
    pub payload_schema: Option<serde_json::Value>,
    pub data: Option<serde_json::Value>,
    pub workflow_type: Option<WorkflowType>,
}

impl UpdateWorkflowCommand {
    /// A command that changes nothing.
    pub fn new(user: UserSession, workflow_id: Option<WorkflowId>) -> Self {
        Self {
            user,
            workflow_id,
            name: None,
            description: None,
            tags: None,
            active: None,
            critical: None,
            identifier: None,
            notification_group_id: None,
            steps: None,
            controls_schema: None,
            payload_schema: None,
            data: None,
            workflow_type: None,
        }
    }

    pub fn from_request(
        user: UserSession,
        workflow_id: WorkflowId,
        request: UpdateWorkflowRequest,
    ) -> Self {
        Self {
            user,
            workflow_id: Some(workflow_id),
            name: request.name,
            description: request.description,
            tags: request.tags,
            active: request.active,
            critical: request.critical,
            identifier: request.identifier,
            notification_group_id: request.notification_group_id.map(NotificationGroupId::from),
            steps: request
                .steps
                .map(|steps| steps.into_iter().map(NotificationStepCommand::from).collect()),
            controls_schema: request.controls_schema,
            payload_schema: request.payload_schema,
            data: request.data,
            workflow_type: request.workflow_type,
        }
    }

    pub fn check(&self) -> Result<(), WorkflowError> {
        self.validate()?;
        if let Some(tags) = &self.tags {
            require_valid_tags(tags)?;
        }
        if let Some(steps) = &self.steps {
            validate_steps(steps)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, serde::Serialize, Validate)]
pub struct NotificationStepCommand {
    pub template_id: Option<StepTemplateId>,
    #[validate(length(min = 1, max = 200, message = "stepId must be 1 to 200 characters"))]
    pub step_id: Option<String>,
    #[validate(length(min = 1, max = 200, message = "step name must be 1 to 200 characters"))]
    pub name: String,
    pub step_type: StepType,
    pub active: Option<bool>,
    pub should_stop_on_fail: Option<bool>,
    pub controls_schema: Option<serde_json::Value>,
    pub output_schema: Option<serde_json::Value>,
    pub filters: Vec<MessageFilter>,
    pub variants: Vec<StepVariantCommand>,
}

impl NotificationStepCommand {
    /// Build the domain step, keeping a supplied template id or minting a fresh one.
    pub fn into_step(self) -> WorkflowStep {
        let step_id = self.step_id.unwrap_or_else(|| slugify(&self.name));
        WorkflowStep {
            template_id: self.template_id.unwrap_or_else(StepTemplateId::new),
            step_id,
            name: self.name,
            step_type: self.step_type,
            active: self.active.unwrap_or(true),
            should_stop_on_fail: self.should_stop_on_fail.unwrap_or(false),
            controls: self.controls_schema.map(|schema| StepControl { schema }),
            output: self.output_schema.map(|schema| StepControl { schema }),
            filters: self.filters,
            variants: self.variants.into_iter().map(StepVariantCommand::into_variant).collect(),
        }
    }
}

impl From<StepRequest> for NotificationStepCommand {
    fn from(request: StepRequest) -> Self {
        Self {
            template_id: request.template_id.map(StepTemplateId::from),
            step_id: request.step_id,
            name: request.name,
            step_type: request.step_type,
            active: request.active,
            should_stop_on_fail: request.should_stop_on_fail,
            controls_schema: request.controls_schema,
            output_schema: request.output_schema,
            filters: request.filters,
            variants: request.variants.into_iter().map(StepVariantCommand::from).collect(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, Validate)]
pub struct StepVariantCommand {
    pub template_id: Option<StepTemplateId>,
    #[validate(length(min = 1, max = 200, message = "variant name must be 1 to 200 characters"))]
    pub name: Option<String>,
    pub step_type: StepType,
    pub active: Option<bool>,
    pub should_stop_on_fail: Option<bool>,
    pub controls_schema: Option<serde_json::Value>,
    pub filters: Vec<MessageFilter>,
}

impl StepVariantCommand {
    pub fn into_variant(self) -> StepVariant {
        StepVariant {
            template_id: self.template_id.unwrap_or_else(StepTemplateId::new),
            name: self.name,
            step_type: self.step_type,
            active: self.active.unwrap_or(true),
            should_stop_on_fail: self.should_stop_on_fail.unwrap_or(false),
            controls: self.controls_schema.map(|schema| StepControl { schema }),
            filters: self.filters,
        }
    }
}

impl From<StepVariantRequest> for StepVariantCommand {
    fn from(request: StepVariantRequest) -> Self {
        Self {
            template_id: request.template_id.map(StepTemplateId::from),
            name: request.name,
            step_type: request.step_type,
            active: request.active,
            should_stop_on_fail: request.should_stop_on_fail,
            controls_schema: request.controls_schema,
            filters: request.filters,
        }
    }
}

fn validate_steps(steps: &[NotificationStepCommand]) -> Result<(), WorkflowError> {
    for (index, step) in steps.iter().enumerate() {
        step.validate()
            .map_err(|e| WorkflowError::InvalidInput(format!("steps[{}]: {}", index, e)))?;
        if step.name.trim().is_empty() {
            return Err(WorkflowError::InvalidInput(format!(
                "steps[{}]: step name cannot be blank",
                index
            )));
        }
        for (variant_index, variant) in step.variants.iter().enumerate() {
            variant.validate().map_err(|e| {
                WorkflowError::InvalidInput(format!(
                    "steps[{}].variants[{}]: {}",
                    index, variant_index, e
                ))
            })?;
        }
    }
    Ok(())
}
