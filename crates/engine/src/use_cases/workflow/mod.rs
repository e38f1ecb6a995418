//! Workflow use cases: retrieval, creation and partial update.

mod commands;
mod create_workflow;
mod error;
mod get_workflow;
mod mapper;
mod update_workflow;

use std::sync::Arc;

pub use commands::{
    CreateWorkflowCommand, GetWorkflowCommand, NotificationStepCommand, StepVariantCommand,
    UpdateWorkflowCommand,
};
pub use create_workflow::CreateWorkflow;
pub use error::WorkflowError;
pub use get_workflow::GetWorkflow;
pub use mapper::to_response_workflow_dto;
pub use update_workflow::UpdateWorkflow;

/// Container for workflow use cases.
pub struct WorkflowUseCases {
    pub get: Arc<GetWorkflow>,
    pub create: Arc<CreateWorkflow>,
    pub update: Arc<UpdateWorkflow>,
}

impl WorkflowUseCases {
    pub fn new(get: Arc<GetWorkflow>, create: Arc<CreateWorkflow>, update: Arc<UpdateWorkflow>) -> Self {
        Self { get, create, update }
    }
}
