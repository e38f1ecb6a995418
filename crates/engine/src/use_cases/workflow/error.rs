//! Workflow use case errors.

use notiflow_domain::{DomainError, WorkflowId};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Workflow not found: {0}")]
    NotFound(WorkflowId),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidInput(errors.to_string())
    }
}

impl From<ValidationError> for WorkflowError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput(error.to_string())
    }
}

impl From<DomainError> for WorkflowError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(msg) | DomainError::Parse(msg) | DomainError::InvalidId(msg) => {
                Self::InvalidInput(msg)
            }
        }
    }
}
