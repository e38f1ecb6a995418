//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use notiflow_shared::{ErrorBody, ErrorCode};

use crate::infrastructure::ports::RepoError;
use crate::use_cases::workflow::WorkflowError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(ErrorCode::NotFound, msg)),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(ErrorCode::BadRequest, msg),
            ),
            // Details stay in the logs.
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(ErrorCode::InternalError, "Internal error"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "Repository failure");
        ApiError::Internal(e.to_string())
    }
}

impl From<WorkflowError> for ApiError {
    fn from(e: WorkflowError) -> Self {
        match e {
            WorkflowError::NotFound(_) => ApiError::NotFound(e.to_string()),
            WorkflowError::InvalidInput(msg) => ApiError::BadRequest(msg),
            WorkflowError::Repo(repo) => repo.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notiflow_domain::WorkflowId;

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = ApiError::from(WorkflowError::Repo(RepoError::database(
            "workflows.find_by_id",
            "no such table: workflows",
        )))
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.message, "Internal error");
        assert_eq!(body.code, ErrorCode::InternalError);
    }

    #[test]
    fn workflow_errors_map_to_statuses() {
        assert_eq!(
            ApiError::from(WorkflowError::NotFound(WorkflowId::new()))
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(WorkflowError::InvalidInput("name is required".into()))
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }
}
