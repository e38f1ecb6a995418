//! HTTP routes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use notiflow_domain::WorkflowId;
use notiflow_shared::{CreateWorkflowRequest, DataEnvelope, UpdateWorkflowRequest, WorkflowResponseDto};
use std::str::FromStr;
use std::sync::Arc;

use super::ApiError;
use crate::app::App;
use crate::use_cases::workflow::{CreateWorkflowCommand, GetWorkflowCommand, UpdateWorkflowCommand};
use crate::use_cases::UserSession;

type WorkflowBody = Json<DataEnvelope<WorkflowResponseDto>>;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/api/health", get(health))
        .route("/v2/workflows", post(create_workflow))
        .route("/v2/workflows/{id}", get(get_workflow).put(update_workflow))
}

async fn health() -> &'static str {
    "OK"
}

async fn get_workflow(
    State(app): State<Arc<App>>,
    user: UserSession,
    Path(id): Path<String>,
) -> Result<WorkflowBody, ApiError> {
    let workflow = fetch(&app, user, parse_workflow_id(&id)?).await?;
    Ok(Json(DataEnvelope::new(workflow)))
}

async fn create_workflow(
    State(app): State<Arc<App>>,
    user: UserSession,
    Json(request): Json<CreateWorkflowRequest>,
) -> Result<(StatusCode, WorkflowBody), ApiError> {
    let created = app
        .use_cases
        .workflow
        .create
        .execute(CreateWorkflowCommand::from_request(user, request))
        .await?;

    let workflow = fetch(&app, user, created.id).await?;
    Ok((StatusCode::CREATED, Json(DataEnvelope::new(workflow))))
}

async fn update_workflow(
    State(app): State<Arc<App>>,
    user: UserSession,
    Path(id): Path<String>,
    Json(request): Json<UpdateWorkflowRequest>,
) -> Result<WorkflowBody, ApiError> {
    let updated = app
        .use_cases
        .workflow
        .update
        .execute(UpdateWorkflowCommand::from_request(
            user,
            parse_workflow_id(&id)?,
            request,
        ))
        .await?;

    let workflow = fetch(&app, user, updated.id).await?;
    Ok(Json(DataEnvelope::new(workflow)))
}

fn parse_workflow_id(raw: &str) -> Result<WorkflowId, ApiError> {
    WorkflowId::from_str(raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid workflow id: {raw}")))
}

async fn fetch(
    app: &App,
    user: UserSession,
    workflow_id: WorkflowId,
) -> Result<WorkflowResponseDto, ApiError> {
    Ok(app
        .use_cases
        .workflow
        .get
        .execute(GetWorkflowCommand { user, workflow_id })
        .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::session::{ENVIRONMENT_ID_HEADER, ORGANIZATION_ID_HEADER, USER_ID_HEADER};
    use crate::app::Repositories;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::ports::{ControlValuesRepo, PreferencesRepo};
    use crate::infrastructure::sqlite::SqliteStore;
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use chrono::Utc;
    use notiflow_domain::{ControlValues, EnvironmentId, OrganizationId, UserId, WorkflowPreferences};
    use notiflow_shared::ErrorBody;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    struct Harness {
        app: Arc<App>,
        store: SqliteStore,
        user: UserSession,
    }

    impl Harness {
        async fn new() -> Self {
            let store = SqliteStore::in_memory().await.unwrap();
            let app = Arc::new(App::new(
                Repositories::sqlite(&store),
                Arc::new(SystemClock::new()),
            ));
            let user = UserSession::new(UserId::new(), EnvironmentId::new(), OrganizationId::new());
            Self { app, store, user }
        }

        async fn send(&self, user: &UserSession, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder()
                .method(method)
                .uri(uri)
                .header(USER_ID_HEADER, user.user_id.to_string())
                .header(ENVIRONMENT_ID_HEADER, user.environment_id.to_string())
                .header(ORGANIZATION_ID_HEADER, user.organization_id.to_string());
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = routes()
                .with_state(self.app.clone())
                .oneshot(request)
                .await
                .unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        async fn create(&self) -> Value {
            let (status, body) = self
                .send(
                    &self.user,
                    Method::POST,
                    "/v2/workflows",
                    Some(json!({
                        "name": "Password Reset",
                        "notificationGroupId": Uuid::new_v4(),
                        "steps": [
                            { "name": "Email", "type": "email" },
                            { "name": "Sms", "type": "sms" }
                        ],
                        "active": true
                    })),
                )
                .await;
            assert_eq!(status, StatusCode::CREATED);
            body["data"].clone()
        }
    }

    #[tokio::test]
    async fn health_is_ok() {
        let harness = Harness::new().await;
        let response = routes()
            .with_state(harness.app.clone())
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn create_then_get_includes_saved_control_values() {
        let harness = Harness::new().await;
        let created = harness.create().await;
        let id = created["id"].as_str().unwrap().to_string();
        let email_step: Uuid = created["steps"][0]["id"].as_str().unwrap().parse().unwrap();

        harness
            .store
            .control_values()
            .upsert(&ControlValues::for_step(
                harness.user.environment_id,
                harness.user.organization_id,
                id.parse().unwrap(),
                email_step.into(),
                json!({ "subject": "Reset your password" }),
                Utc::now(),
            ))
            .await
            .unwrap();

        let (status, body) = harness
            .send(&harness.user, Method::GET, &format!("/v2/workflows/{}", id), None)
            .await;

        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["workflowId"], "password-reset");
        assert_eq!(data["steps"][0]["controls"]["values"]["subject"], "Reset your password");
        assert!(data["steps"][1]["controls"].get("values").is_none());
        assert_eq!(data["preferences"]["source"], "default");
    }

    #[tokio::test]
    async fn stored_preferences_are_returned() {
        let harness = Harness::new().await;
        let created = harness.create().await;
        let mut prefs = WorkflowPreferences::default();
        prefs.channels.push.enabled = false;
        harness
            .store
            .preferences()
            .save(harness.user.environment_id, harness.user.organization_id, &prefs)
            .await
            .unwrap();

        let (_, body) = harness
            .send(
                &harness.user,
                Method::GET,
                &format!("/v2/workflows/{}", created["id"].as_str().unwrap()),
                None,
            )
            .await;

        assert_eq!(body["data"]["preferences"]["source"], "stored");
        assert_eq!(
            body["data"]["preferences"]["preferences"]["channels"]["push"]["enabled"],
            false
        );
    }

    #[tokio::test]
    async fn other_environment_gets_not_found() {
        let harness = Harness::new().await;
        let created = harness.create().await;
        let outsider = UserSession::new(
            harness.user.user_id,
            EnvironmentId::new(),
            harness.user.organization_id,
        );

        let (status, body) = harness
            .send(
                &outsider,
                Method::GET,
                &format!("/v2/workflows/{}", created["id"].as_str().unwrap()),
                None,
            )
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: ErrorBody = serde_json::from_value(body).unwrap();
        assert!(error.message.contains("not found"));
    }

    #[tokio::test]
    async fn create_with_empty_name_is_bad_request() {
        let harness = Harness::new().await;
        let (status, body) = harness
            .send(
                &harness.user,
                Method::POST,
                "/v2/workflows",
                Some(json!({
                    "name": "",
                    "notificationGroupId": Uuid::new_v4(),
                    "steps": [{ "name": "Email", "type": "email" }]
                })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn update_renames_and_replaces_steps() {
        let harness = Harness::new().await;
        let created = harness.create().await;
        let id = created["id"].as_str().unwrap();
        let kept = created["steps"][0]["id"].clone();

        let (status, body) = harness
            .send(
                &harness.user,
                Method::PUT,
                &format!("/v2/workflows/{}", id),
                Some(json!({
                    "name": "Reset Password",
                    "steps": [{ "templateId": kept, "name": "Email", "type": "email" }]
                })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Reset Password");
        assert_eq!(body["data"]["steps"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["steps"][0]["id"], kept);
    }

    #[tokio::test]
    async fn malformed_workflow_id_is_json_bad_request() {
        let harness = Harness::new().await;

        let (status, body) = harness
            .send(&harness.user, Method::GET, "/v2/workflows/not-a-uuid", None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ErrorBody = serde_json::from_value(body).unwrap();
        assert!(error.message.contains("not-a-uuid"));

        let (status, body) = harness
            .send(
                &harness.user,
                Method::PUT,
                "/v2/workflows/123",
                Some(json!({ "name": "Renamed" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn missing_identity_headers_are_rejected() {
        let harness = Harness::new().await;
        let response = routes()
            .with_state(harness.app.clone())
            .oneshot(
                Request::builder()
                    .uri(format!("/v2/workflows/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
