//! Caller identity extraction.
//!
//! The caller is identified by the `X-User-Id`, `X-Environment-Id` and
//! `X-Organization-Id` headers. Authentication itself happens upstream.

use std::str::FromStr;

use axum::{extract::FromRequestParts, http::request::Parts};
use notiflow_domain::{EnvironmentId, OrganizationId, UserId};

use super::ApiError;
use crate::use_cases::UserSession;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const ENVIRONMENT_ID_HEADER: &str = "x-environment-id";
pub const ORGANIZATION_ID_HEADER: &str = "x-organization-id";

impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(UserSession::new(
            header_id::<UserId>(parts, USER_ID_HEADER)?,
            header_id::<EnvironmentId>(parts, ENVIRONMENT_ID_HEADER)?,
            header_id::<OrganizationId>(parts, ORGANIZATION_ID_HEADER)?,
        ))
    }
}

fn header_id<T>(parts: &Parts, name: &'static str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing {} header", name)))?;

    value
        .parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid {} header: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn whoami(session: UserSession) -> String {
        session.environment_id.to_string()
    }

    #[tokio::test]
    async fn extracts_session_from_headers() {
        let env = EnvironmentId::new();
        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, UserId::new().to_string())
            .header(ENVIRONMENT_ID_HEADER, env.to_string())
            .header(ORGANIZATION_ID_HEADER, OrganizationId::new().to_string())
            .body(Body::empty())
            .unwrap();

        let response = Router::new()
            .route("/", get(whoami))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], env.to_string().as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_bad_request() {
        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, UserId::new().to_string())
            .body(Body::empty())
            .unwrap();

        let response = Router::new()
            .route("/", get(whoami))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        let request = Request::builder()
            .uri("/")
            .header(USER_ID_HEADER, "alice")
            .header(ENVIRONMENT_ID_HEADER, EnvironmentId::new().to_string())
            .header(ORGANIZATION_ID_HEADER, OrganizationId::new().to_string())
            .body(Body::empty())
            .unwrap();

        let response = Router::new()
            .route("/", get(whoami))
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
