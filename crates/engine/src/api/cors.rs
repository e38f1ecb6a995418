//! CORS policy for browser clients.

use axum::http::header::{HeaderName, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use super::session::{ENVIRONMENT_ID_HEADER, ORGANIZATION_ID_HEADER, USER_ID_HEADER};

/// Build the CORS layer from a comma-separated origin list (`*` allows any).
///
/// `None` when no usable origin is configured, leaving CORS off.
pub fn cors_layer(allowed_origins: Option<&str>) -> Option<CorsLayer> {
    let origins = parse_origins(allowed_origins?)?;

    // Identity headers are custom, so browsers preflight every call.
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            HeaderName::from_static(USER_ID_HEADER),
            HeaderName::from_static(ENVIRONMENT_ID_HEADER),
            HeaderName::from_static(ORGANIZATION_ID_HEADER),
            CONTENT_TYPE,
        ]);

    Some(match origins {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(list) => layer.allow_origin(list),
    })
}

#[derive(Debug, PartialEq)]
enum AllowedOrigins {
    Any,
    List(Vec<HeaderValue>),
}

fn parse_origins(raw: &str) -> Option<AllowedOrigins> {
    if raw.trim() == "*" {
        return Some(AllowedOrigins::Any);
    }

    let list: Vec<HeaderValue> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    (!list.is_empty()).then_some(AllowedOrigins::List(list))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_allows_any_origin() {
        assert_eq!(parse_origins(" * "), Some(AllowedOrigins::Any));
    }

    #[test]
    fn list_is_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            parse_origins("https://app.example, ,http://localhost:4200"),
            Some(AllowedOrigins::List(vec![
                HeaderValue::from_static("https://app.example"),
                HeaderValue::from_static("http://localhost:4200"),
            ]))
        );
    }

    #[test]
    fn nothing_configured_disables_cors() {
        assert!(cors_layer(None).is_none());
        assert!(cors_layer(Some(" , ")).is_none());
        assert!(cors_layer(Some("https://app.example")).is_some());
    }
}
