//! Response envelopes shared by every HTTP endpoint.

use serde::{Deserialize, Serialize};

/// Successful payload wrapper: `{ "data": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Error classification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Unauthorized,
    NotFound,
    InternalError,
    /// Unknown code for forward compatibility
    #[serde(other)]
    Unknown,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_error_codes_are_tolerated() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"code":"RATE_LIMITED","message":"slow down"}"#)
                .expect("deserialize");
        assert_eq!(body.code, ErrorCode::Unknown);
        assert_eq!(body.message, "slow down");
    }

    #[test]
    fn envelope_wraps_payload_in_data() {
        let json = serde_json::to_value(DataEnvelope::new("https://portal")).expect("serialize");
        assert_eq!(json, serde_json::json!({ "data": "https://portal" }));
    }
}
