//! Billing backend errors.

/// Failure talking to the billing backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillingError {
    /// Non-success status, with the server's message when it sent one.
    #[error("Billing request failed with status {status}")]
    Http { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl BillingError {
    /// Message worth showing to the user, if the failure carried one.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Http { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            Self::Network(message) => Some(message.as_str()).filter(|m| !m.trim().is_empty()),
            Self::InvalidResponse(_) | Self::InvalidUrl(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = BillingError::Http {
            status: 402,
            message: Some("Card declined".to_string()),
        };
        assert_eq!(err.user_message(), Some("Card declined"));
    }

    #[test]
    fn blank_or_decoding_errors_have_no_user_message() {
        let blank = BillingError::Http {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), None);
        assert_eq!(BillingError::InvalidResponse("eof".into()).user_message(), None);
    }
}
