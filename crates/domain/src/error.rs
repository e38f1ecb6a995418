//! Domain error type.

use thiserror::Error;

/// Failure to build or parse a domain value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field broke an invariant (empty name, length limit, ...).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Unknown enum tag in stored or wire data.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_context() {
        assert_eq!(
            DomainError::validation("name cannot be empty").to_string(),
            "Validation failed: name cannot be empty"
        );
        assert_eq!(
            DomainError::parse("Unknown step type: fax").to_string(),
            "Parse error: Unknown step type: fax"
        );
    }
}
