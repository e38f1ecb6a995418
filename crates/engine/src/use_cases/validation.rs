//! Common validation helpers for use cases.

/// Maximum number of tags on a workflow.
pub const MAX_TAGS: usize = 16;

/// Maximum length of a single tag.
pub const MAX_TAG_LENGTH: usize = 50;

/// Validation error type.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{field_name} cannot be empty")]
    Empty { field_name: &'static str },

    #[error("{field_name} exceeds maximum length of {max}")]
    TooLong { field_name: &'static str, max: usize },

    #[error("{field_name} cannot contain more than {max} items")]
    TooMany { field_name: &'static str, max: usize },
}

/// Validate a string is non-empty after trimming.
pub fn require_non_empty(value: &str, field_name: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field_name });
    }
    Ok(())
}

/// Validate a string doesn't exceed max length (in characters).
pub fn require_max_length(
    value: &str,
    max: usize,
    field_name: &'static str,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field_name, max });
    }
    Ok(())
}

/// Validate workflow tags: at most [`MAX_TAGS`], each non-empty and at most
/// [`MAX_TAG_LENGTH`] characters.
pub fn require_valid_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        return Err(ValidationError::TooMany {
            field_name: "tags",
            max: MAX_TAGS,
        });
    }
    for tag in tags {
        require_non_empty(tag, "tag")?;
        require_max_length(tag, MAX_TAG_LENGTH, "tag")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_within_limits_pass() {
        let tags = vec!["billing".to_string(); MAX_TAGS];
        assert!(require_valid_tags(&tags).is_ok());
    }

    #[test]
    fn too_many_tags_fail() {
        let tags = vec!["billing".to_string(); MAX_TAGS + 1];
        assert!(matches!(
            require_valid_tags(&tags),
            Err(ValidationError::TooMany { .. })
        ));
    }

    #[test]
    fn long_or_blank_tag_fails() {
        assert!(matches!(
            require_valid_tags(&["x".repeat(MAX_TAG_LENGTH + 1)]),
            Err(ValidationError::TooLong { .. })
        ));
        assert!(matches!(
            require_valid_tags(&["  ".to_string()]),
            Err(ValidationError::Empty { .. })
        ));
    }
}
