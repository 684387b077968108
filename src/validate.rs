use crate::models::document::{STATUS_ARCHIVED, STATUS_CURRENT};

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a document status value.
pub fn validate_status(value: &str) -> Option<String> {
    if value != STATUS_CURRENT && value != STATUS_ARCHIVED {
        return Some(format!(
            "Status must be '{STATUS_CURRENT}' or '{STATUS_ARCHIVED}'"
        ));
    }
    None
}
