//! Field-level validation helpers shared by request types.

use crate::error::CoreError;

/// Maximum length of template and design names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Trim a required name field, rejecting blank or overlong values.
pub fn require_name(field: &str, raw: Option<&str>) -> Result<String, CoreError> {
    let trimmed = raw.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}
