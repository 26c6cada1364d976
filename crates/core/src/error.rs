use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// Storage and HTTP layers wrap this type; they never invent new failure
/// kinds for conditions listed here.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced template, design or category does not exist.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// The actor does not own the target entity (or it is not visible to them).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Missing or invalid field, malformed canvas document, non-image upload.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An inline data URI did not have the `<mime>;base64,<payload>` shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Re-classify a decoder failure as a validation failure of the
    /// enclosing request, keeping the original message.
    pub fn into_validation(self) -> Self {
        match self {
            CoreError::MalformedInput(msg) => CoreError::Validation(msg),
            other => other,
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
