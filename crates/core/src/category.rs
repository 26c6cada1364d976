//! Template category rules.
//!
//! Category names are matched exactly (case-sensitive) after trimming
//! surrounding whitespace: `" Birthday "` and `"Birthday"` are the same
//! category, `"birthday"` is a different one.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum category name length after trimming.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Trim a free-text category name.
///
/// Returns `Ok(None)` when nothing remains ("no category"), and a
/// validation error when the trimmed name is too long.
pub fn normalize_category_name(raw: &str) -> Result<Option<String>, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// How a template upload chooses its category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategorySelection {
    /// Use an already registered category.
    Existing { id: DbId },
    /// Resolve (or create) a category by free-text name.
    New { name: String },
    /// Leave the template uncategorized.
    None,
}

impl CategorySelection {
    /// Build a selection from the two independent upload form fields.
    ///
    /// Free text wins when both are given; blank free text counts as absent.
    pub fn from_form(select_category: Option<DbId>, custom_category: Option<&str>) -> Self {
        match (custom_category.map(str::trim), select_category) {
            (Some(name), _) if !name.is_empty() => CategorySelection::New {
                name: name.to_string(),
            },
            (_, Some(id)) => CategorySelection::Existing { id },
            _ => CategorySelection::None,
        }
    }
}
