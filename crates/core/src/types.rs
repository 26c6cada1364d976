//! Shared primitive types used across the workspace.

use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The authenticated identity an operation executes on behalf of.
///
/// `is_staff` is the elevated-privilege flag; it decides whether an uploaded
/// template becomes an admin template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: DbId,
    pub is_staff: bool,
}

impl Actor {
    pub fn new(user_id: DbId, is_staff: bool) -> Self {
        Self { user_id, is_staff }
    }
}
