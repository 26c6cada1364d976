//! Access guard for owner-scoped entities.
//!
//! Templates and designs are exclusively owned by the user who created them
//! for mutation purposes. Every owner-scoped operation funnels through
//! [`assert_owner`] so the rejection message and error kind stay uniform.

use crate::error::CoreError;
use crate::types::DbId;

/// An entity carrying an owner reference.
///
/// The owner is optional because admin templates may outlive (or never
/// have) an uploading user.
pub trait Owned {
    /// Entity name used in error messages (e.g. `"Design"`).
    const ENTITY: &'static str;

    fn entity_id(&self) -> DbId;

    fn owner_id(&self) -> Option<DbId>;
}

/// Fail with [`CoreError::PermissionDenied`] unless `actor` owns `entity`.
///
/// An entity without an owner is owned by nobody.
pub fn assert_owner<E: Owned>(entity: &E, actor: DbId) -> Result<(), CoreError> {
    if entity.owner_id() == Some(actor) {
        Ok(())
    } else {
        Err(denied::<E>(entity.entity_id()))
    }
}

/// Resolve an optional owner-scoped lookup.
///
/// Absent rows and rows owned by someone else produce the same
/// [`CoreError::PermissionDenied`] so callers cannot discover which ids exist.
pub fn require_owned<E: Owned>(
    entity: Option<E>,
    id: DbId,
    actor: DbId,
) -> Result<E, CoreError> {
    match entity {
        Some(entity) => {
            assert_owner(&entity, actor)?;
            Ok(entity)
        }
        None => Err(denied::<E>(id)),
    }
}

/// The uniform rejection for an owner-scoped lookup of `E` with `id`.
pub fn denied<E: Owned>(id: DbId) -> CoreError {
    CoreError::PermissionDenied(format!(
        "{} {id} does not exist or is not owned by the current user",
        E::ENTITY
    ))
}
