//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A create DTO for inserts (and an update DTO where rows are mutable)

pub mod category;
pub mod design;
pub mod template;
pub mod uploaded_image;
pub mod user;
