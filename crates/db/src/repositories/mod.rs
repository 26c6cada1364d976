//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async operations that
//! accept `&PgPool` as the first argument. Methods suffixed `_in` run inside
//! a caller-owned transaction so several writes can commit together.

pub mod category_repo;
pub mod design_repo;
pub mod template_repo;
pub mod uploaded_image_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use design_repo::DesignRepo;
pub use template_repo::TemplateRepo;
pub use uploaded_image_repo::UploadedImageRepo;
pub use user_repo::UserRepo;
