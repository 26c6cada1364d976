pub mod categories;
pub mod designs;
pub mod editor;
pub mod images;
pub mod templates;
