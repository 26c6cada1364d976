//! Domain logic for the template editor backend.
//!
//! This crate has no database dependency so it can be shared by the
//! repository layer, the HTTP service and any offline tooling.

pub mod assets;
pub mod category;
pub mod data_uri;
pub mod design;
pub mod error;
pub mod images;
pub mod naming;
pub mod ownership;
pub mod types;
pub mod validation;
