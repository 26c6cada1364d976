//! Request extractors for the acting user.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer
//!   token. Use `Option<AuthUser>` on routes that also serve anonymous visitors.

pub mod auth;
