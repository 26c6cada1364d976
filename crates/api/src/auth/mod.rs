//! Actor identity.
//!
//! Sign-in lives outside this service; requests carry an HS256 access token
//! whose claims identify the acting user. See [`jwt`].

pub mod jwt;
