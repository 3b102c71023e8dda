//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the signed-in admin from a JWT Bearer token.

pub mod auth;
