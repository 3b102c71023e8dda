//! Authentication primitives.
//!
//! - [`jwt`] -- access-token and OAuth state-token signing and validation.
//! - [`google`] -- Google OAuth code exchange behind the [`google::OAuthProvider`] trait.

pub mod google;
pub mod jwt;
