//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`json::AppJson`] -- JSON request body with rejections mapped to [`crate::error::AppError`].

pub mod auth;
pub mod json;
