//! Authentication extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::RequireAuth`] -- Marks a route as requiring any signed-in user.

pub mod auth;
