pub mod auth;
pub mod employee;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                   register (public)
/// /auth/login                      login (public)
/// /auth/me                         current user (requires auth)
///
/// /employees                       list (public), create (requires auth)
/// /employees/create                empty create form (requires auth)
/// /employees/{id}                  details (public), update, delete (requires auth)
/// /employees/{id}/edit             edit form (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/employees", employee::router())
}
