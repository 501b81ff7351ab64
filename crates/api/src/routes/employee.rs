//! Route definitions for the `/employees` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::employee;
use crate::state::AppState;

/// Routes mounted at `/employees`.
///
/// The static `/create` segment takes priority over `/{id}`.
///
/// ```text
/// GET    /            -> index
/// POST   /            -> create (multipart)
/// GET    /create      -> create_form
/// GET    /{id}        -> details
/// PUT    /{id}        -> update (multipart)
/// DELETE /{id}        -> delete
/// GET    /{id}/edit   -> edit_form
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employee::index).post(employee::create))
        .route("/create", get(employee::create_form))
        .route(
            "/{id}",
            get(employee::details)
                .put(employee::update)
                .delete(employee::delete),
        )
        .route("/{id}/edit", get(employee::edit_form))
}
