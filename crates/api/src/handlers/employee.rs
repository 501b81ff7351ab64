//! Handlers for the `/employees` resource.
//!
//! Listing and details are public; showing the forms, submitting them, and
//! deleting require a signed-in user. Successful form submissions answer with
//! a `303 See Other` redirect, like a browser form post.

use std::io;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use roster_core::department::Department;
use roster_core::error::CoreError;
use roster_core::form::{EditTarget, EmployeeForm};
use roster_core::photo::PhotoStore;
use roster_core::types::DbId;
use roster_db::models::employee::{CreateEmployee, Employee};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::submission::{read_submission, validate_submission};
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Title shown on the details page.
pub const DETAILS_PAGE_TITLE: &str = "Employee Details";

/// Payload of the details page.
#[derive(Debug, Serialize)]
pub struct EmployeeDetails {
    pub employee: Employee,
    pub page_title: &'static str,
}

/// Current values used to pre-populate the edit form.
#[derive(Debug, Serialize)]
pub struct EmployeeEditView {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub department: Department,
    pub existing_photo_path: Option<String>,
}

impl From<Employee> for EmployeeEditView {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            department: employee.department,
            existing_photo_path: employee.photo_path,
        }
    }
}

fn details_location(id: DbId) -> String {
    format!("/api/v1/employees/{id}")
}

const INDEX_LOCATION: &str = "/api/v1/employees";

/// GET /api/v1/employees
pub async fn index(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Employee>>>> {
    let employees = state.employees.list_all().await?;
    Ok(Json(DataResponse::new(employees)))
}

/// GET /api/v1/employees/{id}
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EmployeeDetails>>> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(DataResponse::new(EmployeeDetails {
        employee,
        page_title: DETAILS_PAGE_TITLE,
    })))
}

/// GET /api/v1/employees/create
///
/// The empty create form.
pub async fn create_form(RequireAuth(_user): RequireAuth) -> Json<DataResponse<EmployeeForm>> {
    Json(DataResponse::new(EmployeeForm::default()))
}

/// POST /api/v1/employees
///
/// Multipart fields `name`, `email`, `department`, optional file `photo`.
/// Redirects to the new employee's details.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let submission = read_submission(multipart).await?;
    let (valid, photo) = validate_submission(submission, None)?;

    let photo_path = state.photos.save(photo.as_ref()).await?;
    let input = CreateEmployee {
        name: valid.name,
        email: valid.email,
        department: valid.department,
        photo_path,
    };

    let employee = match state.employees.create(&input).await {
        Ok(employee) => employee,
        Err(e) => {
            discard_staged_photo(&state.photos, input.photo_path.as_deref()).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        employee_id = employee.id,
        user_id = user.user_id,
        has_photo = employee.photo_path.is_some(),
        "Employee created"
    );
    Ok(Redirect::to(&details_location(employee.id)))
}

/// GET /api/v1/employees/{id}/edit
pub async fn edit_form(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<EmployeeEditView>>> {
    let employee = find_employee(&state, id).await?;
    Ok(Json(DataResponse::new(employee.into())))
}

/// PUT /api/v1/employees/{id}
///
/// Same fields as create. A new photo is written first, the record is
/// pointed at it, and only then is the previous file deleted, so a failed
/// write never leaves the record without its photo. Redirects to the list.
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let submission = read_submission(multipart).await?;
    let claimed_photo = submission.existing_photo_path.clone();

    let existing = find_employee(&state, id).await?;
    let target = EditTarget {
        id,
        existing_photo_path: existing.photo_path.clone(),
    };
    let (valid, photo) = validate_submission(submission, Some(target))?;

    if claimed_photo.is_some() && claimed_photo != existing.photo_path {
        tracing::warn!(
            employee_id = id,
            claimed = ?claimed_photo,
            stored = ?existing.photo_path,
            "Submitted existing photo path differs from the stored one; using stored"
        );
    }

    let staged = state.photos.save(photo.as_ref()).await?;

    let mut changes = existing.clone();
    changes.name = valid.name;
    changes.email = valid.email;
    changes.department = valid.department;
    if let Some(name) = &staged {
        changes.photo_path = Some(name.clone());
    }

    let updated = match state.employees.update(&changes).await {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            discard_staged_photo(&state.photos, staged.as_deref()).await;
            return Err(CoreError::employee_not_found(id).into());
        }
        Err(e) => {
            discard_staged_photo(&state.photos, staged.as_deref()).await;
            return Err(e.into());
        }
    };

    if staged.is_some() {
        if let Some(old) = existing.photo_path.as_deref() {
            retire_photo(&state.photos, updated.id, old).await;
        }
    }

    tracing::info!(
        employee_id = updated.id,
        user_id = user.user_id,
        photo_replaced = staged.is_some(),
        "Employee updated"
    );
    Ok(Redirect::to(INDEX_LOCATION))
}

/// DELETE /api/v1/employees/{id}
///
/// Removes the record and its photo file.
pub async fn delete(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = state
        .employees
        .delete(id)
        .await?
        .ok_or(AppError::Core(CoreError::employee_not_found(id)))?;

    if let Some(photo) = removed.photo_path.as_deref() {
        retire_photo(&state.photos, removed.id, photo).await;
    }

    tracing::info!(employee_id = id, user_id = user.user_id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_employee(state: &AppState, id: DbId) -> AppResult<Employee> {
    state
        .employees
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::employee_not_found(id)))
}

/// Delete a photo no record refers to any more.
///
/// The record is already consistent at this point, so a failure is logged
/// with the file's location rather than failing the request.
async fn retire_photo(photos: &PhotoStore, employee_id: DbId, name: &str) {
    match photos.remove(name).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(
                employee_id,
                path = %photos.path_for(name).display(),
                "Previous photo was already missing"
            );
        }
        Err(e) => {
            tracing::error!(
                employee_id,
                error = %e,
                path = %photos.path_for(name).display(),
                "Failed to delete previous photo; file is orphaned"
            );
        }
    }
}

/// Remove a photo written for a record change that did not go through.
async fn discard_staged_photo(photos: &PhotoStore, staged: Option<&str>) {
    let Some(name) = staged else {
        return;
    };
    if let Err(e) = photos.remove(name).await {
        tracing::error!(
            error = %e,
            path = %photos.path_for(name).display(),
            "Failed to discard staged photo"
        );
    }
}
