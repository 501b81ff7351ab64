//! Binding of multipart employee submissions (create and edit forms).

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use roster_core::error::CoreError;
use roster_core::form::{EditTarget, EmployeeForm, ValidForm};
use roster_core::photo::{validate_photo_name, UploadedPhoto};
use validator::ValidationError;

use crate::error::{AppError, AppResult};

/// Everything a create or edit form may carry.
#[derive(Debug, Default)]
pub struct EmployeeSubmission {
    pub form: EmployeeForm,
    pub photo: Option<UploadedPhoto>,
    /// Why the supplied photo was refused, reported with the field errors.
    pub photo_error: Option<String>,
    /// The edit form's hidden field. Informational only: the stored record
    /// decides which file is replaced.
    pub existing_photo_path: Option<String>,
}

/// Read all multipart fields. Unknown fields are ignored.
///
/// Fields: `name`, `email`, `department`, `existing_photo_path` (text) and
/// `photo` (file). A `photo` part with neither a filename nor content is
/// what browsers send when no file was chosen, and counts as no photo.
pub async fn read_submission(mut multipart: Multipart) -> AppResult<EmployeeSubmission> {
    let mut submission = EmployeeSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => submission.form.name = read_text(field).await?,
            "email" => submission.form.email = read_text(field).await?,
            "department" => {
                let text = read_text(field).await?;
                submission.form.department = Some(text);
            }
            "existing_photo_path" => {
                let text = read_text(field).await?;
                submission.existing_photo_path = Some(text).filter(|t| !t.is_empty());
            }
            "photo" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                // The last non-empty `photo` part decides.
                match validate_photo_name(&file_name) {
                    Ok(file_name) => {
                        submission.photo = Some(UploadedPhoto {
                            file_name,
                            bytes: bytes.to_vec(),
                        });
                        submission.photo_error = None;
                    }
                    Err(e) => {
                        submission.photo = None;
                        submission.photo_error = Some(match e {
                            CoreError::Validation(msg) => msg,
                            other => other.to_string(),
                        });
                    }
                }
            }
            _ => {}
        }
    }

    Ok(submission)
}

async fn read_text(field: Field<'_>) -> AppResult<String> {
    Ok(field.text().await?)
}

/// Validate a submission, returning the checked fields and the photo to store.
///
/// A refused photo fails the whole submission so nothing is persisted. For
/// edit forms, `edit` is echoed with a rejection so the form can be shown
/// again as it was.
pub fn validate_submission(
    submission: EmployeeSubmission,
    edit: Option<EditTarget>,
) -> AppResult<(ValidForm, Option<UploadedPhoto>)> {
    let EmployeeSubmission {
        form,
        photo,
        photo_error,
        ..
    } = submission;

    let extra = photo_error
        .map(|msg| vec![("photo", ValidationError::new("photo").with_message(msg.into()))])
        .unwrap_or_default();

    match form.check_with(extra) {
        Ok(valid) => Ok((valid, photo)),
        Err((form, errors)) => Err(AppError::InvalidForm { form, errors, edit }),
    }
}
