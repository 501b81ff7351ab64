//! Employee form binding rules shared by the create and edit handlers.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::department::Department;
use crate::types::DbId;

/// Maximum length of an employee name, in characters.
pub const MAX_NAME_LENGTH: usize = 50;

/// The user-editable fields of an employee record as submitted by a client.
///
/// Values are kept as entered (the department as raw text) so a rejected
/// submission can be echoed back for redisplay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct EmployeeForm {
    #[validate(length(min = 1, max = 50, message = "Name is required (at most 50 characters)"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        required(message = "Department is required"),
        custom(function = "validate_department")
    )]
    pub department: Option<String>,
}

/// A form that passed validation, with the department resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    pub name: String,
    pub email: String,
    pub department: Department,
}

/// The parts of the edit form that are not user input: which record is
/// being edited and the photo it currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditTarget {
    pub id: DbId,
    pub existing_photo_path: Option<String>,
}

fn validate_department(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Department>()
        .map(|_| ())
        .map_err(|_| unknown_department())
}

fn unknown_department() -> ValidationError {
    ValidationError::new("department")
        .with_message("Department must be one of: None, HR, IT, Payroll".into())
}

impl EmployeeForm {
    /// Trim surrounding whitespace so a blank name counts as missing.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_string();
        self.department = self
            .department
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        self
    }

    /// Normalize and validate.
    pub fn check(self) -> Result<ValidForm, (EmployeeForm, ValidationErrors)> {
        self.check_with(Vec::new())
    }

    /// Normalize and validate, folding in errors found outside the text
    /// fields (such as a rejected photo upload).
    pub fn check_with(
        self,
        extra: Vec<(&'static str, ValidationError)>,
    ) -> Result<ValidForm, (EmployeeForm, ValidationErrors)> {
        let form = self.normalized();
        let mut errors = form.validate().err().unwrap_or_else(ValidationErrors::new);
        for (field, error) in extra {
            errors.add(field, error);
        }
        if !errors.errors().is_empty() {
            return Err((form, errors));
        }

        let department = form.department.as_deref().unwrap_or_default().parse();
        match department {
            Ok(department) => Ok(ValidForm {
                name: form.name,
                email: form.email,
                department,
            }),
            Err(_) => {
                errors.add("department", unknown_department());
                Err((form, errors))
            }
        }
    }
}

impl From<ValidForm> for EmployeeForm {
    fn from(valid: ValidForm) -> Self {
        Self {
            name: valid.name,
            email: valid.email,
            department: Some(valid.department.as_str().to_string()),
        }
    }
}
