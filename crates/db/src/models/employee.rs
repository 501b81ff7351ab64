//! Employee entity model and DTOs.

use roster_core::department::Department;
use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[sqlx(try_from = "String")]
    pub department: Department,
    /// Stored photo filename, relative to the images directory.
    pub photo_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new employee. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployee {
    pub name: String,
    pub email: String,
    pub department: Department,
    pub photo_path: Option<String>,
}

impl Employee {
    /// Whether the mutable fields of this record equal `input`.
    pub fn matches(&self, input: &CreateEmployee) -> bool {
        self.name == input.name
            && self.email == input.email
            && self.department == input.department
            && self.photo_path == input.photo_path
    }
}
