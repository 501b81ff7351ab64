//! Records guaranteed present at store initialization.
//!
//! Must agree with the INSERT in `20260301000002_create_employees_table.sql`.

use roster_core::department::Department;
use roster_core::types::DbId;

use crate::models::employee::CreateEmployee;

/// Fixed id of the seeded employee.
pub const SEED_EMPLOYEE_ID: DbId = 2;

/// The seeded employee's field values.
pub fn seed_employee() -> CreateEmployee {
    CreateEmployee {
        name: "Aftab".to_string(),
        email: "aftab@gmail.com".to_string(),
        department: Department::IT,
        photo_path: None,
    }
}
