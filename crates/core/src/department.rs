//! Department an employee belongs to.
//!
//! Stored as TEXT in the `employees.department` column, constrained by a
//! CHECK to the values of [`Department::as_str`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    None,
    HR,
    IT,
    Payroll,
}

/// Every department, in display order.
pub const ALL_DEPARTMENTS: [Department; 4] = [
    Department::None,
    Department::HR,
    Department::IT,
    Department::Payroll,
];

impl Department {
    /// Column value, also the serialized JSON form.
    pub fn as_str(self) -> &'static str {
        match self {
            Department::None => "None",
            Department::HR => "HR",
            Department::IT => "IT",
            Department::Payroll => "Payroll",
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = CoreError;

    /// Case-insensitive; form submissions are not trusted to match the casing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ALL_DEPARTMENTS
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown department '{trimmed}'. Must be one of: None, HR, IT, Payroll"
                ))
            })
    }
}

impl TryFrom<String> for Department {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
